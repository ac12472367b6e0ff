//! Session lifecycle state machine
//!
//! [`Session`] drives one authenticated interaction context against the
//! platform's private web API: unauthenticated → authenticating →
//! authenticated → logged-out. All the cookie and header bookkeeping the
//! remote anti-automation checks expect (baseline cookie set, spoofed
//! browser headers, CSRF token echo) happens here.
//!
//! A session is built from injected [`Settings`], so tests can point
//! `base_url` at a mock server. Every mutating operation takes `&mut self`,
//! which makes the single-active-attempt contract a compile-time property.

use crate::{
    Error, Result,
    config::Settings,
    session::cookies::{CSRF_COOKIE, CookieJar},
    session::pacing::{Pacer, TokioPacer},
    types::{LoginForm, LogoutForm},
};
use reqwest::header::{
    ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, CONTENT_LENGTH, COOKIE, HOST, HeaderMap,
    HeaderName, HeaderValue, ORIGIN, REFERER, USER_AGENT,
};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outgoing header carrying the CSRF token
const X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrftoken");

/// Convenience type alias for a session with the production pacer
pub type Session = SessionGeneric<TokioPacer>;

/// Session manager for the platform's private web API
#[derive(Debug)]
pub struct SessionGeneric<P: Pacer = TokioPacer> {
    /// Configuration settings
    settings: Arc<Settings>,
    /// HTTP client for requests
    client: Client,
    /// Explicit cookie jar sent with every request
    jar: CookieJar,
    /// Outgoing header set (baseline + CSRF token)
    headers: HeaderMap,
    /// Current anti-forgery token, if one has been issued
    csrf_token: Option<String>,
    /// Username of the current or most recent login attempt
    username: Option<String>,
    /// Whether the session holds valid authentication
    logged: bool,
    /// Settling-delay strategy
    pacer: P,
}

impl SessionGeneric<TokioPacer> {
    /// Creates a new session with the given configuration and the
    /// production pacer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use instagram_web_session::{Session, Settings};
    ///
    /// let settings = Settings::default();
    /// let session = Session::new(settings).unwrap();
    /// assert!(!session.logged());
    /// ```
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_pacer(settings, TokioPacer)
    }
}

impl<P: Pacer> SessionGeneric<P> {
    /// Creates a new session with a custom pacing strategy.
    ///
    /// Tests substitute [`crate::NoopPacer`] to skip the settling delays.
    pub fn with_pacer(settings: Settings, pacer: P) -> Result<Self> {
        settings.validate()?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(settings.http.connect_timeout))
            .timeout(Duration::from_secs(settings.http.request_timeout))
            .build()?;

        let headers = baseline_headers(&settings)?;

        Ok(Self {
            settings: Arc::new(settings),
            client,
            jar: CookieJar::with_baseline(),
            headers,
            csrf_token: None,
            username: None,
            logged: false,
            pacer,
        })
    }

    /// Whether the session currently holds valid authentication
    pub fn logged(&self) -> bool {
        self.logged
    }

    /// Username of the current or most recent login attempt
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The session's current CSRF token, if one has been issued
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// The session's cookie jar
    pub fn cookies(&self) -> &CookieJar {
        &self.jar
    }

    /// The session's configuration
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Restores cookies and headers to their baseline values and loads a
    /// fresh CSRF token from the platform's root page.
    ///
    /// The token lands both in the jar (via the response cookie) and in the
    /// outgoing `X-CSRFToken` header. A settling delay follows the request.
    pub async fn reset(&mut self) -> Result<()> {
        self.jar.reset_to_baseline();
        self.headers = baseline_headers(&self.settings)?;

        let root = self.settings.endpoints.root_url();
        let response = self.get(&root).await?;
        let token = csrf_from_response(&response)
            .ok_or_else(|| Error::protocol("csrftoken cookie", &root))?;
        self.store_csrf(token)?;

        debug!("session reset, fresh CSRF token stored");
        self.settle().await;
        Ok(())
    }

    /// Performs login for the session.
    ///
    /// An already-authenticated session is logged out first, then the
    /// session is reset and the credentials are posted. The boolean outcome
    /// comes from the verification check; the username is recorded either
    /// way so later diagnostics can name the account. Transport failures
    /// propagate as [`Error::Http`].
    pub async fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        if self.logged {
            self.logout().await?;
        }
        self.reset().await?;

        let url = self.settings.endpoints.login_url();
        let form = LoginForm { username, password };
        let response = self.post_form(&url, &form).await?;

        let token = csrf_from_response(&response)
            .ok_or_else(|| Error::protocol("csrftoken cookie", &url))?;
        self.store_csrf(token)?;
        self.settle().await;

        self.logged = self.check_login(username, &response).await?;
        self.username = Some(username.to_string());

        if self.logged {
            info!(username, "login succeeded");
        }
        Ok(self.logged)
    }

    /// Logs the session out.
    ///
    /// The logout POST goes through the session's own plumbing, carrying
    /// the accumulated cookie jar and the CSRF header, so the remote
    /// session is actually invalidated. Any delivered response clears the
    /// local `logged` state regardless of its status code.
    pub async fn logout(&mut self) -> Result<StatusCode> {
        let url = self.settings.endpoints.logout_url();
        let token = self.csrf_token.clone().unwrap_or_default();
        let form = LogoutForm {
            csrfmiddlewaretoken: &token,
        };
        let response = self.post_form(&url, &form).await?;

        self.logged = false;
        info!(status = %response.status(), "logged out");
        Ok(response.status())
    }

    /// Checks whether a login attempt actually authenticated the session.
    ///
    /// The login response must be 200, and a follow-up GET of the root page
    /// must contain the literal username. This mirrors what the platform
    /// exposes without a structured API and is brittle by nature: a page
    /// redesign can break it without any credential problem.
    async fn check_login(&mut self, username: &str, response: &Response) -> Result<bool> {
        if response.status() != StatusCode::OK {
            warn!(
                status = %response.status(),
                "can't login: unexpected status code"
            );
            return Ok(false);
        }

        let root = self.settings.endpoints.root_url();
        let page = self.get(&root).await?.text().await?;
        if page.contains(username) {
            Ok(true)
        } else {
            warn!("can't login: invalid login or password");
            Ok(false)
        }
    }

    /// Issue a GET with the session's headers and cookies
    pub(crate) async fn get(&mut self, url: &str) -> Result<Response> {
        let headers = self.request_headers(false)?;
        let response = self.client.get(url).headers(headers).send().await?;
        self.jar.update_from_response(&response);
        Ok(response)
    }

    /// Issue a form-encoded POST with the session's headers and cookies
    pub(crate) async fn post_form<T: Serialize + ?Sized>(
        &mut self,
        url: &str,
        form: &T,
    ) -> Result<Response> {
        let headers = self.request_headers(true)?;
        let response = self
            .client
            .post(url)
            .headers(headers)
            .form(form)
            .send()
            .await?;
        self.jar.update_from_response(&response);
        Ok(response)
    }

    /// Issue a bodyless POST; the baseline `Content-Length: 0` header
    /// applies
    pub(crate) async fn post_empty(&mut self, url: &str) -> Result<Response> {
        let headers = self.request_headers(false)?;
        let response = self.client.post(url).headers(headers).send().await?;
        self.jar.update_from_response(&response);
        Ok(response)
    }

    /// Snapshot the outgoing headers for one request
    fn request_headers(&self, has_body: bool) -> Result<HeaderMap> {
        let mut headers = self.headers.clone();
        if has_body {
            // reqwest computes Content-Length for form bodies
            headers.remove(CONTENT_LENGTH);
        }
        if !self.jar.is_empty() {
            let value = HeaderValue::from_str(&self.jar.header_value())
                .map_err(|_| Error::protocol("header-encodable cookie values", "cookie jar"))?;
            headers.insert(COOKIE, value);
        }
        Ok(headers)
    }

    /// Store a CSRF token and echo it in the outgoing header set
    fn store_csrf(&mut self, token: String) -> Result<()> {
        let value = HeaderValue::from_str(&token)
            .map_err(|_| Error::protocol("header-encodable csrftoken", "response cookies"))?;
        self.headers.insert(X_CSRF_TOKEN, value);
        self.csrf_token = Some(token);
        Ok(())
    }

    /// Apply the configured settling delay
    async fn settle(&self) {
        self.pacer
            .wait(Duration::from_millis(self.settings.pacing.settle_delay_ms))
            .await;
    }
}

/// Build the documented baseline header set from the settings
fn baseline_headers(settings: &Settings) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&settings.http.accept_language)
            .map_err(|_| Error::config("accept_language", "not a valid header value"))?,
    );
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
    headers.insert(
        HOST,
        HeaderValue::from_str(&settings.endpoints.host_header()?)
            .map_err(|_| Error::config("base_url", "host is not a valid header value"))?,
    );
    headers.insert(
        ORIGIN,
        HeaderValue::from_str(&settings.endpoints.origin_header()?)
            .map_err(|_| Error::config("base_url", "origin is not a valid header value"))?,
    );
    headers.insert(
        REFERER,
        HeaderValue::from_str(&settings.endpoints.root_url())
            .map_err(|_| Error::config("base_url", "referer is not a valid header value"))?,
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&settings.http.user_agent)
            .map_err(|_| Error::config("user_agent", "not a valid header value"))?,
    );
    headers.insert(
        HeaderName::from_static("x-instagram-ajax"),
        HeaderValue::from_static("1"),
    );
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    Ok(headers)
}

/// Extract a non-empty csrftoken value from a response's cookies
fn csrf_from_response(response: &Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name() == CSRF_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::cookies::BASELINE_COOKIES;
    use crate::session::pacing::NoopPacer;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_settings(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.endpoints.base_url = format!("{}/", server.uri());
        settings.pacing.settle_delay_ms = 0;
        settings
    }

    fn test_session(server: &MockServer) -> SessionGeneric<NoopPacer> {
        SessionGeneric::with_pacer(test_settings(server), NoopPacer).unwrap()
    }

    async fn mount_root(server: &MockServer, body: &str) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "csrftoken=rootcsrf; Path=/")
                    .set_body_string(body),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fresh_session_is_logged_out() {
        let server = MockServer::start().await;
        let session = test_session(&server);
        assert!(!session.logged());
        assert!(session.username().is_none());
        assert!(session.csrf_token().is_none());
    }

    #[tokio::test]
    async fn test_new_session_rejects_invalid_settings() {
        let mut settings = Settings::default();
        settings.endpoints.base_url = "not a url".to_string();
        assert!(Session::new(settings).is_err());
    }

    #[tokio::test]
    async fn test_reset_stores_csrf_and_keeps_baseline() {
        let server = MockServer::start().await;
        mount_root(&server, "<html>welcome</html>").await;

        let mut session = test_session(&server);
        session.reset().await.unwrap();

        assert_eq!(session.csrf_token(), Some("rootcsrf"));
        for (name, _) in BASELINE_COOKIES {
            assert!(
                session.cookies().get(name).is_some(),
                "baseline cookie {} missing after reset",
                name
            );
        }
        // The response cookie lands in the jar as well
        assert_eq!(session.cookies().get("csrftoken"), Some("rootcsrf"));
    }

    #[tokio::test]
    async fn test_reset_sends_browser_headers() {
        let server = MockServer::start().await;
        mount_root(&server, "ok").await;

        let mut session = test_session(&server);
        session.reset().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let root_get = &requests[0];
        assert_eq!(
            root_get.headers.get("x-requested-with").unwrap(),
            "XMLHttpRequest"
        );
        assert_eq!(root_get.headers.get("x-instagram-ajax").unwrap(), "1");
        let user_agent = root_get.headers.get("user-agent").unwrap();
        assert!(user_agent.to_str().unwrap().contains("Chrome"));
        // The baseline jar rides along on the very first request
        let cookie_header = root_get.headers.get("cookie").unwrap().to_str().unwrap();
        assert!(cookie_header.contains("ig_pr=1"));
        assert!(cookie_header.contains("ig_vw=1920"));
    }

    #[tokio::test]
    async fn test_reset_without_csrf_cookie_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("no cookies here"))
            .mount(&server)
            .await;

        let mut session = test_session(&server);
        let result = session.reset().await;
        assert!(matches!(result, Err(Error::Protocol { .. })));
    }

    #[tokio::test]
    async fn test_login_rejected_status_returns_false() {
        let server = MockServer::start().await;
        mount_root(&server, "anonymous landing page").await;
        Mock::given(method("POST"))
            .and(path("/accounts/login/ajax/"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("set-cookie", "csrftoken=denied; Path=/"),
            )
            .mount(&server)
            .await;

        let mut session = test_session(&server);
        let logged = session.login("myuser", "badpass").await.unwrap();

        assert!(!logged);
        assert!(!session.logged());
        // The attempted username is recorded even on failure
        assert_eq!(session.username(), Some("myuser"));
    }

    #[tokio::test]
    async fn test_login_username_absent_returns_false() {
        let server = MockServer::start().await;
        mount_root(&server, "some page that does not mention the account").await;
        Mock::given(method("POST"))
            .and(path("/accounts/login/ajax/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "csrftoken=abc123; Path=/"),
            )
            .mount(&server)
            .await;

        let mut session = test_session(&server);
        let logged = session.login("myuser", "secret").await.unwrap();

        assert!(!logged);
        assert_eq!(session.csrf_token(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_login_missing_csrf_cookie_is_protocol_error() {
        let server = MockServer::start().await;
        mount_root(&server, "myuser").await;
        Mock::given(method("POST"))
            .and(path("/accounts/login/ajax/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut session = test_session(&server);
        let result = session.login("myuser", "secret").await;
        assert!(matches!(result, Err(Error::Protocol { .. })));
    }

    #[tokio::test]
    async fn test_empty_csrf_cookie_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).insert_header("set-cookie", "csrftoken=; Path=/"),
            )
            .mount(&server)
            .await;

        let mut session = test_session(&server);
        let result = session.reset().await;
        assert!(matches!(result, Err(Error::Protocol { .. })));
    }
}
