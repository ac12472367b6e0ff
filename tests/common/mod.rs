//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use instagram_web_session::{NoopPacer, SessionGeneric, Settings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test helper functions
pub mod helpers {
    use super::*;

    /// Create test settings pointed at the mock server, with no settling delay
    pub fn settings_for(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.endpoints.base_url = format!("{}/", server.uri());
        settings.pacing.settle_delay_ms = 0;
        settings
    }

    /// Create a test session against the mock server with a no-op pacer
    pub fn session_for(server: &MockServer) -> SessionGeneric<NoopPacer> {
        SessionGeneric::with_pacer(settings_for(server), NoopPacer)
            .expect("test settings must be valid")
    }
}

/// Mock endpoint factory for the platform
pub struct MockPlatform;

impl MockPlatform {
    /// Mount the root page: 200 with a fresh CSRF cookie and the given body
    pub async fn mount_root(server: &MockServer, body: &str) {
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

    /// Mount the login endpoint with the given status and CSRF cookie value
    pub async fn mount_login(server: &MockServer, status: u16, token: &str) {
        Mock::given(method("POST"))
            .and(path("/accounts/login/ajax/"))
            .respond_with(
                ResponseTemplate::new(status)
                    .insert_header("set-cookie", format!("csrftoken={}; Path=/", token).as_str()),
            )
            .mount(server)
            .await;
    }

    /// Mount the login endpoint issuing both a CSRF cookie and a session id
    pub async fn mount_login_with_sessionid(server: &MockServer, token: &str, sessionid: &str) {
        Mock::given(method("POST"))
            .and(path("/accounts/login/ajax/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .append_header("set-cookie", format!("csrftoken={}; Path=/", token).as_str())
                    .append_header(
                        "set-cookie",
                        format!("sessionid={}; Path=/", sessionid).as_str(),
                    ),
            )
            .mount(server)
            .await;
    }

    /// Mount the logout endpoint with the given status
    pub async fn mount_logout(server: &MockServer, status: u16) {
        Mock::given(method("POST"))
            .and(path("/accounts/logout/"))
            .respond_with(ResponseTemplate::new(status))
            .mount(server)
            .await;
    }
}

/// Test utilities
pub struct TestUtils;

impl TestUtils {
    /// Initialize test logging
    pub fn init_logger() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();
    }
}
