//! Configuration for the session manager
//!
//! Everything the original kept as module-level constants (endpoint URLs,
//! spoofed browser headers, the settling delay) lives here as an injectable
//! structure, loadable from a TOML file with environment variable
//! overrides. Tests point `base_url` at a mock server and the whole
//! session follows.

use serde::{Deserialize, Serialize};

// Helper functions for serde defaults
fn default_base_url() -> String {
    "https://www.instagram.com/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/48.0.2564.103 Safari/537.36"
        .to_string()
}

fn default_accept_language() -> String {
    "ru-RU,ru;q=0.8,en-US;q=0.6,en;q=0.4".to_string()
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    60
}

fn default_settle_delay_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Main configuration settings for the session manager
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Endpoint configuration
    #[serde(default)]
    pub endpoints: EndpointSettings,
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpSettings,
    /// Request pacing configuration
    #[serde(default)]
    pub pacing: PacingSettings,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Remote endpoint configuration
///
/// Every API URL is derived from `base_url`, so overriding that one value
/// redirects the entire session (including Host/Origin/Referer headers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointSettings {
    /// Base URL of the platform
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Spoofed browser user agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Accept-Language header value
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

/// Request pacing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingSettings {
    /// Settling delay after token-refreshing requests, in milliseconds
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
            format: default_log_format(),
        }
    }
}

impl EndpointSettings {
    /// Join a path onto the base URL
    fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Root page URL (source of fresh CSRF cookies)
    pub fn root_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    /// AJAX login endpoint
    pub fn login_url(&self) -> String {
        self.join("accounts/login/ajax/")
    }

    /// Logout endpoint
    pub fn logout_url(&self) -> String {
        self.join("accounts/logout/")
    }

    /// Tag exploration page
    pub fn tag_url(&self, tag: &str) -> String {
        self.join(&format!("explore/tags/{}/", tag))
    }

    /// Like endpoint for a media item
    pub fn like_url(&self, media_id: &str) -> String {
        self.join(&format!("web/likes/{}/like/", media_id))
    }

    /// Unlike endpoint for a media item
    pub fn unlike_url(&self, media_id: &str) -> String {
        self.join(&format!("web/likes/{}/unlike/", media_id))
    }

    /// Comment endpoint for a media item
    pub fn comment_url(&self, media_id: &str) -> String {
        self.join(&format!("web/comments/{}/add/", media_id))
    }

    /// Follow endpoint for a user id
    pub fn follow_url(&self, user_id: &str) -> String {
        self.join(&format!("web/friendships/{}/follow/", user_id))
    }

    /// Unfollow endpoint for a user id
    pub fn unfollow_url(&self, user_id: &str) -> String {
        self.join(&format!("web/friendships/{}/unfollow/", user_id))
    }

    /// JSON media info endpoint for a shortcode
    pub fn media_info_url(&self, shortcode: &str) -> String {
        self.join(&format!("p/{}/?__a=1", shortcode))
    }

    /// JSON user info endpoint for a username
    pub fn user_info_url(&self, username: &str) -> String {
        self.join(&format!("{}/?__a=1", username))
    }

    /// Value for the outgoing Host header, derived from the base URL
    pub fn host_header(&self) -> crate::Result<String> {
        let url = url::Url::parse(&self.base_url)?;
        let host = url
            .host_str()
            .ok_or_else(|| crate::Error::config("base_url", "must contain a host"))?;
        Ok(match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }

    /// Value for the outgoing Origin header (scheme + authority, no path)
    pub fn origin_header(&self) -> crate::Result<String> {
        let url = url::Url::parse(&self.base_url)?;
        let host = url
            .host_str()
            .ok_or_else(|| crate::Error::config("base_url", "must contain a host"))?;
        Ok(match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        })
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut settings = Self::default();

        if let Ok(base_url) = std::env::var("IG_BASE_URL") {
            settings.endpoints.base_url = base_url;
        }

        if let Ok(user_agent) = std::env::var("IG_USER_AGENT") {
            settings.http.user_agent = user_agent;
        }

        if let Ok(timeout) = std::env::var("IG_REQUEST_TIMEOUT") {
            settings.http.request_timeout = timeout.parse().map_err(|e| {
                crate::Error::config("IG_REQUEST_TIMEOUT", &format!("Invalid timeout: {}", e))
            })?;
        }

        if let Ok(delay) = std::env::var("IG_SETTLE_DELAY_MS") {
            settings.pacing.settle_delay_ms = delay.parse().map_err(|e| {
                crate::Error::config("IG_SETTLE_DELAY_MS", &format!("Invalid delay: {}", e))
            })?;
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            settings.logging.level = level;
        }

        if let Ok(verbose) = std::env::var("VERBOSE") {
            settings.logging.verbose = verbose.parse().unwrap_or(false);
        }

        Ok(settings)
    }

    /// Load settings from a TOML configuration file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::Error::config("file", &format!("Failed to read config file: {}", e))
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| {
            crate::Error::config("file", &format!("Failed to parse config file: {}", e))
        })?;

        Ok(settings)
    }

    /// Merge settings with environment variable overrides
    pub fn merge_with_env(mut self) -> crate::Result<Self> {
        let env_settings = Self::from_env()?;
        let defaults = Self::default();

        // Merge only non-default values from environment
        if env_settings.endpoints.base_url != defaults.endpoints.base_url {
            self.endpoints.base_url = env_settings.endpoints.base_url;
        }

        if env_settings.http.user_agent != defaults.http.user_agent {
            self.http.user_agent = env_settings.http.user_agent;
        }

        if env_settings.http.request_timeout != defaults.http.request_timeout {
            self.http.request_timeout = env_settings.http.request_timeout;
        }

        if env_settings.pacing.settle_delay_ms != defaults.pacing.settle_delay_ms {
            self.pacing.settle_delay_ms = env_settings.pacing.settle_delay_ms;
        }

        if env_settings.logging.level != defaults.logging.level {
            self.logging.level = env_settings.logging.level;
        }

        if env_settings.logging.verbose != defaults.logging.verbose {
            self.logging.verbose = env_settings.logging.verbose;
        }

        Ok(self)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> crate::Result<()> {
        // The base URL must parse and carry a host: Host/Origin/Referer
        // headers are derived from it.
        let url = url::Url::parse(&self.endpoints.base_url).map_err(|e| {
            crate::Error::config(
                "base_url",
                &format!("Invalid URL '{}': {}", self.endpoints.base_url, e),
            )
        })?;
        if url.host_str().is_none() {
            return Err(crate::Error::config(
                "base_url",
                "Base URL must contain a host",
            ));
        }

        if self.http.connect_timeout == 0 {
            return Err(crate::Error::config(
                "connect_timeout",
                "Invalid connect timeout: cannot be 0",
            ));
        }

        if self.http.request_timeout == 0 {
            return Err(crate::Error::config(
                "request_timeout",
                "Invalid request timeout: cannot be 0",
            ));
        }

        // Validate log level
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(crate::Error::config(
                    "log_level",
                    &format!("Invalid log level: {}", self.logging.level),
                ));
            }
        }

        Ok(())
    }
}
