//! Error types for session management
//!
//! Classifies failures along the boundaries the session cares about:
//! transport, protocol surprises from the remote side, and configuration.
//! An authentication rejection is not an error: `login` reports it as a
//! `false` return plus a diagnostic.

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport errors (DNS, connection, TLS, timeouts)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote response did not carry something the protocol requires
    #[error("Protocol error: missing {expected} in response from {endpoint}")]
    Protocol {
        /// What the response was expected to contain
        expected: String,
        /// The endpoint that produced the response
        endpoint: String,
    },

    /// An operation that requires authentication was called on a
    /// logged-out session
    #[error("Session is not logged in")]
    NotLoggedIn,

    /// Configuration errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a protocol error
    pub fn protocol<S: Into<String>>(expected: S, endpoint: S) -> Self {
        Self::Protocol {
            expected: expected.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(field: S, message: S) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(..) => "http",
            Error::Protocol { .. } => "protocol",
            Error::NotLoggedIn => "auth",
            Error::Config { .. } => "config",
            Error::Toml(..) => "toml",
            Error::Url(..) => "url",
            Error::Io(..) => "io",
        }
    }
}
