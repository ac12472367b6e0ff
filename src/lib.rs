//! Instagram Web Session - Rust session manager
//!
//! A session manager for Instagram's private web API. It establishes a
//! browser-like session, performs credential-based login, maintains cookies
//! and CSRF tokens across calls, and tears the session down on logout.
//!
//! # Features
//!
//! - **Browser-like sessions**: baseline cookie set and spoofed browser
//!   headers matching what the platform's anti-automation checks expect
//! - **CSRF propagation**: tokens extracted from response cookies and
//!   echoed back as `X-CSRFToken` on every state-changing request
//! - **Injectable configuration**: every endpoint derives from one
//!   `base_url`, so tests can run the whole session against a mock server
//! - **Injectable pacing**: the settling delay between requests is a trait,
//!   with a real Tokio sleep in production and a no-op in tests
//! - **Pre-authenticated actions**: thin like/comment/follow wrappers over
//!   the authenticated session
//!
//! # Architecture
//!
//! The crate is a single library around the [`Session`] lifecycle state
//! machine: unauthenticated → authenticating → authenticated → logged-out.
//! A session may be reused for multiple login/logout cycles.
//!
//! # Usage
//!
//! ```rust
//! use instagram_web_session::{Session, Settings};
//!
//! # async fn example() -> instagram_web_session::Result<()> {
//! let settings = Settings::default();
//! let mut session = Session::new(settings)?;
//!
//! if session.login("myuser", "secret").await? {
//!     session.like("1234567890").await?;
//!     session.logout().await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod types;

pub use config::{ConfigLoader, Settings};
pub use error::{Error, Result};
pub use session::{CookieJar, NoopPacer, Pacer, Session, SessionGeneric, TokioPacer};
