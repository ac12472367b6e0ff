//! Session management for the platform's private web API
//!
//! This module holds the session lifecycle state machine, the explicit
//! cookie jar, the injectable pacing strategy, and the thin
//! pre-authenticated action wrappers.

mod actions;
pub mod cookies;
pub mod manager;
pub mod pacing;

pub use cookies::CookieJar;
pub use manager::{Session, SessionGeneric};
pub use pacing::{NoopPacer, Pacer, TokioPacer};
