//! Error handling for the session manager
//!
//! Transport failures propagate, protocol surprises become explicit
//! [`Error::Protocol`] values, and authentication rejections stay out of
//! the error channel entirely.

pub mod types;

pub use types::{Error, Result};
