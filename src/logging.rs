//! Logging initialization
//!
//! Diagnostics go through `tracing`; the configured verbosity selects the
//! filter. Callers embedding the crate in a larger application can skip
//! [`init`] and install their own subscriber instead.

use crate::{Result, config::LoggingSettings};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber from logging settings.
///
/// Filter precedence:
/// 1. `verbose = true` -> debug level
/// 2. `RUST_LOG` environment variable
/// 3. Configured `logging.level`
pub fn init(settings: &LoggingSettings) -> Result<()> {
    let env_filter = if settings.verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(&settings.level)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| {
            crate::Error::config("logging", &format!("Failed to set subscriber: {}", e))
        })?;

    Ok(())
}
