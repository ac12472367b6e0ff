//! Injectable pacing strategy
//!
//! The platform's abuse heuristics react to machine-fast request bursts,
//! so token-refreshing requests are followed by a settling delay. The
//! delay is a trait so production sleeps for real while tests substitute
//! a no-op.

use std::time::Duration;

/// Strategy for waiting out the settling delay between requests
///
/// ```rust
/// use instagram_web_session::{NoopPacer, Pacer};
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// // The no-op pacer returns immediately, whatever the duration
/// NoopPacer.wait(Duration::from_secs(5)).await;
/// # });
/// ```
#[async_trait::async_trait]
pub trait Pacer: Send + Sync {
    /// Wait for the given duration
    async fn wait(&self, duration: Duration);
}

/// Production pacer backed by the Tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait::async_trait]
impl Pacer for TokioPacer {
    async fn wait(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Pacer that returns immediately, for tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

#[async_trait::async_trait]
impl Pacer for NoopPacer {
    async fn wait(&self, _duration: Duration) {}
}
