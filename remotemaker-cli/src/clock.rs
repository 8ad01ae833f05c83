//! Time abstraction for the monitor
//!
//! The monitor never calls `tokio::time` directly; it schedules through this
//! trait so tests can drive the polling loop with a virtual clock instead of
//! real delays.

use std::time::{Duration, Instant};

use async_trait::async_trait;

/// Clock the monitor schedules against
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;

    /// Sleep for the given duration
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio runtime
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
