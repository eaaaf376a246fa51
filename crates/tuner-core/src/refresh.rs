//! Refresh cadence for the now-playing poll.
//!
//! The metadata provider offers no push API, so song history is re-fetched
//! on a fixed interval. The cadence sits behind [`RefreshStrategy`] so a
//! push subscription (or a test driver) could replace it without touching
//! the session logic.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{self, Interval, MissedTickBehavior};

/// Song-history poll period.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(15_000);

/// Decides when the next song-history refresh runs.
#[async_trait]
pub trait RefreshStrategy: Send {
    /// Completes when the next refresh is due.
    async fn wait_tick(&mut self);
}

/// Factory invoked once per refresh loop, so every `open()` gets a fresh
/// strategy instance.
pub type RefreshFactory = dyn Fn() -> Box<dyn RefreshStrategy> + Send + Sync;

/// Fixed-interval polling, the shipped default.
pub struct FixedInterval {
    interval: Interval,
}

impl FixedInterval {
    pub fn new(period: Duration) -> Self {
        // First tick one full period from now: open() already did the
        // initial fetch.
        let mut interval = time::interval_at(time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }
}

#[async_trait]
impl RefreshStrategy for FixedInterval {
    async fn wait_tick(&mut self) {
        self.interval.tick().await;
    }
}
