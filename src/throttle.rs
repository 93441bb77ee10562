//! Pacing of API calls under the free-tier quota
//!
//! The downloader awaits [`Throttle::after_call`] after every call attempt,
//! successful or not, with the running total of attempts. The fixed pause
//! (65 s after every 5th call) is the default; [`Governed`] spaces calls
//! evenly under the same per-minute quota.

use std::future::Future;
use std::num::{NonZeroU32, NonZeroU64};
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::InMemoryState;
use governor::state::direct::NotKeyed;
use governor::{Quota, RateLimiter};

/// Free-tier calls per minute
pub const CALLS_PER_MINUTE: u32 = 5;

/// Free-tier calls per day
pub const CALLS_PER_DAY: usize = 500;

/// Pause used by [`FixedPause::default`]; a minute plus slack for clock skew
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(65);

/// Calls between pauses used by [`FixedPause::default`]
pub const DEFAULT_EVERY: NonZeroU64 = NonZeroU64::new(CALLS_PER_MINUTE as u64).unwrap();

const DEFAULT_PER_MINUTE: NonZeroU32 = NonZeroU32::new(CALLS_PER_MINUTE).unwrap();

/// Decides whether to wait before the next call
pub trait Throttle {
    /// Called after attempt number `calls` (1-based, counted across the whole run)
    fn after_call(&mut self, calls: u64) -> impl Future<Output = ()>;
}

/// Sleeps a flat duration after every `every`-th call.
///
/// Elapsed time is not measured; only the call count matters.
#[derive(Debug, Clone, Copy)]
pub struct FixedPause {
    every: NonZeroU64,
    pause: Duration,
}

impl FixedPause {
    /// Pause for `pause` after every `every` calls
    pub fn new(every: NonZeroU64, pause: Duration) -> Self {
        Self { every, pause }
    }

    /// Whether attempt number `calls` triggers a pause
    pub fn is_due(&self, calls: u64) -> bool {
        calls % self.every.get() == 0
    }
}

impl Default for FixedPause {
    fn default() -> Self {
        Self::new(DEFAULT_EVERY, DEFAULT_PAUSE)
    }
}

impl Throttle for FixedPause {
    async fn after_call(&mut self, calls: u64) {
        if self.is_due(calls) {
            tracing::info!(calls, pause_secs = self.pause.as_secs(), "rate limit pause");
            tokio::time::sleep(self.pause).await;
        }
    }
}

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token bucket with a burst of one: calls are spaced evenly, so no
/// 60-second window holds more than the per-minute quota.
pub struct Governed {
    limiter: DirectRateLimiter,
}

impl Governed {
    /// At most `per_minute` calls in any minute
    pub fn per_minute(per_minute: NonZeroU32) -> Self {
        let limiter = RateLimiter::direct(Quota::per_minute(per_minute).allow_burst(NonZeroU32::MIN));
        // the cell for the first call, which goes out without waiting
        let _ = limiter.check();
        Self { limiter }
    }
}

impl Default for Governed {
    fn default() -> Self {
        Self::per_minute(DEFAULT_PER_MINUTE)
    }
}

impl std::fmt::Debug for Governed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Governed").finish_non_exhaustive()
    }
}

impl Throttle for Governed {
    async fn after_call(&mut self, calls: u64) {
        tracing::debug!(calls, "waiting for the next call slot");
        self.limiter.until_ready().await;
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct Unthrottled;

impl Throttle for Unthrottled {
    async fn after_call(&mut self, _calls: u64) {}
}

/// Largest ticker count whose statements fit in one day's quota
pub fn max_tickers_per_day(calls_per_ticker: usize) -> usize {
    CALLS_PER_DAY / calls_per_ticker.max(1)
}
