//! Rolling-window rate limiter for upstream catalog calls.
//!
//! Discogs enforces 60 authenticated requests per minute across all
//! endpoints. [`RateLimiter`] keeps one shared window per gateway and
//! admits at most `quota` calls within any `window`-length interval,
//! defaulting to 55/60s to leave margin for clock drift between our
//! window and the upstream one.
//!
//! Waiters are not queued: a caller that finds the window full sleeps
//! until the oldest timestamp exits the window and then re-checks.
//! No ordering guarantee is made among waiters beyond scheduling
//! fairness of the tokio timer. Calls are delayed, never dropped.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::telemetry;

/// Margin added to each computed wait so a slot is free on re-check.
const SLOT_RETRY_MARGIN: Duration = Duration::from_millis(25);

/// Quota and window for the rolling rate limit.
///
/// ```rust
/// # use platter::RateLimit;
/// # use std::time::Duration;
/// let limit = RateLimit::new()
///     .quota(30)
///     .window(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct RateLimit {
    /// Maximum requests admitted per window. Default: 55.
    pub quota: usize,
    /// Rolling window length. Default: 60 seconds.
    pub window: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            quota: 55,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimit {
    /// Create a new limit with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum requests admitted per window.
    pub fn quota(mut self, n: usize) -> Self {
        self.quota = n;
        self
    }

    /// Set the rolling window length.
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }
}

/// Process-wide rolling-window governor for outbound catalog calls.
///
/// The timestamp list is guarded by a tokio mutex so the
/// prune-check-record sequence is atomic on a multi-threaded runtime.
/// The lock is never held across a sleep.
pub struct RateLimiter {
    limit: RateLimit,
    stamps: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a new limiter with the given limit.
    ///
    /// A quota of zero is treated as one: every caller would otherwise
    /// be stranded forever.
    pub fn new(limit: RateLimit) -> Self {
        Self {
            limit: RateLimit {
                quota: limit.quota.max(1),
                ..limit
            },
            stamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Acquire a request slot, waiting as long as needed.
    ///
    /// Returns the total time spent waiting (zero when a slot was
    /// free). Never fails and never times out; bounding total latency
    /// is the caller's concern.
    pub async fn acquire(&self) -> Duration {
        let mut waited = Duration::ZERO;
        loop {
            let wait = {
                let mut stamps = self.stamps.lock().await;
                let now = Instant::now();
                while stamps
                    .front()
                    .is_some_and(|t| now.duration_since(*t) >= self.limit.window)
                {
                    stamps.pop_front();
                }

                if stamps.len() < self.limit.quota {
                    stamps.push_back(now);
                    if !waited.is_zero() {
                        metrics::histogram!(telemetry::RATE_LIMIT_WAIT_SECONDS)
                            .record(waited.as_secs_f64());
                    }
                    return waited;
                }

                // Oldest entry leaves the window first; sleep until then.
                let oldest = stamps[0];
                self.limit
                    .window
                    .saturating_sub(now.duration_since(oldest))
                    + SLOT_RETRY_MARGIN
            };

            waited += wait;
            tokio::time::sleep(wait).await;
        }
    }

    /// The configured limit.
    pub fn limit(&self) -> &RateLimit {
        &self.limit
    }
}
