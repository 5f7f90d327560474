//! Telemetry metric name constants.
//!
//! Centralised metric names for platter operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `platter_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation` — lookup invoked (e.g. "release", "master", "search")
//! - `status` — outcome: "ok" or "error"

/// Total requests dispatched to the upstream catalog API.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "platter_requests_total";

/// Upstream request duration in seconds.
///
/// Labels: `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "platter_request_duration_seconds";

/// Total 429 retries (not counting the initial request).
///
/// Labels: `operation`.
pub const RETRIES_TOTAL: &str = "platter_retries_total";

/// Total cache hits.
///
/// Labels: `operation`.
pub const CACHE_HITS_TOTAL: &str = "platter_cache_hits_total";

/// Total cache misses.
///
/// Labels: `operation`.
pub const CACHE_MISSES_TOTAL: &str = "platter_cache_misses_total";

/// Time spent waiting for a local rate-limit slot, in seconds.
///
/// Recorded only when a caller actually waited.
pub const RATE_LIMIT_WAIT_SECONDS: &str = "platter_rate_limit_wait_seconds";
