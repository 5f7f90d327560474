//! TTL response cache with request coalescing.
//!
//! [`LookupCache`] wraps moka's async cache, keyed by the string keys
//! built from lookup parameters. Two properties matter here:
//!
//! 1. **TTL**: an entry fetched at `t0` is served without an upstream
//!    call until `t0 + ttl`, then superseded by a fresh fetch.
//! 2. **Coalescing**: concurrent misses for the same key run the init
//!    future exactly once; every caller observes the winning fetch's
//!    value. moka's `get_with` guarantees this, which is what keeps a
//!    burst of identical lookups (many UI components rendering at
//!    once) from burning the rate budget N times over.
//!
//! The gateway owns one instance per endpoint so TTLs can differ:
//! release details age slowly (24 h), popularity-sorted search results
//! age fast (minutes). Entirely process-local — nothing survives a
//! restart; the durable [`SharedDetailsStore`](crate::SharedDetailsStore)
//! collaborator layers above this.

use std::future::Future;
use std::time::Duration;

use moka::future::Cache;

use crate::telemetry;

/// Configuration for one cache instance.
///
/// ```rust
/// # use platter::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(5_000)
///     .ttl(Duration::from_secs(600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 10,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 24 hours.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// TTL cache with single-flight fetch per key.
pub struct LookupCache<T: Clone + Send + Sync + 'static> {
    cache: Cache<String, T>,
    operation: &'static str,
}

impl<T: Clone + Send + Sync + 'static> LookupCache<T> {
    /// Create a new cache. `operation` labels hit/miss metrics.
    pub fn new(operation: &'static str, config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache, operation }
    }

    /// Look up a fresh entry without fetching.
    pub async fn get(&self, key: &str) -> Option<T> {
        self.cache.get(key).await
    }

    /// Return the cached value for `key`, or resolve `init` and cache
    /// its output.
    ///
    /// Concurrent callers missing on the same key await a single
    /// evaluation of `init`; the others never start their own. Emits
    /// cache hit/miss metrics.
    pub async fn get_or_fetch<F>(&self, key: &str, init: F) -> T
    where
        F: Future<Output = T>,
    {
        if let Some(value) = self.cache.get(key).await {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => self.operation)
                .increment(1);
            return value;
        }
        metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => self.operation)
            .increment(1);
        // get_with coalesces: if another caller is already resolving
        // this key, init is dropped unevaluated and its result shared.
        self.cache.get_with(key.to_owned(), init).await
    }

    /// Number of entries currently held (approximate, moka semantics).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
