//! Tests for [`LookupCache`] — TTL expiry, single-flight coalescing,
//! and hit/miss metrics.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use platter::cache::{CacheConfig, LookupCache};
use platter::telemetry;

// =============================================================================
// CacheConfig
// =============================================================================

#[test]
fn cache_config_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.max_entries, 10_000);
    assert_eq!(config.ttl, Duration::from_secs(24 * 60 * 60));
}

#[test]
fn cache_config_builder() {
    let config = CacheConfig::new()
        .max_entries(500)
        .ttl(Duration::from_secs(60));
    assert_eq!(config.max_entries, 500);
    assert_eq!(config.ttl, Duration::from_secs(60));
}

// =============================================================================
// Fetch-through behaviour
// =============================================================================

#[tokio::test]
async fn miss_fetches_then_hit_skips_fetch() {
    let cache: LookupCache<String> = LookupCache::new("test", &CacheConfig::default());
    let fetches = AtomicU32::new(0);

    let first = cache
        .get_or_fetch("key", async {
            fetches.fetch_add(1, Ordering::SeqCst);
            "value".to_string()
        })
        .await;
    assert_eq!(first, "value");
    assert_eq!(fetches.load(Ordering::SeqCst), 1);

    // Second call must be served from cache; init never runs.
    let second = cache
        .get_or_fetch("key", async {
            fetches.fetch_add(1, Ordering::SeqCst);
            "other".to_string()
        })
        .await;
    assert_eq!(second, "value");
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn distinct_keys_fetch_independently() {
    let cache: LookupCache<u32> = LookupCache::new("test", &CacheConfig::default());

    assert_eq!(cache.get_or_fetch("a", async { 1 }).await, 1);
    assert_eq!(cache.get_or_fetch("b", async { 2 }).await, 2);
    assert_eq!(cache.get("a").await, Some(1));
    assert_eq!(cache.get("b").await, Some(2));
}

#[tokio::test]
async fn expired_entry_is_refetched() {
    let cache: LookupCache<String> = LookupCache::new(
        "test",
        &CacheConfig::new().ttl(Duration::from_millis(100)),
    );

    let first = cache.get_or_fetch("key", async { "v1".to_string() }).await;
    assert_eq!(first, "v1");

    // moka keeps its own clock; wait out the TTL in real time.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let second = cache.get_or_fetch("key", async { "v2".to_string() }).await;
    assert_eq!(second, "v2");
}

// =============================================================================
// Coalescing
// =============================================================================

#[tokio::test]
async fn concurrent_misses_coalesce_to_one_fetch() {
    let cache: Arc<LookupCache<String>> =
        Arc::new(LookupCache::new("test", &CacheConfig::default()));
    let fetches = Arc::new(AtomicU32::new(0));

    let mut lookups = Vec::new();
    for _ in 0..8 {
        let cache = cache.clone();
        let fetches = fetches.clone();
        lookups.push(async move {
            cache
                .get_or_fetch("shared", async move {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    "winner".to_string()
                })
                .await
        });
    }

    let results = futures_util::future::join_all(lookups).await;

    assert!(results.iter().all(|v| v == "winner"));
    assert_eq!(fetches.load(Ordering::SeqCst), 1, "init must run exactly once");
}

// =============================================================================
// Metrics
// =============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn hit_and_miss_counters_are_emitted() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let cache: LookupCache<u32> = LookupCache::new("test", &CacheConfig::default());
                cache.get_or_fetch("key", async { 7 }).await;
                cache.get_or_fetch("key", async { 8 }).await;
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
}
