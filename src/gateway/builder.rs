//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheConfig, LookupCache};
use crate::client::{DiscogsClient, DEFAULT_BASE_URL};
use crate::config::Config;
use crate::limiter::{RateLimit, RateLimiter};
use crate::rank::RankingWeights;
use crate::store::SharedDetailsStore;

use super::DiscogsGateway;

/// Main entry point for creating gateway instances.
pub struct Platter;

impl Platter {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> PlatterBuilder {
        PlatterBuilder::new()
    }
}

/// Builder for configuring gateway instances.
///
/// A gateway without a token still builds — every lookup then
/// degrades to the canonical empty value without touching the
/// network, which keeps the surrounding application functional when
/// credentials are missing.
pub struct PlatterBuilder {
    token: Option<String>,
    base_url: String,
    timeout: Duration,
    rate_limit: RateLimit,
    max_entries: u64,
    details_ttl: Duration,
    artists_ttl: Duration,
    search_ttl: Duration,
    barcode_ttl: Duration,
    weights: RankingWeights,
    search_page_size: u32,
    barcode_page_size: u32,
    shared_store: Option<Arc<dyn SharedDetailsStore>>,
}

impl PlatterBuilder {
    pub fn new() -> Self {
        Self {
            token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            rate_limit: RateLimit::default(),
            max_entries: 10_000,
            details_ttl: Duration::from_secs(24 * 60 * 60),
            artists_ttl: Duration::from_secs(24 * 60 * 60),
            search_ttl: Duration::from_secs(10 * 60),
            barcode_ttl: Duration::from_secs(60),
            weights: RankingWeights::default(),
            search_page_size: 100,
            barcode_page_size: 5,
            shared_store: None,
        }
    }

    /// Set the Discogs personal access token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the token if one is available; `None` leaves the gateway
    /// offline.
    pub fn maybe_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Override the API base URL (for testing with wiremock).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP request timeout (default: 60s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the outbound rate limit (default: 55 requests / 60s).
    pub fn rate_limit(mut self, limit: RateLimit) -> Self {
        self.rate_limit = limit;
        self
    }

    /// Set the maximum entries per cache (default: 10,000).
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// TTL for detail lookups (default: 24h).
    pub fn details_ttl(mut self, ttl: Duration) -> Self {
        self.details_ttl = ttl;
        self
    }

    /// TTL for artist-name lookups (default: 24h).
    pub fn artists_ttl(mut self, ttl: Duration) -> Self {
        self.artists_ttl = ttl;
        self
    }

    /// TTL for search results (default: 10 minutes — popularity-sorted
    /// results age faster than stable release metadata).
    pub fn search_ttl(mut self, ttl: Duration) -> Self {
        self.search_ttl = ttl;
        self
    }

    /// TTL for barcode lookups (default: 1 minute).
    pub fn barcode_ttl(mut self, ttl: Duration) -> Self {
        self.barcode_ttl = ttl;
        self
    }

    /// Override the ranking weights.
    pub fn ranking(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Upstream page size for free-text searches (default: 100).
    pub fn search_page_size(mut self, per_page: u32) -> Self {
        self.search_page_size = per_page;
        self
    }

    /// Upstream page size for barcode lookups (default: 5).
    pub fn barcode_page_size(mut self, per_page: u32) -> Self {
        self.barcode_page_size = per_page;
        self
    }

    /// Attach a durable shared-details store collaborator.
    pub fn shared_store(mut self, store: Arc<dyn SharedDetailsStore>) -> Self {
        self.shared_store = Some(store);
        self
    }

    /// Populate the builder from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::new()
            .maybe_token(config.token())
            .base_url(config.discogs.base_url.clone())
            .timeout(Duration::from_secs(config.discogs.timeout_secs))
            .rate_limit(
                RateLimit::new()
                    .quota(config.rate_limit.quota)
                    .window(Duration::from_secs(config.rate_limit.window_secs)),
            )
            .max_entries(config.cache.max_entries)
            .details_ttl(Duration::from_secs(config.cache.details_ttl_secs))
            .artists_ttl(Duration::from_secs(config.cache.artists_ttl_secs))
            .search_ttl(Duration::from_secs(config.cache.search_ttl_secs))
            .barcode_ttl(Duration::from_secs(config.cache.barcode_ttl_secs));
        builder.weights = config.ranking.clone();
        builder
    }

    /// Build the gateway.
    pub fn build(self) -> DiscogsGateway {
        let limiter = Arc::new(RateLimiter::new(self.rate_limit));
        let client = self.token.map(|token| {
            DiscogsClient::with_base_url(token, self.base_url, limiter, self.timeout)
        });

        let max_entries = self.max_entries;
        let cache_config = move |ttl| CacheConfig::new().max_entries(max_entries).ttl(ttl);

        DiscogsGateway::new(
            client,
            LookupCache::new("details", &cache_config(self.details_ttl)),
            LookupCache::new("artists", &cache_config(self.artists_ttl)),
            LookupCache::new("search", &cache_config(self.search_ttl)),
            LookupCache::new("barcode", &cache_config(self.barcode_ttl)),
            self.weights,
            self.search_page_size,
            self.barcode_page_size,
            self.shared_store,
        )
    }
}

impl Default for PlatterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
