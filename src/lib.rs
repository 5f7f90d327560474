//! Platter - Discogs gateway for collection apps
//!
//! This crate sits between a music-collection application and the
//! Discogs API: it rate-limits outbound calls to stay inside the
//! authenticated quota, caches and coalesces lookups, retries once on
//! 429, and normalizes the verbose upstream payloads into the compact
//! shapes a collection UI renders. Lookup operations never surface
//! upstream failures; they degrade to canonical empty values so a
//! flaky catalog never breaks the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use platter::{Platter, ReleaseRef};
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = Platter::builder()
//!         .token("your-discogs-token")
//!         .build();
//!
//!     // Normalized release details (empty on any failure).
//!     let details = gateway.release_details(&ReleaseRef::release(249_504)).await;
//!     println!("{} ({})", details.title, details.released);
//!
//!     // Deduplicated, relevance-ranked search.
//!     let page = gateway.search("Nirvana Nevermind", 1, 20).await;
//!     for hit in &page.results {
//!         println!("{} [{}]", hit.hit.title, hit.score);
//!     }
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod limiter;
pub mod normalize;
pub mod rank;
pub mod store;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, LookupCache};
pub use client::{DiscogsClient, SearchKind, SearchRequest};
pub use config::Config;
pub use error::{GatewayError, Result};
pub use gateway::{DiscogsGateway, Platter, PlatterBuilder};
pub use limiter::{RateLimit, RateLimiter};
pub use rank::RankingWeights;
pub use store::{details_ref, SharedDetailsStore, SharedLookup};

// Re-export all types
pub use types::{
    BarcodeMatches, Image, Label, RankedHit, RatingSummary, ReleaseArtist, ReleaseDetails,
    ReleaseRef, ResultType, SearchHit, SearchResults, Track, TrackArtist,
};
