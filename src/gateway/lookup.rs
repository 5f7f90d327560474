//! DiscogsGateway — the lookup operations.
//!
//! Every operation here is infallible by contract: the gateway is a
//! best-effort metadata enrichment layer, so internal faults are
//! logged and degrade to the canonical empty value instead of
//! propagating. The caller's primary workflow (the user's own
//! collection data) must never block on a Discogs hiccup.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::LookupCache;
use crate::client::{DiscogsClient, SearchKind, SearchRequest};
use crate::normalize::{artist_names, merge_details, normalize_release};
use crate::rank::{self, RankingWeights};
use crate::store::{details_ref, SharedDetailsStore, SharedLookup};
use crate::types::{
    BarcodeMatches, RankedHit, ReleaseDetails, ReleaseRef, ResultType, SearchHit, SearchResults,
};

/// One source to try during a detail lookup, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Release(u64),
    Master(u64),
}

/// Gateway between the application and the Discogs API.
///
/// Holds the upstream client (absent when no token is configured),
/// one cache per endpoint, ranking weights, and the optional durable
/// store collaborator. Construct via [`Platter::builder()`](crate::Platter::builder).
pub struct DiscogsGateway {
    client: Option<DiscogsClient>,
    details_cache: LookupCache<ReleaseDetails>,
    artists_cache: LookupCache<Vec<String>>,
    search_cache: LookupCache<Arc<Vec<RankedHit>>>,
    barcode_cache: LookupCache<Arc<Vec<SearchHit>>>,
    weights: RankingWeights,
    search_page_size: u32,
    barcode_page_size: u32,
    shared_store: Option<Arc<dyn SharedDetailsStore>>,
}

impl DiscogsGateway {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        client: Option<DiscogsClient>,
        details_cache: LookupCache<ReleaseDetails>,
        artists_cache: LookupCache<Vec<String>>,
        search_cache: LookupCache<Arc<Vec<RankedHit>>>,
        barcode_cache: LookupCache<Arc<Vec<SearchHit>>>,
        weights: RankingWeights,
        search_page_size: u32,
        barcode_page_size: u32,
        shared_store: Option<Arc<dyn SharedDetailsStore>>,
    ) -> Self {
        Self {
            client,
            details_cache,
            artists_cache,
            search_cache,
            barcode_cache,
            weights,
            search_page_size,
            barcode_page_size,
            shared_store,
        }
    }

    /// Whether an upstream token is configured.
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Look up normalized release details.
    ///
    /// Tries candidate sources in fallback order; a master hit is
    /// merged with its designated main release. Returns the canonical
    /// empty shape when every source fails, the reference is empty,
    /// or no token is configured.
    pub async fn release_details(&self, query: &ReleaseRef) -> ReleaseDetails {
        let Some(client) = &self.client else {
            return ReleaseDetails::empty();
        };
        if query.is_empty() {
            return ReleaseDetails::empty();
        }

        let key = query.cache_key();
        self.details_cache
            .get_or_fetch(&key, Self::fetch_details(client, *query))
            .await
    }

    async fn fetch_details(client: &DiscogsClient, query: ReleaseRef) -> ReleaseDetails {
        for source in detail_sources(&query) {
            match source {
                Source::Release(id) => match client.release(id).await {
                    Ok(payload) => return normalize_release(&payload),
                    Err(e) => warn!(id, error = %e, "release fetch failed, trying next source"),
                },
                Source::Master(id) => match client.master(id).await {
                    Ok(payload) => {
                        let base = normalize_release(&payload);
                        let Some(main_release) = payload.main_release else {
                            return base;
                        };
                        // Masters carry no tracklist or credits of their
                        // own; enrich from the main release when we can.
                        return match client.release(main_release).await {
                            Ok(main) => merge_details(normalize_release(&main), base),
                            Err(e) => {
                                warn!(
                                    master_id = id,
                                    main_release,
                                    error = %e,
                                    "main release fetch failed, keeping master fields"
                                );
                                base
                            }
                        };
                    }
                    Err(e) => warn!(master_id = id, error = %e, "master fetch failed, trying next source"),
                },
            }
        }

        ReleaseDetails::empty()
    }

    /// Look up just the artist names for a release or master.
    ///
    /// Lighter than [`release_details`](Self::release_details): first
    /// source with a non-empty name list wins, no merging.
    pub async fn artist_names(&self, query: &ReleaseRef) -> Vec<String> {
        let Some(client) = &self.client else {
            return Vec::new();
        };
        if query.is_empty() {
            return Vec::new();
        }

        let key = query.artist_cache_key();
        self.artists_cache
            .get_or_fetch(&key, Self::fetch_artist_names(client, *query))
            .await
    }

    async fn fetch_artist_names(client: &DiscogsClient, query: ReleaseRef) -> Vec<String> {
        let mut sources = Vec::new();
        if let Some(master_id) = query.master_id {
            sources.push(Source::Master(master_id));
        }
        if let Some(id) = query.id {
            sources.push(Source::Release(id));
        }

        for source in sources {
            let payload = match source {
                Source::Master(id) => client.master(id).await,
                Source::Release(id) => client.release(id).await,
            };
            match payload {
                Ok(payload) => {
                    let names = artist_names(&payload);
                    if !names.is_empty() {
                        return names;
                    }
                }
                Err(e) => warn!(error = %e, "artist lookup failed, trying next source"),
            }
        }

        Vec::new()
    }

    /// Free-text (or `#`-prefixed catalog-number) search.
    ///
    /// Fetches master and release hits, dedupes, ranks, and caps the
    /// list; the full ranked list is cached and pagination sliced
    /// from it. `page` is 1-based; `total` counts all ranked hits.
    pub async fn search(&self, raw_query: &str, page: usize, per_page: usize) -> SearchResults {
        let Some(client) = &self.client else {
            return SearchResults::default();
        };
        let parsed = rank::parse_query(raw_query);
        if parsed.term.is_empty() {
            return SearchResults::default();
        }

        let key = format!(
            "catno:{}|q:{}",
            parsed.catno_only,
            rank::normalize_term(&parsed.term),
        );
        let raw_query = raw_query.to_owned();
        let ranked = self
            .search_cache
            .get_or_fetch(&key, async {
                let hits = Self::fetch_search_hits(
                    client,
                    Some(parsed.term.clone()),
                    None,
                    self.search_page_size,
                )
                .await;
                let deduped = rank::dedupe(hits);
                Arc::new(rank::rank(deduped, &raw_query, &self.weights))
            })
            .await;

        paginate(&ranked, page, per_page)
    }

    /// Look up candidates by barcode.
    ///
    /// Non-digit characters are stripped before querying. Hits
    /// lacking both a master and a release id are dropped, the rest
    /// deduplicated in arrival (popularity) order.
    pub async fn barcode_lookup(&self, raw_barcode: &str) -> BarcodeMatches {
        let Some(client) = &self.client else {
            return BarcodeMatches::default();
        };
        let barcode: String = raw_barcode.chars().filter(char::is_ascii_digit).collect();
        if barcode.is_empty() {
            return BarcodeMatches::default();
        }

        let matches = self
            .barcode_cache
            .get_or_fetch(&barcode, async {
                let hits = Self::fetch_search_hits(
                    client,
                    None,
                    Some(barcode.clone()),
                    self.barcode_page_size,
                )
                .await;
                Arc::new(rank::dedupe_identified(hits))
            })
            .await;

        BarcodeMatches {
            total: matches.len(),
            results: matches.as_ref().clone(),
        }
    }

    /// Query masters first, then releases; a failed kind is skipped.
    async fn fetch_search_hits(
        client: &DiscogsClient,
        query: Option<String>,
        barcode: Option<String>,
        per_page: u32,
    ) -> Vec<SearchHit> {
        let mut hits = Vec::new();
        for kind in [SearchKind::Master, SearchKind::Release] {
            let request = SearchRequest {
                query: query.clone(),
                barcode: barcode.clone(),
                kind,
                per_page,
            };
            match client.search(&request).await {
                Ok(payload) => hits.extend(payload.results),
                Err(e) => warn!(kind = kind.as_str(), error = %e, "search failed for kind"),
            }
        }
        hits
    }

    /// Detail lookup backed by the durable shared store.
    ///
    /// On a store hit the gateway path is skipped entirely; on a miss
    /// the details are fetched and written back best-effort. Store
    /// faults never fail the lookup.
    pub async fn shared_details(&self, query: &ReleaseRef) -> SharedLookup {
        let details_ref = details_ref(query);

        if let Some(store) = &self.shared_store {
            match store.get(&details_ref).await {
                Ok(Some(details)) => {
                    debug!(details_ref, "shared store hit");
                    return SharedLookup {
                        details_ref,
                        details,
                    };
                }
                Ok(None) => {}
                Err(e) => warn!(details_ref, error = %e, "shared store read failed"),
            }
        }

        let details = self.release_details(query).await;

        if let Some(store) = &self.shared_store {
            if let Err(e) = store.put(&details_ref, &details).await {
                warn!(details_ref, error = %e, "shared store write failed");
            }
        }

        SharedLookup {
            details_ref,
            details,
        }
    }
}

/// Candidate sources for a detail lookup, most specific first,
/// deduplicated while preserving order.
fn detail_sources(query: &ReleaseRef) -> Vec<Source> {
    let mut sources = Vec::new();
    match query.result_type {
        ResultType::Master => {
            if let Some(id) = query.id {
                sources.push(Source::Master(id));
            }
            if let Some(master_id) = query.master_id {
                sources.push(Source::Master(master_id));
            }
            if let Some(id) = query.id {
                sources.push(Source::Release(id));
            }
        }
        ResultType::Release => {
            if let Some(id) = query.id {
                sources.push(Source::Release(id));
            }
            if let Some(master_id) = query.master_id {
                sources.push(Source::Master(master_id));
            }
        }
        ResultType::Unknown => {
            // Equal ids usually mean the caller only had a master id.
            if let (Some(id), Some(master_id)) = (query.id, query.master_id) {
                if id == master_id {
                    sources.push(Source::Master(master_id));
                }
            }
            if let Some(id) = query.id {
                sources.push(Source::Release(id));
            }
            if let Some(master_id) = query.master_id {
                sources.push(Source::Master(master_id));
            }
        }
    }

    let mut deduped = Vec::with_capacity(sources.len());
    for source in sources {
        if !deduped.contains(&source) {
            deduped.push(source);
        }
    }
    deduped
}

/// Slice one 1-based page out of the full ranked list.
fn paginate(ranked: &[RankedHit], page: usize, per_page: usize) -> SearchResults {
    let total = ranked.len();
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let results = ranked
        .iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect();

    SearchResults { results, total }
}
