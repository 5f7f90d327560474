//! Search result deduplication and ranking.
//!
//! Upstream search returns both master-level aggregates and their
//! individual pressings, popularity-sorted. [`dedupe`] collapses a
//! master and its pressings into one entry; [`rank`] scores the
//! survivors against the user's query so an exact match beats a
//! popular unrelated release. Community popularity (`have + want`)
//! is the base score; field-match bonuses are orders of magnitude
//! larger so they dominate it.

use std::collections::HashSet;

use serde::Deserialize;

use crate::types::{RankedHit, SearchHit};

/// Leading sentinel marking a catalog-number-only search.
pub const CATNO_SENTINEL: char = '#';

/// Additive score weights, highest wins.
///
/// The numeric values are configuration, not business rules; the
/// defaults keep catalog number > exact title > exact artist >
/// partials > raw popularity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    /// Exact catalog-number match — near-unique, strongest signal.
    pub catno_exact: i64,
    /// Exact normalized title match.
    pub title_exact: i64,
    /// Exact normalized artist match.
    pub artist_exact: i64,
    /// Partial artist match, or the "various"/"va" wildcard artist.
    pub artist_partial: i64,
    /// Title substring match.
    pub title_partial: i64,
    /// Ranked results kept after scoring.
    pub max_results: usize,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            catno_exact: 20_000,
            title_exact: 15_000,
            artist_exact: 10_000,
            artist_partial: 5_000,
            title_partial: 2_000,
            max_results: 40,
        }
    }
}

/// A user query split into its search term and catalog-only flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Query text with any leading `#` sentinel stripped.
    pub term: String,
    /// When set, only the catalog number discriminates.
    pub catno_only: bool,
}

/// Strip the `#` sentinel and trim the query.
pub fn parse_query(raw: &str) -> ParsedQuery {
    let trimmed = raw.trim();
    match trimmed.strip_prefix(CATNO_SENTINEL) {
        Some(rest) => ParsedQuery {
            term: rest.trim().to_string(),
            catno_only: true,
        },
        None => ParsedQuery {
            term: trimmed.to_string(),
            catno_only: false,
        },
    }
}

/// Normalize a term for comparison: lowercase, map the conjunction
/// tokens "en"/"and" to `&`, drop everything outside `[a-z0-9&]`.
///
/// Applied identically to queries and candidate fields so locale
/// conjunctions and punctuation never cause false negatives.
pub fn normalize_term(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .map(|token| if token == "en" || token == "and" { "&" } else { token })
        .collect::<String>()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '&')
        .collect()
}

/// Collapse duplicate hits, first occurrence wins.
///
/// Key priority: master id over release id over a normalized
/// title|artist composite, so a master-level aggregate absorbs its
/// own pressings. Arrival order (upstream popularity order) is
/// preserved.
pub fn dedupe(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|hit| seen.insert(dedupe_key(hit)))
        .collect()
}

/// Like [`dedupe`], but drops hits carrying neither a master nor a
/// release id (barcode candidates must be addressable).
pub fn dedupe_identified(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    let mut seen = HashSet::new();
    hits.into_iter()
        .filter(|hit| hit.master_id().is_some() || hit.release_id().is_some())
        .filter(|hit| seen.insert(dedupe_key(hit)))
        .collect()
}

fn dedupe_key(hit: &SearchHit) -> String {
    if let Some(master_id) = hit.master_id() {
        return format!("m{master_id}");
    }
    if let Some(id) = hit.release_id() {
        return format!("r{id}");
    }
    format!(
        "{}|{}",
        normalize_term(&hit.title),
        normalize_term(hit.artist.as_deref().unwrap_or("")),
    )
}

/// Score and sort hits against the raw query, capped to
/// `weights.max_results`.
///
/// The sort is stable and descending, so equal scores keep upstream
/// popularity order.
pub fn rank(hits: Vec<SearchHit>, raw_query: &str, weights: &RankingWeights) -> Vec<RankedHit> {
    let parsed = parse_query(raw_query);
    let query = normalize_term(&parsed.term);

    let mut ranked: Vec<RankedHit> = hits
        .into_iter()
        .map(|hit| {
            let score = score_hit(&hit, &query, parsed.catno_only, weights);
            RankedHit { hit, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(weights.max_results);
    ranked
}

fn score_hit(hit: &SearchHit, query: &str, catno_only: bool, weights: &RankingWeights) -> i64 {
    let mut score = hit.popularity() as i64;

    // Catalog numbers compare through the same normalization as the
    // query, so hyphen/space variants of one number score identically.
    if !query.is_empty() {
        let catno = normalize_term(hit.catno.as_deref().unwrap_or(""));
        if !catno.is_empty() && catno == query {
            score += weights.catno_exact;
        }
    }

    // Catalog-only searches: catalog number is the sole discriminator.
    if catno_only || query.is_empty() {
        return score;
    }

    let artist = normalize_term(hit.artist.as_deref().unwrap_or(""));
    let title = normalize_term(&hit.title);

    if !artist.is_empty() {
        if artist == query {
            score += weights.artist_exact;
        } else if artist.contains(query) || artist == "various" || artist == "va" {
            score += weights.artist_partial;
        }
    }

    if !title.is_empty() {
        if title == query {
            score += weights.title_exact;
        } else if title.contains(query) {
            score += weights.title_partial;
        }
    }

    score
}
