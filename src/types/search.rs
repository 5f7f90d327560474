//! Search hit and result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One raw hit from the upstream database search.
///
/// Only the fields that dedup and ranking read are typed; everything
/// else the upstream sends (cover image, year, format, genre, …) is
/// carried through `extra` so consumers receive the full shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_id: Option<u64>,
    /// Resource kind as reported upstream ("release" or "master").
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Catalog number, near-unique per pressing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catno: Option<String>,
    /// Community "have" count (owners).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub have: Option<u64>,
    /// Community "want" count (wishlists).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub want: Option<u64>,
    /// Untyped passthrough of the remaining upstream fields.
    #[serde(default, flatten)]
    pub extra: Map<String, Value>,
}

impl SearchHit {
    /// Master id, treating upstream's 0 as absent.
    pub fn master_id(&self) -> Option<u64> {
        self.master_id.filter(|id| *id > 0)
    }

    /// Release id, treating upstream's 0 as absent.
    pub fn release_id(&self) -> Option<u64> {
        self.id.filter(|id| *id > 0)
    }

    /// Community popularity proxy: owners plus wishers.
    pub fn popularity(&self) -> u64 {
        self.have.unwrap_or(0) + self.want.unwrap_or(0)
    }
}

/// A search hit with its computed ranking score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedHit {
    #[serde(flatten)]
    pub hit: SearchHit,
    #[serde(rename = "_score")]
    pub score: i64,
}

/// One page of ranked search results.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub results: Vec<RankedHit>,
    /// Total ranked hits before pagination.
    pub total: usize,
}

/// Deduplicated candidates from a barcode lookup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BarcodeMatches {
    pub results: Vec<SearchHit>,
    pub total: usize,
}
