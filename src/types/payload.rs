//! Raw Discogs payload types.
//!
//! Loose mirror of the upstream JSON: everything optional, lists
//! defaulting to empty. The release and master resources share one
//! payload type — a master simply leaves the pressing-specific fields
//! (country, formats, labels) unset and carries `main_release`
//! instead. [`crate::normalize`] turns these into the canonical
//! [`ReleaseDetails`](crate::ReleaseDetails) shape.

use serde::Deserialize;

/// Artist entry as it appears on releases and masters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
}

/// Tracklist entry; index tracks nest their parts in `sub_tracks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackPayload {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistPayload>,
    #[serde(default)]
    pub sub_tracks: Vec<TrackPayload>,
}

/// Format descriptor. `qty` arrives as a string upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub qty: Option<String>,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub catno: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagePayload {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesPayload {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingPayload {
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunityPayload {
    #[serde(default)]
    pub rating: Option<RatingPayload>,
}

/// Release or master resource payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleasePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Masters only: the id of their designated main release.
    #[serde(default)]
    pub main_release: Option<u64>,
    #[serde(default)]
    pub artists: Vec<ArtistPayload>,
    #[serde(default)]
    pub extraartists: Vec<ArtistPayload>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub tracklist: Vec<TrackPayload>,
    #[serde(default)]
    pub formats: Vec<FormatPayload>,
    #[serde(default)]
    pub labels: Vec<LabelPayload>,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
    #[serde(default)]
    pub series: Vec<SeriesPayload>,
    #[serde(default)]
    pub community: Option<CommunityPayload>,
}

/// Database search response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default)]
    pub results: Vec<super::search::SearchHit>,
}
