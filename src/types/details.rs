//! Canonical normalized release details.
//!
//! [`ReleaseDetails`] is the one shape every lookup resolves to,
//! regardless of which upstream resource (release or master) supplied
//! the data. Every list field defaults to an empty vec and every
//! scalar to an empty string or zero — callers can render the shape
//! unconditionally without null checks.

use serde::{Deserialize, Serialize};

/// A credited artist on a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseArtist {
    pub name: String,
    /// Credit role (e.g. "Producer"), present only for extra artists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

/// Per-track artist credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// One entry of the flattened tracklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Side/position marker (e.g. "A1"). Empty for index tracks.
    pub position: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<TrackArtist>>,
}

/// A label entry with its catalog number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub catno: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

/// A release image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image kind as reported upstream ("primary" or "secondary").
    #[serde(rename = "type")]
    pub kind: String,
    pub uri: String,
    pub width: u32,
    pub height: u32,
}

/// Community rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u64,
}

impl RatingSummary {
    /// A rating with no votes carries no information.
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.average == 0.0
    }
}

/// Fully normalized release metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReleaseDetails {
    pub title: String,
    /// Formatted release date: `YYYY-MM-DD`, `YYYY-MM`, `YYYY`, or the
    /// raw upstream string when unparseable.
    pub released: String,
    pub country: String,
    pub notes: String,
    pub artists: Vec<ReleaseArtist>,
    pub extra_artists: Vec<ReleaseArtist>,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    pub tracklist: Vec<Track>,
    /// Distinct format names (e.g. "Vinyl", "CD").
    pub formats: Vec<String>,
    /// Comma-joined format descriptions and free-text notes.
    pub format_text: String,
    /// Summed quantity across formats.
    pub quantity: u32,
    pub labels: Vec<Label>,
    pub ratings: RatingSummary,
    pub images: Vec<Image>,
    /// Comma-joined series names.
    pub series: String,
}

impl ReleaseDetails {
    /// The canonical empty shape returned when every source fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no source contributed any data.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
