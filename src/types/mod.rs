//! Core types for the platter gateway.

pub mod details;
pub mod payload;
pub mod query;
pub mod search;

pub use details::{Image, Label, RatingSummary, ReleaseArtist, ReleaseDetails, Track, TrackArtist};
pub use payload::{
    ArtistPayload, CommunityPayload, FormatPayload, ImagePayload, LabelPayload, RatingPayload,
    ReleasePayload, SearchPayload, SeriesPayload, TrackPayload,
};
pub use query::{ReleaseRef, ResultType};
pub use search::{BarcodeMatches, RankedHit, SearchHit, SearchResults};
