//! Tests for payload normalization and master/release merging.

use platter::normalize::{artist_names, format_release_date, merge_details, normalize_release};
use platter::types::ReleasePayload;
use platter::{RatingSummary, ReleaseDetails};

fn payload(json: serde_json::Value) -> ReleasePayload {
    serde_json::from_value(json).unwrap()
}

// =============================================================================
// normalize_release
// =============================================================================

#[test]
fn empty_payload_normalizes_to_empty_details() {
    let details = normalize_release(&ReleasePayload::default());
    assert!(details.is_empty());
    assert_eq!(details, ReleaseDetails::empty());
}

#[test]
fn fields_are_trimmed_and_defaulted() {
    let details = normalize_release(&payload(serde_json::json!({
        "title": "  Nevermind  ",
        "country": " US ",
        "genres": ["Rock", "  ", "Grunge "],
    })));

    assert_eq!(details.title, "Nevermind");
    assert_eq!(details.country, "US");
    assert_eq!(details.genres, vec!["Rock", "Grunge"]);
    assert_eq!(details.released, "");
    assert!(details.tracklist.is_empty());
    assert_eq!(details.quantity, 0);
}

#[test]
fn sub_tracks_are_hoisted_in_document_order() {
    let details = normalize_release(&payload(serde_json::json!({
        "tracklist": [
            {"position": "A1", "title": "Opener"},
            {
                "title": "Suite",
                "sub_tracks": [
                    {"position": "A2", "title": "Part One"},
                    {"position": "A3", "title": "Part Two"},
                ],
            },
            {"position": "B1", "title": "Closer"},
            {"position": "B2", "title": "   "},
        ],
    })));

    let titles: Vec<&str> = details.tracklist.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Opener", "Suite", "Part One", "Part Two", "Closer"]);
}

#[test]
fn track_artists_and_durations_survive() {
    let details = normalize_release(&payload(serde_json::json!({
        "tracklist": [
            {"position": "A1", "title": "Duet", "duration": "3:45",
             "artists": [{"name": "Alpha"}, {"name": "Beta"}]},
            {"position": "A2", "title": "Solo", "duration": ""},
        ],
    })));

    let duet = &details.tracklist[0];
    assert_eq!(duet.duration.as_deref(), Some("3:45"));
    let names: Vec<&str> = duet
        .artists
        .as_ref()
        .unwrap()
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);

    let solo = &details.tracklist[1];
    assert_eq!(solo.duration, None);
    assert_eq!(solo.artists, None);
}

#[test]
fn formats_aggregate_names_texts_and_quantity() {
    let details = normalize_release(&payload(serde_json::json!({
        "formats": [
            {"name": "Vinyl", "qty": "2", "descriptions": ["LP", "Album"], "text": "180g"},
            {"name": "Vinyl", "qty": "1", "descriptions": ["Reissue"]},
            {"name": "CD", "qty": "not-a-number"},
        ],
    })));

    // Names distinct, descriptions first, free text after, quantity summed.
    assert_eq!(details.formats, vec!["Vinyl", "CD"]);
    assert_eq!(details.format_text, "LP, Album, Reissue, 180g");
    assert_eq!(details.quantity, 3);
}

#[test]
fn labels_images_series_and_ratings_normalize() {
    let details = normalize_release(&payload(serde_json::json!({
        "labels": [
            {"name": "DGC", "catno": "DGC-24425", "id": 1},
            {"name": "  ", "catno": ""},
        ],
        "images": [
            {"type": "primary", "uri": "https://img.example/a.jpg", "width": 600, "height": 600},
            {"type": "secondary", "uri": "  "},
        ],
        "series": [{"name": "Back To Black"}, {"name": ""}],
        "community": {"rating": {"average": 4.5, "count": 1200}},
    })));

    assert_eq!(details.labels.len(), 1);
    assert_eq!(details.labels[0].catno, "DGC-24425");
    assert_eq!(details.images.len(), 1);
    assert_eq!(details.images[0].kind, "primary");
    assert_eq!(details.series, "Back To Black");
    assert_eq!(
        details.ratings,
        RatingSummary {
            average: 4.5,
            count: 1200,
        }
    );
}

#[test]
fn normalization_is_idempotent_on_its_own_output() {
    let source = payload(serde_json::json!({
        "title": " Nevermind ",
        "released": "1991-09-24",
        "artists": [{"name": "Nirvana"}],
    }));

    let once = normalize_release(&source);
    let twice = normalize_release(&source);
    assert_eq!(once, twice);
}

// =============================================================================
// Dates
// =============================================================================

#[test]
fn release_dates_degrade_to_most_specific_valid_prefix() {
    assert_eq!(format_release_date("1991-09-24"), "1991-09-24");
    assert_eq!(format_release_date("1991-09-00"), "1991-09");
    assert_eq!(format_release_date("1991-00-00"), "1991");
    assert_eq!(format_release_date("1991-13-05"), "1991");
    assert_eq!(format_release_date("1991-09-32"), "1991-09");
    assert_eq!(format_release_date("1991"), "1991");
    assert_eq!(format_release_date("24-09-1991"), "1991-09-24");
    assert_eq!(format_release_date("circa 1970"), "circa 1970");
    assert_eq!(format_release_date(""), "");
}

// =============================================================================
// Artist names
// =============================================================================

#[test]
fn artist_names_dedupe_and_strip_disambiguation() {
    let names = artist_names(&payload(serde_json::json!({
        "artists": [
            {"name": "Nirvana (2)"},
            {"name": "Nirvana"},
            {"name": "  "},
            {"name": "Sonic  Youth"},
        ],
    })));

    assert_eq!(names, vec!["Nirvana", "Sonic Youth"]);
}

// =============================================================================
// merge_details
// =============================================================================

#[test]
fn merge_prefers_primary_per_field() {
    let primary = normalize_release(&payload(serde_json::json!({
        "title": "Main Release Title",
        "country": "US",
        "tracklist": [{"position": "A1", "title": "From Main"}],
    })));
    let fallback = normalize_release(&payload(serde_json::json!({
        "title": "Master Title",
        "released": "1991",
        "genres": ["Rock"],
        "tracklist": [{"position": "1", "title": "From Master"}],
    })));

    let merged = merge_details(primary, fallback);

    // Primary wins where set; each empty field falls back independently.
    assert_eq!(merged.title, "Main Release Title");
    assert_eq!(merged.country, "US");
    assert_eq!(merged.released, "1991");
    assert_eq!(merged.genres, vec!["Rock"]);
    assert_eq!(merged.tracklist[0].title, "From Main");
}

#[test]
fn merge_quantity_and_ratings_fall_back_when_zero() {
    let primary = normalize_release(&payload(serde_json::json!({
        "formats": [{"name": "CD", "qty": "0"}],
    })));
    let fallback = normalize_release(&payload(serde_json::json!({
        "formats": [{"name": "Vinyl", "qty": "2"}],
        "community": {"rating": {"average": 4.0, "count": 10}},
    })));

    let merged = merge_details(primary, fallback);
    assert_eq!(merged.quantity, 2);
    assert_eq!(merged.ratings.count, 10);
    // Format names were non-empty on the primary side, so they stick.
    assert_eq!(merged.formats, vec!["CD"]);
}

#[test]
fn merge_with_empty_primary_is_fallback() {
    let fallback = normalize_release(&payload(serde_json::json!({
        "title": "Master Title",
        "genres": ["Rock"],
    })));

    let merged = merge_details(ReleaseDetails::empty(), fallback.clone());
    assert_eq!(merged, fallback);
}
