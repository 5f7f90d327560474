//! Payload normalization and master/release merging.
//!
//! Pure functions, no I/O. [`normalize_release`] maps either upstream
//! resource kind (release or master — they share a payload type) into
//! the canonical [`ReleaseDetails`] shape, trimming every string,
//! defaulting every field, and flattening nested sub-tracks.
//! [`merge_details`] combines two normalized sources field by field,
//! the primary winning wherever it is non-empty. A malformed or empty
//! payload normalizes to the canonical empty shape rather than an
//! error.

use crate::types::payload::{
    ArtistPayload, FormatPayload, ImagePayload, LabelPayload, ReleasePayload, SeriesPayload,
    TrackPayload,
};
use crate::types::{
    Image, Label, RatingSummary, ReleaseArtist, ReleaseDetails, Track, TrackArtist,
};

/// Normalize one upstream payload into the canonical shape.
pub fn normalize_release(payload: &ReleasePayload) -> ReleaseDetails {
    let (formats, format_text, quantity) = collect_formats(&payload.formats);

    ReleaseDetails {
        title: clean(&payload.title),
        released: format_release_date(payload.released.as_deref().unwrap_or("")),
        country: clean(&payload.country),
        notes: clean(&payload.notes),
        artists: normalize_artists(&payload.artists),
        extra_artists: normalize_artists(&payload.extraartists),
        genres: clean_list(&payload.genres),
        styles: clean_list(&payload.styles),
        tracklist: flatten_tracklist(&payload.tracklist),
        formats,
        format_text,
        quantity,
        labels: normalize_labels(&payload.labels),
        ratings: normalize_ratings(payload),
        images: normalize_images(&payload.images),
        series: join_series(&payload.series),
    }
}

/// Merge two normalized sources, field by field.
///
/// The primary (more specific source, e.g. a master's main release)
/// wins wherever it is non-empty; each field falls back independently
/// — there is no wholesale object fallback.
pub fn merge_details(primary: ReleaseDetails, fallback: ReleaseDetails) -> ReleaseDetails {
    ReleaseDetails {
        title: pick_str(primary.title, fallback.title),
        released: pick_str(primary.released, fallback.released),
        country: pick_str(primary.country, fallback.country),
        notes: pick_str(primary.notes, fallback.notes),
        artists: pick_vec(primary.artists, fallback.artists),
        extra_artists: pick_vec(primary.extra_artists, fallback.extra_artists),
        genres: pick_vec(primary.genres, fallback.genres),
        styles: pick_vec(primary.styles, fallback.styles),
        tracklist: pick_vec(primary.tracklist, fallback.tracklist),
        formats: pick_vec(primary.formats, fallback.formats),
        format_text: pick_str(primary.format_text, fallback.format_text),
        quantity: if primary.quantity > 0 {
            primary.quantity
        } else {
            fallback.quantity
        },
        labels: pick_vec(primary.labels, fallback.labels),
        ratings: if primary.ratings.is_empty() {
            fallback.ratings
        } else {
            primary.ratings
        },
        images: pick_vec(primary.images, fallback.images),
        series: pick_str(primary.series, fallback.series),
    }
}

fn pick_str(primary: String, fallback: String) -> String {
    if primary.is_empty() { fallback } else { primary }
}

fn pick_vec<T>(primary: Vec<T>, fallback: Vec<T>) -> Vec<T> {
    if primary.is_empty() { fallback } else { primary }
}

/// Unique artist names with the Discogs `(N)` disambiguation suffix
/// stripped and whitespace collapsed, in document order.
pub fn artist_names(payload: &ReleasePayload) -> Vec<String> {
    let mut names = Vec::new();
    for artist in &payload.artists {
        let name = strip_disambiguation(artist.name.as_deref().unwrap_or(""));
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Drop the trailing `(N)` Discogs appends to disambiguate artists
/// sharing a name, and collapse interior whitespace.
fn strip_disambiguation(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if let Some(open) = collapsed.rfind('(') {
        let inner = &collapsed[open + 1..];
        if let Some(stripped) = inner.strip_suffix(')') {
            if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
                return collapsed[..open].trim_end().to_string();
            }
        }
    }
    collapsed
}

/// Format a release date, degrading to the most specific valid prefix.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, and legacy `DD-MM-YYYY`.
/// An out-of-range month drops the date to the year; an out-of-range
/// day drops it to month + year. Anything else passes through trimmed.
pub fn format_release_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = trimmed.split('-').collect();
    let (year, month, day) = match parts.as_slice() {
        [y] if is_year(y) => (*y, None, None),
        [y, m] if is_year(y) => (*y, Some(*m), None),
        [y, m, d] if is_year(y) => (*y, Some(*m), Some(*d)),
        // Legacy day-first form.
        [d, m, y] if is_year(y) => (*y, Some(*m), Some(*d)),
        _ => return trimmed.to_string(),
    };

    let month = month.and_then(|m| parse_in_range(m, 1, 12));
    let day = day.and_then(|d| parse_in_range(d, 1, 31));

    match (month, day) {
        (Some(m), Some(d)) => format!("{year}-{m:02}-{d:02}"),
        (Some(m), _) => format!("{year}-{m:02}"),
        _ => year.to_string(),
    }
}

fn is_year(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_digit())
}

fn parse_in_range(s: &str, min: u32, max: u32) -> Option<u32> {
    let value = s.parse::<u32>().ok()?;
    (min..=max).contains(&value).then_some(value)
}

fn clean(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn normalize_artists(artists: &[ArtistPayload]) -> Vec<ReleaseArtist> {
    artists
        .iter()
        .filter_map(|artist| {
            let name = clean(&artist.name);
            if name.is_empty() {
                return None;
            }
            let role = artist
                .role
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from);
            Some(ReleaseArtist {
                name,
                role,
                id: artist.id,
            })
        })
        .collect()
}

/// Flatten the tracklist in document order, hoisting sub-tracks of
/// index tracks to the top level. Untitled entries are dropped.
fn flatten_tracklist(tracklist: &[TrackPayload]) -> Vec<Track> {
    let mut tracks = Vec::new();
    for entry in tracklist {
        if let Some(track) = normalize_track(entry) {
            tracks.push(track);
        }
        for sub in &entry.sub_tracks {
            if let Some(track) = normalize_track(sub) {
                tracks.push(track);
            }
        }
    }
    tracks
}

fn normalize_track(track: &TrackPayload) -> Option<Track> {
    let title = clean(&track.title);
    if title.is_empty() {
        return None;
    }

    let duration = track
        .duration
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from);

    let artists: Vec<TrackArtist> = track
        .artists
        .iter()
        .filter_map(|a| {
            let name = clean(&a.name);
            (!name.is_empty()).then_some(TrackArtist { name })
        })
        .collect();

    Some(Track {
        position: clean(&track.position),
        title,
        duration,
        artists: (!artists.is_empty()).then_some(artists),
    })
}

/// Aggregate format descriptors: distinct names, comma-joined
/// descriptions plus free text, summed quantity.
fn collect_formats(formats: &[FormatPayload]) -> (Vec<String>, String, u32) {
    let mut names: Vec<String> = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    let mut quantity = 0u32;

    for format in formats {
        let name = clean(&format.name);
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
        for description in &format.descriptions {
            let description = description.trim();
            if !description.is_empty() {
                texts.push(description.to_string());
            }
        }
        if let Ok(qty) = format.qty.as_deref().unwrap_or("").trim().parse::<u32>() {
            quantity += qty;
        }
    }

    // Free-text notes come after all descriptions.
    for format in formats {
        let text = clean(&format.text);
        if !text.is_empty() {
            texts.push(text);
        }
    }

    (names, texts.join(", "), quantity)
}

fn normalize_labels(labels: &[LabelPayload]) -> Vec<Label> {
    labels
        .iter()
        .filter_map(|label| {
            let name = clean(&label.name);
            let catno = clean(&label.catno);
            if name.is_empty() && catno.is_empty() {
                return None;
            }
            Some(Label {
                name,
                catno,
                id: label.id,
            })
        })
        .collect()
}

fn normalize_images(images: &[ImagePayload]) -> Vec<Image> {
    images
        .iter()
        .filter_map(|image| {
            let uri = clean(&image.uri);
            if uri.is_empty() {
                return None;
            }
            Some(Image {
                kind: clean(&image.kind),
                uri,
                width: image.width.unwrap_or(0),
                height: image.height.unwrap_or(0),
            })
        })
        .collect()
}

fn normalize_ratings(payload: &ReleasePayload) -> RatingSummary {
    let rating = payload.community.as_ref().and_then(|c| c.rating.as_ref());
    RatingSummary {
        average: rating.and_then(|r| r.average).unwrap_or(0.0),
        count: rating.and_then(|r| r.count).unwrap_or(0),
    }
}

fn join_series(series: &[SeriesPayload]) -> String {
    series
        .iter()
        .map(|entry| clean(&entry.name))
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_full() {
        assert_eq!(format_release_date("1994-07-15"), "1994-07-15");
    }

    #[test]
    fn date_invalid_month_and_day_degrades_to_year() {
        assert_eq!(format_release_date("1994-00-00"), "1994");
    }

    #[test]
    fn date_invalid_day_degrades_to_month() {
        assert_eq!(format_release_date("1994-07-00"), "1994-07");
    }

    #[test]
    fn date_month_only() {
        assert_eq!(format_release_date("1994-07"), "1994-07");
    }

    #[test]
    fn date_legacy_day_first() {
        assert_eq!(format_release_date("15-07-1994"), "1994-07-15");
    }

    #[test]
    fn date_unparseable_passes_through() {
        assert_eq!(format_release_date(" circa 1970 "), "circa 1970");
    }

    #[test]
    fn disambiguation_suffix_stripped() {
        assert_eq!(strip_disambiguation("Nirvana (2)"), "Nirvana");
        assert_eq!(strip_disambiguation("Prince  And The  Revolution"), "Prince And The Revolution");
        // Parenthetical words are part of the name, not a suffix.
        assert_eq!(strip_disambiguation("Emerson (Band)"), "Emerson (Band)");
    }
}
