use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{GroupTableRow, TrackPlayEvent, TrackTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Calendar month of a play as `YYYY-MM`, in UTC.
pub fn month_key(played_at: DateTime<Utc>) -> String {
    played_at.format("%Y-%m").to_string()
}

/// First instant of the analysis window.
///
/// A window of `months` covers the current month plus the `months - 1` before
/// it, starting at midnight UTC on the first day. `months == 0` is treated as 1.
pub fn window_start(today: NaiveDate, months: u32) -> DateTime<Utc> {
    let first_of_month = today.with_day(1).unwrap_or(today);
    let start = first_of_month
        .checked_sub_months(Months::new(months.saturating_sub(1)))
        .unwrap_or(NaiveDate::MIN);

    Utc.from_utc_datetime(&start.and_hms_opt(0, 0, 0).unwrap_or_default())
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

/// Removes repeated URIs, keeping the first occurrence.
pub fn dedup_uris(uris: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    uris.iter()
        .filter(|uri| seen.insert(uri.as_str()))
        .cloned()
        .collect()
}

/// Up to `limit` distinct artist names across the tracks, in first-seen order.
pub fn summarize_artists(tracks: &[TrackPlayEvent], limit: usize) -> String {
    let mut names: Vec<&str> = Vec::new();
    for name in tracks.iter().flat_map(|t| t.artist_names.iter()) {
        if names.len() == limit {
            break;
        }
        if !names.contains(&name.as_str()) {
            names.push(name);
        }
    }
    names.join(", ")
}

pub fn group_row(group: &str, tracks: &[TrackPlayEvent]) -> GroupTableRow {
    GroupTableRow {
        group: group.to_string(),
        tracks: tracks.len(),
        artists: summarize_artists(tracks, 3),
    }
}

pub fn track_row(track: &TrackPlayEvent) -> TrackTableRow {
    TrackTableRow {
        played_at: track.played_at.format("%Y-%m-%d %H:%M").to_string(),
        name: track.name.clone(),
        artists: track.artist_names.join(", "),
        genres: track
            .genre_tags
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(","),
    }
}

pub fn month_playlist_name(month_key: &str) -> String {
    format!("Monthly {}", month_key)
}

pub fn genre_playlist_name(genre: &str) -> String {
    format!("Genre {}", genre)
}

pub const CROSSOVER_PLAYLIST_NAME: &str = "Genre crossovers";

pub fn track_uris(tracks: &[TrackPlayEvent]) -> Vec<String> {
    tracks.iter().map(|t| t.uri.clone()).collect()
}
