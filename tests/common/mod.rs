#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use playbucket::types::TrackPlayEvent;

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

// Helper function to create a test play event
pub fn play(id: &str, played_at: DateTime<Utc>, genres: &[&str]) -> TrackPlayEvent {
    TrackPlayEvent {
        id: id.to_string(),
        uri: format!("spotify:track:{}", id),
        played_at,
        name: format!("Track {}", id),
        artist_names: vec![format!("Artist of {}", id)],
        genre_tags: genres.iter().map(|g| g.to_string()).collect(),
    }
}

pub fn ids(tracks: &[TrackPlayEvent]) -> Vec<&str> {
    tracks.iter().map(|t| t.id.as_str()).collect()
}
