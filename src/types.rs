use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Bearer credentials handed to the Spotify client for one analysis run.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralArtistsResponse {
    pub artists: Vec<Option<Artist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// `None` for local files.
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistoryItem {
    pub track: Track,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentlyPlayedResponse {
    pub items: Vec<PlayHistoryItem>,
}

/// One play as delivered by a play-event source, before genre enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPlayItem {
    pub track_id: String,
    pub track_name: String,
    pub track_uri: Option<String>,
    pub artists: Vec<(String, String)>,
    pub played_at: DateTime<Utc>,
}

impl RawPlayItem {
    /// Converts a recently-played item, skipping local files.
    ///
    /// Tracks without an id are dropped. Artists without an id are left out
    /// of the artist list since their genres cannot be looked up.
    pub fn from_history(item: PlayHistoryItem) -> Option<Self> {
        let track_id = item.track.id?;

        Some(RawPlayItem {
            track_id,
            track_name: item.track.name,
            track_uri: Some(item.track.uri),
            artists: item
                .track
                .artists
                .into_iter()
                .filter_map(|a| a.id.map(|id| (id, a.name)))
                .collect(),
            played_at: item.played_at,
        })
    }
}

/// One playback occurrence. `id` identifies the track, not the play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPlayEvent {
    pub id: String,
    pub uri: String,
    pub played_at: DateTime<Utc>,
    pub name: String,
    pub artist_names: Vec<String>,
    pub genre_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGroup {
    pub month_key: String,
    pub tracks: Vec<TrackPlayEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreGroup {
    pub genre: String,
    pub tracks: Vec<TrackPlayEvent>,
}

/// Result of disambiguated genre grouping.
///
/// Every track in `genres` maps to exactly one canonical genre across the
/// whole input. Cross-genre tracks are in `duplicates`, tracks without any
/// genre tag are in `ungenred`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreGrouping {
    pub genres: Vec<GenreGroup>,
    pub duplicates: Vec<TrackPlayEvent>,
    pub ungenred: Vec<TrackPlayEvent>,
}

/// A persisted analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub owner_id: String,
    pub collected_at: DateTime<Utc>,
    pub window_start: DateTime<Utc>,
    pub event_count: usize,
    pub months: Vec<MonthGroup>,
    pub genres: GenreGrouping,
}

#[derive(Tabled)]
pub struct GroupTableRow {
    pub group: String,
    pub tracks: usize,
    pub artists: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub played_at: String,
    pub name: String,
    pub artists: String,
    pub genres: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}
