use async_trait::async_trait;

use crate::{engine::EngineError, utils};

/// Maximum number of track URIs per add-tracks call.
pub const PLAYLIST_ADD_LIMIT: usize = 100;

/// Destination for generated playlists.
///
/// Implementors provide the two raw calls. [`PlaylistSink::create_playlist`]
/// removes duplicate URIs and submits them in chunks of
/// [`PLAYLIST_ADD_LIMIT`].
#[async_trait]
pub trait PlaylistSink: Send + Sync {
    /// Creates an empty playlist owned by `owner_id` and returns its id.
    async fn create_empty(&self, owner_id: &str, name: &str) -> Result<String, EngineError>;

    /// Appends at most [`PLAYLIST_ADD_LIMIT`] URIs to an existing playlist.
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), EngineError>;

    async fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
        track_uris: &[String],
    ) -> Result<String, EngineError> {
        let uris = utils::dedup_uris(track_uris);
        let playlist_id = self.create_empty(owner_id, name).await?;

        for chunk in uris.chunks(PLAYLIST_ADD_LIMIT) {
            self.add_tracks(&playlist_id, chunk).await?;
        }

        Ok(playlist_id)
    }
}
