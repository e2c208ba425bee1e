use async_trait::async_trait;

use crate::{
    engine::{EngineError, PlaylistSink},
    spotify::{SpotifyClient, send},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, GetUserPlaylistsResponse,
    },
};

#[async_trait]
impl PlaylistSink for SpotifyClient {
    async fn create_empty(&self, owner_id: &str, name: &str) -> Result<String, EngineError> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: format!("{} - grouped from recently played tracks", name),
            public: false,
        };
        let path = format!("/users/{}/playlists", owner_id);

        let response = send(
            || self.post(&path).json(&body),
            |e| EngineError::create(format!("Failed to create playlist: {}", e)),
        )
        .await?;

        let playlist = response
            .json::<CreatePlaylistResponse>()
            .await
            .map_err(|e| EngineError::create(format!("Malformed playlist response: {}", e)))?;

        Ok(playlist.id)
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), EngineError> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let path = format!("/playlists/{}/tracks", playlist_id);

        let response = send(
            || self.post(&path).json(&body),
            |e| EngineError::create(format!("Failed to add tracks: {}", e)),
        )
        .await?;

        response
            .json::<AddTrackToPlaylistResponse>()
            .await
            .map_err(|e| EngineError::create(format!("Malformed add tracks response: {}", e)))?;

        Ok(())
    }
}

impl SpotifyClient {
    /// Checks whether the current user already owns a playlist called `name`.
    ///
    /// Walks `GET /me/playlists` page by page following the `next` link.
    pub async fn playlist_exists(&self, name: &str) -> Result<bool, EngineError> {
        let mut path = Some("/me/playlists?limit=50".to_string());

        while let Some(current) = path.take() {
            let response = send(
                || self.get(&current),
                |e| EngineError::fetch(format!("Failed to fetch playlists: {}", e)),
            )
            .await?;

            let page = response
                .json::<GetUserPlaylistsResponse>()
                .await
                .map_err(|e| EngineError::fetch(format!("Malformed playlists response: {}", e)))?;

            if page.items.iter().any(|p| p.name == name) {
                return Ok(true);
            }

            path = page
                .next
                .and_then(|next| next.strip_prefix(&self.api_url).map(str::to_string));
        }

        Ok(false)
    }
}
