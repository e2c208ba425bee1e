use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    engine::{ARTIST_BATCH_LIMIT, EngineError, GenreLookup},
    spotify::{SpotifyClient, send},
    types::SeveralArtistsResponse,
};

#[async_trait]
impl GenreLookup for SpotifyClient {
    /// Resolves up to 50 artist ids through `GET /artists?ids=...`.
    ///
    /// Ids Spotify does not know come back as `null` and are left out of the map.
    async fn fetch_genres(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, EngineError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        if ids.len() > ARTIST_BATCH_LIMIT {
            return Err(EngineError::fetch(format!(
                "Artist lookup accepts at most {} ids, got {}",
                ARTIST_BATCH_LIMIT,
                ids.len()
            )));
        }

        let path = format!("/artists?ids={}", ids.join(","));
        let response = send(
            || self.get(&path),
            |e| EngineError::fetch(format!("Failed to fetch artist genres: {}", e)),
        )
        .await?;

        let json = response
            .json::<SeveralArtistsResponse>()
            .await
            .map_err(|e| EngineError::fetch(format!("Malformed artists response: {}", e)))?;

        Ok(json
            .artists
            .into_iter()
            .flatten()
            .map(|artist| (artist.id, artist.genres))
            .collect())
    }
}
