use crate::{
    engine::EngineError,
    spotify::{SpotifyClient, send},
    types::Profile,
};

impl SpotifyClient {
    /// Fetches the current user's profile from `GET /me`.
    ///
    /// The profile id is the owner used when creating playlists.
    pub async fn fetch_profile(&self) -> Result<Profile, EngineError> {
        let response = send(
            || self.get("/me"),
            |e| EngineError::fetch(format!("Failed to fetch profile: {}", e)),
        )
        .await?;

        response
            .json::<Profile>()
            .await
            .map_err(|e| EngineError::fetch(format!("Malformed profile response: {}", e)))
    }
}
