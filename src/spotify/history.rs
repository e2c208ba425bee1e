use async_trait::async_trait;

use crate::{
    engine::{EngineError, PlaySource},
    spotify::{SpotifyClient, send},
    types::{RawPlayItem, RecentlyPlayedResponse},
};

/// Page size of the recently-played endpoint.
pub const PAGE_LIMIT: u32 = 50;

#[async_trait]
impl PlaySource for SpotifyClient {
    /// Fetches one page of recently played tracks after `after_ms`.
    ///
    /// Uses `GET /me/player/recently-played?limit=50&after={after_ms}`.
    async fn fetch_page(&self, after_ms: i64) -> Result<Vec<RawPlayItem>, EngineError> {
        let path = format!(
            "/me/player/recently-played?limit={limit}&after={after}",
            limit = PAGE_LIMIT,
            after = after_ms
        );

        let response = send(
            || self.get(&path),
            |e| EngineError::fetch(format!("Failed to fetch recently played tracks: {}", e)),
        )
        .await?;

        let page = response
            .json::<RecentlyPlayedResponse>()
            .await
            .map_err(|e| {
                EngineError::fetch(format!("Malformed recently played response: {}", e))
            })?;

        // the endpoint answers newest first
        let mut items = page.items;
        items.sort_by_key(|item| item.played_at);

        Ok(items
            .into_iter()
            .filter_map(RawPlayItem::from_history)
            .collect())
    }
}
