use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::{
    engine::EngineError,
    types::{RawPlayItem, TrackPlayEvent},
    utils,
};

/// Maximum number of artist ids per genre lookup call.
pub const ARTIST_BATCH_LIMIT: usize = 50;

/// Ordered source of play events.
#[async_trait]
pub trait PlaySource: Send + Sync {
    /// Returns the page of plays strictly after `after_ms` (unix milliseconds),
    /// oldest first. An empty page means the history is exhausted.
    async fn fetch_page(&self, after_ms: i64) -> Result<Vec<RawPlayItem>, EngineError>;
}

/// Resolves artist ids to their raw genre tags.
#[async_trait]
pub trait GenreLookup: Send + Sync {
    /// Called with at most [`ARTIST_BATCH_LIMIT`] ids. Unknown ids may be
    /// missing from the returned map.
    async fn fetch_genres(&self, ids: &[String])
    -> Result<HashMap<String, Vec<String>>, EngineError>;
}

/// Collects play history for a single analysis run.
///
/// The collector owns the pagination cursor and the accumulated events. It is
/// consumed by [`HistoryCollector::run`], so a failed or cancelled run leaves
/// nothing behind.
pub struct HistoryCollector<'a, S: PlaySource + ?Sized, L: GenreLookup + ?Sized> {
    source: &'a S,
    lookup: &'a L,
    cursor: i64,
    max_events: usize,
    events: Vec<TrackPlayEvent>,
}

impl<'a, S: PlaySource + ?Sized, L: GenreLookup + ?Sized> HistoryCollector<'a, S, L> {
    pub fn new(source: &'a S, lookup: &'a L, window_start: i64, max_events: usize) -> Self {
        Self {
            source,
            lookup,
            cursor: window_start,
            max_events,
            events: Vec::new(),
        }
    }

    /// Pages through the source until it runs dry or the cap is exceeded.
    ///
    /// `on_page` receives the running event count after each non-empty page.
    /// The cap check happens after a page is appended, so the result can
    /// exceed `max_events` by up to one page.
    pub async fn run<F>(mut self, mut on_page: F) -> Result<Vec<TrackPlayEvent>, EngineError>
    where
        F: FnMut(usize) + Send,
    {
        loop {
            let page = self.source.fetch_page(self.cursor).await?;
            let Some(last) = page.last() else {
                break;
            };

            // +1ms skips the boundary play; other plays sharing that exact
            // millisecond are lost with it.
            self.cursor = next_cursor(last.played_at);

            let genres = self.resolve_genres(&page).await?;
            self.events
                .extend(page.into_iter().map(|item| enrich(item, &genres)));

            on_page(self.events.len());

            if self.events.len() > self.max_events {
                break;
            }
        }

        Ok(self.events)
    }

    async fn resolve_genres(
        &self,
        page: &[RawPlayItem],
    ) -> Result<HashMap<String, Vec<String>>, EngineError> {
        let mut seen = HashSet::new();
        let artist_ids: Vec<String> = page
            .iter()
            .flat_map(|item| item.artists.iter().map(|(id, _)| id))
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect();

        let mut genres = HashMap::new();
        for chunk in artist_ids.chunks(ARTIST_BATCH_LIMIT) {
            genres.extend(self.lookup.fetch_genres(chunk).await?);
        }
        Ok(genres)
    }
}

/// Collects play history starting at `window_start` (unix milliseconds).
pub async fn collect<S, L>(
    source: &S,
    lookup: &L,
    window_start: i64,
    max_events: usize,
) -> Result<Vec<TrackPlayEvent>, EngineError>
where
    S: PlaySource + ?Sized,
    L: GenreLookup + ?Sized,
{
    HistoryCollector::new(source, lookup, window_start, max_events)
        .run(|_| {})
        .await
}

/// Cursor that follows a page ending at `last_played_at`.
pub fn next_cursor(last_played_at: DateTime<Utc>) -> i64 {
    (last_played_at + Duration::milliseconds(1)).timestamp_millis()
}

fn enrich(item: RawPlayItem, genres: &HashMap<String, Vec<String>>) -> TrackPlayEvent {
    let mut genre_tags: Vec<String> = Vec::new();
    for (artist_id, _) in &item.artists {
        for tag in genres.get(artist_id).into_iter().flatten() {
            if !genre_tags.contains(tag) {
                genre_tags.push(tag.clone());
            }
        }
    }

    TrackPlayEvent {
        uri: item
            .track_uri
            .unwrap_or_else(|| utils::track_uri(&item.track_id)),
        id: item.track_id,
        played_at: item.played_at,
        name: item.track_name,
        artist_names: item.artists.into_iter().map(|(_, name)| name).collect(),
        genre_tags,
    }
}
