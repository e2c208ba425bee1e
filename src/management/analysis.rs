use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::{
    engine,
    management::cache::{self, CacheError},
    types::{Analysis, GenreGroup, MonthGroup, TrackPlayEvent},
};

/// Holds the result of one analysis run and caches it between commands.
pub struct AnalysisManager {
    analysis: Analysis,
}

impl AnalysisManager {
    /// Groups `events` into both views over the same event set.
    pub fn build(
        owner_id: String,
        window_start: DateTime<Utc>,
        events: &[TrackPlayEvent],
    ) -> Self {
        Self {
            analysis: Analysis {
                owner_id,
                collected_at: Utc::now(),
                window_start,
                event_count: events.len(),
                months: engine::group_by_month(events),
                genres: engine::group_by_genre_dedup(events),
            },
        }
    }

    pub async fn load() -> Result<Self, CacheError> {
        let analysis: Analysis = cache::read_json(&Self::cache_path()).await?;
        Ok(Self { analysis })
    }

    pub async fn persist(&self) -> Result<(), CacheError> {
        cache::write_json(&Self::cache_path(), &self.analysis).await
    }

    pub async fn clear() -> Result<(), CacheError> {
        cache::remove(&Self::cache_path()).await
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn month(&self, month_key: &str) -> Option<&MonthGroup> {
        self.analysis
            .months
            .iter()
            .find(|m| m.month_key == month_key)
    }

    pub fn genre(&self, genre: &str) -> Option<&GenreGroup> {
        let wanted = engine::canonicalize(genre);
        self.analysis
            .genres
            .genres
            .iter()
            .find(|g| g.genre == wanted)
    }

    pub fn duplicates(&self) -> &[TrackPlayEvent] {
        &self.analysis.genres.duplicates
    }

    pub fn ungenred(&self) -> &[TrackPlayEvent] {
        &self.analysis.genres.ungenred
    }

    fn cache_path() -> PathBuf {
        cache::data_path("cache/analysis.json")
    }
}
