mod common;

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{at, ids};
use playbucket::{
    engine::{
        ARTIST_BATCH_LIMIT, EngineError, GenreLookup, HistoryCollector, PlaySource, collect,
        collector::next_cursor,
    },
    types::RawPlayItem,
};

/// Serves pre-recorded pages in order and records every cursor it was asked for.
struct FakeSource {
    pages: Mutex<Vec<Result<Vec<RawPlayItem>, EngineError>>>,
    cursors: Mutex<Vec<i64>>,
}

impl FakeSource {
    fn new(pages: Vec<Result<Vec<RawPlayItem>, EngineError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into_iter().rev().collect()),
            cursors: Mutex::new(Vec::new()),
        }
    }

    fn cursors(&self) -> Vec<i64> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaySource for FakeSource {
    async fn fetch_page(&self, after_ms: i64) -> Result<Vec<RawPlayItem>, EngineError> {
        self.cursors.lock().unwrap().push(after_ms);
        self.pages.lock().unwrap().pop().unwrap_or_else(|| Ok(Vec::new()))
    }
}

struct FakeLookup {
    genres: HashMap<String, Vec<String>>,
    calls: Mutex<Vec<Vec<String>>>,
    fail: bool,
}

impl FakeLookup {
    fn new(genres: &[(&str, &[&str])]) -> Self {
        Self {
            genres: genres
                .iter()
                .map(|(id, tags)| (id.to_string(), tags.iter().map(|t| t.to_string()).collect()))
                .collect(),
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(&[])
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenreLookup for FakeLookup {
    async fn fetch_genres(
        &self,
        ids: &[String],
    ) -> Result<HashMap<String, Vec<String>>, EngineError> {
        self.calls.lock().unwrap().push(ids.to_vec());
        if self.fail {
            return Err(EngineError::fetch("artists unavailable"));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.genres.get(id).map(|tags| (id.clone(), tags.clone())))
            .collect())
    }
}

fn raw(id: &str, played_at: DateTime<Utc>, artists: &[&str]) -> RawPlayItem {
    RawPlayItem {
        track_id: id.to_string(),
        track_name: format!("Track {}", id),
        track_uri: None,
        artists: artists
            .iter()
            .map(|a| (a.to_string(), format!("Name {}", a)))
            .collect(),
        played_at,
    }
}

#[tokio::test]
async fn test_collect_pages_until_empty() {
    let e1 = raw("e1", at(2024, 1, 1, 10), &["x"]);
    let e2 = raw("e2", at(2024, 1, 1, 11), &["x"]);
    let e3 = raw("e3", at(2024, 1, 2, 9), &["y"]);
    let source = FakeSource::new(vec![Ok(vec![e1, e2]), Ok(vec![e3]), Ok(vec![])]);
    let lookup = FakeLookup::new(&[("x", &["rock"]), ("y", &["jazz"])]);
    let start = at(2024, 1, 1, 0).timestamp_millis();

    let events = collect(&source, &lookup, start, 1000).await.unwrap();

    assert_eq!(ids(&events), vec!["e1", "e2", "e3"]);
    assert_eq!(
        source.cursors(),
        vec![
            start,
            at(2024, 1, 1, 11).timestamp_millis() + 1,
            at(2024, 1, 2, 9).timestamp_millis() + 1,
        ]
    );
}

#[tokio::test]
async fn test_collect_stops_once_cap_is_exceeded() {
    let source = FakeSource::new(vec![
        Ok(vec![
            raw("e1", at(2024, 1, 1, 10), &[]),
            raw("e2", at(2024, 1, 1, 11), &[]),
        ]),
        Ok(vec![raw("e3", at(2024, 1, 2, 9), &[])]),
        Ok(vec![raw("e4", at(2024, 1, 3, 9), &[])]),
    ]);
    let lookup = FakeLookup::new(&[]);

    let events = collect(&source, &lookup, 0, 2).await.unwrap();

    // cap of 2 is reached but not exceeded after the first page
    assert_eq!(ids(&events), vec!["e1", "e2", "e3"]);
    assert_eq!(source.cursors().len(), 2);
}

#[tokio::test]
async fn test_collect_keeps_whole_page_past_cap() {
    let page: Vec<RawPlayItem> = (0..5)
        .map(|i| raw(&format!("e{}", i), at(2024, 1, 1, i), &[]))
        .collect();
    let source = FakeSource::new(vec![Ok(page)]);
    let lookup = FakeLookup::new(&[]);

    let events = collect(&source, &lookup, 0, 1).await.unwrap();

    assert_eq!(events.len(), 5);
    assert_eq!(source.cursors().len(), 1);
}

#[tokio::test]
async fn test_collect_empty_history() {
    let source = FakeSource::new(vec![]);
    let lookup = FakeLookup::new(&[]);

    let events = collect(&source, &lookup, 0, 1000).await.unwrap();

    assert!(events.is_empty());
    assert!(lookup.calls().is_empty());
}

#[tokio::test]
async fn test_collect_merges_genres_of_all_artists() {
    let source = FakeSource::new(vec![Ok(vec![raw(
        "collab",
        at(2024, 1, 1, 0),
        &["a", "b"],
    )])]);
    let lookup = FakeLookup::new(&[("a", &["trap", "rap"]), ("b", &["rap", "pop"])]);

    let events = collect(&source, &lookup, 0, 1000).await.unwrap();

    assert_eq!(events[0].genre_tags, vec!["trap", "rap", "pop"]);
    assert_eq!(events[0].artist_names, vec!["Name a", "Name b"]);
}

#[tokio::test]
async fn test_collect_unknown_artist_yields_no_tags() {
    let source = FakeSource::new(vec![Ok(vec![raw("t", at(2024, 1, 1, 0), &["ghost"])])]);
    let lookup = FakeLookup::new(&[]);

    let events = collect(&source, &lookup, 0, 1000).await.unwrap();

    assert!(events[0].genre_tags.is_empty());
}

#[tokio::test]
async fn test_collect_fills_missing_uri_from_track_id() {
    let source = FakeSource::new(vec![Ok(vec![raw("abc", at(2024, 1, 1, 0), &[])])]);
    let lookup = FakeLookup::new(&[]);

    let events = collect(&source, &lookup, 0, 1000).await.unwrap();

    assert_eq!(events[0].uri, "spotify:track:abc");
}

#[tokio::test]
async fn test_collect_batches_artist_lookups() {
    let page: Vec<RawPlayItem> = (0..60)
        .map(|i| {
            let artist = format!("artist{}", i);
            // every artist appears twice on the page
            raw(&format!("t{}", i), at(2024, 1, 1, 0), &[artist.as_str(), artist.as_str()])
        })
        .collect();
    let source = FakeSource::new(vec![Ok(page)]);
    let lookup = FakeLookup::new(&[]);

    collect(&source, &lookup, 0, 1000).await.unwrap();

    let calls = lookup.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.len() <= ARTIST_BATCH_LIMIT));
    assert_eq!(calls.iter().map(Vec::len).sum::<usize>(), 60);
}

#[tokio::test]
async fn test_collect_source_failure_discards_progress() {
    let source = FakeSource::new(vec![
        Ok(vec![raw("e1", at(2024, 1, 1, 0), &[])]),
        Err(EngineError::fetch("boom")),
    ]);
    let lookup = FakeLookup::new(&[]);

    let result = collect(&source, &lookup, 0, 1000).await;

    assert_eq!(result, Err(EngineError::FetchFailed("boom".to_string())));
}

#[tokio::test]
async fn test_collect_lookup_failure_aborts() {
    let source = FakeSource::new(vec![Ok(vec![raw("e1", at(2024, 1, 1, 0), &["x"])])]);
    let lookup = FakeLookup::failing();

    let result = collect(&source, &lookup, 0, 1000).await;

    assert!(matches!(result, Err(EngineError::FetchFailed(_))));
}

#[tokio::test]
async fn test_run_reports_progress_per_page() {
    let source = FakeSource::new(vec![
        Ok(vec![
            raw("e1", at(2024, 1, 1, 0), &[]),
            raw("e2", at(2024, 1, 1, 1), &[]),
        ]),
        Ok(vec![raw("e3", at(2024, 1, 1, 2), &[])]),
    ]);
    let lookup = FakeLookup::new(&[]);
    let mut progress = Vec::new();

    HistoryCollector::new(&source, &lookup, 0, 1000)
        .run(|count| progress.push(count))
        .await
        .unwrap();

    assert_eq!(progress, vec![2, 3]);
}

#[test]
fn test_next_cursor_adds_one_millisecond() {
    let last = at(2024, 6, 1, 12);
    assert_eq!(next_cursor(last), last.timestamp_millis() + 1);
}
