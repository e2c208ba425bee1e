use std::sync::Mutex;

use async_trait::async_trait;
use playbucket::engine::{EngineError, PLAYLIST_ADD_LIMIT, PlaylistSink};

#[derive(Default)]
struct FakeSink {
    created: Mutex<Vec<(String, String)>>,
    added: Mutex<Vec<Vec<String>>>,
    fail_create: bool,
    fail_add: bool,
}

#[async_trait]
impl PlaylistSink for FakeSink {
    async fn create_empty(&self, owner_id: &str, name: &str) -> Result<String, EngineError> {
        if self.fail_create {
            return Err(EngineError::create("forbidden"));
        }
        self.created
            .lock()
            .unwrap()
            .push((owner_id.to_string(), name.to_string()));
        Ok(format!("pl-{}", name))
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), EngineError> {
        assert_eq!(playlist_id, "pl-Monthly 2024-03");
        if self.fail_add {
            return Err(EngineError::create("rate limited"));
        }
        self.added.lock().unwrap().push(uris.to_vec());
        Ok(())
    }
}

fn uris(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("spotify:track:{}", i)).collect()
}

#[tokio::test]
async fn test_create_playlist_dedups_uris() {
    let sink = FakeSink::default();
    let input = vec![
        "spotify:track:a".to_string(),
        "spotify:track:b".to_string(),
        "spotify:track:a".to_string(),
    ];

    let id = sink
        .create_playlist("owner", "Monthly 2024-03", &input)
        .await
        .unwrap();

    assert_eq!(id, "pl-Monthly 2024-03");
    assert_eq!(
        *sink.created.lock().unwrap(),
        vec![("owner".to_string(), "Monthly 2024-03".to_string())]
    );
    assert_eq!(
        *sink.added.lock().unwrap(),
        vec![vec!["spotify:track:a".to_string(), "spotify:track:b".to_string()]]
    );
}

#[tokio::test]
async fn test_create_playlist_chunks_large_inputs() {
    let sink = FakeSink::default();

    sink.create_playlist("owner", "Monthly 2024-03", &uris(250))
        .await
        .unwrap();

    let added = sink.added.lock().unwrap();
    let sizes: Vec<usize> = added.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![PLAYLIST_ADD_LIMIT, PLAYLIST_ADD_LIMIT, 50]);
    assert_eq!(added[0][0], "spotify:track:0");
    assert_eq!(added[2][49], "spotify:track:249");
}

#[tokio::test]
async fn test_create_playlist_without_tracks_creates_empty_playlist() {
    let sink = FakeSink::default();

    sink.create_playlist("owner", "Monthly 2024-03", &[])
        .await
        .unwrap();

    assert_eq!(sink.created.lock().unwrap().len(), 1);
    assert!(sink.added.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_failure_adds_nothing() {
    let sink = FakeSink {
        fail_create: true,
        ..FakeSink::default()
    };

    let result = sink
        .create_playlist("owner", "Monthly 2024-03", &uris(3))
        .await;

    assert_eq!(result, Err(EngineError::CreateFailed("forbidden".to_string())));
    assert!(sink.added.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_failure_is_reported() {
    let sink = FakeSink {
        fail_add: true,
        ..FakeSink::default()
    };

    let result = sink
        .create_playlist("owner", "Monthly 2024-03", &uris(3))
        .await;

    assert!(matches!(result, Err(EngineError::CreateFailed(_))));
}
