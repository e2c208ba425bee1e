use crate::{
    cli::spotify_client,
    engine::PlaylistSink,
    error, info,
    management::AnalysisManager,
    success,
    types::TrackPlayEvent,
    utils, warning,
};

/// Which group of the cached analysis to turn into a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistTarget {
    Month(String),
    AllMonths,
    Genre(String),
    AllGenres,
    Duplicates,
}

/// Creates playlists from the cached analysis.
///
/// Playlists the user already owns under the same name are skipped. A failed
/// creation is reported and the remaining playlists are still attempted.
pub async fn playlist(target: PlaylistTarget) {
    let manager = match AnalysisManager::load().await {
        Ok(manager) => manager,
        Err(e) => error!(
            "No cached analysis found. Run playbucket analyze first.\n Error: {}",
            e
        ),
    };

    let playlists = select_playlists(&manager, &target);
    if playlists.is_empty() {
        warning!("Nothing to create for {:?}.", target);
        return;
    }

    let client = spotify_client().await;
    let owner_id = manager.analysis().owner_id.clone();

    for (name, tracks) in playlists {
        match client.playlist_exists(&name).await {
            Ok(true) => {
                info!("Playlist {} already exists", name);
                continue;
            }
            Ok(false) => {}
            Err(e) => warning!("Failed to check if playlist exists: {}", e),
        }

        info!("Create playlist {} with {} tracks", name, tracks.len());
        match client
            .create_playlist(&owner_id, &name, &utils::track_uris(tracks))
            .await
        {
            Ok(_) => success!("Playlist {} created.", name),
            Err(e) => warning!("Failed to create playlist {}: {}", name, e),
        }
    }
}

/// Resolves a target to `(playlist name, tracks)` pairs.
pub fn select_playlists<'a>(
    manager: &'a AnalysisManager,
    target: &PlaylistTarget,
) -> Vec<(String, &'a [TrackPlayEvent])> {
    let analysis = manager.analysis();

    match target {
        PlaylistTarget::Month(key) => manager
            .month(key)
            .map(|m| vec![(utils::month_playlist_name(&m.month_key), m.tracks.as_slice())])
            .unwrap_or_default(),
        PlaylistTarget::AllMonths => analysis
            .months
            .iter()
            .map(|m| (utils::month_playlist_name(&m.month_key), m.tracks.as_slice()))
            .collect(),
        PlaylistTarget::Genre(genre) => manager
            .genre(genre)
            .map(|g| vec![(utils::genre_playlist_name(&g.genre), g.tracks.as_slice())])
            .unwrap_or_default(),
        PlaylistTarget::AllGenres => analysis
            .genres
            .genres
            .iter()
            .map(|g| (utils::genre_playlist_name(&g.genre), g.tracks.as_slice()))
            .collect(),
        PlaylistTarget::Duplicates => {
            let duplicates = manager.duplicates();
            if duplicates.is_empty() {
                Vec::new()
            } else {
                vec![(utils::CROSSOVER_PLAYLIST_NAME.to_string(), duplicates)]
            }
        }
    }
}
