use crate::{
    cli::{analyze::print_analysis, spotify_client},
    error, info,
    management::AnalysisManager,
    warning,
};

/// Shows the logged-in profile (`--profile`) or the cached analysis (`--cache`).
///
/// `--profile` wins when both flags are given. Without flags only the cache
/// summary line is printed.
pub async fn info(profile: bool, cache: bool) {
    if profile {
        let client = spotify_client().await;
        match client.fetch_profile().await {
            Ok(p) => {
                info!("User id: {}", p.id);
                info!(
                    "Display name: {}",
                    p.display_name.unwrap_or_else(|| "-".to_string())
                );
            }
            Err(e) => error!("{}", e),
        }
        return;
    }

    let manager = match AnalysisManager::load().await {
        Ok(manager) => manager,
        Err(_) => {
            warning!("No cached analysis found. Run playbucket analyze first.");
            return;
        }
    };

    let analysis = manager.analysis();
    info!(
        "Analysis from {} covering plays since {}",
        analysis.collected_at.format("%Y-%m-%d %H:%M"),
        analysis.window_start.format("%Y-%m-%d")
    );
    info!(
        "{} plays, {} months, {} genres, {} cross-genre tracks, {} without genre",
        analysis.event_count,
        analysis.months.len(),
        analysis.genres.genres.len(),
        manager.duplicates().len(),
        manager.ungenred().len()
    );

    if cache {
        print_analysis(analysis);
    }
}
