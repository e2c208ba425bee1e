use chrono::Utc;
use tabled::Table;

use crate::{
    cli::{spinner, spotify_client},
    config,
    engine::HistoryCollector,
    error, info,
    management::AnalysisManager,
    success,
    types::{Analysis, GroupTableRow, TrackTableRow},
    utils, warning,
};

/// Collects the listening history, groups it by month and genre, prints the
/// groups and caches the result for `playbucket playlist`.
///
/// `months` and `max_events` override the configured window and cap. Ctrl-C
/// aborts the run; as with a failed fetch, nothing is cached in that case.
pub async fn analyze(months: Option<u32>, max_events: Option<usize>) {
    let client = spotify_client().await;

    let profile = match client.fetch_profile().await {
        Ok(profile) => profile,
        Err(e) => error!("{}", e),
    };
    info!(
        "Logged in as {}",
        profile.display_name.as_deref().unwrap_or(&profile.id)
    );

    let months = months.unwrap_or_else(config::history_months);
    let max_events = max_events.unwrap_or_else(config::max_events);
    let start = utils::window_start(Utc::now().date_naive(), months);

    let pb = spinner("Collecting listening history...");
    let run = HistoryCollector::new(&client, &client, start.timestamp_millis(), max_events)
        .run(|count| pb.set_message(format!("Collected {} plays...", count)));

    let events = tokio::select! {
        result = run => match result {
            Ok(events) => events,
            Err(e) => {
                pb.finish_and_clear();
                error!("Analysis failed: {}\nRun playbucket analyze to try again.", e);
            }
        },
        _ = tokio::signal::ctrl_c() => {
            pb.finish_and_clear();
            error!("Analysis cancelled. Nothing was saved.");
        }
    };
    pb.finish_and_clear();

    success!(
        "Collected {} plays since {}",
        events.len(),
        start.format("%Y-%m-%d")
    );

    let manager = AnalysisManager::build(profile.id, start, &events);
    print_analysis(manager.analysis());

    if let Err(e) = manager.persist().await {
        warning!("Failed to cache analysis: {}", e);
    }
}

pub(crate) fn print_analysis(analysis: &Analysis) {
    let month_rows: Vec<GroupTableRow> = analysis
        .months
        .iter()
        .map(|m| utils::group_row(&m.month_key, &m.tracks))
        .collect();
    println!("Months\n{}\n", Table::new(month_rows));

    let genre_rows: Vec<GroupTableRow> = analysis
        .genres
        .genres
        .iter()
        .map(|g| utils::group_row(&g.genre, &g.tracks))
        .collect();
    if genre_rows.is_empty() {
        warning!("No genre information found for the collected tracks.");
    } else {
        println!("Genres\n{}\n", Table::new(genre_rows));
    }

    if !analysis.genres.duplicates.is_empty() {
        let rows: Vec<TrackTableRow> = analysis
            .genres
            .duplicates
            .iter()
            .map(utils::track_row)
            .collect();
        println!("Cross-genre tracks\n{}\n", Table::new(rows));
    }

    if !analysis.genres.ungenred.is_empty() {
        info!(
            "{} tracks have no genre information and are only grouped by month.",
            analysis.genres.ungenred.len()
        );
    }
}
