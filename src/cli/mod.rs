//! # CLI Module
//!
//! User-facing commands. Each command loads what it needs from the caches in
//! [`crate::management`], talks to Spotify through [`crate::spotify`] and runs
//! the grouping in [`crate::engine`].
//!
//! ```text
//! playbucket auth                      # OAuth PKCE login
//! playbucket analyze                   # collect history, group, cache
//! playbucket playlist --month 2025-06  # create "Monthly 2025-06"
//! playbucket playlist --genre rock     # create "Genre rock"
//! playbucket playlist --duplicates     # create "Genre crossovers"
//! playbucket info --cache              # summary of the cached analysis
//! playbucket logout                    # forget token and analysis
//! ```
//!
//! Fatal problems go through [`crate::error!`], which prints and exits with
//! status 1. A failed or cancelled analysis never writes a partial cache.

mod analyze;
mod info;
mod logout;
mod playlist;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, management::TokenManager, spotify::SpotifyClient};

pub use crate::spotify::auth::auth;
pub use analyze::analyze;
pub use info::info;
pub use logout::logout;
pub use playlist::{PlaylistTarget, playlist, select_playlists};

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

async fn spotify_client() -> SpotifyClient {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run playbucket auth\n Error: {}",
                e
            );
        }
    };

    SpotifyClient::new(token_mgr.session().await)
}
