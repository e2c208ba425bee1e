//! Configuration management for playbucket.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Environment variables already set in
//! the process take priority over the file. Required values terminate the
//! program with an error message when missing; the rest fall back to
//! defaults matching the public Spotify endpoints.

use std::{env, path::PathBuf, str::FromStr};

use crate::error;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SCOPE: &str =
    "user-read-recently-played playlist-modify-public playlist-modify-private";
pub const DEFAULT_HISTORY_MONTHS: u32 = 12;
pub const DEFAULT_MAX_EVENTS: usize = 1000;

/// Loads environment variables from `<data_local_dir>/playbucket/.env`.
///
/// The directory is created when missing. A missing `.env` file is fine,
/// a malformed one is an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/playbucket/.env`
/// - macOS: `~/Library/Application Support/playbucket/.env`
/// - Windows: `%LOCALAPPDATA%/playbucket/.env`
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playbucket/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn required(key: &str) -> String {
    match env::var(key) {
        Ok(value) => value,
        Err(_) => error!("{} must be set. Add it to your playbucket .env file.", key),
    }
}

fn or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses an optional variable, falling back to `default` when it is missing
/// or does not parse.
pub fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Address the local OAuth callback server binds to, e.g. `127.0.0.1:8888`.
pub fn server_addr() -> String {
    required("SERVER_ADDRESS")
}

pub fn spotify_client_id() -> String {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Must match a redirect URI registered for the Spotify application.
pub fn spotify_redirect_uri() -> String {
    required("SPOTIFY_API_REDIRECT_URI")
}

pub fn spotify_scope() -> String {
    or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Number of calendar months covered by an analysis, the current one included.
pub fn history_months() -> u32 {
    parse_or(
        env::var("PLAYBUCKET_HISTORY_MONTHS").ok(),
        DEFAULT_HISTORY_MONTHS,
    )
}

/// Play count after which history collection stops.
pub fn max_events() -> usize {
    parse_or(env::var("PLAYBUCKET_MAX_EVENTS").ok(), DEFAULT_MAX_EVENTS)
}
