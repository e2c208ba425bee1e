//! # Spotify Integration Module
//!
//! Thin I/O wrappers around the Spotify Web API. Each submodule implements one
//! of the engine's collaborator seams on top of [`SpotifyClient`]:
//!
//! ```text
//! engine::PlaySource    ← history   (GET /me/player/recently-played)
//! engine::GenreLookup   ← artists   (GET /artists?ids=...)
//! engine::PlaylistSink  ← playlist  (POST /users/{id}/playlists, POST /playlists/{id}/tracks)
//!                         profile   (GET /me)
//!                         auth      (OAuth 2.0 PKCE, token refresh)
//! ```
//!
//! ## Error Handling
//!
//! Every non-success response becomes an [`EngineError`]. A `502 Bad Gateway`
//! is retried up to [`MAX_BAD_GATEWAY_RETRIES`] times with a fixed delay;
//! nothing else is retried here.

pub mod artists;
pub mod auth;
pub mod history;
pub mod playlist;
pub mod profile;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::time::sleep;

use crate::{config, engine::EngineError, types::AuthSession, warning};

pub const MAX_BAD_GATEWAY_RETRIES: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);

/// Authenticated client for one analysis run.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    session: AuthSession,
}

impl SpotifyClient {
    pub fn new(session: AuthSession) -> Self {
        Self::with_api_url(session, config::spotify_apiurl())
    }

    pub fn with_api_url(session: AuthSession, api_url: String) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(self.url(path))
            .bearer_auth(&self.session.access_token)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(self.url(path))
            .bearer_auth(&self.session.access_token)
    }
}

/// Sends a request, retrying on `502 Bad Gateway`.
///
/// `build` is called once per attempt. Transport errors and any other
/// non-success status are mapped through `fail`.
pub(crate) async fn send<B, F>(build: B, fail: F) -> Result<Response, EngineError>
where
    B: Fn() -> RequestBuilder,
    F: Fn(String) -> EngineError,
{
    let mut attempt = 0;

    loop {
        let response = build()
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        match response.error_for_status() {
            Ok(valid_response) => return Ok(valid_response),
            Err(err) => {
                if err.status() == Some(StatusCode::BAD_GATEWAY)
                    && attempt < MAX_BAD_GATEWAY_RETRIES
                {
                    attempt += 1;
                    warning!(
                        "Spotify answered 502, retrying in {}s ({}/{})",
                        BAD_GATEWAY_DELAY.as_secs(),
                        attempt,
                        MAX_BAD_GATEWAY_RETRIES
                    );
                    sleep(BAD_GATEWAY_DELAY).await;
                    continue;
                }
                return Err(fail(err.to_string()));
            }
        }
    }
}
