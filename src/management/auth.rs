use std::path::PathBuf;

use chrono::Utc;

use crate::{
    management::cache::{self, CacheError},
    spotify,
    types::{AuthSession, Token},
    warning,
};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, CacheError> {
        let token: Token = cache::read_json(&Self::token_path()).await?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), CacheError> {
        cache::write_json(&Self::token_path(), &self.token).await
    }

    pub async fn clear() -> Result<(), CacheError> {
        cache::remove(&Self::token_path()).await
    }

    /// Returns an access token, refreshing and persisting it first when it is
    /// about to expire. A failed refresh falls back to the stored token.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired(Utc::now().timestamp() as u64) {
            match spotify::auth::refresh_token(&self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to save refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub async fn session(&mut self) -> AuthSession {
        AuthSession {
            access_token: self.get_valid_token().await,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        cache::data_path("cache/token.json")
    }
}
