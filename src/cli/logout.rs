use crate::{
    management::{AnalysisManager, TokenManager},
    success, warning,
};

/// Forgets the cached token and the cached analysis.
pub async fn logout() {
    if let Err(e) = TokenManager::clear().await {
        warning!("Failed to remove cached token: {}", e);
        return;
    }

    if let Err(e) = AnalysisManager::clear().await {
        warning!("Failed to remove cached analysis: {}", e);
    }

    success!("Logged out.");
}
