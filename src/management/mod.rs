mod analysis;
mod auth;
mod cache;

pub use analysis::AnalysisManager;
pub use auth::TokenManager;
pub use cache::CacheError;
