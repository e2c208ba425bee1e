use thiserror::Error;

/// Terminal failures of an engine operation.
///
/// No retry happens at this level. A failed collection discards everything it
/// accumulated and the caller reruns the analysis from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Non-success response from the play-event source, the genre lookup or
    /// the profile endpoint.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// Non-success response while creating a playlist or adding tracks to it.
    #[error("create failed: {0}")]
    CreateFailed(String),
}

impl EngineError {
    pub fn fetch(reason: impl Into<String>) -> Self {
        EngineError::FetchFailed(reason.into())
    }

    pub fn create(reason: impl Into<String>) -> Self {
        EngineError::CreateFailed(reason.into())
    }
}
