//! Error types for tally

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by editing sessions and suggestion retrieval
#[derive(Debug, Error)]
pub enum Error {
    /// Token model error
    #[error(transparent)]
    Core(#[from] tally_core::Error),

    /// Suggestion retrieval failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Errors from a suggestion source
#[derive(Debug, Error)]
pub enum FetchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload was not a suggestion list
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Source-specific failure
    #[error("Source error: {0}")]
    Source(String),
}
