//! Error types for tally-core

use crate::token::TokenId;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tally-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input was empty or whitespace-only and cannot become a token
    #[error("Input is blank")]
    BlankInput,

    /// Insertion index outside `[0, len]`
    #[error("Token index {index} out of range (length: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// No token with the given id
    #[error("Token not found: {0}")]
    TokenNotFound(TokenId),
}
