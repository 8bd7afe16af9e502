//! Prelude module - common imports for tally users
//!
//! ```rust
//! use tally::prelude::*;
//! ```

pub use crate::{
    // Session
    CalculatedValue,
    EditingSession,
    SessionOptions,

    // Tokens
    Token,
    TokenId,
    TokenType,

    // Injected capabilities
    IdGenerator,
    Registry,
    SequentialIds,
    StaticRegistry,
    UuidIds,

    // Suggestions
    JsonFileSource,
    StaticSource,
    Suggestion,
    SuggestionCache,
    SuggestionSource,

    // Error types
    Error,
    FetchError,
    FormulaError,
    Result,
};
