//! # tally
//!
//! Build arithmetic formulas out of discrete tokens and keep their value up
//! to date as the tokens change.
//!
//! Tally provides:
//!
//! - Classification of typed text into number, operator and tag tokens
//! - An ordered token store with immutable snapshots
//! - Named references (tags) resolved through a pluggable registry
//! - A safe arithmetic evaluator with implicit `+` between juxtaposed operands
//! - Case-insensitive suggestion matching with a stale-while-revalidate cache
//!
//! ## Example
//!
//! ```rust
//! use tally::prelude::*;
//!
//! let registry: StaticRegistry = [("Revenue", 100.0), ("Expense", 50.0)]
//!     .into_iter()
//!     .collect();
//! let mut session = EditingSession::new(registry, SequentialIds::new());
//!
//! for text in ["Revenue", "-", "Expense", "*", "2"] {
//!     session.set_input(text);
//!     session.commit_input();
//! }
//!
//! assert_eq!(session.expression(), "100-50*2");
//! assert_eq!(session.value().to_string(), "0");
//! ```

pub mod error;
pub mod prelude;
pub mod session;
pub mod suggestions;

pub use error::{Error, FetchError, Result};
pub use session::{EditingSession, SessionOptions};
pub use suggestions::{
    JsonFileSource, StaticSource, SuggestionCache, SuggestionSource, AUTOCOMPLETE_KEY,
};

// Re-export core types
pub use tally_core::{
    classify, match_suggestions, EmptyRegistry, FnRegistry, IdGenerator, Registry,
    SequentialIds, StaticRegistry, Suggestion, Token, TokenId, TokenSequence, TokenStore,
    TokenType, UuidIds,
};

// Re-export formula types
pub use tally_formula::{
    build_expression, calculate, evaluate_expression, parse_expression, CalculatedValue,
    FormulaError, FormulaExpr, FormulaResult,
};
