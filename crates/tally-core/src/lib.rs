//! # tally-core
//!
//! Core data structures for the tally formula editor.
//!
//! This crate provides the fundamental types used throughout tally:
//! - [`Token`], [`TokenType`] and [`TokenId`] - The atoms of a formula
//! - [`classify`] - Decides what kind of token a piece of committed text is
//! - [`TokenStore`] and [`TokenSequence`] - The ordered token list and its snapshots
//! - [`match_suggestions`] - Filters named-reference suggestions against partial input
//! - [`Registry`] - Resolves tag names to numbers
//! - [`IdGenerator`] - Mints token ids
//!
//! ## Example
//!
//! ```rust
//! use tally_core::{classify, IdGenerator, SequentialIds, Token, TokenStore};
//!
//! let ids = SequentialIds::new();
//! let mut store = TokenStore::new();
//!
//! for text in ["2", "*", "Revenue"] {
//!     let kind = classify(text).unwrap();
//!     store.add_token(Token::new(ids.next_id(), kind, text), None).unwrap();
//! }
//!
//! assert_eq!(store.len(), 3);
//! ```

pub mod classify;
pub mod error;
pub mod ids;
pub mod registry;
pub mod store;
pub mod suggestion;
pub mod token;

// Re-exports for convenience
pub use classify::{classify, validate_input};
pub use error::{Error, Result};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use registry::{EmptyRegistry, FnRegistry, Registry, StaticRegistry};
pub use store::{TokenSequence, TokenStore};
pub use suggestion::{match_suggestions, Suggestion};
pub use token::{Token, TokenId, TokenType};
