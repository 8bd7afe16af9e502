//! Token storage
//!
//! [`TokenStore`] owns the ordered token list of one editing session. Every
//! mutation builds a fresh [`TokenSequence`] snapshot and swaps it in, so a
//! snapshot handed out earlier never changes underneath its reader.
//!
//! Mutations that do not change anything (unknown id) return the current
//! snapshot itself; [`TokenSequence::same_as`] tells the two cases apart.

use crate::error::{Error, Result};
use crate::token::{Token, TokenId};
use std::ops::Deref;
use std::sync::Arc;

/// Immutable snapshot of an ordered token list
#[derive(Debug, Clone)]
pub struct TokenSequence {
    tokens: Arc<[Token]>,
}

impl Default for TokenSequence {
    fn default() -> Self {
        Self {
            tokens: Arc::from(Vec::new()),
        }
    }
}

impl TokenSequence {
    /// Empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens in left-to-right order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether two snapshots are the same allocation
    pub fn same_as(&self, other: &TokenSequence) -> bool {
        Arc::ptr_eq(&self.tokens, &other.tokens)
    }

    /// Position of the token with `id`
    pub fn position(&self, id: &TokenId) -> Option<usize> {
        self.tokens.iter().position(|t| &t.id == id)
    }

    /// Token with `id`
    pub fn get(&self, id: &TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| &t.id == id)
    }
}

impl Deref for TokenSequence {
    type Target = [Token];

    fn deref(&self) -> &[Token] {
        &self.tokens
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }
}

impl PartialEq for TokenSequence {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

/// Ordered token store
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    current: TokenSequence,
}

impl TokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `tokens`
    pub fn with_tokens(tokens: Vec<Token>) -> Self {
        Self {
            current: tokens.into(),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> TokenSequence {
        self.current.clone()
    }

    /// Current tokens
    pub fn tokens(&self) -> &[Token] {
        self.current.tokens()
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Check if the store holds no tokens
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Rightmost token
    pub fn last(&self) -> Option<&Token> {
        self.current.last()
    }

    /// Token with `id`
    pub fn get(&self, id: &TokenId) -> Option<&Token> {
        self.current.get(id)
    }

    /// Position of the token with `id`
    pub fn position(&self, id: &TokenId) -> Option<usize> {
        self.current.position(id)
    }

    /// Insert `token` at `index`, or append when `index` is `None`
    ///
    /// `index` must lie in `[0, len]`; otherwise the store is left unchanged
    /// and [`Error::IndexOutOfRange`] is returned.
    pub fn add_token(&mut self, token: Token, index: Option<usize>) -> Result<TokenSequence> {
        let len = self.current.len();
        let index = match index {
            Some(index) if index > len => return Err(Error::IndexOutOfRange { index, len }),
            Some(index) => index,
            None => len,
        };

        let mut tokens = Vec::with_capacity(len + 1);
        tokens.extend_from_slice(&self.current[..index]);
        tokens.push(token);
        tokens.extend_from_slice(&self.current[index..]);

        tracing::debug!(index, len = len + 1, "token added");
        Ok(self.replace(tokens))
    }

    /// Append `token` at the end
    pub fn push_token(&mut self, token: Token) -> TokenSequence {
        let mut tokens = self.current.to_vec();
        tokens.push(token);

        tracing::debug!(len = tokens.len(), "token appended");
        self.replace(tokens)
    }

    /// Replace the value of the token with `id`, keeping its type
    pub fn update_token(&mut self, id: &TokenId, new_value: impl Into<String>) -> TokenSequence {
        let Some(pos) = self.current.position(id) else {
            return self.snapshot();
        };

        let mut tokens = self.current.to_vec();
        tokens[pos].value = new_value.into();

        tracing::debug!(%id, pos, "token updated");
        self.replace(tokens)
    }

    /// Remove the token with `id`
    pub fn remove_token(&mut self, id: &TokenId) -> TokenSequence {
        if self.current.position(id).is_none() {
            return self.snapshot();
        }

        let tokens: Vec<Token> = self
            .current
            .iter()
            .filter(|t| &t.id != id)
            .cloned()
            .collect();

        tracing::debug!(%id, len = tokens.len(), "token removed");
        self.replace(tokens)
    }

    /// Remove every token
    pub fn clear(&mut self) -> TokenSequence {
        if self.current.is_empty() {
            return self.snapshot();
        }
        self.replace(Vec::new())
    }

    fn replace(&mut self, tokens: Vec<Token>) -> TokenSequence {
        self.current = tokens.into();
        self.snapshot()
    }
}
