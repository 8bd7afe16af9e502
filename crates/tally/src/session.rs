//! Formula editing session
//!
//! An [`EditingSession`] owns everything one formula editor needs: the token
//! store, the text typed but not yet committed, the registry used to resolve
//! tags, the id generator, and the most recent computed value.
//!
//! Every successful change to the token list is followed by exactly one
//! recomputation. Typing into the pending input never recomputes.
//!
//! # Example
//!
//! ```rust
//! use tally::prelude::*;
//!
//! let registry: StaticRegistry = [("Revenue", 100.0)].into_iter().collect();
//! let mut session = EditingSession::new(registry, SequentialIds::new());
//!
//! session.set_input("2");
//! session.commit_input();
//! session.set_input("Revenue");
//! session.commit_input();
//!
//! assert_eq!(session.expression(), "2+100");
//! assert_eq!(session.value(), &CalculatedValue::Number(102.0));
//! ```

use crate::error::Result;
use tally_core::{
    classify, match_suggestions, validate_input, Error as CoreError, IdGenerator, Registry,
    Suggestion, Token, TokenId, TokenSequence, TokenStore,
};
use tally_formula::{calculate, CalculatedValue};

/// Options for an editing session
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Cap on the number of suggestions returned (default: unlimited)
    pub max_suggestions: Option<usize>,
}

/// One interactive formula editor
pub struct EditingSession<R, G> {
    store: TokenStore,
    last_seen: TokenSequence,
    input: String,
    registry: R,
    ids: G,
    options: SessionOptions,
    expression: String,
    value: CalculatedValue,
    recomputes: u64,
}

impl<R: Registry, G: IdGenerator> EditingSession<R, G> {
    /// Create an empty session
    pub fn new(registry: R, ids: G) -> Self {
        Self::with_options(registry, ids, SessionOptions::default())
    }

    /// Create an empty session with custom options
    pub fn with_options(registry: R, ids: G, options: SessionOptions) -> Self {
        let store = TokenStore::new();
        Self {
            last_seen: store.snapshot(),
            store,
            input: String::new(),
            registry,
            ids,
            options,
            expression: String::new(),
            value: CalculatedValue::Unset,
            recomputes: 0,
        }
    }

    // === Reads ===

    /// Committed tokens, left to right
    pub fn tokens(&self) -> &[Token] {
        self.store.tokens()
    }

    /// Snapshot of the committed tokens
    pub fn snapshot(&self) -> TokenSequence {
        self.store.snapshot()
    }

    /// Text typed but not yet committed
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Most recently computed value
    pub fn value(&self) -> &CalculatedValue {
        &self.value
    }

    /// Expression text behind [`value`](Self::value)
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// How many times the value has been recomputed
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Registry used to resolve tags
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Session options
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Suggestions for the pending input
    ///
    /// Empty while nothing is typed.
    pub fn suggestions(&self, candidates: &[Suggestion]) -> Vec<Suggestion> {
        let mut matched = match_suggestions(&self.input, candidates);
        if let Some(max) = self.options.max_suggestions {
            matched.truncate(max);
        }
        matched
    }

    // === Pending input ===

    /// Replace the pending input
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Append text to the pending input
    pub fn push_input(&mut self, text: &str) {
        self.input.push_str(text);
    }

    // === Token edits ===

    /// Commit the pending input as a new token at the end
    ///
    /// Blank input commits nothing and is left in place. Otherwise the
    /// trimmed text is classified, appended, and the input cleared.
    pub fn commit_input(&mut self) -> Option<TokenId> {
        let text = validate_input(&self.input).ok()?.to_string();
        let kind = classify(&text).ok()?;

        let id = self.ids.next_id();
        let seq = self.store.push_token(Token::new(id.clone(), kind, text));
        self.input.clear();
        self.apply(seq);
        Some(id)
    }

    /// Append a tag token for a picked suggestion
    ///
    /// The token's value is the suggestion's key, not its display name.
    pub fn pick_suggestion(&mut self, suggestion: &Suggestion) -> TokenId {
        let id = self.ids.next_id();
        let seq = self
            .store
            .push_token(Token::tag(id.clone(), suggestion.value.clone()));
        self.input.clear();
        self.apply(seq);
        id
    }

    /// Backspace
    ///
    /// With pending input, drops its last character. Without, removes the
    /// last token and returns it.
    pub fn backspace(&mut self) -> Option<Token> {
        if self.input.pop().is_some() {
            return None;
        }

        let last = self.store.last()?.clone();
        let seq = self.store.remove_token(&last.id);
        self.apply(seq);
        Some(last)
    }

    /// Classify `text` and insert it at `index`
    pub fn insert_token(&mut self, text: &str, index: usize) -> Result<TokenId> {
        let text = validate_input(text)?;
        let kind = classify(text)?;

        let id = self.ids.next_id();
        let seq = self
            .store
            .add_token(Token::new(id.clone(), kind, text), Some(index))?;
        self.apply(seq);
        Ok(id)
    }

    /// Replace a token's value
    ///
    /// The token keeps the type it was created with.
    pub fn update_token(&mut self, id: &TokenId, value: &str) -> Result<()> {
        let value = validate_input(value)?;
        if self.store.get(id).is_none() {
            return Err(CoreError::TokenNotFound(id.clone()).into());
        }

        let seq = self.store.update_token(id, value);
        self.apply(seq);
        Ok(())
    }

    /// Remove a token; returns whether it existed
    pub fn remove_token(&mut self, id: &TokenId) -> bool {
        let seq = self.store.remove_token(id);
        self.apply(seq)
    }

    /// Remove every token and the pending input
    pub fn clear(&mut self) {
        self.input.clear();
        let seq = self.store.clear();
        self.apply(seq);
    }

    /// Recompute the value from the current tokens
    ///
    /// Token edits recompute on their own. Call this when the registry
    /// resolves names through shared state (say a [`FnRegistry`] reading a
    /// `Cell` or lock) and that state has changed.
    ///
    /// [`FnRegistry`]: tally_core::FnRegistry
    pub fn recompute(&mut self) -> &CalculatedValue {
        let (expression, value) = calculate(self.store.tokens(), &self.registry);
        self.recomputes += 1;
        tracing::debug!(
            tokens = self.store.len(),
            expression = %expression,
            value = %value,
            "recomputed"
        );
        self.expression = expression;
        self.value = value;
        &self.value
    }

    /// Recompute if `seq` is a new snapshot; returns whether it was
    fn apply(&mut self, seq: TokenSequence) -> bool {
        if seq.same_as(&self.last_seen) {
            return false;
        }
        self.last_seen = seq;
        self.recompute();
        true
    }
}
