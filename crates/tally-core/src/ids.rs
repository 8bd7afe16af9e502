//! Token id generation
//!
//! Every new token needs a fresh id. The generator is injected so tests can
//! swap the random default for a predictable counter.

use crate::token::TokenId;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh token ids
pub trait IdGenerator {
    /// Produce an id never returned before by this generator
    fn next_id(&self) -> TokenId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> TokenId {
        (**self).next_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&self) -> TokenId {
        (**self).next_id()
    }
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self) -> TokenId {
        TokenId::new(Uuid::new_v4().to_string())
    }
}

/// Monotonic counter ids: `tok-1`, `tok-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
    prefix: Option<String>,
}

impl SequentialIds {
    /// Counter starting at 1 with the `tok` prefix
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            next: AtomicU64::new(0),
            prefix: Some(prefix.into()),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> TokenId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        let prefix = self.prefix.as_deref().unwrap_or("tok");
        TokenId::new(format!("{prefix}-{n}"))
    }
}
