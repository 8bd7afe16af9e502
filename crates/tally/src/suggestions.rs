//! Suggestion retrieval and caching
//!
//! Suggestions come from a [`SuggestionSource`], fetched asynchronously and
//! kept in a [`SuggestionCache`] under a stable key. The cache serves the last
//! good list while a refetch is in flight, and keeps it when a refetch fails.
//! Nothing here touches tokens or evaluation.

use crate::error::FetchError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tally_core::{match_suggestions, Suggestion};
use tokio::task::JoinHandle;

/// Cache key used for the suggestion list
pub const AUTOCOMPLETE_KEY: &str = "autocomplete";

/// Provider of the full suggestion list
///
/// The list may be unordered and may contain duplicate keys; filtering and
/// deduplication happen on the consuming side.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Fetch the complete list
    async fn fetch(&self) -> Result<Vec<Suggestion>, FetchError>;
}

#[async_trait]
impl<S: SuggestionSource + ?Sized> SuggestionSource for Arc<S> {
    async fn fetch(&self) -> Result<Vec<Suggestion>, FetchError> {
        (**self).fetch().await
    }
}

/// Fixed in-memory list
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    suggestions: Vec<Suggestion>,
}

impl StaticSource {
    /// Create a source that always returns `suggestions`
    pub fn new(suggestions: Vec<Suggestion>) -> Self {
        Self { suggestions }
    }
}

#[async_trait]
impl SuggestionSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Suggestion>, FetchError> {
        Ok(self.suggestions.clone())
    }
}

/// JSON file holding `[{ "value": ..., "name": ... }, ...]`
///
/// The file is re-read on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File being read
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SuggestionSource for JsonFileSource {
    async fn fetch(&self) -> Result<Vec<Suggestion>, FetchError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let suggestions: Vec<Suggestion> = serde_json::from_str(&text)?;
        tracing::debug!(path = %self.path.display(), count = suggestions.len(), "suggestions read");
        Ok(suggestions)
    }
}

#[derive(Debug, Default)]
struct CacheState {
    data: Option<Arc<[Suggestion]>>,
    in_flight: usize,
    fetches: u64,
    last_error: Option<String>,
}

/// Stale-while-revalidate cache for one suggestion list
#[derive(Debug)]
pub struct SuggestionCache {
    key: String,
    state: RwLock<CacheState>,
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new(AUTOCOMPLETE_KEY)
    }
}

impl SuggestionCache {
    /// Create an empty cache under `key`
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Cache key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Last successfully fetched list, possibly stale
    ///
    /// Empty until the first fetch succeeds.
    pub fn snapshot(&self) -> Arc<[Suggestion]> {
        self.read()
            .data
            .clone()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// Check if any fetch has succeeded
    pub fn has_data(&self) -> bool {
        self.read().data.is_some()
    }

    /// Check if a fetch is in flight
    pub fn is_fetching(&self) -> bool {
        self.read().in_flight > 0
    }

    /// Number of successful fetches
    pub fn fetch_count(&self) -> u64 {
        self.read().fetches
    }

    /// Message of the most recent failed fetch, cleared by a success
    pub fn last_error(&self) -> Option<String> {
        self.read().last_error.clone()
    }

    /// Match `partial` against the cached list
    pub fn suggest(&self, partial: &str) -> Vec<Suggestion> {
        match_suggestions(partial, &self.snapshot())
    }

    /// Fetch from `source` and replace the cached list
    ///
    /// On failure the previous list stays in place and the error is both
    /// recorded and returned. Safe to retry, and safe to cancel: dropping the
    /// future mid-fetch leaves the cache as it was.
    pub async fn refresh<S>(&self, source: &S) -> Result<Arc<[Suggestion]>, FetchError>
    where
        S: SuggestionSource + ?Sized,
    {
        tracing::debug!(key = %self.key, "fetching suggestions");
        let result = {
            let _in_flight = InFlight::enter(self);
            source.fetch().await
        };

        let mut state = self.write();
        match result {
            Ok(list) => {
                let list: Arc<[Suggestion]> = list.into();
                tracing::debug!(key = %self.key, count = list.len(), "suggestions cached");
                state.data = Some(Arc::clone(&list));
                state.fetches += 1;
                state.last_error = None;
                Ok(list)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "suggestion fetch failed");
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch only if nothing has been cached yet
    pub async fn ensure_fetched<S>(&self, source: &S) -> Result<Arc<[Suggestion]>, FetchError>
    where
        S: SuggestionSource + ?Sized,
    {
        if let Some(data) = self.read().data.clone() {
            return Ok(data);
        }
        self.refresh(source).await
    }

    /// Refresh on a background task
    ///
    /// Readers keep seeing the previous list until the task finishes.
    pub fn spawn_refresh(
        self: &Arc<Self>,
        source: Arc<dyn SuggestionSource>,
    ) -> JoinHandle<Result<Arc<[Suggestion]>, FetchError>> {
        let cache = Arc::clone(self);
        tokio::spawn(async move { cache.refresh(source.as_ref()).await })
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks a fetch as in flight until dropped
struct InFlight<'a>(&'a SuggestionCache);

impl<'a> InFlight<'a> {
    fn enter(cache: &'a SuggestionCache) -> Self {
        cache.write().in_flight += 1;
        Self(cache)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.write().in_flight -= 1;
    }
}
