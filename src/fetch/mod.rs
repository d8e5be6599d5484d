// Cache-aware fetch wrappers.
// Bind a zero-argument async fetch function to a cache key and expose
// load/refresh/invalidate semantics to the consuming screen.

pub mod manual;

pub use manual::ManualCache;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::{Cache, ttl};
use crate::error::{CourtageError, Result};

/// Boxed zero-argument async fetch function.
pub type FetchFn<T> =
    Box<dyn Fn() -> Pin<Box<dyn Future<Output = Result<T>> + Send>> + Send + Sync>;

/// Configuration for a cached query.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Logical cache key shared across consumers (see [`crate::keys`]).
    pub key: String,
    /// Entry lifetime written on a successful fetch.
    pub ttl: Duration,
    /// When false, the cache is neither read nor written.
    pub enabled: bool,
    /// Clear the cached entry before the first load.
    pub invalidate_on_mount: bool,
}

impl QueryOptions {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ttl: ttl::MEDIUM,
            enabled: true,
            invalidate_on_mount: false,
        }
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn invalidate_on_mount(mut self, invalidate: bool) -> Self {
        self.invalidate_on_mount = invalidate;
        self
    }
}

/// A fetch function bound to a cache key, with loading and error state.
///
/// Concurrent queries for the same key are not coalesced: each one
/// checks the cache and fetches independently. Last write wins, which
/// is safe because entries are overwritten wholesale.
pub struct CachedQuery<T> {
    cache: Arc<Cache>,
    fetch: FetchFn<T>,
    key: String,
    ttl: Duration,
    enabled: bool,
    invalidate_on_mount: bool,
    /// Last successful value; kept across failed refreshes so screens
    /// show stale data next to the error instead of going blank.
    pub data: Option<T>,
    /// True while a load is in progress.
    pub loading: bool,
    /// Error from the most recent load, cleared when the next one starts.
    pub error: Option<CourtageError>,
}

impl<T> CachedQuery<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(cache: Arc<Cache>, fetch: FetchFn<T>, options: QueryOptions) -> Self {
        Self {
            cache,
            fetch,
            key: options.key,
            ttl: options.ttl,
            enabled: options.enabled,
            invalidate_on_mount: options.invalidate_on_mount,
            data: None,
            loading: false,
            error: None,
        }
    }

    /// Run the initial load: optionally invalidate, then read through
    /// the cache.
    pub async fn activate(&mut self) {
        if self.invalidate_on_mount {
            self.invalidate();
        }
        self.load(true).await;
    }

    /// Rebind to a new key and re-run the load.
    pub async fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
        self.activate().await;
    }

    /// Re-fetch, bypassing the cache read but still writing the fresh
    /// result through on success.
    pub async fn refresh(&mut self) {
        self.load(false).await;
    }

    /// Drop the cached entry and the in-memory value without fetching.
    pub fn invalidate(&mut self) {
        self.cache.clear(&self.key);
        self.data = None;
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    async fn load(&mut self, use_cache: bool) {
        self.loading = true;
        self.error = None;

        // Cache-hit fast path: the fetch function is never invoked.
        if self.enabled && use_cache {
            if let Some(cached) = self.cache.get::<T>(&self.key) {
                self.data = Some(cached);
                self.loading = false;
                return;
            }
        }

        match (self.fetch)().await {
            Ok(result) => {
                if self.enabled {
                    self.cache.set_with_ttl(&self.key, &result, self.ttl);
                }
                self.data = Some(result);
            }
            Err(err) => {
                // Prior data stays visible alongside the error.
                self.error = Some(err);
            }
        }

        self.loading = false;
    }
}
