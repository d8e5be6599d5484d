// Manually-driven cache handle.
// Same primitives as the bound query, but the caller decides when to
// fetch and fetch errors propagate instead of being captured as state.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::{Cache, ttl};
use crate::error::Result;

/// Cache handle for a single key without lifecycle binding.
pub struct ManualCache {
    cache: Arc<Cache>,
    key: String,
    ttl: Duration,
}

impl ManualCache {
    pub fn new(cache: Arc<Cache>, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            ttl: ttl::MEDIUM,
        }
    }

    /// Override the TTL applied by [`ManualCache::set_cache`] and
    /// [`ManualCache::refresh_cache`].
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Read the cached value, `None` on miss.
    pub fn get_cache<T: DeserializeOwned>(&self) -> Option<T> {
        self.cache.get(&self.key)
    }

    /// Write a value under this handle's key and TTL.
    pub fn set_cache<T: Serialize>(&self, data: &T) {
        self.cache.set_with_ttl(&self.key, data, self.ttl);
    }

    /// Delete the cached entry.
    pub fn clear_cache(&self) {
        self.cache.clear(&self.key);
    }

    /// Always fetch live, write the result through, and return it.
    /// Fetch errors propagate to the caller.
    pub async fn refresh_cache<T, F, Fut>(&self, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let result = fetch().await?;
        self.cache.set_with_ttl(&self.key, &result, self.ttl);
        Ok(result)
    }
}
