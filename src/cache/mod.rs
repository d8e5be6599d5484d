// TTL cache over a pluggable key-value store.
// Memoizes JSON-serializable values with per-entry expiry, resilient to
// store capacity failures.

pub mod entry;
pub mod ttl;

pub use entry::CacheEntry;

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::store::{KeyValueStore, StoreError};

/// Prefix distinguishing cache entries from unrelated data sharing the
/// same store.
const NAMESPACE: &str = "cache_";

/// Entries created before this horizon are evicted when the store
/// reports it is full.
const EVICTION_HORIZON: Duration = Duration::from_secs(60 * 60);

/// Observer invoked when a cache write is dropped after remediation.
pub type WriteFailedHook = Box<dyn Fn(&str, &StoreError) + Send + Sync>;

/// Diagnostic snapshot of all cache entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of parseable entries.
    pub total_entries: u64,
    /// Summed length of the stored serialized representations.
    pub total_size_bytes: u64,
    /// `created_at` of the oldest entry, epoch milliseconds.
    pub oldest_entry_ms: Option<i64>,
    /// `created_at` of the newest entry, epoch milliseconds.
    pub newest_entry_ms: Option<i64>,
}

/// TTL cache over an injected store.
///
/// Caching is an optimization, never a correctness dependency: reads
/// degrade to a miss and writes degrade to a no-op, but no operation
/// here fails the caller.
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
    default_ttl: Duration,
    on_write_failed: Option<WriteFailedHook>,
}

impl Cache {
    /// Create a cache over the given store with the 5-minute default TTL.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            default_ttl: ttl::MEDIUM,
            on_write_failed: None,
        }
    }

    /// Override the default TTL applied by [`Cache::set`].
    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    /// Install an observer for writes dropped after quota remediation.
    /// Default behavior (silent degradation) is unchanged.
    pub fn on_write_failed(
        mut self,
        hook: impl Fn(&str, &StoreError) + Send + Sync + 'static,
    ) -> Self {
        self.on_write_failed = Some(Box::new(hook));
        self
    }

    /// Look up a cached value. Absent, corrupt, and expired entries all
    /// read as a miss; the latter two are deleted on the way out.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if key.is_empty() {
            return None;
        }

        let store_key = namespaced(key);
        let raw = self.store.get(&store_key).ok().flatten()?;

        let cached: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(cached) => cached,
            Err(_) => {
                debug!(key, "dropping corrupt cache entry");
                let _ = self.store.remove(&store_key);
                return None;
            }
        };

        if cached.is_expired() {
            debug!(key, "cache entry expired");
            let _ = self.store.remove(&store_key);
            return None;
        }

        debug!(key, "cache hit");
        Some(cached.data)
    }

    /// Cache a value under the default TTL.
    pub fn set<T: Serialize>(&self, key: &str, data: &T) {
        self.set_with_ttl(key, data, self.default_ttl);
    }

    /// Cache a value with an explicit TTL. A zero TTL falls back to the
    /// default. Store failures never propagate: on quota overflow the
    /// cache evicts entries older than one hour and retries the write
    /// exactly once, then gives up silently.
    pub fn set_with_ttl<T: Serialize>(&self, key: &str, data: &T, entry_ttl: Duration) {
        if key.is_empty() {
            return;
        }

        let entry_ttl = if entry_ttl.is_zero() {
            self.default_ttl
        } else {
            entry_ttl
        };

        let cached = CacheEntry::new(data, entry_ttl);
        let json = match serde_json::to_string(&cached) {
            Ok(json) => json,
            Err(err) => {
                warn!(key, %err, "cache entry not serializable");
                return;
            }
        };

        let store_key = namespaced(key);
        match self.store.set(&store_key, &json) {
            Ok(()) => debug!(key, bytes = json.len(), "cache write"),
            Err(StoreError::QuotaExceeded) => {
                self.evict_older_than(EVICTION_HORIZON);
                if let Err(err) = self.store.set(&store_key, &json) {
                    warn!(key, %err, "cache write dropped after eviction");
                    self.notify_write_failed(key, &err);
                }
            }
            Err(err) => {
                warn!(key, %err, "cache write failed");
                self.notify_write_failed(key, &err);
            }
        }
    }

    /// Delete a cached entry. Deleting an absent entry is not an error.
    pub fn clear(&self, key: &str) {
        if key.is_empty() {
            return;
        }
        let _ = self.store.remove(&namespaced(key));
    }

    /// Delete every cache entry, leaving unrelated keys in the shared
    /// store untouched.
    pub fn clear_all(&self) {
        for store_key in self.namespaced_keys() {
            let _ = self.store.remove(&store_key);
        }
    }

    /// Read-only scan over all entries. Entries that fail to parse are
    /// skipped, not deleted; this never fails.
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();

        for store_key in self.namespaced_keys() {
            let Ok(Some(raw)) = self.store.get(&store_key) else {
                continue;
            };
            let Ok(cached) = serde_json::from_str::<CacheEntry<serde_json::Value>>(&raw) else {
                continue;
            };

            let created_ms = cached.created_at.timestamp_millis();
            stats.total_entries += 1;
            stats.total_size_bytes += raw.len() as u64;
            stats.oldest_entry_ms =
                Some(stats.oldest_entry_ms.map_or(created_ms, |ms| ms.min(created_ms)));
            stats.newest_entry_ms =
                Some(stats.newest_entry_ms.map_or(created_ms, |ms| ms.max(created_ms)));
        }

        stats
    }

    /// Quota remediation: delete entries created before the horizon,
    /// along with any that no longer parse.
    fn evict_older_than(&self, horizon: Duration) {
        let horizon = TimeDelta::from_std(horizon).unwrap_or(TimeDelta::MAX);
        let cutoff = Utc::now() - horizon;
        let mut evicted = 0u64;

        for store_key in self.namespaced_keys() {
            let Ok(Some(raw)) = self.store.get(&store_key) else {
                continue;
            };
            match serde_json::from_str::<CacheEntry<serde_json::Value>>(&raw) {
                Ok(cached) if cached.created_at >= cutoff => {}
                _ => {
                    let _ = self.store.remove(&store_key);
                    evicted += 1;
                }
            }
        }

        debug!(evicted, "evicted stale cache entries after quota error");
    }

    fn namespaced_keys(&self) -> Vec<String> {
        self.store
            .keys()
            .unwrap_or_default()
            .into_iter()
            .filter(|key| key.starts_with(NAMESPACE))
            .collect()
    }

    fn notify_write_failed(&self, key: &str, err: &StoreError) {
        if let Some(hook) = &self.on_write_failed {
            hook(key, err);
        }
    }
}

fn namespaced(key: &str) -> String {
    format!("{NAMESPACE}{key}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Partner {
        id: u64,
        nom: String,
    }

    fn partners() -> Vec<Partner> {
        vec![Partner {
            id: 1,
            nom: "Swiss Life".to_string(),
        }]
    }

    /// Store double where every write hits the quota.
    struct AlwaysFull {
        inner: MemoryStore,
        write_attempts: AtomicUsize,
    }

    impl AlwaysFull {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                write_attempts: AtomicUsize::new(0),
            }
        }
    }

    impl KeyValueStore for AlwaysFull {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            self.write_attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::QuotaExceeded)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }

        fn keys(&self) -> Result<Vec<String>, StoreError> {
            self.inner.keys()
        }
    }

    /// Write a raw entry with explicit timestamps, bypassing the cache.
    fn seed_entry<T: Serialize>(
        store: &dyn KeyValueStore,
        key: &str,
        data: T,
        created_secs_ago: i64,
        expires_secs_from_now: i64,
    ) {
        let now = Utc::now();
        let cached = CacheEntry {
            data,
            created_at: now - TimeDelta::seconds(created_secs_ago),
            expires_at: now + TimeDelta::seconds(expires_secs_from_now),
        };
        store
            .set(&namespaced(key), &serde_json::to_string(&cached).unwrap())
            .unwrap();
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));

        cache.set_with_ttl("partners", &partners(), ttl::MEDIUM);
        let read: Option<Vec<Partner>> = cache.get("partners");

        assert_eq!(read, Some(partners()));
    }

    #[test]
    fn test_nested_structure_round_trip() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));
        let value = serde_json::json!({"a": [1, 2, {"b": "x"}]});

        cache.set("nested", &value);
        let read: Option<serde_json::Value> = cache.get("nested");

        assert_eq!(read, Some(value));
    }

    #[test]
    fn test_absent_key_is_none() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));

        assert_eq!(cache.get::<Vec<Partner>>("missing"), None);
    }

    #[test]
    fn test_expired_entry_is_deleted_on_read() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        seed_entry(store.as_ref(), "partners", partners(), 600, -1);

        assert_eq!(cache.get::<Vec<Partner>>("partners"), None);
        // The lazy delete also removes it from stats.
        assert_eq!(cache.stats().total_entries, 0);
        assert_eq!(store.get("cache_partners").unwrap(), None);
    }

    #[test]
    fn test_valid_entry_survives_read() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        seed_entry(store.as_ref(), "partners", partners(), 100, 200);

        assert_eq!(cache.get::<Vec<Partner>>("partners"), Some(partners()));
        assert_eq!(cache.get::<Vec<Partner>>("partners"), Some(partners()));
    }

    #[test]
    fn test_corrupt_entry_reads_as_miss_and_is_deleted() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        store.set("cache_partners", "{not json").unwrap();

        assert_eq!(cache.get::<Vec<Partner>>("partners"), None);
        assert_eq!(store.get("cache_partners").unwrap(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));

        cache.set("partners", &partners());
        cache.clear("partners");
        cache.clear("partners");

        assert_eq!(cache.get::<Vec<Partner>>("partners"), None);
    }

    #[test]
    fn test_clear_all_leaves_foreign_keys() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        cache.set("partners", &partners());
        cache.set("cms_accueil", &"Bienvenue".to_string());
        store.set("session_token", "opaque").unwrap();

        cache.clear_all();

        assert_eq!(cache.get::<Vec<Partner>>("partners"), None);
        assert_eq!(cache.get::<String>("cms_accueil"), None);
        assert_eq!(store.get("session_token").unwrap(), Some("opaque".to_string()));
    }

    #[test]
    fn test_empty_key_is_guarded() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        cache.set("", &partners());
        assert_eq!(cache.get::<Vec<Partner>>(""), None);
        cache.clear("");

        // Nothing was written under the bare namespace prefix.
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_zero_ttl_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        cache.set_with_ttl("partners", &partners(), Duration::ZERO);

        let raw = store.get("cache_partners").unwrap().unwrap();
        let cached: CacheEntry<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(cached.expires_at - cached.created_at, TimeDelta::minutes(5));
    }

    #[test]
    fn test_explicit_ttl_sets_expiry() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        cache.set_with_ttl("partners", &partners(), Duration::from_millis(300_000));

        let raw = store.get("cache_partners").unwrap().unwrap();
        let cached: CacheEntry<Vec<Partner>> = serde_json::from_str(&raw).unwrap();
        assert_eq!(cached.data, partners());
        assert_eq!(
            cached.expires_at - cached.created_at,
            TimeDelta::milliseconds(300_000)
        );
    }

    #[test]
    fn test_stats_counts_entries_and_sizes() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        cache.set("partners", &partners());
        cache.set("cms_accueil", &"Bienvenue".to_string());

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert!(stats.total_size_bytes > 0);
        assert!(stats.oldest_entry_ms.is_some());
        assert!(stats.newest_entry_ms.unwrap() >= stats.oldest_entry_ms.unwrap());

        let expected_size: u64 = store
            .keys()
            .unwrap()
            .iter()
            .map(|k| store.get(k).unwrap().unwrap().len() as u64)
            .sum();
        assert_eq!(stats.total_size_bytes, expected_size);
    }

    #[test]
    fn test_stats_skips_corrupt_without_deleting() {
        let store = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        cache.set("partners", &partners());
        store.set("cache_broken", "{not json").unwrap();

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 1);
        // Diagnostic scans have no side effects.
        assert_eq!(store.get("cache_broken").unwrap(), Some("{not json".to_string()));
    }

    #[test]
    fn test_stats_on_empty_cache() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));

        assert_eq!(cache.stats(), CacheStats::default());
    }

    /// Store double whose first write hits the quota; later writes land.
    struct OneShotFull {
        inner: MemoryStore,
        failed_once: AtomicBool,
    }

    impl OneShotFull {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                failed_once: AtomicBool::new(false),
            }
        }
    }

    impl KeyValueStore for OneShotFull {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if !self.failed_once.swap(true, Ordering::SeqCst) {
                return Err(StoreError::QuotaExceeded);
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }

        fn keys(&self) -> Result<Vec<String>, StoreError> {
            self.inner.keys()
        }
    }

    #[test]
    fn test_quota_error_evicts_old_entries_and_retries() {
        let store = Arc::new(OneShotFull::new());
        let cache = Cache::new(store.clone());

        // An entry past the one-hour horizon and a fresh one.
        seed_entry(&store.inner, "stale", "old", 2 * 60 * 60, 3600);
        seed_entry(&store.inner, "fresh", "new", 60, 3600);

        cache.set("partners", &partners());

        // The retried write landed; only the stale entry was evicted.
        assert_eq!(cache.get::<Vec<Partner>>("partners"), Some(partners()));
        assert_eq!(cache.get::<String>("stale"), None);
        assert_eq!(cache.get::<String>("fresh"), Some("new".to_string()));
    }

    #[test]
    fn test_persistent_quota_failure_is_swallowed() {
        let store = Arc::new(AlwaysFull::new());
        let failures = Arc::new(AtomicUsize::new(0));
        let hook_failures = failures.clone();
        let cache = Cache::new(store.clone()).on_write_failed(move |_key, _err| {
            hook_failures.fetch_add(1, Ordering::SeqCst);
        });

        // Does not panic, does not error.
        cache.set("partners", &partners());

        // First attempt plus exactly one retry.
        assert_eq!(store.write_attempts.load(Ordering::SeqCst), 2);
        assert_eq!(failures.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get::<Vec<Partner>>("partners"), None);
    }
}
