// Cache entry envelope.
// Wraps a payload with its creation and expiry instants.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// One memoized value. Entries are immutable once written: a refresh
/// overwrites the whole entry, never mutates it in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached payload.
    pub data: T,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
    /// `created_at + ttl`; the entry is stale strictly after this instant.
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Build an entry expiring `ttl` after now.
    pub fn new(data: T, ttl: Duration) -> Self {
        let now = Utc::now();
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            data,
            created_at: now,
            expires_at,
        }
    }

    /// Check if this entry is past its expiry instant.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if this entry is still valid (not expired).
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_expiry_after_creation() {
        let entry = CacheEntry::new("payload", Duration::from_secs(300));

        assert!(entry.expires_at > entry.created_at);
        assert_eq!(entry.expires_at - entry.created_at, TimeDelta::seconds(300));
    }

    #[test]
    fn test_fresh_entry_is_valid() {
        let entry = CacheEntry::new(42, Duration::from_secs(60));

        assert!(entry.is_valid());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let mut entry = CacheEntry::new(42, Duration::from_secs(60));
        entry.expires_at = Utc::now() - TimeDelta::seconds(1);

        assert!(entry.is_expired());
        assert!(!entry.is_valid());
    }

    #[test]
    fn test_survives_serialization() {
        let entry = CacheEntry::new(vec![1, 2, 3], Duration::from_secs(60));

        let json = serde_json::to_string(&entry).unwrap();
        let back: CacheEntry<Vec<i32>> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.data, vec![1, 2, 3]);
        assert_eq!(back.created_at, entry.created_at);
        assert_eq!(back.expires_at, entry.expires_at);
    }
}
