// Client-side data layer for the Alliance Courtage broker portal.
// TTL caching over a pluggable store, cache-aware fetching, and the
// portal REST API client.

pub mod api;
pub mod cache;
pub mod error;
pub mod fetch;
pub mod keys;
pub mod pagination;
pub mod store;

pub use api::PortalClient;
pub use cache::{Cache, CacheEntry, CacheStats, ttl};
pub use error::{CourtageError, Result};
pub use fetch::{CachedQuery, FetchFn, ManualCache, QueryOptions};
pub use pagination::PaginatedList;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
