// Pluggable key-value store backends.
// The cache reads and writes through this narrow contract so tests can
// substitute an in-memory store for the on-disk one.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Failures reported by a store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store has no room left for the value being written.
    #[error("store capacity exceeded")]
    QuotaExceeded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Narrow contract over a persistent string-keyed store.
///
/// Implementations use interior mutability: the cache holds a shared
/// handle and calls are synchronous.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for a key, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, overwriting any prior one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Enumerate all keys currently present.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}
