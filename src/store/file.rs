// Filesystem-backed key-value store.
// One file per key under a base directory, written atomically via a
// temp-file rename so readers never observe partial writes.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use directories::ProjectDirs;

use super::{KeyValueStore, StoreError};

/// Store that persists each key as a file in a base directory.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory. The directory is
    /// created lazily on first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create a store in the platform cache directory
    /// (~/.cache/courtage on Linux).
    pub fn open_default() -> Option<Self> {
        Self::default_dir().map(Self::new)
    }

    /// The platform-specific default base directory.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "courtage").map(|dirs| dirs.cache_dir().to_path_buf())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(sanitize_key(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_dir).map_err(map_io)?;

        let path = self.path_for(key);

        // Write atomically via temp file
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).map_err(map_io)?;
        file.write_all(value.as_bytes()).map_err(map_io)?;
        file.sync_all().map_err(map_io)?;
        fs::rename(&temp_path, &path).map_err(map_io)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for dir_entry in fs::read_dir(&self.base_dir)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = dir_entry.file_name().to_str() {
                // Leftover temp files from interrupted writes are not keys.
                if name.ends_with(".tmp") {
                    continue;
                }
                keys.push(name.to_string());
            }
        }
        Ok(keys)
    }
}

/// Map out-of-space errors to the quota signal the cache remediates on.
fn map_io(err: io::Error) -> StoreError {
    match err.kind() {
        io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => StoreError::QuotaExceeded,
        _ => StoreError::Io(err),
    }
}

/// Sanitize a key for use as a filename.
/// Replaces problematic characters with underscores.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("simple"), "simple");
        assert_eq!(sanitize_key("with/slash"), "with_slash");
        assert_eq!(sanitize_key("a:b"), "a_b");
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("cache_partners", "[1,2,3]").unwrap();
        assert_eq!(
            store.get("cache_partners").unwrap(),
            Some("[1,2,3]".to_string())
        );
    }

    #[test]
    fn test_get_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("key", "old").unwrap();
        store.set("key", "new").unwrap();
        assert_eq!(store.get("key").unwrap(), Some("new".to_string()));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("key", "value").unwrap();
        store.remove("key").unwrap();
        store.remove("key").unwrap();
        assert_eq!(store.get("key").unwrap(), None);
    }

    #[test]
    fn test_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.set("cache_partners", "a").unwrap();
        store.set("cache_formations", "b").unwrap();

        let mut keys = store.keys().unwrap();
        keys.sort();
        assert_eq!(
            keys,
            vec!["cache_formations".to_string(), "cache_partners".to_string()]
        );
    }

    #[test]
    fn test_keys_on_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("never_created"));

        assert!(store.keys().unwrap().is_empty());
    }
}
