use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use crate::paths::ShelfPaths;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    #[error("failed to write key '{key}': {source}")]
    Io {
        key: String,
        source: std::io::Error,
    },
}

/// File-per-key JSON store rooted in the profile data directory.
///
/// Reads fail soft: a missing key is `None`, and a corrupt or unreadable file
/// is logged and reported as `None` so callers always get usable default
/// state. Writes replace the whole value via a temp file and rename.
///
/// The store is single-writer by design. Two processes sharing one data
/// directory race on write and the last writer wins; that lost-update
/// anomaly is an accepted limitation, not something the store guards against.
#[derive(Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(paths: &ShelfPaths) -> Result<Self, StoreError> {
        std::fs::create_dir_all(paths.data_dir()).map_err(|source| StoreError::Io {
            key: paths.data_dir().display().to_string(),
            source,
        })?;
        Ok(Self {
            data_dir: paths.data_dir().to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }

    /// Load and deserialize the value stored under `key`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.key_path(key);

        if !path.exists() {
            debug!("Store miss: {} (file does not exist)", key);
            return None;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read store file for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<T>(&content) {
            Ok(value) => {
                debug!("Store hit: {}", key);
                Some(value)
            }
            Err(e) => {
                warn!(
                    "Corrupt data detected for key {}: {}. Falling back to default state.",
                    key, e
                );
                None
            }
        }
    }

    /// Serialize `value` and persist it wholesale under `key`.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.key_path(key);

        let json = serde_json::to_string_pretty(value).map_err(|source| {
            warn!("Failed to serialize value for {}: {}", key, source);
            StoreError::Serialize {
                key: key.to_string(),
                source,
            }
        })?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        std::fs::write(&temp_path, json).map_err(io_err)?;
        std::fs::rename(&temp_path, &path).map_err(io_err)?;

        debug!("Store saved: {}", key);
        Ok(())
    }

    /// Delete the value stored under `key`. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&path).map_err(|source| StoreError::Io {
            key: key.to_string(),
            source,
        })?;
        debug!("Store removed: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(&ShelfPaths::with_base(dir.path())).unwrap();
        (dir, store)
    }

    #[test]
    fn test_read_missing_key_returns_none() {
        let (_dir, store) = test_store();
        assert_eq!(store.read::<Sample>("missing"), None);
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let (_dir, store) = test_store();
        let value = Sample {
            name: "kingdom".to_string(),
            count: 3,
        };
        store.write("sample", &value).unwrap();
        assert_eq!(store.read::<Sample>("sample"), Some(value));
    }

    #[test]
    fn test_corrupt_file_reads_as_none() {
        let (dir, store) = test_store();
        std::fs::write(dir.path().join("sample.json"), "{not json").unwrap();
        assert_eq!(store.read::<Sample>("sample"), None);
    }

    #[test]
    fn test_foreign_shape_reads_as_none() {
        let (dir, store) = test_store();
        std::fs::write(dir.path().join("sample.json"), r#"["unexpected"]"#).unwrap();
        assert_eq!(store.read::<Sample>("sample"), None);
    }

    #[test]
    fn test_remove_deletes_file_and_tolerates_absence() {
        let (dir, store) = test_store();
        let value = Sample {
            name: "x".to_string(),
            count: 0,
        };
        store.write("sample", &value).unwrap();
        store.remove("sample").unwrap();
        assert!(!dir.path().join("sample.json").exists());
        // Second remove is a no-op, not an error
        store.remove("sample").unwrap();
    }

    #[test]
    fn test_write_overwrites_wholesale() {
        let (_dir, store) = test_store();
        store
            .write(
                "sample",
                &Sample {
                    name: "a".to_string(),
                    count: 1,
                },
            )
            .unwrap();
        store
            .write(
                "sample",
                &Sample {
                    name: "b".to_string(),
                    count: 2,
                },
            )
            .unwrap();
        assert_eq!(
            store.read::<Sample>("sample"),
            Some(Sample {
                name: "b".to_string(),
                count: 2
            })
        );
    }
}
