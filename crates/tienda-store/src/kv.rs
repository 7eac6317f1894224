//! Key-value store with automatic serialization.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::StoreError;

/// Type-safe key-value store backed by a local data directory.
///
/// Each key maps to one JSON file inside the directory; a write fully
/// replaces the prior value (last-writer-wins, single writer assumed).
/// An in-memory backend is available for tests and for degraded
/// operation when the data directory cannot be opened.
pub struct Store {
    backend: Backend,
}

enum Backend {
    Dir(PathBuf),
    Memory(Mutex<HashMap<String, Vec<u8>>>),
}

impl Store {
    /// Open a store rooted at the given directory, creating it if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let store = Store::open("~/.local/share/tienda")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|e| StoreError::OpenError(format!("{}: {}", dir.display(), e)))?;
        Ok(Self {
            backend: Backend::Dir(dir),
        })
    }

    /// Open a store that lives only in memory.
    ///
    /// Nothing written here survives the process; used by tests and as
    /// a degraded fallback when the on-disk store is unavailable.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(HashMap::new())),
        }
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = store.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.read_bytes(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the store, fully overwriting any prior value.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// store.set("cart", &cart)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        validate_key(key)?;
        let bytes = serde_json::to_vec(value)?;
        match &self.backend {
            Backend::Dir(dir) => {
                std::fs::write(entry_path(dir, key), bytes)?;
            }
            Backend::Memory(map) => {
                map.lock().unwrap().insert(key.to_string(), bytes);
            }
        }
        debug!(key, "store write");
        Ok(())
    }

    /// Delete a value from the store. Deleting a missing key is a no-op.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Dir(dir) => match std::fs::remove_file(entry_path(dir, key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
            Backend::Memory(map) => {
                map.lock().unwrap().remove(key);
                Ok(())
            }
        }
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Dir(dir) => Ok(entry_path(dir, key).is_file()),
            Backend::Memory(map) => Ok(map.lock().unwrap().contains_key(key)),
        }
    }

    /// List all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        match &self.backend {
            Backend::Dir(dir) => {
                let mut keys = Vec::new();
                for entry in std::fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.extension().and_then(|e| e.to_str()) == Some("json") {
                        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                            keys.push(stem.to_string());
                        }
                    }
                }
                keys.sort();
                Ok(keys)
            }
            Backend::Memory(map) => {
                let mut keys: Vec<String> = map.lock().unwrap().keys().cloned().collect();
                keys.sort();
                Ok(keys)
            }
        }
    }

    fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Dir(dir) => match std::fs::read(entry_path(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
            Backend::Memory(map) => Ok(map.lock().unwrap().get(key).cloned()),
        }
    }
}

// Keys double as file names, so they are restricted to a path-safe
// alphabet. ':' is allowed for namespaced keys like "cart:guest".
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        || key.contains("..")
    {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        count: u32,
    }

    #[test]
    fn test_set_get_roundtrip() {
        let store = Store::in_memory();
        let entry = Entry {
            name: "laptop".to_string(),
            count: 3,
        };

        store.set("entry", &entry).unwrap();
        let loaded: Option<Entry> = store.get("entry").unwrap();
        assert_eq!(loaded, Some(entry));
    }

    #[test]
    fn test_get_missing_key() {
        let store = Store::in_memory();
        let loaded: Option<Entry> = store.get("missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_delete() {
        let store = Store::in_memory();
        store.set("entry", &1u32).unwrap();
        store.delete("entry").unwrap();
        assert!(!store.exists("entry").unwrap());

        // Deleting again is a no-op
        store.delete("entry").unwrap();
    }

    #[test]
    fn test_file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = Store::open(dir.path()).unwrap();
            store
                .set(
                    "entry",
                    &Entry {
                        name: "tablet".to_string(),
                        count: 2,
                    },
                )
                .unwrap();
        }

        let store = Store::open(dir.path()).unwrap();
        let loaded: Option<Entry> = store.get("entry").unwrap();
        assert_eq!(loaded.map(|e| e.count), Some(2));
    }

    #[test]
    fn test_keys_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store.set("b", &1u32).unwrap();
        store.set("a", &2u32).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_key_rejected() {
        let store = Store::in_memory();
        assert!(store.set("../escape", &1u32).is_err());
        assert!(store.set("", &1u32).is_err());
    }

    #[test]
    fn test_corrupt_value_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        std::fs::write(dir.path().join("entry.json"), b"{not json").unwrap();

        let loaded: Result<Option<Entry>, _> = store.get("entry");
        assert!(loaded.is_err());
    }
}
