//! Best-effort key-value cache, the stand-in for browser local storage.
//!
//! The session treats every backend as unreliable: a failed read falls back
//! to defaults, a failed write is logged and forgotten, and in-memory state
//! stays authoritative for the rest of the session.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,
    #[error("store i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("store holds malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no storage backend enabled")]
    NoBackend,
}

pub type Store = Arc<dyn KvStore + Send + Sync + 'static>;

/// String-keyed JSON blobs. `set` and `remove` may fail silently from the
/// session's point of view; `get` returns `None` for absent keys.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Storage keys, namespaced the way the web client namespaced its
/// localStorage entries.
pub mod keys {
    pub const CURRENT_USER: &str = "builderHub_currentUser";
    pub const REMEMBER_ME: &str = "builderHub_rememberMe";
    pub const SUBMISSIONS: &str = "builderHub_submissions";
    pub const PROJECTS: &str = "builderHub_projects";
    pub const DISCUSSIONS: &str = "builderHub_discussions";
}

#[cfg(feature = "mem-store")]
#[derive(Default)]
pub struct MemStore {
    entries: Mutex<HashMap<String, Value>>,
}

#[cfg(feature = "mem-store")]
impl KvStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.lock().map_err(|_| StoreError::Poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.lock().map_err(|_| StoreError::Poisoned)?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().map_err(|_| StoreError::Poisoned)?.remove(key);
        Ok(())
    }
}

pub fn new_store() -> Result<Store, StoreError> {
    #[cfg(all(feature = "mem-store", not(feature = "file-store")))]
    {
        return Ok(Arc::new(MemStore::default()));
    }
    #[cfg(feature = "file-store")]
    {
        let path = std::env::var("HUB_STORE_PATH").unwrap_or_else(|_| ".builder-hub-store.json".to_string());
        return Ok(Arc::new(FileStore::open(path)?));
    }
    #[allow(unreachable_code)]
    Err(StoreError::NoBackend)
}

// ================= File backend =================

/// Single JSON file, loaded once on open and rewritten on every mutation.
#[cfg(feature = "file-store")]
pub struct FileStore {
    path: std::path::PathBuf,
    entries: Mutex<HashMap<String, Value>>,
}

#[cfg(feature = "file-store")]
impl FileStore {
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    fn flush(&self, entries: &HashMap<String, Value>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

#[cfg(feature = "file-store")]
impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.lock().map_err(|_| StoreError::Poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value);
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        self.flush(&entries)
    }
}

#[cfg(all(test, feature = "mem-store"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mem_store_roundtrip() {
        let store = MemStore::default();
        assert!(store.get(keys::CURRENT_USER).unwrap().is_none());

        store.set(keys::CURRENT_USER, json!({"name": "sarah"})).unwrap();
        let value = store.get(keys::CURRENT_USER).unwrap().expect("value should be present");
        assert_eq!(value["name"], "sarah");

        store.remove(keys::CURRENT_USER).unwrap();
        assert!(store.get(keys::CURRENT_USER).unwrap().is_none());
    }

    #[test]
    fn test_keys_are_namespaced() {
        for key in [keys::CURRENT_USER, keys::REMEMBER_ME, keys::SUBMISSIONS, keys::PROJECTS, keys::DISCUSSIONS] {
            assert!(key.starts_with("builderHub_"));
        }
    }
}
