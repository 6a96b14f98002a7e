// crates/countrysel-core/src/storage.rs

//! # Persistence Gateway
//!
//! The last committed selection is the only durable state. It goes through a
//! tiny synchronous key-value capability so the controller can be handed a
//! browser `localStorage`, a file, or an in-memory fake.

use crate::error::Result;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::warn;

/// Key under which the last committed country name is stored.
pub const SELECTED_COUNTRY_KEY: &str = "selectedCountry";

/// Synchronous get/set storage. Writes are last-write-wins.
///
/// Implementations are treated as infallible by the controller; a backend that
/// can fail must report the failure itself (e.g. through a log) rather than
/// panic.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }
}

/// In-memory store. Clones share the same map, which makes "remount with the
/// same storage" a matter of cloning the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` under `key`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Every `set` call seen so far, oldest first.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
    }
}

/// A JSON object on disk, `{ "selectedCountry": "Argentina" }`.
///
/// The file is read on every `get` and rewritten on every `set`; it is
/// created (with parent directories) on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = fs::read(&self.path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write_entry(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&map)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_map() {
            Ok(mut map) => map.remove(key),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable store file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.write_entry(key, value) {
            warn!(path = %self.path.display(), error = %e, "failed to persist {key}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let remount = store.clone();
        store.set(SELECTED_COUNTRY_KEY, "Chile");
        assert_eq!(remount.get(SELECTED_COUNTRY_KEY).as_deref(), Some("Chile"));
        assert_eq!(
            remount.writes(),
            [(SELECTED_COUNTRY_KEY.to_string(), "Chile".to_string())]
        );
    }

    #[test]
    fn file_store_round_trip_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("state.json"));
        assert_eq!(store.get(SELECTED_COUNTRY_KEY), None);

        store.set("theme", "dark");
        store.set(SELECTED_COUNTRY_KEY, "Peru");
        store.set(SELECTED_COUNTRY_KEY, "Chile");

        let reopened = FileStore::new(store.path());
        assert_eq!(reopened.get(SELECTED_COUNTRY_KEY).as_deref(), Some("Chile"));
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileStore::new(path).get(SELECTED_COUNTRY_KEY), None);
    }
}
