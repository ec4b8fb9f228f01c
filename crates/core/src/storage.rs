//! Durable key-value storage.
//!
//! The history log lives in a single named slot. [`KeyValueStore`] is the seam between the
//! recorder and whatever backs it:
//!
//! - [`FileStore`] keeps each slot as `<data_dir>/<key>.json`
//! - [`MemoryStore`] keeps slots in process, for tests and embedding
//!
//! Slots hold opaque text. Interpreting (and tolerating corrupt) contents is the caller's job.

use crate::constants::STORE_FILE_EXTENSION;
use crate::{TriageError, TriageResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub trait KeyValueStore {
    /// Reads a slot. An absent slot is `Ok(None)`.
    fn get(&self, key: &str) -> TriageResult<Option<String>>;

    /// Replaces the contents of a slot, creating it if needed.
    fn set(&self, key: &str, value: &str) -> TriageResult<()>;

    /// Removes a slot. Removing an absent slot succeeds.
    fn remove(&self, key: &str) -> TriageResult<()>;
}

/// File-backed store, one JSON file per key.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`.
    ///
    /// The directory is created lazily on the first write, so an unconfigured or missing
    /// directory simply reads as empty.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> TriageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(TriageError::InvalidInput(format!(
                "storage key '{key}' must be non-empty ASCII alphanumerics, '_' or '-'"
            )));
        }
        Ok(self.root.join(format!("{key}.{STORE_FILE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> TriageResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TriageError::StorageRead(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> TriageResult<()> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.root).map_err(TriageError::StorageDirCreation)?;

        // Sibling temp file, renamed over the slot.
        let tmp = path.with_extension(format!("{STORE_FILE_EXTENSION}.tmp"));
        fs::write(&tmp, value).map_err(TriageError::StorageWrite)?;
        fs::rename(&tmp, &path).map_err(TriageError::StorageWrite)
    }

    fn remove(&self, key: &str) -> TriageResult<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TriageError::StorageRemove(e)),
        }
    }
}

/// In-process store. Single-threaded, matching the engine's execution model.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> TriageResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> TriageResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> TriageResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> TriageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> TriageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> TriageResult<()> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_dir_reads_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("not-yet"));
        assert_eq!(store.get("ht_history").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_get_remove() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("data"));

        store.set("ht_history", "[]").unwrap();
        assert!(temp.path().join("data/ht_history.json").is_file());
        assert_eq!(store.get("ht_history").unwrap().as_deref(), Some("[]"));

        store.set("ht_history", "[1]").unwrap();
        assert_eq!(store.get("ht_history").unwrap().as_deref(), Some("[1]"));
        assert!(!temp.path().join("data/ht_history.json.tmp").exists());

        store.remove("ht_history").unwrap();
        assert_eq!(store.get("ht_history").unwrap(), None);
        store.remove("ht_history").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(TriageError::InvalidInput(_))
        ));
        assert!(matches!(store.get(""), Err(TriageError::InvalidInput(_))));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
