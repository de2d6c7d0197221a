//! JSON-file store: the on-disk stand-in for browser local storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{KvStore, StoreError};

/// A [`KvStore`] persisted as a single JSON object of strings.
///
/// The whole map is kept in memory and rewritten on every mutation.
/// Rewrites go to a sibling `.tmp` file that is then renamed over the
/// original, so a crash mid-write leaves the previous contents intact.
///
/// If persisting a mutation fails, the in-memory map is rolled back and
/// the error is returned: the store never reports a value that is not
/// also on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, loading its entries if the file exists.
    ///
    /// A missing file is an empty store; it is created on the first write.
    ///
    /// # Errors
    /// - [`StoreError::Io`] — the file exists but could not be read
    /// - [`StoreError::Corrupt`] — the file is not a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| StoreError::Corrupt(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "store opened");
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&self.entries)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            tracing::warn!(key, error = %e, "store write failed, rolled back");
            return Err(e);
        }
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist() {
            self.entries.insert(key.to_string(), previous);
            tracing::warn!(key, error = %e, "store delete failed, rolled back");
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("storage.json")).unwrap();
        assert_eq!(store.get("authenticated"), None);
    }

    #[test]
    fn test_open_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "").unwrap();

        let store = FileStore::open(&path).unwrap();

        assert_eq!(store.get("authenticated"), None);
    }

    #[test]
    fn test_open_corrupt_file_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let result = FileStore::open(&path);

        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn test_set_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("authenticated", "true").unwrap();
            store.set("principal", "w4gpt-xutji-k2j9x0aa").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert!(store.flag("authenticated"));
        assert_eq!(
            store.get("principal").as_deref(),
            Some("w4gpt-xutji-k2j9x0aa")
        );
    }

    #[test]
    fn test_delete_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("demoMode", "true").unwrap();
            store.delete("demoMode").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("demoMode"), None);
    }

    #[test]
    fn test_set_failure_rolls_back_memory() {
        // Point the store into a directory that does not exist so the
        // temp-file write fails.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("storage.json");
        let mut store = FileStore::open(&path).unwrap();

        let result = store.set("authenticated", "true");

        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(store.get("authenticated"), None);
    }
}
