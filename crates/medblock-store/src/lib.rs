//! Key/value storage abstraction for MedBlock session state.
//!
//! Every piece of state the dashboard keeps (auth flags, the principal,
//! the redirect target, the theme) is a flat string key/value pair. This
//! crate provides the [`KvStore`] trait that abstracts over where those
//! pairs live, so the session logic can be tested without a browser.
//!
//! # Feature Flags
//!
//! - `file` (default) — [`FileStore`], a JSON-file backend via `serde_json`
//!
//! # Backends
//!
//! - [`MemoryStore`] — a `HashMap`, for tests and short-lived processes
//! - [`FileStore`] — persists every mutation to a JSON object on disk

mod error;
#[cfg(feature = "file")]
mod file;
pub mod keys;
mod memory;

pub use error::StoreError;
#[cfg(feature = "file")]
pub use file::FileStore;
pub use keys::reconcile_legacy_keys;
pub use memory::MemoryStore;

/// The string that a boolean flag must hold to count as set.
///
/// Anything else (a missing key, `"false"`, `"1"`, garbage) reads as
/// `false`.
pub const FLAG_TRUE: &str = "true";

/// A flat string key/value store.
///
/// Reads are infallible: backends keep their entries in memory and only
/// writes can touch the outside world. Writes return [`StoreError`] so a
/// persistent backend can surface I/O failures.
///
/// `Send + 'static` lets the store live inside an async task that may be
/// moved between threads.
pub trait KvStore: Send + 'static {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend fails to persist the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns [`StoreError`] if the backend fails to persist the removal.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;

    /// Returns `true` iff `key` holds exactly [`FLAG_TRUE`].
    fn flag(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some(FLAG_TRUE)
    }

    /// Sets `key` to [`FLAG_TRUE`].
    ///
    /// # Errors
    /// Same as [`KvStore::set`].
    fn raise_flag(&mut self, key: &str) -> Result<(), StoreError> {
        self.set(key, FLAG_TRUE)
    }

    /// Removes `key` and returns what it held.
    ///
    /// # Errors
    /// Same as [`KvStore::delete`].
    fn take(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.get(key);
        if value.is_some() {
            self.delete(key)?;
        }
        Ok(value)
    }
}
