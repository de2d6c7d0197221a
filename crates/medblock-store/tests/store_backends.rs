//! Behavior every `KvStore` backend must share.
//!
//! Each check is written once against the trait and run against both
//! backends, so the file store can't drift from the memory store.

use medblock_store::keys::{AUTHENTICATED, DEMO_MODE, REDIRECT_AFTER_LOGIN, THEME};
use medblock_store::{FileStore, KvStore, MemoryStore, reconcile_legacy_keys};

// =========================================================================
// Shared checks
// =========================================================================

fn check_flag_lifecycle(store: &mut dyn KvStore) {
    assert!(!store.flag(AUTHENTICATED));
    store.raise_flag(AUTHENTICATED).unwrap();
    assert!(store.flag(AUTHENTICATED));
    store.delete(AUTHENTICATED).unwrap();
    assert!(!store.flag(AUTHENTICATED));
}

fn check_take_clears_redirect(store: &mut dyn KvStore) {
    store.set(REDIRECT_AFTER_LOGIN, "/blockchain.html").unwrap();
    assert_eq!(
        store.take(REDIRECT_AFTER_LOGIN).unwrap().as_deref(),
        Some("/blockchain.html")
    );
    assert_eq!(store.take(REDIRECT_AFTER_LOGIN).unwrap(), None);
}

fn check_legacy_reconciliation(store: &mut dyn KvStore) {
    store.set("demo_mode", "true").unwrap();
    store.set("theme", "light").unwrap();

    assert_eq!(reconcile_legacy_keys(store).unwrap(), 2);

    assert!(store.flag(DEMO_MODE));
    assert_eq!(store.get(THEME).as_deref(), Some("light"));
    assert_eq!(store.get("demo_mode"), None);
    assert_eq!(store.get("theme"), None);
}

// =========================================================================
// MemoryStore
// =========================================================================

#[test]
fn test_memory_store_flag_lifecycle() {
    check_flag_lifecycle(&mut MemoryStore::new());
}

#[test]
fn test_memory_store_take_clears_redirect() {
    check_take_clears_redirect(&mut MemoryStore::new());
}

#[test]
fn test_memory_store_legacy_reconciliation() {
    check_legacy_reconciliation(&mut MemoryStore::new());
}

// =========================================================================
// FileStore
// =========================================================================

fn file_store(dir: &tempfile::TempDir) -> FileStore {
    FileStore::open(dir.path().join("local-storage.json")).unwrap()
}

#[test]
fn test_file_store_flag_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    check_flag_lifecycle(&mut file_store(&dir));
}

#[test]
fn test_file_store_take_clears_redirect() {
    let dir = tempfile::tempdir().unwrap();
    check_take_clears_redirect(&mut file_store(&dir));
}

#[test]
fn test_file_store_legacy_reconciliation_persists() {
    let dir = tempfile::tempdir().unwrap();
    check_legacy_reconciliation(&mut file_store(&dir));

    let reopened = file_store(&dir);
    assert!(reopened.flag(DEMO_MODE));
    assert_eq!(reopened.get("demo_mode"), None);
}
