//! Canonical storage keys and legacy-key reconciliation.
//!
//! Older pages of the dashboard wrote the same concept under two
//! spellings (`demo_mode` vs `demoMode`, `theme` vs `medblock-theme`).
//! Only the canonical spelling is read anywhere in this workspace;
//! [`reconcile_legacy_keys`] folds the old spellings into it.

use crate::{KvStore, StoreError};

/// Set to `"true"` once the simulated login completes.
pub const AUTHENTICATED: &str = "authenticated";

/// The opaque identity string returned by the simulated login.
pub const PRINCIPAL: &str = "principal";

/// Set to `"true"` when the visitor entered demo mode.
pub const DEMO_MODE: &str = "demoMode";

/// The path a gated visitor originally asked for.
pub const REDIRECT_AFTER_LOGIN: &str = "redirectAfterLogin";

/// UI theme preference, `"light"` or `"dark"`.
pub const THEME: &str = "medblock-theme";

/// Cached user object. Never written here, only cleared on logout.
pub const USER: &str = "user";

/// `(legacy, canonical)` spellings of the same concept.
pub const LEGACY_ALIASES: &[(&str, &str)] =
    &[("demo_mode", DEMO_MODE), ("theme", THEME)];

/// Moves values stored under legacy keys to their canonical keys.
///
/// For each alias pair: if the legacy key holds a value and the canonical
/// key does not, the value is copied over. The legacy key is deleted
/// either way. A canonical value is never overwritten.
///
/// Returns the number of legacy values that were copied.
///
/// # Errors
/// Propagates the first [`StoreError`] from the backend. Aliases handled
/// before the failure stay migrated.
pub fn reconcile_legacy_keys<S: KvStore + ?Sized>(
    store: &mut S,
) -> Result<usize, StoreError> {
    let mut migrated = 0;

    for &(legacy, canonical) in LEGACY_ALIASES {
        let Some(value) = store.get(legacy) else {
            continue;
        };

        if store.get(canonical).is_none() {
            store.set(canonical, &value)?;
            migrated += 1;
            tracing::info!(legacy, canonical, "migrated legacy key");
        } else {
            tracing::debug!(legacy, canonical, "legacy key shadowed by canonical key");
        }
        store.delete(legacy)?;
    }

    Ok(migrated)
}
