//! The session gate: decides whether a view may be shown.
//!
//! The gate owns the key/value store that holds the session flags and is
//! consulted once per page load. It is responsible for:
//! - Answering "is this visitor signed in / in demo mode?"
//! - Redirecting gated visitors to the login view
//! - Remembering where a gated visitor wanted to go, and handing that
//!   target back once sign-in completes
//! - Clearing the session on logout
//!
//! # Lifecycle
//!
//! ```text
//!          guard(p) ──(gated)──→ redirectAfterLogin = p ──→ [login view]
//!                                                               │
//!   enter_demo_mode()                                complete_login(id)
//!          │                                                    │
//!          ▼                                                    ▼
//!    [demoMode=true] ────────→ guard(p) allows ←──── [authenticated=true]
//!          │                                                    │
//!          └──────────────────────→ logout() ←──────────────────┘
//! ```
//!
//! Nothing here expires: a flag stays set until `logout()` removes it.

use medblock_store::{KvStore, StoreError, keys, reconcile_legacy_keys};

use crate::{GateConfig, Principal, SessionError, View};

// ---------------------------------------------------------------------------
// GuardDecision / AuthStatus
// ---------------------------------------------------------------------------

/// The gate's answer for one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardDecision {
    /// `true` if the requested view may be rendered.
    pub allow: bool,

    /// Where to navigate instead. Set iff `allow` is `false`.
    pub redirect_to: Option<View>,
}

impl GuardDecision {
    fn allow() -> Self {
        Self {
            allow: true,
            redirect_to: None,
        }
    }

    fn redirect(to: View) -> Self {
        Self {
            allow: false,
            redirect_to: Some(to),
        }
    }
}

/// Snapshot of the session flags, for deciding what chrome to show
/// (login vs. logout button, demo badge, user name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub demo_mode: bool,
    pub principal: Option<String>,
}

impl AuthStatus {
    /// `true` if any session (real or demo) is active.
    pub fn has_session(&self) -> bool {
        self.authenticated || self.demo_mode
    }
}

// ---------------------------------------------------------------------------
// SessionGate
// ---------------------------------------------------------------------------

/// Gates protected views on the persisted session flags.
///
/// Generic over the store so tests run against
/// [`MemoryStore`](medblock_store::MemoryStore) and the demo against
/// [`FileStore`](medblock_store::FileStore).
pub struct SessionGate<S: KvStore> {
    store: S,
    config: GateConfig,
}

impl<S: KvStore> SessionGate<S> {
    /// Wraps `store`, first folding legacy key spellings into the
    /// canonical ones.
    ///
    /// # Errors
    /// [`SessionError::Store`] if the reconciliation writes fail.
    pub fn new(mut store: S, config: GateConfig) -> Result<Self, SessionError> {
        let migrated = reconcile_legacy_keys(&mut store)?;
        if migrated > 0 {
            tracing::info!(migrated, "reconciled legacy session keys");
        }
        Ok(Self { store, config })
    }

    /// True iff the authenticated flag is set. A pure store read: no
    /// expiry, no signature, no round-trip.
    pub fn is_authenticated(&self) -> bool {
        self.store.flag(keys::AUTHENTICATED)
    }

    /// True iff the demo flag is set.
    pub fn is_demo_mode(&self) -> bool {
        self.store.flag(keys::DEMO_MODE)
    }

    /// The stored principal, if a sign-in completed.
    pub fn principal(&self) -> Option<String> {
        self.store.get(keys::PRINCIPAL)
    }

    /// All session flags at once.
    pub fn status(&self) -> AuthStatus {
        AuthStatus {
            authenticated: self.is_authenticated(),
            demo_mode: self.is_demo_mode(),
            principal: self.principal(),
        }
    }

    /// The gating rule without side effects: `view` is public, or a real
    /// or demo session is active.
    pub fn may_view(&self, view: View) -> bool {
        !self.config.is_protected(view) || self.is_authenticated() || self.is_demo_mode()
    }

    /// Decides whether the page at `current_path` may be shown.
    ///
    /// Allowed when the path is not a protected view, or when the visitor
    /// is authenticated or in demo mode. Otherwise the path is stored
    /// verbatim as the redirect-after-login target and the visitor is
    /// sent to the login view.
    ///
    /// # Errors
    /// [`SessionError::Store`] if the redirect target can't be stored.
    /// The gate fails closed: no decision is returned.
    pub fn guard(&mut self, current_path: &str) -> Result<GuardDecision, SessionError> {
        let Some(view) = View::from_path(current_path) else {
            tracing::trace!(current_path, "unknown view, not gated");
            return Ok(GuardDecision::allow());
        };

        if self.may_view(view) {
            return Ok(GuardDecision::allow());
        }

        self.store.set(keys::REDIRECT_AFTER_LOGIN, current_path)?;
        let login = self.config.login_view;
        tracing::info!(%view, %login, "no session, redirecting to login");
        Ok(GuardDecision::redirect(login))
    }

    /// Records a completed sign-in and returns where to navigate next.
    ///
    /// Stores the principal and sets the authenticated flag. Then, if a
    /// redirect target was captured by [`guard`](Self::guard), it is
    /// removed and returned; otherwise the landing view is returned.
    /// Callers must navigate to the returned path.
    ///
    /// An empty stored target counts as absent (and is still cleared).
    ///
    /// # Errors
    /// [`SessionError::Store`] if any write fails. The principal, the flag
    /// and the redirect target are restored to their prior values first.
    pub fn complete_login(&mut self, principal: &Principal) -> Result<String, SessionError> {
        let landing = self.config.landing_view;
        let target = self.all_or_nothing(
            &[keys::PRINCIPAL, keys::AUTHENTICATED, keys::REDIRECT_AFTER_LOGIN],
            |store| {
                // Principal before flag: a flagged session always has an identity.
                store.set(keys::PRINCIPAL, principal.as_str())?;
                store.raise_flag(keys::AUTHENTICATED)?;
                Ok(match store.take(keys::REDIRECT_AFTER_LOGIN)? {
                    Some(path) if !path.is_empty() => path,
                    _ => landing.as_str().to_string(),
                })
            },
        )?;

        tracing::info!(%principal, %target, "sign-in complete");
        Ok(target)
    }

    /// Turns on demo mode: the guard is satisfied without any credential.
    ///
    /// Idempotent.
    ///
    /// # Errors
    /// [`SessionError::Store`] if the write fails.
    pub fn enter_demo_mode(&mut self) -> Result<(), SessionError> {
        self.store.raise_flag(keys::DEMO_MODE)?;
        tracing::info!("demo mode entered");
        Ok(())
    }

    /// Clears the session: authenticated flag, principal, demo flag and
    /// the cached user object. Callers navigate to
    /// [`GateConfig::public_view`] afterward.
    ///
    /// The captured redirect target and the theme are left alone.
    ///
    /// # Errors
    /// [`SessionError::Store`] if any delete fails. Every session key is
    /// restored to its prior value first, so the session stays active.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        const SESSION_KEYS: [&str; 4] =
            [keys::AUTHENTICATED, keys::DEMO_MODE, keys::PRINCIPAL, keys::USER];

        self.all_or_nothing(&SESSION_KEYS, |store| {
            SESSION_KEYS.iter().try_for_each(|key| store.delete(key))
        })?;
        tracing::info!("logged out");
        Ok(())
    }

    /// The configuration this gate was built with.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access for state that shares the store but not the gate's
    /// rules (the theme preference).
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the gate, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Runs a multi-key update. If `update` fails, every key in `touched`
    /// is put back to the value it held before.
    fn all_or_nothing<T>(
        &mut self,
        touched: &[&str],
        update: impl FnOnce(&mut S) -> Result<T, StoreError>,
    ) -> Result<T, SessionError> {
        let snapshot: Vec<(&str, Option<String>)> = touched
            .iter()
            .map(|&key| (key, self.store.get(key)))
            .collect();

        update(&mut self.store).map_err(|err| {
            for (key, prior) in &snapshot {
                let restored = match prior {
                    Some(value) => self.store.set(key, value),
                    None => self.store.delete(key),
                };
                if let Err(restore_err) = restored {
                    tracing::error!(key = *key, error = %restore_err, "failed to restore session key");
                }
            }
            tracing::warn!(error = %err, "session update rolled back");
            SessionError::from(err)
        })
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionGate`.
    //!
    //! Naming: `test_{function}_{scenario}_{expected}`.

    use medblock_store::MemoryStore;

    use super::*;

    // -- Helpers ----------------------------------------------------------

    /// A memory store whose `fail_on`-th write (1-based, counting sets and
    /// deletes) fails without applying. Every other write goes through.
    struct FlakyStore {
        inner: MemoryStore,
        writes: usize,
        fail_on: usize,
    }

    impl FlakyStore {
        fn new(pairs: &[(&str, &str)], fail_on: usize) -> Self {
            Self {
                inner: pairs.iter().copied().collect(),
                writes: 0,
                fail_on,
            }
        }

        fn tick(&mut self) -> Result<(), StoreError> {
            self.writes += 1;
            if self.writes == self.fail_on {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            Ok(())
        }
    }

    impl KvStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.tick()?;
            self.inner.set(key, value)
        }

        fn delete(&mut self, key: &str) -> Result<(), StoreError> {
            self.tick()?;
            self.inner.delete(key)
        }
    }

    fn flaky_gate(pairs: &[(&str, &str)], fail_on: usize) -> SessionGate<FlakyStore> {
        SessionGate::new(FlakyStore::new(pairs, fail_on), GateConfig::default()).unwrap()
    }

    fn gate() -> SessionGate<MemoryStore> {
        SessionGate::new(MemoryStore::new(), GateConfig::default()).unwrap()
    }

    fn gate_with(pairs: &[(&str, &str)]) -> SessionGate<MemoryStore> {
        let store: MemoryStore = pairs.iter().copied().collect();
        SessionGate::new(store, GateConfig::default()).unwrap()
    }

    fn principal(id: &str) -> Principal {
        Principal::parse(id).unwrap()
    }

    // =====================================================================
    // new()
    // =====================================================================

    #[test]
    fn test_new_migrates_legacy_demo_flag() {
        let gate = gate_with(&[("demo_mode", "true")]);
        assert!(gate.is_demo_mode());
        assert_eq!(gate.store().get("demo_mode"), None);
    }

    // =====================================================================
    // is_authenticated() / is_demo_mode()
    // =====================================================================

    #[test]
    fn test_is_authenticated_empty_store_false() {
        assert!(!gate().is_authenticated());
    }

    #[test]
    fn test_is_authenticated_non_true_value_false() {
        let gate = gate_with(&[("authenticated", "yes")]);
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_is_demo_mode_set_true() {
        let gate = gate_with(&[("demoMode", "true")]);
        assert!(gate.is_demo_mode());
        assert!(!gate.is_authenticated());
    }

    // =====================================================================
    // guard()
    // =====================================================================

    #[test]
    fn test_guard_protected_without_session_redirects_to_login() {
        let mut gate = gate();

        let decision = gate.guard("dashboard").unwrap();

        assert!(!decision.allow);
        assert_eq!(decision.redirect_to, Some(View::Login));
        assert_eq!(
            gate.store().get(keys::REDIRECT_AFTER_LOGIN).as_deref(),
            Some("dashboard")
        );
    }

    #[test]
    fn test_guard_stores_path_verbatim() {
        let mut gate = gate();

        gate.guard("/ai-diagnostics.html").unwrap();

        assert_eq!(
            gate.store().get(keys::REDIRECT_AFTER_LOGIN).as_deref(),
            Some("/ai-diagnostics.html")
        );
    }

    #[test]
    fn test_guard_public_view_allows_without_touching_store() {
        let mut gate = gate();

        for path in ["index", "/login.html", "/", "about-us"] {
            let decision = gate.guard(path).unwrap();
            assert!(decision.allow, "{path} should be public");
            assert_eq!(decision.redirect_to, None);
        }
        assert!(gate.store().is_empty());
    }

    #[test]
    fn test_guard_authenticated_allows_protected() {
        let mut gate = gate_with(&[("authenticated", "true")]);
        let decision = gate.guard("blockchain").unwrap();
        assert_eq!(decision, GuardDecision::allow());
    }

    #[test]
    fn test_guard_demo_mode_allows_protected() {
        let mut gate = gate_with(&[("demoMode", "true")]);
        let decision = gate.guard("/diagnostics.html").unwrap();
        assert!(decision.allow);
        assert_eq!(gate.store().get(keys::REDIRECT_AFTER_LOGIN), None);
    }

    #[test]
    fn test_guard_custom_protected_set() {
        let config = GateConfig {
            protected: vec![View::Blockchain],
            ..GateConfig::default()
        };
        let mut gate = SessionGate::new(MemoryStore::new(), config).unwrap();

        assert!(gate.guard("dashboard").unwrap().allow);
        assert!(!gate.guard("blockchain").unwrap().allow);
    }

    #[test]
    fn test_guard_second_gated_visit_overwrites_target() {
        let mut gate = gate();
        gate.guard("dashboard").unwrap();
        gate.guard("blockchain").unwrap();
        assert_eq!(
            gate.store().get(keys::REDIRECT_AFTER_LOGIN).as_deref(),
            Some("blockchain")
        );
    }

    #[test]
    fn test_may_view_has_no_side_effects() {
        let gate = gate();
        assert!(!gate.may_view(View::Blockchain));
        assert!(gate.may_view(View::Index));
        assert!(gate.store().is_empty());
    }

    // =====================================================================
    // complete_login()
    // =====================================================================

    #[test]
    fn test_complete_login_sets_flag_and_principal() {
        let mut gate = gate();

        gate.complete_login(&principal("abc123")).unwrap();

        assert!(gate.is_authenticated());
        assert_eq!(gate.principal().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_complete_login_without_redirect_returns_landing() {
        let mut gate = gate();
        let target = gate.complete_login(&principal("abc123")).unwrap();
        assert_eq!(target, "dashboard");
    }

    #[test]
    fn test_complete_login_returns_and_clears_redirect() {
        let mut gate = gate_with(&[("redirectAfterLogin", "blockchain")]);

        let target = gate.complete_login(&principal("abc123")).unwrap();

        assert_eq!(target, "blockchain");
        assert_eq!(gate.store().get(keys::REDIRECT_AFTER_LOGIN), None);
    }

    #[test]
    fn test_complete_login_empty_redirect_falls_back_and_clears() {
        let mut gate = gate_with(&[("redirectAfterLogin", "")]);

        let target = gate.complete_login(&principal("abc123")).unwrap();

        assert_eq!(target, "dashboard");
        assert_eq!(gate.store().get(keys::REDIRECT_AFTER_LOGIN), None);
    }

    #[test]
    fn test_complete_login_failed_flag_write_restores_principal() {
        let mut gate = flaky_gate(&[("redirectAfterLogin", "blockchain")], 2);

        let result = gate.complete_login(&principal("abc123"));

        assert!(matches!(result, Err(SessionError::Store(_))));
        assert_eq!(gate.principal(), None);
        assert!(!gate.is_authenticated());
        assert_eq!(
            gate.store().get(keys::REDIRECT_AFTER_LOGIN).as_deref(),
            Some("blockchain")
        );
    }

    #[test]
    fn test_complete_login_failed_redirect_take_restores_everything() {
        let mut gate = flaky_gate(
            &[("principal", "old-id"), ("redirectAfterLogin", "blockchain")],
            3,
        );

        let result = gate.complete_login(&principal("abc123"));

        assert!(result.is_err());
        assert!(!gate.is_authenticated());
        assert_eq!(gate.principal().as_deref(), Some("old-id"));
        assert_eq!(
            gate.store().get(keys::REDIRECT_AFTER_LOGIN).as_deref(),
            Some("blockchain")
        );
    }

    // =====================================================================
    // enter_demo_mode()
    // =====================================================================

    #[test]
    fn test_enter_demo_mode_twice_same_as_once() {
        let mut once = gate();
        once.enter_demo_mode().unwrap();

        let mut twice = gate();
        twice.enter_demo_mode().unwrap();
        twice.enter_demo_mode().unwrap();

        assert_eq!(once.status(), twice.status());
        assert_eq!(once.store().len(), twice.store().len());
    }

    // =====================================================================
    // logout()
    // =====================================================================

    #[test]
    fn test_logout_clears_session_keys() {
        let mut gate = gate_with(&[
            ("authenticated", "true"),
            ("principal", "abc123"),
            ("demoMode", "true"),
            ("user", "{\"name\":\"Demo User\"}"),
        ]);

        gate.logout().unwrap();

        assert!(!gate.is_authenticated());
        assert!(!gate.is_demo_mode());
        assert_eq!(gate.principal(), None);
        assert_eq!(gate.store().get(keys::USER), None);
    }

    #[test]
    fn test_logout_keeps_theme() {
        let mut gate = gate_with(&[("authenticated", "true"), ("medblock-theme", "light")]);
        gate.logout().unwrap();
        assert_eq!(gate.store().get(keys::THEME).as_deref(), Some("light"));
    }

    #[test]
    fn test_logout_then_guard_redirects() {
        let mut gate = gate();
        gate.complete_login(&principal("abc123")).unwrap();
        gate.logout().unwrap();

        let decision = gate.guard("dashboard").unwrap();

        assert!(!decision.allow);
    }

    #[test]
    fn test_logout_failed_delete_keeps_session() {
        let pairs = [
            ("authenticated", "true"),
            ("demoMode", "true"),
            ("principal", "abc123"),
            ("user", "{\"name\":\"Demo User\"}"),
        ];
        // Every position of the failing delete, first through last.
        for fail_on in 1..=4 {
            let mut gate = flaky_gate(&pairs, fail_on);

            let result = gate.logout();

            assert!(result.is_err(), "delete #{fail_on} should fail");
            for (key, value) in pairs {
                assert_eq!(
                    gate.store().get(key).as_deref(),
                    Some(value),
                    "{key} after failed delete #{fail_on}"
                );
            }
        }
    }

    #[test]
    fn test_logout_failed_delete_does_not_invent_keys() {
        let mut gate = flaky_gate(&[("demoMode", "true")], 2);

        gate.logout().unwrap_err();

        assert!(gate.is_demo_mode());
        assert!(!gate.is_authenticated());
        assert_eq!(gate.principal(), None);
        assert_eq!(gate.store().get(keys::USER), None);
    }

    // =====================================================================
    // status()
    // =====================================================================

    #[test]
    fn test_status_reflects_flags() {
        let mut gate = gate();
        assert!(!gate.status().has_session());

        gate.enter_demo_mode().unwrap();
        let status = gate.status();
        assert!(status.has_session());
        assert!(status.demo_mode);
        assert!(!status.authenticated);
        assert_eq!(status.principal, None);
    }
}
