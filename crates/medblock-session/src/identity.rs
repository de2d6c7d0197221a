//! Simulated sign-in.
//!
//! **This is a mock, not authentication.** The dashboard's login page
//! talks about decentralized identity, but nothing is ever verified:
//! after a fixed delay a pseudo-random principal string is produced and
//! any non-empty string counts as success. [`MockIdentityProvider`] keeps
//! exactly that behavior and nothing more.
//!
//! The [`IdentityProvider`] trait is the seam where a real provider would
//! plug in without the gate or the dispatcher changing.

use std::fmt;

use medblock_clock::Delay;
use rand::Rng;

use crate::{IdentityConfig, SessionError};

/// Characters of the random suffix: lowercase base-36.
const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix.
const SUFFIX_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Principal
// ---------------------------------------------------------------------------

/// The opaque identity string produced by a sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal(String);

impl Principal {
    /// Wraps `raw` as a principal.
    ///
    /// # Errors
    /// [`SessionError::AuthFailed`] if `raw` is empty. This is the only
    /// way a simulated sign-in can fail.
    pub fn parse(raw: impl Into<String>) -> Result<Self, SessionError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SessionError::AuthFailed(
                "identity provider returned an empty principal".into(),
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// IdentityProvider
// ---------------------------------------------------------------------------

/// Produces a principal for a visitor who submitted the login form.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Runs the sign-in flow.
    ///
    /// # Returns
    /// - `Ok(Principal)` — the visitor is signed in as this identity
    /// - `Err(SessionError::AuthFailed)` — no identity was produced
    fn sign_in(
        &self,
    ) -> impl std::future::Future<Output = Result<Principal, SessionError>> + Send;
}

// ---------------------------------------------------------------------------
// MockIdentityProvider
// ---------------------------------------------------------------------------

/// The simulated sign-in: wait, then invent a principal.
///
/// Principals look like `w4gpt-xutji-k3j9x0ab`: the configured prefix, a
/// dash, and eight random base-36 characters.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider<D: Delay> {
    delay: D,
    config: IdentityConfig,
}

impl<D: Delay> MockIdentityProvider<D> {
    pub fn new(delay: D, config: IdentityConfig) -> Self {
        Self { delay, config }
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }
}

impl<D: Delay> IdentityProvider for MockIdentityProvider<D> {
    async fn sign_in(&self) -> Result<Principal, SessionError> {
        tracing::debug!(delay_ms = self.config.login_delay_ms, "simulating sign-in");
        self.delay.delay(self.config.login_delay()).await;

        let principal = Principal::parse(generate_principal(
            &self.config.principal_prefix,
        ))?;
        tracing::info!(%principal, "simulated sign-in succeeded");
        Ok(principal)
    }
}

fn generate_principal(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..SUFFIX_ALPHABET.len());
            char::from(SUFFIX_ALPHABET[idx])
        })
        .collect();

    if prefix.is_empty() {
        suffix
    } else {
        format!("{prefix}-{suffix}")
    }
}
