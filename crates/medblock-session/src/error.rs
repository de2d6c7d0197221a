//! Error types for the session layer.

use medblock_store::StoreError;

/// Errors that can occur while gating views or signing in.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The simulated sign-in produced no identity.
    ///
    /// The mock provider never actually does this; the variant exists so
    /// callers handle the failure branch the UI has always shown.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Reading or writing a session flag failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
