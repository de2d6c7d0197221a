//! Unified error type for the MedBlock workspace.

use medblock_chain::ChainError;
use medblock_session::{SessionError, View};
use medblock_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` variants let `?` lift sub-crate errors into this one.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A storage-level error outside any session operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A session-level error (sign-in failed, flag write failed).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A verification-level error.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// The action needs a view the current session may not see.
    #[error("no session for protected view {0}")]
    Forbidden(View),

    /// The configuration file could not be read or parsed.
    #[error("invalid config: {0}")]
    Config(String),
}
