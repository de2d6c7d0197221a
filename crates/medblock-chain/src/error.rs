//! Error types for the verification layer.

/// Errors that can occur while verifying blocks.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// A bulk verification was requested for an empty chain.
    #[error("no blocks to verify")]
    NoBlocks,
}
