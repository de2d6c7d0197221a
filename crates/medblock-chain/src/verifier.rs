//! The verifier: fixed waits dressed up as integrity checks.

use medblock_clock::Delay;
use serde::{Deserialize, Serialize};

use crate::{ChainConfig, ChainError};

/// One block of a visitor's health-record chain, as shown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (0 = genesis).
    pub index: u64,
    /// Human-readable label, e.g. `"Lab results"`.
    pub label: String,
}

impl Block {
    pub fn new(index: u64, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }
}

/// The report for one verified block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub index: u64,
    /// Always `true`: the simulation has no failing path.
    pub verified: bool,
}

/// Runs simulated verifications.
///
/// ## Timing
///
/// ```text
/// verify_block(b)          ── single_block_delay ──→ [b verified]
/// verify_all([b0, b1, b2]) ── per_block ──→ [b0] ── per_block ──→ [b1] ── per_block ──→ [b2]
/// ```
///
/// Blocks in a bulk run are strictly sequential: block `n + 1` starts
/// only after block `n` reported.
#[derive(Debug, Clone)]
pub struct ChainVerifier<D: Delay> {
    delay: D,
    config: ChainConfig,
}

impl<D: Delay> ChainVerifier<D> {
    pub fn new(delay: D, config: ChainConfig) -> Self {
        Self { delay, config }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Verifies a single block after the single-block delay.
    pub async fn verify_block(&self, block: &Block) -> Verification {
        tracing::debug!(index = block.index, label = %block.label, "verifying block");
        self.delay.delay(self.config.single_block_delay()).await;
        tracing::info!(index = block.index, "block verified");

        Verification {
            index: block.index,
            verified: true,
        }
    }

    /// Verifies every block in order, one per-block delay each.
    ///
    /// Reports come back in the same order as `blocks`.
    ///
    /// # Errors
    /// [`ChainError::NoBlocks`] if `blocks` is empty.
    pub async fn verify_all(
        &self,
        blocks: &[Block],
    ) -> Result<Vec<Verification>, ChainError> {
        if blocks.is_empty() {
            return Err(ChainError::NoBlocks);
        }

        let mut reports = Vec::with_capacity(blocks.len());
        for block in blocks {
            self.delay.delay(self.config.per_block_delay()).await;
            tracing::debug!(index = block.index, "block verified");
            reports.push(Verification {
                index: block.index,
                verified: true,
            });
        }

        tracing::info!(count = reports.len(), "all blocks verified");
        Ok(reports)
    }
}
