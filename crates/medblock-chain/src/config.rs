//! Verification timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long each simulated records-page operation takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Delay for verifying a single block on request, in milliseconds.
    pub single_block_delay_ms: u64,

    /// Delay per block during a whole-chain verification, in milliseconds.
    pub per_block_delay_ms: u64,

    /// Delay before a rotated encryption key appears, in milliseconds.
    pub key_rotation_delay_ms: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            single_block_delay_ms: 1500,
            per_block_delay_ms: 800,
            key_rotation_delay_ms: 2500,
        }
    }
}

impl ChainConfig {
    pub fn single_block_delay(&self) -> Duration {
        Duration::from_millis(self.single_block_delay_ms)
    }

    pub fn per_block_delay(&self) -> Duration {
        Duration::from_millis(self.per_block_delay_ms)
    }

    pub fn key_rotation_delay(&self) -> Duration {
        Duration::from_millis(self.key_rotation_delay_ms)
    }
}
