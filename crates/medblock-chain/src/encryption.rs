//! Simulated encryption-key rotation.
//!
//! **Nothing is encrypted.** The records page shows a key and offers to
//! rotate it; rotation is a fixed wait followed by a fresh random string.
//! No data is re-encrypted and the key is never used.

use std::fmt;

use medblock_clock::Delay;
use rand::Rng;

use crate::ChainConfig;

/// Characters a generated key is drawn from: ASCII letters and digits.
const KEY_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a generated key.
pub const KEY_LEN: usize = 32;

/// A displayed encryption key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncryptionKey(String);

impl EncryptionKey {
    /// Draws a fresh random key of [`KEY_LEN`] alphanumeric characters.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let key = (0..KEY_LEN)
            .map(|_| char::from(KEY_ALPHABET[rng.random_range(0..KEY_ALPHABET.len())]))
            .collect();
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rotates the displayed key after the configured delay.
#[derive(Debug, Clone)]
pub struct KeyRotator<D: Delay> {
    delay: D,
    config: ChainConfig,
}

impl<D: Delay> KeyRotator<D> {
    pub fn new(delay: D, config: ChainConfig) -> Self {
        Self { delay, config }
    }

    /// Waits the rotation delay, then returns a new key.
    pub async fn rotate_key(&self) -> EncryptionKey {
        tracing::debug!(delay_ms = self.config.key_rotation_delay_ms, "rotating key");
        self.delay.delay(self.config.key_rotation_delay()).await;

        let key = EncryptionKey::generate();
        tracing::info!("encryption key rotated");
        key
    }
}
