//! The simulated services behind the health-records page.
//!
//! The records page lets a visitor "verify" one block or the whole chain,
//! rotate the displayed encryption key, and search the access log.
//! Nothing is hashed, checked or encrypted: each verification or rotation
//! is a fixed wait followed by a canned result. This crate keeps that
//! timing behavior behind the injectable [`Delay`](medblock_clock::Delay),
//! so callers can drive it on a real or a paused clock.
//!
//! # Key types
//!
//! - [`ChainVerifier`] — runs single and sequential verifications
//! - [`Block`] / [`Verification`] — input and per-block report
//! - [`KeyRotator`] / [`EncryptionKey`] — simulated key rotation
//! - [`filter_access_log`] / [`LogSearch`] — access-log search
//! - [`ChainConfig`] — the delays

mod access_log;
mod config;
mod encryption;
mod error;
mod verifier;

pub use access_log::{AccessLogEntry, LogSearch, filter_access_log};
pub use config::ChainConfig;
pub use encryption::{EncryptionKey, KEY_LEN, KeyRotator};
pub use error::ChainError;
pub use verifier::{Block, ChainVerifier, Verification};
