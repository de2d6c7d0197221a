//! Simulated AI diagnostics.
//!
//! The AI-diagnostics page offers three models. Running one shows a
//! spinner for a fixed time and then a canned result: no model exists and
//! no health data is read. [`DiagnosticsRunner`] keeps that behavior
//! behind the injectable [`Delay`](medblock_clock::Delay).
//!
//! # Key types
//!
//! - [`AiModel`] — the three offered models
//! - [`DiagnosticsRunner`] — waits, then produces a [`ModelReport`]
//! - [`RiskLevel`] / [`RiskScore`] — risk banding for chart values
//! - [`DiagnosticsConfig`] — the run delay

mod config;
mod model;
mod runner;

pub use config::DiagnosticsConfig;
pub use model::{AiModel, RiskCategory, RiskLevel, RiskScore};
pub use runner::{DiagnosticsRunner, Insight, ModelReport, Severity};
