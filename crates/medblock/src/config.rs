//! Workspace-wide configuration.

use std::path::Path;

use medblock_chain::ChainConfig;
use medblock_diagnostics::DiagnosticsConfig;
use medblock_session::{GateConfig, IdentityConfig};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Everything the dispatcher and its services can be tuned with.
///
/// Every section is optional in the JSON form; missing sections and
/// fields take their defaults.
///
/// ```json
/// {
///   "gate": { "protected": ["dashboard", "blockchain"] },
///   "identity": { "login_delay_ms": 250 },
///   "chain": { "per_block_delay_ms": 100 },
///   "diagnostics": { "model_run_delay_ms": 500 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gate: GateConfig,
    pub identity: IdentityConfig,
    pub chain: ChainConfig,
    pub diagnostics: DiagnosticsConfig,
}

impl AppConfig {
    /// Parses a config from JSON text.
    ///
    /// # Errors
    /// [`AppError::Config`] if the text is not a valid config.
    pub fn from_json(text: &str) -> Result<Self, AppError> {
        serde_json::from_str(text).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Reads and parses the config file at `path`.
    ///
    /// # Errors
    /// [`AppError::Config`] if the file can't be read or parsed. The
    /// message names the path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_json(&text).map_err(|e| match e {
            AppError::Config(msg) => {
                AppError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;

        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }
}
