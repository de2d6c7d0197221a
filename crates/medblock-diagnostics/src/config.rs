//! Model-run timing.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long a simulated model run takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Delay between starting a model and its report, in milliseconds.
    pub model_run_delay_ms: u64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            model_run_delay_ms: 3000,
        }
    }
}

impl DiagnosticsConfig {
    pub fn model_run_delay(&self) -> Duration {
        Duration::from_millis(self.model_run_delay_ms)
    }
}
