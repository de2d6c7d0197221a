//! Configuration for the session gate and the simulated sign-in.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::View;

// ---------------------------------------------------------------------------
// GateConfig
// ---------------------------------------------------------------------------

/// Which views are protected and where visitors are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Views that require an authenticated or demo session.
    pub protected: Vec<View>,

    /// Where gated visitors are redirected.
    pub login_view: View,

    /// Resume target after sign-in when no redirect was captured,
    /// and the destination after entering demo mode.
    pub landing_view: View,

    /// Public page shown after logout.
    pub public_view: View,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            protected: vec![
                View::Dashboard,
                View::Blockchain,
                View::Diagnostics,
                View::AiDiagnostics,
            ],
            login_view: View::Login,
            landing_view: View::Dashboard,
            public_view: View::Index,
        }
    }
}

impl GateConfig {
    /// Returns `true` if `view` requires a session.
    pub fn is_protected(&self, view: View) -> bool {
        self.protected.contains(&view)
    }
}

// ---------------------------------------------------------------------------
// IdentityConfig
// ---------------------------------------------------------------------------

/// Settings for [`MockIdentityProvider`](crate::MockIdentityProvider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Simulated sign-in latency in milliseconds.
    pub login_delay_ms: u64,

    /// Fixed leading part of every generated principal.
    pub principal_prefix: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: 1000,
            principal_prefix: "w4gpt-xutji".to_string(),
        }
    }
}

impl IdentityConfig {
    /// The sign-in latency as a [`Duration`].
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}
