//! The fixed set of named views the dashboard navigates between.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named page of the dashboard.
///
/// Views are reached by full-page loads, so a "route" is just a file
/// name. [`View::from_path`] maps whatever path the caller has
/// (`dashboard`, `/dashboard.html`, `/app/dashboard.html?tab=2`) onto
/// the view it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Index,
    Login,
    Dashboard,
    Blockchain,
    Diagnostics,
    AiDiagnostics,
}

impl View {
    /// Every view, in navigation order.
    pub const ALL: [View; 6] = [
        View::Index,
        View::Login,
        View::Dashboard,
        View::Blockchain,
        View::Diagnostics,
        View::AiDiagnostics,
    ];

    /// The bare view name, e.g. `"ai-diagnostics"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Login => "login",
            Self::Dashboard => "dashboard",
            Self::Blockchain => "blockchain",
            Self::Diagnostics => "diagnostics",
            Self::AiDiagnostics => "ai-diagnostics",
        }
    }

    /// Resolves a request path to the view it names.
    ///
    /// Normalization:
    /// - everything from the first `?` or `#` is ignored
    /// - only the last `/`-separated segment counts
    /// - a trailing `.html` is dropped
    /// - an empty segment (`""`, `"/"`) is the index page
    ///
    /// Returns `None` for names outside the fixed set.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segment = path.rsplit('/').next().unwrap_or_default();
        let name = segment.strip_suffix(".html").unwrap_or(segment);

        if name.is_empty() {
            return Some(Self::Index);
        }
        Self::ALL.into_iter().find(|view| view.as_str() == name)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
