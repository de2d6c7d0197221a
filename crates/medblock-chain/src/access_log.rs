//! Free-text search over the record access log.

use serde::{Deserialize, Serialize};

/// One row of the access log: who touched the records, how, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    /// When the access happened, as displayed (e.g. `"2025-03-14 09:12"`).
    pub timestamp: String,
    /// Who accessed the records, e.g. `"Dr. Sarah Chen"`.
    pub accessor: String,
    /// What they did, e.g. `"Viewed lab results"`.
    pub action: String,
}

impl AccessLogEntry {
    pub fn new(
        timestamp: impl Into<String>,
        accessor: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            accessor: accessor.into(),
            action: action.into(),
        }
    }

    /// `needle` must already be lowercased.
    fn contains(&self, needle: &str) -> bool {
        [&self.timestamp, &self.accessor, &self.action]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// The result of filtering the access log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSearch {
    /// The normalized search term (lowercased, trimmed).
    pub term: String,
    /// Matching rows, in log order.
    pub rows: Vec<AccessLogEntry>,
}

impl LogSearch {
    /// `true` when a non-empty term matched nothing: the page shows its
    /// "no matching access logs" message instead of rows.
    pub fn no_matches(&self) -> bool {
        self.rows.is_empty() && !self.term.is_empty()
    }
}

/// Keeps the rows that contain `term` in any field, case-insensitively.
///
/// The term is trimmed first. An empty term keeps every row.
pub fn filter_access_log(rows: &[AccessLogEntry], term: &str) -> LogSearch {
    let term = term.trim().to_lowercase();
    let rows: Vec<AccessLogEntry> = rows
        .iter()
        .filter(|row| term.is_empty() || row.contains(&term))
        .cloned()
        .collect();

    tracing::debug!(%term, matches = rows.len(), "access log filtered");
    LogSearch { term, rows }
}
