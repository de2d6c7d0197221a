//! UI theme preference.
//!
//! Stored under its own key and never consulted by the gate.

use std::fmt;

use medblock_store::{KvStore, keys};
use serde::{Deserialize, Serialize};

use crate::SessionError;

/// Light or dark UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    /// The pages render dark unless told otherwise.
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads the stored theme. Only `"light"` selects light; anything else,
/// including a missing key, is dark.
pub fn theme<S: KvStore + ?Sized>(store: &S) -> Theme {
    match store.get(keys::THEME).as_deref() {
        Some("light") => Theme::Light,
        _ => Theme::Dark,
    }
}

/// Stores `theme` as the preference.
///
/// # Errors
/// [`SessionError::Store`] if the write fails.
pub fn set_theme<S: KvStore + ?Sized>(
    store: &mut S,
    theme: Theme,
) -> Result<(), SessionError> {
    store.set(keys::THEME, theme.as_str())?;
    tracing::debug!(%theme, "theme preference stored");
    Ok(())
}

/// Flips the stored theme and returns the new one.
///
/// # Errors
/// [`SessionError::Store`] if the write fails; the old preference stays.
pub fn toggle_theme<S: KvStore + ?Sized>(
    store: &mut S,
) -> Result<Theme, SessionError> {
    let next = theme(store).toggled();
    set_theme(store, next)?;
    Ok(next)
}
