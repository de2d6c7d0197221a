//! # MedBlock
//!
//! Session-gated core of the MedBlock records dashboard.
//!
//! Every "backend" interaction of the dashboard is a client-side
//! simulation: sign-in is a delay plus a random principal, block
//! verification and AI model runs are a delay plus a canned report, and
//! all state is a flat key/value store. This crate ties those pieces together behind one
//! [`App`] that takes [`Action`]s and returns [`Outcome`]s.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medblock::prelude::*;
//!
//! # async fn run() -> Result<(), AppError> {
//! let mut app = AppBuilder::new().build(MemoryStore::new(), TokioDelay)?;
//!
//! // Gated: sends the visitor to the login view.
//! let outcome = app.dispatch(Action::Visit("dashboard".into())).await?;
//! assert_eq!(outcome, Outcome::Redirect("login".into()));
//!
//! // Simulated sign-in resumes the original destination.
//! let outcome = app.dispatch(Action::SubmitLogin).await?;
//! assert_eq!(outcome, Outcome::Redirect("dashboard".into()));
//! # Ok(())
//! # }
//! ```

mod app;
mod config;
mod error;

pub use app::{Action, App, AppBuilder, Outcome};
pub use config::AppConfig;
pub use error::AppError;

pub use medblock_chain as chain;
pub use medblock_clock as clock;
pub use medblock_diagnostics as diagnostics;
pub use medblock_session as session;
pub use medblock_store as store;

use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber that prints to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this
/// more than once is harmless: later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub mod prelude {
    pub use crate::{Action, App, AppBuilder, AppConfig, AppError, Outcome};
    pub use medblock_chain::{AccessLogEntry, Block, EncryptionKey, LogSearch, Verification};
    pub use medblock_clock::{Delay, InstantDelay, TokioDelay};
    pub use medblock_diagnostics::{AiModel, ModelReport, RiskLevel};
    pub use medblock_session::{AuthStatus, Theme, View};
    pub use medblock_store::{FileStore, KvStore, MemoryStore};
}
