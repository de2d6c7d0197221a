//! Session gating for MedBlock views.
//!
//! This crate decides who may see which page:
//!
//! 1. **Gating** — [`SessionGate::guard`] allows or redirects a page load
//! 2. **Resume** — a gated visitor's destination is captured and handed
//!    back by [`SessionGate::complete_login`]
//! 3. **Sign-in** — [`MockIdentityProvider`], an explicitly simulated
//!    login behind the [`IdentityProvider`] trait
//! 4. **Theme** — the light/dark preference that shares the same store
//!
//! # How it fits in the stack
//!
//! ```text
//! App / action dispatch (above)  ← turns actions into gate calls
//!     ↕
//! Session layer (this crate)     ← flags, redirects, simulated sign-in
//!     ↕
//! Store + clock (below)          ← KvStore, Delay
//! ```

#![allow(async_fn_in_trait)]

mod config;
mod error;
mod gate;
mod identity;
pub mod theme;
mod view;

pub use config::{GateConfig, IdentityConfig};
pub use error::SessionError;
pub use gate::{AuthStatus, GuardDecision, SessionGate};
pub use identity::{IdentityProvider, MockIdentityProvider, Principal};
pub use theme::Theme;
pub use view::View;
