//! `App` builder and action dispatch.
//!
//! The pages used to wire behavior to buttons by CSS selector. Here every
//! user intent is an [`Action`] value, and [`App::dispatch`] routes it to
//! the gate, the identity provider or one of the simulated services. The
//! result is an [`Outcome`] for the presentation layer to render: this
//! module never draws anything.

use medblock_chain::{
    AccessLogEntry, Block, ChainVerifier, EncryptionKey, KeyRotator, LogSearch,
    Verification, filter_access_log,
};
use medblock_clock::Delay;
use medblock_diagnostics::{AiModel, DiagnosticsRunner, ModelReport};
use medblock_session::{
    AuthStatus, IdentityProvider, MockIdentityProvider, SessionGate, Theme,
    View, theme,
};
use medblock_store::KvStore;

use crate::{AppConfig, AppError};

// ---------------------------------------------------------------------------
// Action / Outcome
// ---------------------------------------------------------------------------

/// A user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A page load for the given path.
    Visit(String),
    /// The login form was submitted.
    SubmitLogin,
    /// The "try the demo" button was pressed.
    EnterDemoMode,
    Logout,
    ToggleTheme,
    /// Verify one block of the record chain.
    VerifyBlock(Block),
    /// Verify every block of the record chain, in order.
    VerifyAllBlocks(Vec<Block>),
    /// The visitor confirmed rotating the encryption key.
    RotateKey,
    /// The access-log search box changed.
    SearchAccessLog {
        rows: Vec<AccessLogEntry>,
        term: String,
    },
    /// Run one AI model.
    RunModel(AiModel),
}

/// What the presentation layer should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Render the requested path.
    Render(String),
    /// Navigate to this path instead.
    Redirect(String),
    /// The theme is now this one.
    ThemeChanged(Theme),
    /// Verification reports, in block order.
    Verified(Vec<Verification>),
    /// The newly displayed encryption key.
    KeyRotated(EncryptionKey),
    /// The access-log rows to show.
    AccessLog(LogSearch),
    ModelReport(ModelReport),
}

// ---------------------------------------------------------------------------
// AppBuilder
// ---------------------------------------------------------------------------

/// Builder for wiring an [`App`] to its store and services.
///
/// # Example
///
/// ```rust,ignore
/// let mut app = AppBuilder::new()
///     .config(AppConfig::load("medblock.json")?)
///     .build(FileStore::open("local-storage.json")?, TokioDelay)?;
/// let outcome = app.dispatch(Action::Visit("/dashboard.html".into())).await?;
/// ```
#[derive(Debug, Default)]
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds an app that signs in through [`MockIdentityProvider`].
    ///
    /// `delay` drives the simulated sign-in and every simulated service.
    ///
    /// # Errors
    /// [`AppError::Session`] if reconciling legacy keys in `store` fails.
    pub fn build<S, D>(
        self,
        store: S,
        delay: D,
    ) -> Result<App<S, D, MockIdentityProvider<D>>, AppError>
    where
        S: KvStore,
        D: Delay + Clone,
    {
        let identity =
            MockIdentityProvider::new(delay.clone(), self.config.identity.clone());
        self.build_with_identity(store, delay, identity)
    }

    /// Builds an app around a caller-supplied identity provider.
    ///
    /// # Errors
    /// Same as [`build`](Self::build).
    pub fn build_with_identity<S, D, P>(
        self,
        store: S,
        delay: D,
        identity: P,
    ) -> Result<App<S, D, P>, AppError>
    where
        S: KvStore,
        D: Delay + Clone,
        P: IdentityProvider,
    {
        let AppConfig {
            gate,
            chain,
            diagnostics,
            ..
        } = self.config;
        Ok(App {
            gate: SessionGate::new(store, gate)?,
            identity,
            chain: ChainVerifier::new(delay.clone(), chain.clone()),
            keys: KeyRotator::new(delay.clone(), chain),
            diagnostics: DiagnosticsRunner::new(delay, diagnostics),
        })
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The dashboard core: a session gate plus the simulated services.
///
/// All state lives in the store; `App` itself holds no flags. A failed
/// action leaves the store as it was before the action.
pub struct App<S: KvStore, D: Delay, P: IdentityProvider> {
    gate: SessionGate<S>,
    identity: P,
    chain: ChainVerifier<D>,
    keys: KeyRotator<D>,
    diagnostics: DiagnosticsRunner<D>,
}

impl<S, D, P> App<S, D, P>
where
    S: KvStore,
    D: Delay,
    P: IdentityProvider,
{
    /// Runs one action to completion.
    ///
    /// # Errors
    /// - [`AppError::Session`] — sign-in failed or a flag write failed
    /// - [`AppError::Forbidden`] — a records or AI action without a session
    /// - [`AppError::Chain`] — bulk verification of an empty chain
    pub async fn dispatch(&mut self, action: Action) -> Result<Outcome, AppError> {
        tracing::debug!(?action, "dispatching");

        match action {
            Action::Visit(path) => self.visit(path),
            Action::SubmitLogin => self.submit_login().await,
            Action::EnterDemoMode => {
                self.gate.enter_demo_mode()?;
                Ok(redirect(self.gate.config().landing_view))
            }
            Action::Logout => {
                self.gate.logout()?;
                Ok(redirect(self.gate.config().public_view))
            }
            Action::ToggleTheme => {
                let theme = theme::toggle_theme(self.gate.store_mut())?;
                Ok(Outcome::ThemeChanged(theme))
            }
            Action::VerifyBlock(block) => {
                self.require(View::Blockchain)?;
                let report = self.chain.verify_block(&block).await;
                Ok(Outcome::Verified(vec![report]))
            }
            Action::VerifyAllBlocks(blocks) => {
                self.require(View::Blockchain)?;
                let reports = self.chain.verify_all(&blocks).await?;
                Ok(Outcome::Verified(reports))
            }
            Action::RotateKey => {
                self.require(View::Blockchain)?;
                Ok(Outcome::KeyRotated(self.keys.rotate_key().await))
            }
            Action::SearchAccessLog { rows, term } => {
                self.require(View::Blockchain)?;
                Ok(Outcome::AccessLog(filter_access_log(&rows, &term)))
            }
            Action::RunModel(model) => {
                self.require(View::AiDiagnostics)?;
                Ok(Outcome::ModelReport(self.diagnostics.run(model).await))
            }
        }
    }

    fn visit(&mut self, path: String) -> Result<Outcome, AppError> {
        let decision = self.gate.guard(&path)?;
        match decision.redirect_to {
            Some(view) if !decision.allow => Ok(redirect(view)),
            _ => Ok(Outcome::Render(path)),
        }
    }

    async fn submit_login(&mut self) -> Result<Outcome, AppError> {
        // Nothing is written until the provider has produced a principal.
        let principal = self
            .identity
            .sign_in()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "sign-in failed"))?;
        let target = self.gate.complete_login(&principal)?;
        Ok(Outcome::Redirect(target))
    }

    fn require(&self, view: View) -> Result<(), AppError> {
        if self.gate.may_view(view) {
            Ok(())
        } else {
            tracing::info!(%view, "action rejected, no session");
            Err(AppError::Forbidden(view))
        }
    }

    /// Current session flags, for rendering header chrome.
    pub fn status(&self) -> AuthStatus {
        self.gate.status()
    }

    /// Current theme preference.
    pub fn theme(&self) -> Theme {
        theme::theme(self.gate.store())
    }

    /// The session gate, for reading flags and the store.
    pub fn gate(&self) -> &SessionGate<S> {
        &self.gate
    }

    /// Consumes the app, returning the store.
    pub fn into_store(self) -> S {
        self.gate.into_store()
    }
}

fn redirect(view: View) -> Outcome {
    Outcome::Redirect(view.as_str().to_string())
}
