//! Walks one visitor through the dashboard: gated visit, simulated
//! sign-in, resumed navigation, chain verification, access-log search,
//! key rotation, an AI model run, logout.
//!
//! ```text
//! cargo run -p walkthrough -- [storage.json] [config.json]
//! ```
//!
//! Session flags persist in `storage.json` (default
//! `medblock-storage.json`). The theme toggled here survives the final
//! logout; the session flags do not.

use medblock::prelude::*;

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

fn sample_chain() -> Vec<Block> {
    vec![
        Block::new(0, "Genesis"),
        Block::new(1, "Annual physical"),
        Block::new(2, "Lab results"),
        Block::new(3, "Prescription"),
    ]
}

fn sample_access_log() -> Vec<AccessLogEntry> {
    vec![
        AccessLogEntry::new("2025-03-14 09:12", "Dr. Sarah Chen", "Viewed lab results"),
        AccessLogEntry::new("2025-03-13 16:40", "City Pharmacy", "Filled prescription"),
        AccessLogEntry::new("2025-03-11 11:05", "Dr. Michael Rivera", "Updated allergies"),
    ]
}

// ---------------------------------------------------------------------------
// Walkthrough
// ---------------------------------------------------------------------------

async fn step<S, D, P>(app: &mut App<S, D, P>, action: Action) -> Result<Outcome, AppError>
where
    S: KvStore,
    D: Delay,
    P: medblock::session::IdentityProvider,
{
    let label = format!("{action:?}");
    let outcome = app.dispatch(action).await?;
    tracing::info!(action = %label, ?outcome, "step");
    Ok(outcome)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    medblock::init_tracing();

    let mut args = std::env::args().skip(1);
    let storage = args
        .next()
        .unwrap_or_else(|| "medblock-storage.json".to_string());
    let config = match args.next() {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let store = FileStore::open(&storage)?;
    let mut app = AppBuilder::new().config(config).build(store, TokioDelay)?;
    tracing::info!(%storage, status = ?app.status(), "starting walkthrough");

    step(&mut app, Action::Visit("/dashboard.html".into())).await?;

    // The redirect target is whatever the gate captured.
    let resumed = match step(&mut app, Action::SubmitLogin).await? {
        Outcome::Redirect(path) => path,
        other => {
            tracing::warn!(?other, "sign-in did not redirect");
            View::Dashboard.as_str().to_string()
        }
    };
    step(&mut app, Action::Visit(resumed)).await?;

    step(&mut app, Action::Visit("blockchain".into())).await?;
    step(&mut app, Action::VerifyAllBlocks(sample_chain())).await?;
    step(
        &mut app,
        Action::SearchAccessLog {
            rows: sample_access_log(),
            term: "dr.".into(),
        },
    )
    .await?;
    step(&mut app, Action::RotateKey).await?;

    step(&mut app, Action::Visit("/ai-diagnostics.html".into())).await?;
    step(&mut app, Action::RunModel(AiModel::HealthPredictor)).await?;
    step(&mut app, Action::ToggleTheme).await?;
    step(&mut app, Action::Logout).await?;
    step(&mut app, Action::Visit("diagnostics".into())).await?;

    tracing::info!(status = ?app.status(), theme = %app.theme(), "walkthrough finished");
    Ok(())
}
