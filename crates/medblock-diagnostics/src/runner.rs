//! The runner: a fixed wait, then the model's canned finding.

use medblock_clock::Delay;
use serde::{Deserialize, Serialize};

use crate::{AiModel, DiagnosticsConfig, RiskCategory, RiskScore};

/// Chart values after a Health Predictor run, in [`RiskCategory::ALL`]
/// order.
const PREDICTED_SCORES: [u32; 6] = [12, 18, 22, 25, 15, 20];

/// How a report should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
}

/// A card added to the insights list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub detail: String,
}

impl Insight {
    fn new(title: &str, detail: &str) -> Self {
        Self {
            title: title.to_string(),
            detail: detail.to_string(),
        }
    }
}

/// What a model run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReport {
    pub model: AiModel,
    pub severity: Severity,
    /// One-line finding for the notification.
    pub summary: String,
    /// Updated chart values. Only the Health Predictor fills this.
    pub risk_scores: Vec<RiskScore>,
    pub insight: Option<Insight>,
}

/// Runs simulated models.
///
/// ```text
/// run(model) ── model_run_delay ──→ [ModelReport]
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticsRunner<D: Delay> {
    delay: D,
    config: DiagnosticsConfig,
}

impl<D: Delay> DiagnosticsRunner<D> {
    pub fn new(delay: D, config: DiagnosticsConfig) -> Self {
        Self { delay, config }
    }

    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Waits the run delay, then returns `model`'s report.
    pub async fn run(&self, model: AiModel) -> ModelReport {
        tracing::debug!(%model, delay_ms = self.config.model_run_delay_ms, "running model");
        self.delay.delay(self.config.model_run_delay()).await;

        let report = report_for(model);
        tracing::info!(%model, severity = ?report.severity, "model run complete");
        report
    }
}

fn report_for(model: AiModel) -> ModelReport {
    match model {
        AiModel::HealthPredictor => ModelReport {
            model,
            severity: Severity::Success,
            summary: "Your health data has been analyzed successfully.".into(),
            risk_scores: RiskCategory::ALL
                .into_iter()
                .zip(PREDICTED_SCORES)
                .map(|(category, score)| RiskScore::new(category, score))
                .collect(),
            insight: Some(Insight::new(
                "Cardiovascular Improvement",
                "Your cardiovascular risk has decreased by 3 points since your \
                 last analysis. Keep up the good work!",
            )),
        },
        AiModel::FraudDetection => ModelReport {
            model,
            severity: Severity::Info,
            summary: "No fraudulent activities detected in your recent medical records."
                .into(),
            risk_scores: Vec::new(),
            insight: None,
        },
        AiModel::AnomalyDetection => ModelReport {
            model,
            severity: Severity::Warning,
            summary: "Minor sleep pattern anomalies detected. See insights for details."
                .into(),
            risk_scores: Vec::new(),
            insight: Some(Insight::new(
                "Sleep Pattern Anomaly",
                "Irregular sleep patterns detected in the last week. Consider \
                 maintaining a more consistent sleep schedule.",
            )),
        },
    }
}
