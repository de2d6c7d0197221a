//! The offered models and risk banding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A model on the AI-diagnostics page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiModel {
    HealthPredictor,
    FraudDetection,
    AnomalyDetection,
}

impl AiModel {
    /// Every model, in page order.
    pub const ALL: [AiModel; 3] = [
        AiModel::HealthPredictor,
        AiModel::FraudDetection,
        AiModel::AnomalyDetection,
    ];

    /// The card title, e.g. `"Health Predictor"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::HealthPredictor => "Health Predictor",
            Self::FraudDetection => "Fraud Detection",
            Self::AnomalyDetection => "Anomaly Detection",
        }
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The axes of the health-risk chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskCategory {
    Cardiovascular,
    Respiratory,
    Metabolic,
    Immune,
    Cognitive,
    Mental,
}

impl RiskCategory {
    /// Every category, in chart order.
    pub const ALL: [RiskCategory; 6] = [
        RiskCategory::Cardiovascular,
        RiskCategory::Respiratory,
        RiskCategory::Metabolic,
        RiskCategory::Immune,
        RiskCategory::Cognitive,
        RiskCategory::Mental,
    ];
}

/// Band of a risk score.
///
/// ```text
///   0 ..= 15  Low
///  16 ..= 30  Moderate
///  31 ..      High
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=15 => Self::Low,
            16..=30 => Self::Moderate,
            _ => Self::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        })
    }
}

/// One point of the health-risk chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub category: RiskCategory,
    pub score: u32,
    pub level: RiskLevel,
}

impl RiskScore {
    pub fn new(category: RiskCategory, score: u32) -> Self {
        Self {
            category,
            score,
            level: RiskLevel::from_score(score),
        }
    }
}
