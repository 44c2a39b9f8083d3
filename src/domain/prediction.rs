//! Prediction result types.
//!
//! A result is a risk bucket, a confidence percentage and the fixed
//! recommendations for that bucket.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Confidence percentages a result may carry.
pub const CONFIDENCE_RANGE: RangeInclusive<u8> = 80..=99;

/// Risk bucket for liver cirrhosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High];

    /// Clinical recommendations for this bucket, in display order.
    #[must_use]
    pub fn recommendations(self) -> [&'static str; 3] {
        match self {
            Self::Low => [
                "Continue regular health monitoring",
                "Maintain healthy lifestyle habits",
                "Annual liver function tests recommended",
            ],
            Self::Moderate => [
                "Schedule follow-up with hepatologist",
                "Consider lifestyle modifications",
                "Monitor liver function every 6 months",
            ],
            Self::High => [
                "Immediate consultation with specialist required",
                "Comprehensive liver evaluation needed",
                "Discuss treatment options with healthcare provider",
            ],
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Low => "No significant indicators of cirrhosis",
            Self::Moderate => "Some indicators present, follow-up advised",
            Self::High => "Strong indicators present, specialist review needed",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Moderate => write!(f, "Moderate"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Outcome of one analysis. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    risk: RiskLevel,
    confidence: u8,
    recommendations: Vec<String>,
}

impl PredictionResult {
    /// Build a result; confidence is clamped into [`CONFIDENCE_RANGE`].
    #[must_use]
    pub fn new(risk: RiskLevel, confidence: u8) -> Self {
        let confidence = confidence.clamp(*CONFIDENCE_RANGE.start(), *CONFIDENCE_RANGE.end());
        Self {
            risk,
            confidence,
            recommendations: risk.recommendations().iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn risk(&self) -> RiskLevel {
        self.risk
    }

    /// Confidence as an integer percentage.
    #[must_use]
    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    #[must_use]
    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}
