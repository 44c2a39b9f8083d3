//! Lifecycle of a single risk analysis.

use std::time::Instant;

use super::PredictionResult;

/// Where the form's analysis currently stands. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisState {
    /// Nothing submitted yet, or the last run was cancelled.
    #[default]
    Idle,
    /// Waiting for the simulated analysis to finish.
    Running { started_at: Instant },
    /// Finished with a result.
    Completed(PredictionResult),
}

impl AnalysisState {
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Completed(result) => Some(result),
            _ => None,
        }
    }
}
