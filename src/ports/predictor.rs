//! Predictor port: Trait for turning clinical inputs into a risk result.
//!
//! The assessment controller only talks to this trait, so the placeholder
//! random adapter can be swapped for a real classifier without touching the
//! form state machine.

use crate::domain::{ClinicalInputs, PredictionResult};

/// Trait for risk prediction backends.
///
/// Implementations are called from a background worker thread.
pub trait Predictor: Send + Sync {
    /// Produce a result for the given inputs.
    ///
    /// Inputs have already passed required-field validation.
    fn predict(&self, inputs: &ClinicalInputs) -> PredictionResult;
}

