//! Domain layer: Core business types and logic.
//!
//! Pure types with no I/O. All types are serializable and validation lives
//! next to the data it checks.

mod analysis;
mod inputs;
mod prediction;

pub use analysis::AnalysisState;
pub use inputs::{ClinicalInputs, Field, Gender, UnknownField, ValidationError, REQUIRED_FIELDS};
pub use prediction::{PredictionResult, RiskLevel, CONFIDENCE_RANGE};
