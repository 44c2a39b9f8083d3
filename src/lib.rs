//! # Hepascope
//!
//! Terminal demo of a liver cirrhosis risk assessment form.
//!
//! This crate provides:
//! - A form controller that validates clinical inputs and runs a simulated analysis
//! - A placeholder predictor drawing a random risk bucket and confidence
//! - Terminal UI for the overview and assessment screens
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (ClinicalInputs, AnalysisState, PredictionResult)
//! - `ports`: Trait definitions for prediction backends
//! - `adapters`: Concrete implementations (random predictor, log sanitizer)
//! - `application`: Form controller and background analysis worker
//! - `config`: Environment-driven settings
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{AnalysisState, ClinicalInputs, Field, PredictionResult, RiskLevel};

/// Result type for Hepascope operations
pub type Result<T> = std::result::Result<T, HepascopeError>;

/// Main error type for Hepascope
#[derive(Debug, thiserror::Error)]
pub enum HepascopeError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: HepascopeError = config::ConfigError::InvalidNumber {
            var: "HEPASCOPE_RNG_SEED",
            value: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, HepascopeError::Config(_)));
        assert_eq!(
            err.to_string(),
            r#"Configuration error: HEPASCOPE_RNG_SEED: expected a non-negative integer, got "abc""#
        );
    }

    #[test]
    fn test_io_error_converts() {
        let err: HepascopeError = std::io::Error::new(std::io::ErrorKind::Other, "no tty").into();
        assert!(matches!(err, HepascopeError::Io(_)));
        assert_eq!(err.to_string(), "IO error: no tty");
    }
}
