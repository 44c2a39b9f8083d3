//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and whatever produces a prediction.

mod predictor;

pub use predictor::Predictor;
