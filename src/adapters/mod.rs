//! Adapters layer: Concrete implementations of ports.
//!
//! - `random`: placeholder predictor drawing random results
//! - `sanitize`: clinical-value filtering for logs

pub mod random;
pub mod sanitize;

pub use random::RandomPredictor;
