//! Placeholder predictor that draws results at random.
//!
//! The draw ignores every input value: risk is uniform over the three
//! buckets and confidence is uniform over [`CONFIDENCE_RANGE`]. It stands in
//! for a trained model until one is wired in behind [`Predictor`].

use std::sync::Mutex;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::{ClinicalInputs, PredictionResult, RiskLevel, CONFIDENCE_RANGE};
use crate::ports::Predictor;

/// Random-draw predictor.
pub struct RandomPredictor {
    rng: Mutex<ChaCha20Rng>,
}

impl RandomPredictor {
    /// Create a predictor seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_entropy()),
        }
    }

    /// Create a predictor with a fixed seed (reproducible sequences).
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    fn draw(rng: &mut ChaCha20Rng) -> PredictionResult {
        let risk = *RiskLevel::ALL.choose(rng).unwrap_or(&RiskLevel::Low);
        let confidence = rng.gen_range(CONFIDENCE_RANGE);
        PredictionResult::new(risk, confidence)
    }
}

impl Default for RandomPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor for RandomPredictor {
    fn predict(&self, _inputs: &ClinicalInputs) -> PredictionResult {
        let result = match self.rng.lock() {
            Ok(mut rng) => Self::draw(&mut rng),
            Err(poisoned) => Self::draw(&mut poisoned.into_inner()),
        };

        tracing::debug!(
            risk = %result.risk(),
            confidence = result.confidence(),
            "Random prediction drawn"
        );
        result
    }
}
