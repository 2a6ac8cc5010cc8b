//! Per-call roll parameters and their validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::weights::{WeightBounds, WeightError};

/// Errors from request validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RollError {
    #[error("top_ratio must be in (0, 1], got {0}")]
    InvalidRatio(f64),
    #[error("top_count must be at least 1")]
    ZeroTopCount,
    #[error("invalid weights: {0}")]
    Weights(#[from] WeightError),
}

/// Everything a single roll needs. Nothing here outlives the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollRequest {
    /// Number of names to select.
    pub total_count: usize,
    /// Requested number of names drawn from the top side.
    pub top_count: usize,
    /// Fraction of the reference list treated as top.
    pub top_ratio: f64,
    /// Prepend the configured prefix to every name.
    pub use_prefix: bool,
    pub weight_min: f64,
    pub weight_max: f64,
    /// Target sum of all weights, clamped to what the bounds allow.
    pub weight_total: f64,
    pub seed: u64,
}

impl Default for RollRequest {
    fn default() -> Self {
        Self {
            total_count: 5,
            top_count: 3,
            top_ratio: 0.2,
            use_prefix: true,
            weight_min: 0.2,
            weight_max: 1.0,
            weight_total: 3.0,
            seed: 1234,
        }
    }
}

impl RollRequest {
    /// Check parameter ranges and return the quantized weight bounds.
    ///
    /// A zero `total_count` is not an error; it simply yields an empty roll.
    pub fn validate(&self) -> Result<WeightBounds, RollError> {
        if !(self.top_ratio.is_finite() && self.top_ratio > 0.0 && self.top_ratio <= 1.0) {
            return Err(RollError::InvalidRatio(self.top_ratio));
        }
        if self.top_count == 0 {
            return Err(RollError::ZeroTopCount);
        }
        Ok(WeightBounds::new(
            self.weight_min,
            self.weight_max,
            self.weight_total,
        )?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
