//! Bounded weight distribution in fixed-point tenths.
//!
//! Weights carry one decimal place. All arithmetic happens on integer tenths
//! so that "subtract, check remaining" always terminates exactly and the sum
//! never drifts.

use rand::Rng;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Errors from weight bound validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("weight bounds must be finite (min={min}, max={max}, total={total})")]
    NonFinite { min: f64, max: f64, total: f64 },
    #[error("weight bounds must not be negative (min={min}, total={total})")]
    Negative { min: f64, total: f64 },
    #[error("weight_min ({min}) is greater than weight_max ({max})")]
    InvertedBounds { min: f64, max: f64 },
    #[error("weight bound {value} is too large to represent in tenths")]
    OutOfRange { value: f64 },
}

/// A weight with one decimal place, stored as integer tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Weight(i64);

impl Weight {
    pub fn from_tenths(tenths: i64) -> Self {
        Self(tenths)
    }

    /// Round a real value to the nearest tenth (half away from zero).
    pub fn from_f64(value: f64) -> Self {
        Self((value * 10.0).round() as i64)
    }

    pub fn tenths(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{}", abs / 10, abs % 10)
    }
}

impl Serialize for Weight {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Validated per-item bounds and target sum, quantized to tenths.
///
/// The target is kept as `i128` tenths: it is clamped against `count * max`,
/// which can exceed `i64` even when every per-item bound fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightBounds {
    min: i64,
    max: i64,
    total: i128,
}

impl WeightBounds {
    /// Validate and quantize bounds.
    ///
    /// `min > max` is rejected rather than swapped. `max` in tenths must fit
    /// in an `i64`. Any finite total is accepted; it is clamped before use.
    pub fn new(min: f64, max: f64, total: f64) -> Result<Self, WeightError> {
        if !(min.is_finite() && max.is_finite() && total.is_finite()) {
            return Err(WeightError::NonFinite { min, max, total });
        }
        if min < 0.0 || total < 0.0 {
            return Err(WeightError::Negative { min, total });
        }
        if min > max {
            return Err(WeightError::InvertedBounds { min, max });
        }
        if max * 10.0 >= i64::MAX as f64 {
            return Err(WeightError::OutOfRange { value: max });
        }
        Ok(Self {
            min: Weight::from_f64(min).tenths(),
            max: Weight::from_f64(max).tenths(),
            // saturates at i128::MAX, still above any reachable count * max
            total: (total * 10.0).round() as i128,
        })
    }

    pub fn min(&self) -> Weight {
        Weight(self.min)
    }

    pub fn max(&self) -> Weight {
        Weight(self.max)
    }

    /// The target sum for `count` items in tenths, clamped into the
    /// achievable range `[count * min, count * max]`.
    pub fn clamped_total_tenths(&self, count: usize) -> i128 {
        let n = count as i128;
        self.total.clamp(n * self.min as i128, n * self.max as i128)
    }
}

/// Produce `count` weights in `[min, max]` summing to the clamped total.
///
/// Every weight starts at `min`. One pass over the items, in order, hands
/// each a uniform draw from `[0, min(max - min, remaining)]` rounded to a
/// tenth; the pass stops once nothing remains. Whatever the draws left over
/// is then topped up deterministically, front to back, up to `max`.
pub fn distribute<R: Rng>(count: usize, bounds: &WeightBounds, rng: &mut R) -> Vec<Weight> {
    if count == 0 {
        return Vec::new();
    }

    let span = bounds.max - bounds.min;
    let floor = count as i128 * bounds.min as i128;
    let mut remaining = bounds.clamped_total_tenths(count) - floor;
    let mut weights = vec![bounds.min; count];

    for weight in weights.iter_mut() {
        // never above span, so it fits back into i64
        let cap = (span as i128).min(remaining) as i64;
        if cap <= 0 {
            break;
        }
        let addition = (rng.gen_range(0.0..=cap as f64)).round() as i64;
        let addition = addition.clamp(0, cap);
        *weight += addition;
        remaining -= addition as i128;
    }

    if remaining > 0 {
        for weight in weights.iter_mut() {
            let addition = ((bounds.max - *weight) as i128).min(remaining);
            *weight += addition as i64;
            remaining -= addition;
            if remaining <= 0 {
                break;
            }
        }
    }

    weights.into_iter().map(Weight).collect()
}
