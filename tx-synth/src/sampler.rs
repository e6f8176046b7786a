use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::SynthError;

/// Picks an index with probability proportional to its weight.
///
/// Weights are relative and need not sum to one. Sampling draws a point in
/// `[0, total)` and binary searches the cumulative weights for it, so a
/// zero-weight entry can never be returned.
#[derive(Debug, Clone)]
pub struct WeightedSampler {
    cumulative: Vec<f64>,
    uniform: Uniform<f64>,
}

impl WeightedSampler {
    /// # Errors
    /// Errors when `weights` is empty, contains a negative or non-finite value,
    /// or sums to zero
    pub fn new(weights: &[f64]) -> Result<Self, SynthError> {
        if weights.is_empty() {
            return Err(SynthError::NoCategories);
        }

        let mut total = 0.0;
        let mut cumulative = Vec::with_capacity(weights.len());
        for &weight in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SynthError::InvalidWeight);
            }
            total += weight;
            cumulative.push(total);
        }

        if !total.is_finite() {
            return Err(SynthError::InvalidWeight);
        }
        if total <= 0.0 {
            return Err(SynthError::ZeroTotalWeight);
        }

        Ok(WeightedSampler {
            cumulative,
            uniform: Uniform::new(0.0, total),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or_default()
    }
}

impl Distribution<usize> for WeightedSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let point = self.uniform.sample(rng);
        // First bucket whose upper edge lies strictly above the point.
        let idx = self.cumulative.partition_point(|&edge| edge <= point);
        idx.min(self.cumulative.len() - 1)
    }
}
