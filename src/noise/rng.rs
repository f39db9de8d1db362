//! Random engine used by the noise samplers
//!
//! Samplers are generic over [`WeightedDraw`] so a simulation can plug in
//! its own stream, and tests can script the draws.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::InternalError;

/// Source of uniform and weighted-categorical draws
pub trait WeightedDraw {
    /// Uniform value in [0, 1)
    fn rand(&mut self) -> f64;

    /// Index drawn with probability proportional to its weight
    ///
    /// Weights need not sum to one but must be non-negative with a
    /// positive total.
    fn rand_int(&mut self, weights: &[f64]) -> Result<usize, InternalError>;
}

/// Seedable engine backed by [`StdRng`]
///
/// Not meant to be shared between threads; give each worker its own.
#[derive(Debug, Clone)]
pub struct RngEngine {
    rng: StdRng,
}

impl RngEngine {
    /// Engine with a fixed seed
    pub fn new(seed: u64) -> Self {
        RngEngine { rng: StdRng::seed_from_u64(seed) }
    }

    /// Engine seeded from the operating system
    pub fn from_entropy() -> Self {
        RngEngine { rng: StdRng::from_entropy() }
    }
}

impl Default for RngEngine {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl WeightedDraw for RngEngine {
    fn rand(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn rand_int(&mut self, weights: &[f64]) -> Result<usize, InternalError> {
        let dist = WeightedIndex::new(weights)
            .map_err(|e| InternalError::InvalidDistribution(e.to_string()))?;
        Ok(dist.sample(&mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_weight_is_never_drawn() {
        let mut rng = RngEngine::new(7);
        for _ in 0..1000 {
            let idx = rng.rand_int(&[0.3, 0.0, 0.7]).unwrap();
            assert_ne!(idx, 1);
        }
    }

    #[test]
    fn test_invalid_weights_are_reported() {
        let mut rng = RngEngine::new(7);
        assert!(matches!(rng.rand_int(&[0.0, 0.0]), Err(InternalError::InvalidDistribution(_))));
        assert!(matches!(rng.rand_int(&[]), Err(InternalError::InvalidDistribution(_))));
        assert!(matches!(rng.rand_int(&[-1.0, 2.0]), Err(InternalError::InvalidDistribution(_))));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = RngEngine::new(42);
        let mut b = RngEngine::new(42);
        for _ in 0..16 {
            assert_eq!(a.rand_int(&[1.0, 2.0, 3.0]).unwrap(), b.rand_int(&[1.0, 2.0, 3.0]).unwrap());
            assert_eq!(a.rand(), b.rand());
        }
    }
}
