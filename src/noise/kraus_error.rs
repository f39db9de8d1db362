//! General Kraus error applied with a fixed probability.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{InternalError, ValidationError};
use crate::linalg::check_matrices;
use crate::quantum::operation::{NoiseOps, Operation};
use super::config::ErrorLocation;
use super::rng::WeightedDraw;

/// A CPTP map inserted next to an operation with some probability
///
/// Which Kraus operator is realized depends on the state, so the sampler
/// emits the whole map as one [`Operation::Kraus`] and leaves the choice to
/// whoever applies it.
#[derive(Debug, Clone, PartialEq)]
pub struct KrausError {
    kraus: Vec<Array2<Complex64>>,
    probability: f64,
    error_location: ErrorLocation,
}

impl Default for KrausError {
    fn default() -> Self {
        KrausError {
            kraus: Vec::new(),
            probability: 0.0,
            error_location: ErrorLocation::After,
        }
    }
}

impl KrausError {
    /// Build from Kraus operators and the probability of applying them
    pub fn new(kraus: Vec<Array2<Complex64>>, probability: f64) -> Result<Self, ValidationError> {
        check_matrices(&kraus)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ValidationError::InvalidProbability { name: "kraus probability", value: probability });
        }

        Ok(KrausError {
            kraus,
            probability,
            error_location: ErrorLocation::After,
        })
    }

    /// Place sampled errors before or after the operation
    pub fn with_error_location(mut self, location: ErrorLocation) -> Self {
        self.error_location = location;
        self
    }

    /// The Kraus operators
    pub fn kraus(&self) -> &[Array2<Complex64>] {
        &self.kraus
    }

    /// Probability of applying the map when this branch is selected
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Placement of the map relative to the operation
    pub fn error_location(&self) -> ErrorLocation {
        self.error_location
    }

    /// Whether there are no operators
    pub fn is_empty(&self) -> bool {
        self.kraus.is_empty()
    }

    /// Return `op`, with the Kraus map placed around it at the configured probability
    pub fn sample_noise<R: WeightedDraw + ?Sized>(
        &self,
        op: &Operation,
        qubits: &[usize],
        rng: &mut R,
    ) -> Result<NoiseOps, InternalError> {
        if self.kraus.is_empty() || rng.rand() >= self.probability {
            return Ok(vec![op.clone()]);
        }
        let error = Operation::kraus(self.kraus.clone(), qubits);
        Ok(self.error_location.place(op.clone(), error))
    }
}
