//! Mixed-unitary error: one of several unitaries, chosen by weight.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{InternalError, ValidationError};
use crate::linalg::check_matrices;
use crate::quantum::operation::{NoiseOps, Operation};
use super::config::ErrorLocation;
use super::rng::WeightedDraw;

/// Samples one unitary from a weighted set
///
/// The weights are an internal distribution of the branch. They are
/// relative, so they need not sum to one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitaryError {
    unitaries: Vec<Array2<Complex64>>,
    probabilities: Vec<f64>,
    error_location: ErrorLocation,
}

impl UnitaryError {
    /// Build from matching lists of unitaries and weights.
    ///
    /// Matrices must be square and of one dimension; weights finite and
    /// non-negative. Unitarity itself is not re-checked here.
    pub fn new(
        unitaries: Vec<Array2<Complex64>>,
        probabilities: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        if unitaries.len() != probabilities.len() {
            return Err(ValidationError::LengthMismatch {
                matrices: unitaries.len(),
                weights: probabilities.len(),
            });
        }
        check_matrices(&unitaries)?;
        if let Some(&p) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(ValidationError::InvalidProbability { name: "unitary weight", value: p });
        }

        Ok(UnitaryError {
            unitaries,
            probabilities,
            error_location: ErrorLocation::Replace,
        })
    }

    /// Place sampled errors before or after the operation
    pub fn with_error_location(mut self, location: ErrorLocation) -> Self {
        self.error_location = location;
        self
    }

    /// The candidate unitaries
    pub fn unitaries(&self) -> &[Array2<Complex64>] {
        &self.unitaries
    }

    /// Weight of each unitary
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Placement of the sampled unitary relative to the operation
    pub fn error_location(&self) -> ErrorLocation {
        self.error_location
    }

    /// Number of candidate unitaries
    pub fn len(&self) -> usize {
        self.unitaries.len()
    }

    /// Whether there is nothing to sample
    pub fn is_empty(&self) -> bool {
        self.unitaries.is_empty()
    }

    /// Draw one unitary and build the replacement sequence for `op` on `qubits`
    ///
    /// With the default [`ErrorLocation::Replace`] the unitary takes the
    /// place of `op`.
    pub fn sample_noise<R: WeightedDraw + ?Sized>(
        &self,
        op: &Operation,
        qubits: &[usize],
        rng: &mut R,
    ) -> Result<NoiseOps, InternalError> {
        if self.is_empty() {
            return Err(InternalError::EmptyBranch("unitary"));
        }
        let r = rng.rand_int(&self.probabilities)?;
        let unitary = self
            .unitaries
            .get(r)
            .ok_or(InternalError::CategoryOutOfRange(r))?;
        let error = Operation::unitary(unitary.clone(), qubits);
        Ok(self.error_location.place(op.clone(), error))
    }
}
