//! Gate error combining unitary and Kraus errors
//!
//! Unitary content of a channel is split off so it can be sampled as a
//! plain unitary instead of being carried through a Kraus map.

use ndarray::Array2;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::error::{InternalError, SimulationError, ValidationError};
use crate::quantum::density_matrix::DensityMatrix;
use crate::quantum::operation::{NoiseOps, Operation};
use super::classifier::{decompose, ClassificationResult};
use super::config::{ErrorLocation, NoiseConfig};
use super::kraus_error::KrausError;
use super::probabilities::{NoiseBranch, ProbabilityModel};
use super::rng::{RngEngine, WeightedDraw};
use super::unitary_error::UnitaryError;

/// Noise for one gate: no error, a unitary error or a Kraus error
///
/// A default gate error never perturbs the operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GateError {
    probabilities: ProbabilityModel,
    classification: Option<ClassificationResult>,
    unitary_error: UnitaryError,
    kraus_error: KrausError,
}

impl GateError {
    /// Gate error for a CPTP map, applied with probability `p_error`
    pub fn from_kraus(matrices: &[Array2<Complex64>], p_error: f64) -> Result<Self, ValidationError> {
        Self::from_kraus_with_config(matrices, p_error, &NoiseConfig::default())
    }

    /// Gate error for a CPTP map with explicit settings
    ///
    /// The operators are validated (non-empty, square, equally sized,
    /// Σ K†K = I) and split into identity, unitary and residual Kraus
    /// branches. Nothing is returned unless every check passes.
    pub fn from_kraus_with_config(
        matrices: &[Array2<Complex64>],
        p_error: f64,
        config: &NoiseConfig,
    ) -> Result<Self, ValidationError> {
        config.validate()?;
        if !(0.0..=1.0).contains(&p_error) {
            return Err(ValidationError::InvalidProbability { name: "error probability", value: p_error });
        }

        let decomposition = decompose(matrices, config.tolerance)?;
        let kraus_probability = decomposition.kraus_probability();
        let unitary_error = UnitaryError::new(decomposition.unitaries, decomposition.unitary_weights)?
            .with_error_location(config.unitary_location);
        let kraus_error = KrausError::new(decomposition.kraus, kraus_probability)?
            .with_error_location(config.kraus_location);

        Ok(GateError {
            probabilities: ProbabilityModel::compose(p_error, &decomposition.probabilities),
            classification: Some(decomposition.probabilities),
            unitary_error,
            kraus_error,
        })
    }

    /// Replace the branch weights (no error, unitary, Kraus)
    pub fn set_probabilities(&mut self, p_identity: f64, p_unitary: f64, p_kraus: f64) -> Result<(), ValidationError> {
        self.probabilities = ProbabilityModel::new(p_identity, p_unitary, p_kraus)?;
        self.classification = None;
        Ok(())
    }

    /// Replace the unitary branch
    pub fn set_unitary(&mut self, error: UnitaryError) {
        self.unitary_error = error;
    }

    /// Replace the Kraus branch
    pub fn set_kraus(&mut self, error: KrausError) {
        self.kraus_error = error;
    }

    /// Place errors of both branches relative to the operation
    pub fn set_error_location(&mut self, location: ErrorLocation) {
        self.unitary_error = std::mem::take(&mut self.unitary_error).with_error_location(location);
        self.kraus_error = std::mem::take(&mut self.kraus_error).with_error_location(location);
    }

    /// Stored branch weights
    pub fn probabilities(&self) -> &ProbabilityModel {
        &self.probabilities
    }

    /// Classification the weights were composed from, if built from Kraus operators
    pub fn classification(&self) -> Option<&ClassificationResult> {
        self.classification.as_ref()
    }

    /// The unitary branch
    pub fn unitary_error(&self) -> &UnitaryError {
        &self.unitary_error
    }

    /// The Kraus branch
    pub fn kraus_error(&self) -> &KrausError {
        &self.kraus_error
    }

    /// Draw a branch for the given weights
    pub fn sample_branch<R: WeightedDraw + ?Sized>(&self, rng: &mut R) -> Result<NoiseBranch, InternalError> {
        let index = rng.rand_int(&self.probabilities.weights())?;
        NoiseBranch::from_index(index).ok_or(InternalError::CategoryOutOfRange(index))
    }

    /// Sample a noisy implementation of `op` acting on `qubits`
    pub fn sample_noise<R: WeightedDraw + ?Sized>(
        &self,
        op: &Operation,
        qubits: &[usize],
        rng: &mut R,
    ) -> Result<NoiseOps, InternalError> {
        match self.sample_branch(rng)? {
            NoiseBranch::NoError => Ok(vec![op.clone()]),
            NoiseBranch::Unitary => self.unitary_error.sample_noise(op, qubits, rng),
            NoiseBranch::Kraus => self.kraus_error.sample_noise(op, qubits, rng),
        }
    }

    /// Sample `shots` independent noisy implementations in parallel.
    ///
    /// Shot `i` draws from its own engine seeded with `seed + i`, so the
    /// result does not depend on thread scheduling.
    pub fn sample_noise_shots(
        &self,
        op: &Operation,
        qubits: &[usize],
        shots: usize,
        seed: u64,
    ) -> Result<Vec<NoiseOps>, InternalError> {
        (0..shots)
            .into_par_iter()
            .map(|shot| {
                let mut rng = RngEngine::new(seed.wrapping_add(shot as u64));
                self.sample_noise(op, qubits, &mut rng)
            })
            .collect()
    }

    /// Apply the average of the sequences `sample_noise` produces for `op`
    ///
    /// Each branch contributes the state its replacement sequence yields,
    /// weighted by the probability of drawing that sequence. With `op` an
    /// identity gate this is the noise channel itself.
    pub fn apply_expected(
        &self,
        rho: &DensityMatrix,
        op: &Operation,
        qubits: &[usize],
    ) -> Result<DensityMatrix, SimulationError> {
        let ideal = rho.apply_operation(op)?;
        let mut terms = vec![(self.probabilities.normalized(NoiseBranch::NoError), ideal.clone())];

        let unitary_weight = self.probabilities.normalized(NoiseBranch::Unitary);
        if unitary_weight > 0.0 {
            if self.unitary_error.is_empty() {
                return Err(InternalError::EmptyBranch("unitary").into());
            }
            let total: f64 = self.unitary_error.probabilities().iter().sum();
            if total <= 0.0 {
                return Err(InternalError::InvalidDistribution("unitary weights sum to zero".to_string()).into());
            }
            let location = self.unitary_error.error_location();
            for (u, w) in self.unitary_error.unitaries().iter().zip(self.unitary_error.probabilities()) {
                let ops = location.place(op.clone(), Operation::unitary(u.clone(), qubits));
                terms.push((unitary_weight * w / total, rho.apply_operations(&ops)?));
            }
        }

        let kraus_weight = self.probabilities.normalized(NoiseBranch::Kraus);
        if kraus_weight > 0.0 {
            let applied = if self.kraus_error.is_empty() { 0.0 } else { self.kraus_error.probability() };
            if applied > 0.0 {
                let error = Operation::kraus(self.kraus_error.kraus().to_vec(), qubits);
                let ops = self.kraus_error.error_location().place(op.clone(), error);
                terms.push((kraus_weight * applied, rho.apply_operations(&ops)?));
            }
            terms.push((kraus_weight * (1.0 - applied), ideal));
        }

        DensityMatrix::weighted_sum(&terms).ok_or(SimulationError::DimensionMismatch {
            expected: rho.dimension(),
            rows: 0,
            cols: 0,
        })
    }
}
