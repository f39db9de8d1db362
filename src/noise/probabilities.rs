//! Three-outcome distribution over the gate error branches

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ValidationError;
use super::classifier::ClassificationResult;

/// Branch selected by a gate error draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseBranch {
    /// The operation runs unchanged
    NoError,
    /// A unitary error is sampled
    Unitary,
    /// The residual Kraus map is applied
    Kraus,
}

impl NoiseBranch {
    /// Branch for a categorical index, `None` past the last branch
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(NoiseBranch::NoError),
            1 => Some(NoiseBranch::Unitary),
            2 => Some(NoiseBranch::Kraus),
            _ => None,
        }
    }
}

/// Relative weights of the no-error, unitary and Kraus branches
///
/// Weights are non-negative but need not sum to exactly one; draws treat
/// them as relative. Deserialized models go through [`ProbabilityModel::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BranchWeights")]
pub struct ProbabilityModel {
    no_error: f64,
    unitary: f64,
    kraus: f64,
}

// Unchecked wire form of a ProbabilityModel
#[derive(Deserialize)]
struct BranchWeights {
    no_error: f64,
    unitary: f64,
    kraus: f64,
}

impl TryFrom<BranchWeights> for ProbabilityModel {
    type Error = ValidationError;

    fn try_from(weights: BranchWeights) -> Result<Self, Self::Error> {
        ProbabilityModel::new(weights.no_error, weights.unitary, weights.kraus)
    }
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        ProbabilityModel { no_error: 1.0, unitary: 0.0, kraus: 0.0 }
    }
}

impl ProbabilityModel {
    /// Build from explicit weights
    pub fn new(no_error: f64, unitary: f64, kraus: f64) -> Result<Self, ValidationError> {
        for (name, value) in [("no-error weight", no_error), ("unitary weight", unitary), ("kraus weight", kraus)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidProbability { name, value });
            }
        }
        let model = ProbabilityModel { no_error, unitary, kraus };
        if model.total() <= 0.0 {
            return Err(ValidationError::InvalidProbability { name: "total weight", value: model.total() });
        }
        Ok(model)
    }

    /// Blend a classification with the error probability:
    ///
    /// - no_error = 1 - p_error + p_error·p_identity
    /// - unitary  = p_error·p_unitary
    /// - kraus    = p_error·p_kraus
    ///
    /// A residual probability that came out slightly negative is clamped
    /// to zero so every weight stays drawable.
    pub fn compose(p_error: f64, classification: &ClassificationResult) -> Self {
        let mut p_kraus = classification.p_kraus;
        if p_kraus < 0.0 {
            warn!(p_kraus, "clamping negative residual probability to zero");
            p_kraus = 0.0;
        }

        let model = ProbabilityModel {
            no_error: 1.0 - p_error + p_error * classification.p_identity,
            unitary: p_error * classification.p_unitary,
            kraus: p_error * p_kraus,
        };
        debug!(
            no_error = model.no_error,
            unitary = model.unitary,
            kraus = model.kraus,
            "composed gate error distribution"
        );
        model
    }

    /// Weight of the no-error branch
    pub fn no_error(&self) -> f64 {
        self.no_error
    }

    /// Weight of the unitary branch
    pub fn unitary(&self) -> f64 {
        self.unitary
    }

    /// Weight of the Kraus branch
    pub fn kraus(&self) -> f64 {
        self.kraus
    }

    /// Weights in branch order, for a categorical draw
    pub fn weights(&self) -> [f64; 3] {
        [self.no_error, self.unitary, self.kraus]
    }

    /// Sum of the weights
    pub fn total(&self) -> f64 {
        self.no_error + self.unitary + self.kraus
    }

    /// Weight of a branch divided by the total
    pub fn normalized(&self, branch: NoiseBranch) -> f64 {
        let weight = match branch {
            NoiseBranch::NoError => self.no_error,
            NoiseBranch::Unitary => self.unitary,
            NoiseBranch::Kraus => self.kraus,
        };
        weight / self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_error_probability_never_perturbs() {
        let classification = ClassificationResult { p_identity: 0.2, p_unitary: 0.5, p_kraus: 0.3 };
        let model = ProbabilityModel::compose(0.0, &classification);
        assert_eq!(model.weights(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_composed_weights_sum_to_one() {
        let classification = ClassificationResult { p_identity: 0.2, p_unitary: 0.5, p_kraus: 0.3 };
        for p_error in [0.0, 0.1, 0.25, 0.5, 0.9, 1.0] {
            let model = ProbabilityModel::compose(p_error, &classification);
            assert!((model.total() - 1.0).abs() < 1e-12, "p_error = {}", p_error);
            assert!(model.weights().iter().all(|w| *w >= 0.0));
        }
    }

    #[test]
    fn test_negative_residual_is_clamped() {
        let classification = ClassificationResult { p_identity: 1.0 + 1e-13, p_unitary: 0.0, p_kraus: -1e-13 };
        let model = ProbabilityModel::compose(1.0, &classification);
        assert_eq!(model.kraus(), 0.0);
    }

    #[test]
    fn test_new_rejects_bad_weights() {
        assert!(ProbabilityModel::new(0.5, -0.1, 0.6).is_err());
        assert!(ProbabilityModel::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(ProbabilityModel::new(0.0, 0.0, 0.0).is_err());
        let model = ProbabilityModel::new(2.0, 1.0, 1.0).unwrap();
        assert!((model.normalized(NoiseBranch::NoError) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_branch_indices() {
        assert_eq!(NoiseBranch::from_index(0), Some(NoiseBranch::NoError));
        assert_eq!(NoiseBranch::from_index(2), Some(NoiseBranch::Kraus));
        assert_eq!(NoiseBranch::from_index(3), None);
    }
}
