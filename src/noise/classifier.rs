//! Partition of a Kraus set into identity, unitary and residual content
//!
//! Each operator K gets the weight p = Σⱼ |K(j,0)·conj(K(0,j))|. For an
//! operator proportional to the identity or to a unitary with a "balanced"
//! first row and column this is the squared proportionality constant; any
//! other operator ends up in the residual Kraus set unchanged. Operators
//! with p = 0 are dropped.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ValidationError;
use crate::linalg;

/// Branch probabilities deduced from a Kraus set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Weight of operators proportional to the identity
    pub p_identity: f64,
    /// Weight of operators proportional to a unitary
    pub p_unitary: f64,
    /// Remaining weight, 1 - p_identity - p_unitary
    pub p_kraus: f64,
}

impl ClassificationResult {
    /// Sum of the three probabilities
    pub fn total(&self) -> f64 {
        self.p_identity + self.p_unitary + self.p_kraus
    }
}

/// A Kraus set split into branches, each usable on its own
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelDecomposition {
    /// Outer branch probabilities
    pub probabilities: ClassificationResult,
    /// Rescaled unitaries
    pub unitaries: Vec<Array2<Complex64>>,
    /// Weight of each unitary; sums to one once normalized
    pub unitary_weights: Vec<f64>,
    /// Residual operators; a CPTP map by themselves once normalized
    pub kraus: Vec<Array2<Complex64>>,
}

impl ChannelDecomposition {
    /// Selection probability handed to the Kraus sampler
    ///
    /// Depends only on whether residual operators exist, not on how large
    /// `p_kraus` is.
    pub fn kraus_probability(&self) -> f64 {
        if self.kraus.is_empty() { 0.0 } else { 1.0 }
    }
}

/// The classification weight of a single operator
pub fn operator_weight(matrix: &Array2<Complex64>) -> f64 {
    (0..matrix.nrows())
        .map(|j| (matrix[[j, 0]] * matrix[[0, j]].conj()).norm())
        .sum()
}

/// Check the operators are square, equally sized and sum to a CPTP map
pub fn validate_kraus(matrices: &[Array2<Complex64>], tolerance: f64) -> Result<(), ValidationError> {
    if matrices.is_empty() {
        return Err(ValidationError::EmptyKrausSet);
    }
    linalg::check_matrices(matrices)?;

    let deviation = linalg::cptp_sum(matrices)
        .map(|sum| linalg::identity_deviation(&sum))
        .ok_or(ValidationError::EmptyKrausSet)?;
    if deviation > tolerance {
        return Err(ValidationError::NotCptp { deviation });
    }
    Ok(())
}

/// Validate and classify a Kraus set, without normalizing the branches
pub fn classify(matrices: &[Array2<Complex64>], tolerance: f64) -> Result<ChannelDecomposition, ValidationError> {
    validate_kraus(matrices, tolerance)?;

    let mut p_identity = 0.0;
    let mut p_unitary = 0.0;
    let mut unitaries = Vec::new();
    let mut unitary_weights = Vec::new();
    let mut kraus = Vec::new();

    for (index, mat) in matrices.iter().enumerate() {
        let p = operator_weight(mat);
        if p <= 0.0 {
            trace!(index, "dropping operator with zero weight");
            continue;
        }

        let rescaled = linalg::scale(mat, 1.0 / p.sqrt());
        if linalg::is_identity(&rescaled, tolerance) {
            trace!(index, p, "identity operator");
            p_identity += p;
        } else if linalg::is_unitary(&rescaled, tolerance) {
            trace!(index, p, "unitary operator");
            unitaries.push(rescaled);
            unitary_weights.push(p);
            p_unitary += p;
        } else {
            // The residual set keeps the original, unscaled operator
            trace!(index, p, "residual kraus operator");
            kraus.push(mat.clone());
        }
    }

    let probabilities = ClassificationResult {
        p_identity,
        p_unitary,
        p_kraus: 1.0 - p_identity - p_unitary,
    };
    if (probabilities.total() - 1.0).abs() > tolerance {
        return Err(ValidationError::InconsistentProbabilities { total: probabilities.total() });
    }

    debug!(
        p_identity,
        p_unitary,
        p_kraus = probabilities.p_kraus,
        unitaries = unitaries.len(),
        kraus = kraus.len(),
        "classified kraus set"
    );

    Ok(ChannelDecomposition { probabilities, unitaries, unitary_weights, kraus })
}

/// Rescale each branch so it is well formed on its own.
///
/// Residual operators are divided by √p_kraus and unitary weights by
/// p_unitary, but only when the respective probability lies strictly
/// between zero and one.
pub fn normalize(mut decomposition: ChannelDecomposition) -> ChannelDecomposition {
    let ClassificationResult { p_unitary, p_kraus, .. } = decomposition.probabilities;

    if p_kraus > 0.0 && p_kraus < 1.0 {
        let factor = 1.0 / p_kraus.sqrt();
        for k in decomposition.kraus.iter_mut() {
            *k = linalg::scale(k, factor);
        }
    }
    if p_unitary > 0.0 && p_unitary < 1.0 {
        for w in decomposition.unitary_weights.iter_mut() {
            *w /= p_unitary;
        }
    }
    decomposition
}

/// Classify and normalize in one step
pub fn decompose(matrices: &[Array2<Complex64>], tolerance: f64) -> Result<ChannelDecomposition, ValidationError> {
    classify(matrices, tolerance).map(normalize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_operator_weight_reads_first_row_and_column() {
        let k = array![[c(0.5), c(0.2)], [c(0.3), c(0.9)]];
        // |0.5·0.5| + |0.3·0.2|
        assert!((operator_weight(&k) - 0.31).abs() < 1e-12);

        // Upper-triangular lowering operator has weight zero
        let lowering = array![[c(0.0), c(0.6)], [c(0.0), c(0.0)]];
        assert_eq!(operator_weight(&lowering), 0.0);
    }

    #[test]
    fn test_normalize_leaves_full_branches_alone() {
        let x = array![[c(0.0), c(1.0)], [c(1.0), c(0.0)]];
        let decomposition = ChannelDecomposition {
            probabilities: ClassificationResult { p_identity: 0.0, p_unitary: 1.0, p_kraus: 0.0 },
            unitaries: vec![x],
            unitary_weights: vec![1.0],
            kraus: vec![],
        };
        let normalized = normalize(decomposition.clone());
        assert_eq!(normalized, decomposition);
        assert_eq!(normalized.kraus_probability(), 0.0);
    }
}
