//! Dense complex matrix helpers
//!
//! Small numeric predicates and transforms used to classify Kraus operators
//! and to lift operators onto a multi-qubit register.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{SimulationError, ValidationError};

/// Default tolerance for identity, unitary and CPTP checks
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Conjugate transpose of a matrix
pub fn dagger(matrix: &Array2<Complex64>) -> Array2<Complex64> {
    matrix.t().map(|x| x.conj())
}

/// Whether the matrix has as many rows as columns
pub fn is_square(matrix: &Array2<Complex64>) -> bool {
    let (rows, cols) = matrix.dim();
    rows == cols
}

/// Check a set of operators is square and of one dimension
///
/// Squareness is checked for every matrix before any dimension comparison.
pub fn check_matrices(matrices: &[Array2<Complex64>]) -> Result<(), ValidationError> {
    for (index, mat) in matrices.iter().enumerate() {
        if !is_square(mat) {
            let (rows, cols) = mat.dim();
            return Err(ValidationError::NotSquare { index, rows, cols });
        }
    }
    if let Some(first) = matrices.first() {
        let expected = first.nrows();
        if let Some((index, mat)) = matrices.iter().enumerate().find(|(_, m)| m.nrows() != expected) {
            return Err(ValidationError::DimensionMismatch { index, expected, found: mat.nrows() });
        }
    }
    Ok(())
}

/// Largest element-wise distance between a square matrix and the identity
pub fn identity_deviation(matrix: &Array2<Complex64>) -> f64 {
    let mut deviation: f64 = 0.0;
    for ((i, j), value) in matrix.indexed_iter() {
        let expected = if i == j { Complex64::new(1.0, 0.0) } else { Complex64::new(0.0, 0.0) };
        deviation = deviation.max((value - expected).norm());
    }
    deviation
}

/// Whether every element is within `tolerance` of the identity
pub fn is_identity(matrix: &Array2<Complex64>, tolerance: f64) -> bool {
    is_square(matrix) && identity_deviation(matrix) <= tolerance
}

/// Whether U†U is the identity within `tolerance`
pub fn is_unitary(matrix: &Array2<Complex64>, tolerance: f64) -> bool {
    if !is_square(matrix) {
        return false;
    }
    let product = dagger(matrix).dot(matrix);
    identity_deviation(&product) <= tolerance
}

/// Σ K†K over a set of equally sized square operators
///
/// Returns `None` for an empty set.
pub fn cptp_sum(operators: &[Array2<Complex64>]) -> Option<Array2<Complex64>> {
    let dim = operators.first()?.nrows();
    let mut sum = Array2::zeros((dim, dim));
    for op in operators {
        sum = sum + dagger(op).dot(op);
    }
    Some(sum)
}

/// Multiply every element by a real factor
pub fn scale(matrix: &Array2<Complex64>, factor: f64) -> Array2<Complex64> {
    matrix.map(|x| x * factor)
}

/// Element-wise comparison with tolerance
pub fn approx_eq(a: &Array2<Complex64>, b: &Array2<Complex64>, tolerance: f64) -> bool {
    if a.dim() != b.dim() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() <= tolerance)
}

/// Lift a k-qubit operator onto a register of `total_qubits` qubits.
///
/// Qubit 0 is the most significant bit of a basis index. `targets[0]` maps
/// to the most significant bit of the operator's own index, so the order of
/// `targets` matters (a CNOT on `[1, 0]` is controlled by qubit 1).
pub fn embed_operator(
    operator: &Array2<Complex64>,
    total_qubits: usize,
    targets: &[usize],
) -> Result<Array2<Complex64>, SimulationError> {
    let op_dim = 1usize << targets.len();
    let (rows, cols) = operator.dim();
    if rows != op_dim || cols != op_dim {
        return Err(SimulationError::DimensionMismatch { expected: op_dim, rows, cols });
    }
    for (k, &q) in targets.iter().enumerate() {
        if q >= total_qubits {
            return Err(SimulationError::QubitOutOfRange { index: q, qubit_count: total_qubits });
        }
        if targets[..k].contains(&q) {
            return Err(SimulationError::DuplicateQubit(q));
        }
    }

    let dim = 1usize << total_qubits;
    if targets.len() == total_qubits && targets.iter().enumerate().all(|(k, &q)| k == q) {
        return Ok(operator.clone());
    }

    // Bits of the full index that the operator does not touch
    let target_mask = targets
        .iter()
        .fold(0usize, |mask, &q| mask | (1 << (total_qubits - 1 - q)));
    let sub_index = |full: usize| {
        targets.iter().enumerate().fold(0usize, |acc, (k, &q)| {
            let bit = (full >> (total_qubits - 1 - q)) & 1;
            acc | (bit << (targets.len() - 1 - k))
        })
    };

    let mut result = Array2::zeros((dim, dim));
    for i in 0..dim {
        for j in 0..dim {
            if (i & !target_mask) != (j & !target_mask) {
                continue;
            }
            result[[i, j]] = operator[[sub_index(i), sub_index(j)]];
        }
    }
    Ok(result)
}
