use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::SimulationError;
use crate::linalg::{self, DEFAULT_TOLERANCE};
use super::operation::Operation;

/// Represents a quantum state as a density matrix
#[derive(Clone, Debug, PartialEq)]
pub struct DensityMatrix {
    /// Number of qubits
    qubit_count: usize,

    /// The density matrix as a 2D array of complex values
    matrix: Array2<Complex64>,
}

impl DensityMatrix {
    /// Create a new density matrix from a 2D array
    pub fn new(qubit_count: usize, matrix: Array2<Complex64>) -> Result<Self, SimulationError> {
        let expected = 1 << qubit_count;
        let (rows, cols) = matrix.dim();
        if rows != expected || cols != expected {
            return Err(SimulationError::DimensionMismatch { expected, rows, cols });
        }

        let dm = DensityMatrix { qubit_count, matrix };
        if !dm.is_valid() {
            return Err(SimulationError::InvalidDensityMatrix);
        }
        Ok(dm)
    }

    /// The |0...0⟩⟨0...0| state
    pub fn zero_state(qubit_count: usize) -> Self {
        Self::basis_state(qubit_count, 0)
    }

    /// The projector onto computational basis state `index`
    ///
    /// `index` is reduced modulo the dimension.
    pub fn basis_state(qubit_count: usize, index: usize) -> Self {
        let dim = 1 << qubit_count;
        let mut matrix = Array2::zeros((dim, dim));
        matrix[[index % dim, index % dim]] = Complex64::new(1.0, 0.0);
        DensityMatrix { qubit_count, matrix }
    }

    /// Create a density matrix from state amplitudes: ρ = |ψ⟩⟨ψ|
    pub fn from_pure(qubit_count: usize, amplitudes: &Array1<Complex64>) -> Result<Self, SimulationError> {
        let dim = 1 << qubit_count;
        if amplitudes.len() != dim {
            return Err(SimulationError::DimensionMismatch { expected: dim, rows: amplitudes.len(), cols: 1 });
        }

        let mut matrix = Array2::zeros((dim, dim));
        for i in 0..dim {
            for j in 0..dim {
                matrix[[i, j]] = amplitudes[i] * amplitudes[j].conj();
            }
        }
        Self::new(qubit_count, matrix)
    }

    /// Calculate the dimension of the Hilbert space
    pub fn dimension(&self) -> usize {
        1 << self.qubit_count
    }

    /// Number of qubits
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Get a reference to the matrix
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Check if the density matrix is valid
    pub fn is_valid(&self) -> bool {
        // Check if trace is 1
        if (self.trace() - 1.0).abs() > DEFAULT_TOLERANCE {
            return false;
        }

        // Check if Hermitian (ρ = ρ†)
        for i in 0..self.dimension() {
            for j in 0..i {
                if (self.matrix[[i, j]] - self.matrix[[j, i]].conj()).norm() > DEFAULT_TOLERANCE {
                    return false;
                }
            }
        }

        // Diagonal elements only; full positivity would need eigenvalues
        (0..self.dimension()).all(|i| self.matrix[[i, i]].re >= -DEFAULT_TOLERANCE)
    }

    /// Calculate the purity Tr(ρ²)
    pub fn purity(&self) -> f64 {
        let mut sum = Complex64::new(0.0, 0.0);
        for i in 0..self.dimension() {
            for j in 0..self.dimension() {
                sum += self.matrix[[i, j]] * self.matrix[[j, i]];
            }
        }
        sum.re
    }

    /// Calculate the trace of the density matrix
    pub fn trace(&self) -> f64 {
        self.matrix.diag().iter().map(|x| x.re).sum()
    }

    /// Probability of measuring computational basis state `index`
    pub fn probability(&self, index: usize) -> f64 {
        if index >= self.dimension() {
            return 0.0;
        }
        self.matrix[[index, index]].re
    }

    /// Apply a unitary on the given qubits: ρ → UρU†
    pub fn apply_unitary(&self, unitary: &Array2<Complex64>, qubits: &[usize]) -> Result<Self, SimulationError> {
        let full = linalg::embed_operator(unitary, self.qubit_count, qubits)?;
        let new_matrix = full.dot(&self.matrix).dot(&linalg::dagger(&full));

        Ok(DensityMatrix {
            qubit_count: self.qubit_count,
            matrix: new_matrix,
        })
    }

    /// Apply a Kraus map on the given qubits: ρ → Σ KρK†
    pub fn apply_kraus(&self, operators: &[Array2<Complex64>], qubits: &[usize]) -> Result<Self, SimulationError> {
        let dim = self.dimension();
        let mut new_matrix = Array2::zeros((dim, dim));
        for op in operators {
            let full = linalg::embed_operator(op, self.qubit_count, qubits)?;
            new_matrix = new_matrix + full.dot(&self.matrix).dot(&linalg::dagger(&full));
        }

        Ok(DensityMatrix {
            qubit_count: self.qubit_count,
            matrix: new_matrix,
        })
    }

    /// Apply a circuit operation
    pub fn apply_operation(&self, operation: &Operation) -> Result<Self, SimulationError> {
        match operation {
            Operation::Gate { gate, qubits } => self.apply_unitary(&gate.matrix(), qubits),
            Operation::Unitary { matrix, qubits } => self.apply_unitary(matrix, qubits),
            Operation::Kraus { matrices, qubits } => self.apply_kraus(matrices, qubits),
        }
    }

    /// Apply a sequence of operations in order
    pub fn apply_operations(&self, operations: &[Operation]) -> Result<Self, SimulationError> {
        operations
            .iter()
            .try_fold(self.clone(), |state, op| state.apply_operation(op))
    }

    /// Convex combination (1 - weight)·self + weight·other
    pub fn mix(&self, other: &DensityMatrix, weight: f64) -> Result<Self, SimulationError> {
        if other.qubit_count != self.qubit_count {
            let expected = self.dimension();
            return Err(SimulationError::DimensionMismatch {
                expected,
                rows: other.dimension(),
                cols: other.dimension(),
            });
        }

        Ok(DensityMatrix {
            qubit_count: self.qubit_count,
            matrix: linalg::scale(&self.matrix, 1.0 - weight) + linalg::scale(&other.matrix, weight),
        })
    }

    /// Σ wᵢ·ρᵢ over equally sized states
    ///
    /// `None` if `terms` is empty or the sizes differ. Weights are used as
    /// given, so the result is only a state if they sum to one.
    pub fn weighted_sum(terms: &[(f64, DensityMatrix)]) -> Option<Self> {
        let (_, first) = terms.first()?;
        let dim = first.dimension();
        let mut sum = Array2::zeros((dim, dim));
        for (weight, state) in terms {
            if state.qubit_count != first.qubit_count {
                return None;
            }
            sum = sum + linalg::scale(&state.matrix, *weight);
        }

        Some(DensityMatrix {
            qubit_count: first.qubit_count,
            matrix: sum,
        })
    }

    /// Uniform average of equally sized states; `None` if `states` is empty
    pub fn average(states: &[DensityMatrix]) -> Option<Self> {
        let weight = 1.0 / states.len() as f64;
        let terms: Vec<(f64, DensityMatrix)> = states.iter().map(|s| (weight, s.clone())).collect();
        Self::weighted_sum(&terms)
    }

    /// Element-wise comparison with tolerance
    pub fn approx_eq(&self, other: &DensityMatrix, tolerance: f64) -> bool {
        self.qubit_count == other.qubit_count && linalg::approx_eq(&self.matrix, &other.matrix, tolerance)
    }
}
