//! Circuit operations
//!
//! An [`Operation`] is one instruction of a circuit. Noise samplers never
//! look inside the operation they are handed; they only build replacement
//! sequences out of it and of the matrices they sample.

use ndarray::Array2;
use num_complex::Complex64;

use super::gate::StandardGate;

/// Sequence of operations returned by a noise sampler in place of one operation
pub type NoiseOps = Vec<Operation>;

/// A single circuit instruction with its target qubits
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    /// An ideal standard gate
    Gate {
        gate: StandardGate,
        qubits: Vec<usize>,
    },

    /// An arbitrary unitary matrix
    Unitary {
        matrix: Array2<Complex64>,
        qubits: Vec<usize>,
    },

    /// A CPTP map given by its Kraus operators
    Kraus {
        matrices: Vec<Array2<Complex64>>,
        qubits: Vec<usize>,
    },
}

impl Operation {
    /// A standard gate on the given qubits
    pub fn gate(gate: StandardGate, qubits: &[usize]) -> Self {
        Operation::Gate { gate, qubits: qubits.to_vec() }
    }

    /// A unitary matrix on the given qubits
    pub fn unitary(matrix: Array2<Complex64>, qubits: &[usize]) -> Self {
        Operation::Unitary { matrix, qubits: qubits.to_vec() }
    }

    /// A Kraus map on the given qubits
    pub fn kraus(matrices: Vec<Array2<Complex64>>, qubits: &[usize]) -> Self {
        Operation::Kraus { matrices, qubits: qubits.to_vec() }
    }

    /// Target qubits
    pub fn qubits(&self) -> &[usize] {
        match self {
            Operation::Gate { qubits, .. }
            | Operation::Unitary { qubits, .. }
            | Operation::Kraus { qubits, .. } => qubits,
        }
    }

    /// Instruction name; standard gates use the gate name
    pub fn name(&self) -> String {
        match self {
            Operation::Gate { gate, .. } => gate.name(),
            Operation::Unitary { .. } => "unitary".to_string(),
            Operation::Kraus { .. } => "kraus".to_string(),
        }
    }

    /// The matrix of a gate or unitary operation
    pub fn matrix(&self) -> Option<Array2<Complex64>> {
        match self {
            Operation::Gate { gate, .. } => Some(gate.matrix()),
            Operation::Unitary { matrix, .. } => Some(matrix.clone()),
            Operation::Kraus { .. } => None,
        }
    }
}
