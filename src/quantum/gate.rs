// src/quantum/gate.rs
//! Standard quantum gates
//!
//! Gates here are plain data: a closed enum whose matrices feed the noise
//! samplers and the density-matrix simulator.

use ndarray::{array, Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Common complex numbers used in quantum gates
pub mod constants {
    use num_complex::Complex64;

    /// The imaginary unit i
    pub const I: Complex64 = Complex64::new(0.0, 1.0);

    /// 1/sqrt(2)
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
}

/// Standard quantum gates (Pauli, Hadamard, etc.)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate
    I(usize), // number of qubits

    /// Pauli-X gate (NOT gate)
    X,

    /// Pauli-Y gate
    Y,

    /// Pauli-Z gate
    Z,

    /// Hadamard gate
    H,

    /// Phase gate (S gate)
    S,

    /// π/8 gate (T gate)
    T,

    /// CNOT gate
    CNOT,

    /// SWAP gate
    SWAP,

    /// Controlled-Z gate
    CZ,
}

impl StandardGate {
    /// Number of qubits this gate acts on
    pub fn qubit_count(&self) -> usize {
        match self {
            StandardGate::I(n) => *n,
            StandardGate::X | StandardGate::Y | StandardGate::Z |
            StandardGate::H | StandardGate::S | StandardGate::T => 1,
            StandardGate::CNOT | StandardGate::SWAP | StandardGate::CZ => 2,
        }
    }

    /// Matrix representation in the big-endian computational basis
    pub fn matrix(&self) -> Array2<Complex64> {
        use constants::*;
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        match self {
            StandardGate::I(n) => {
                let dim = 1usize << *n;
                Array2::from_diag(&Array1::from_elem(dim, one))
            },
            StandardGate::X => array![[zero, one], [one, zero]],
            StandardGate::Y => array![[zero, -I], [I, zero]],
            StandardGate::Z => array![[one, zero], [zero, -one]],
            StandardGate::H => {
                let factor = Complex64::new(FRAC_1_SQRT_2, 0.0);
                array![[factor, factor], [factor, -factor]]
            },
            StandardGate::S => array![[one, zero], [zero, I]],
            StandardGate::T => {
                array![[one, zero], [zero, Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2)]]
            },
            StandardGate::CNOT => permutation(&[0, 1, 3, 2]),
            StandardGate::SWAP => permutation(&[0, 2, 1, 3]),
            StandardGate::CZ => {
                let mut matrix = Array2::from_diag(&Array1::from_elem(4, one));
                matrix[[3, 3]] = -one;
                matrix
            },
        }
    }

    /// Display name used to key noise by gate
    pub fn name(&self) -> String {
        match self {
            StandardGate::I(n) => format!("I({})", n),
            StandardGate::X => "X".to_string(),
            StandardGate::Y => "Y".to_string(),
            StandardGate::Z => "Z".to_string(),
            StandardGate::H => "H".to_string(),
            StandardGate::S => "S".to_string(),
            StandardGate::T => "T".to_string(),
            StandardGate::CNOT => "CNOT".to_string(),
            StandardGate::SWAP => "SWAP".to_string(),
            StandardGate::CZ => "CZ".to_string(),
        }
    }
}

// Row i maps to column image[i]
fn permutation(image: &[usize]) -> Array2<Complex64> {
    let mut matrix = Array2::zeros((image.len(), image.len()));
    for (i, &j) in image.iter().enumerate() {
        matrix[[i, j]] = Complex64::new(1.0, 0.0);
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::{is_unitary, DEFAULT_TOLERANCE};

    #[test]
    fn test_standard_gates_are_unitary() {
        let gates = [
            StandardGate::I(2), StandardGate::X, StandardGate::Y, StandardGate::Z,
            StandardGate::H, StandardGate::S, StandardGate::T,
            StandardGate::CNOT, StandardGate::SWAP, StandardGate::CZ,
        ];
        for gate in gates.iter() {
            let m = gate.matrix();
            assert_eq!(m.nrows(), 1 << gate.qubit_count(), "{}", gate.name());
            assert!(is_unitary(&m, DEFAULT_TOLERANCE), "{} is not unitary", gate.name());
        }
    }

    #[test]
    fn test_cnot_flips_target_when_control_set() {
        let cnot = StandardGate::CNOT.matrix();
        // |10⟩ → |11⟩
        assert_eq!(cnot[[3, 2]], Complex64::new(1.0, 0.0));
        assert_eq!(cnot[[2, 3]], Complex64::new(1.0, 0.0));
        assert_eq!(cnot[[0, 0]], Complex64::new(1.0, 0.0));
    }
}
