//! Error types for noise construction, sampling and simulation.
//!
//! Construction failures are reported through [`ValidationError`] and always
//! leave the caller without a usable object. Sampling failures are reported
//! through [`InternalError`]; they only occur when a distribution invariant
//! was broken and should abort the run.

use thiserror::Error;

/// Errors raised while building a noise object from user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// No Kraus operators were supplied.
    #[error("Kraus set must contain at least one operator")]
    EmptyKrausSet,

    /// An operator is not a square matrix.
    #[error("Error matrix {index} is not square ({rows}x{cols})")]
    NotSquare { index: usize, rows: usize, cols: usize },

    /// Operators in one set have different dimensions.
    #[error("Error matrix {index} has dimension {found}, expected {expected}")]
    DimensionMismatch { index: usize, expected: usize, found: usize },

    /// The operators do not satisfy Σ K†K = I.
    #[error("Input is not a CPTP map (max deviation from identity: {deviation:e})")]
    NotCptp { deviation: f64 },

    /// The deduced branch probabilities do not sum to one.
    #[error("Deduced probabilities are invalid (sum = {total})")]
    InconsistentProbabilities { total: f64 },

    /// A probability or weight is negative, non-finite or above one.
    #[error("Invalid {name}: {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// Matrices and weights were supplied in different numbers.
    #[error("Got {matrices} matrices but {weights} weights")]
    LengthMismatch { matrices: usize, weights: usize },

    /// The numeric tolerance is unusable.
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),
}

/// Invariant violations detected while sampling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InternalError {
    /// The categorical draw produced an index with no matching branch.
    #[error("GateError type is out of range: {0}")]
    CategoryOutOfRange(usize),

    /// The weights handed to the random engine do not form a distribution.
    #[error("Invalid sampling distribution: {0}")]
    InvalidDistribution(String),

    /// A branch was selected but holds nothing to sample from.
    #[error("Selected {0} branch has no operators")]
    EmptyBranch(&'static str),
}

/// Errors raised by the density-matrix consumer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A matrix does not have the dimension the register requires.
    #[error("Dimension mismatch: expected {expected}x{expected}, got {rows}x{cols}")]
    DimensionMismatch { expected: usize, rows: usize, cols: usize },

    /// A target qubit lies outside the register.
    #[error("Qubit index {index} out of range for {qubit_count} qubits")]
    QubitOutOfRange { index: usize, qubit_count: usize },

    /// A target qubit appears twice.
    #[error("Duplicate qubit index found: {0}")]
    DuplicateQubit(usize),

    /// The matrix is not a valid density matrix.
    #[error("Invalid density matrix: not Hermitian, not trace 1 or negative diagonal")]
    InvalidDensityMatrix,

    /// A trajectory run was asked for zero shots.
    #[error("At least one shot is required")]
    NoShots,

    /// Sampling the noise failed.
    #[error("Noise sampling failed: {0}")]
    Noise(#[from] InternalError),
}
