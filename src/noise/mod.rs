//! Gate noise
//!
//! A CPTP map given by Kraus operators is split into three branches: no
//! error, a weighted set of unitaries and a residual Kraus map. A
//! [`GateError`] stores the branch weights and samples one noisy
//! realization of an operation per call.

pub mod classifier;
pub mod config;
pub mod gate_error;
pub mod kraus_error;
pub mod probabilities;
pub mod rng;
pub mod unitary_error;

pub use classifier::{classify, decompose, normalize, ChannelDecomposition, ClassificationResult};
pub use config::{ErrorLocation, NoiseConfig};
pub use gate_error::GateError;
pub use kraus_error::KrausError;
pub use probabilities::{NoiseBranch, ProbabilityModel};
pub use rng::{RngEngine, WeightedDraw};
pub use unitary_error::UnitaryError;
