//! Gate noise for quantum circuit simulation
//!
//! This crate decomposes the noise of a single gate, given as a CPTP map in
//! Kraus form, into a no-error branch, a mixed-unitary branch and a residual
//! Kraus branch, and samples noisy realizations of circuit operations from
//! that decomposition. A density-matrix trajectory simulator is included to
//! run noisy circuits.

pub mod error;
pub mod linalg;
pub mod noise;
pub mod quantum;
pub mod simulators;

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{InternalError, SimulationError, ValidationError};
    pub use crate::noise::{
        ErrorLocation, GateError, KrausError, NoiseBranch, NoiseConfig, ProbabilityModel,
        RngEngine, UnitaryError, WeightedDraw,
    };
    pub use crate::quantum::{DensityMatrix, NoiseOps, Operation, StandardGate};
    pub use crate::simulators::TrajectorySimulator;
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
