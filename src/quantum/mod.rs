// src/quantum/mod.rs
//! Quantum circuit building blocks
//!
//! Gates, circuit operations and density-matrix states used by the noise
//! samplers and simulators.

pub mod gate;
pub mod operation;
pub mod density_matrix;

pub use density_matrix::DensityMatrix;
pub use gate::StandardGate;
pub use operation::{NoiseOps, Operation};
