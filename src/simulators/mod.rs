//! Quantum circuit simulators
//!
//! Simulators that consume gate noise while running circuits.

pub mod trajectory;

pub use trajectory::TrajectorySimulator;
