//! Density-matrix trajectory simulator with gate noise
//!
//! Every gate that has a [`GateError`] attached is replaced by one sampled
//! noisy realization per shot. Averaging many shots approaches the noisy
//! channel.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::error::SimulationError;
use crate::noise::{GateError, RngEngine, WeightedDraw};
use crate::quantum::density_matrix::DensityMatrix;
use crate::quantum::gate::StandardGate;
use crate::quantum::operation::Operation;

/// Runs noisy circuits on a density matrix, one sampled trajectory at a time
#[derive(Debug, Clone)]
pub struct TrajectorySimulator {
    qubit_count: usize,
    /// Noise keyed by gate name
    gate_errors: HashMap<String, GateError>,
}

impl TrajectorySimulator {
    /// Create a noiseless simulator with the specified number of qubits
    pub fn new(qubit_count: usize) -> Self {
        TrajectorySimulator {
            qubit_count,
            gate_errors: HashMap::new(),
        }
    }

    /// Attach noise to every occurrence of `gate`
    pub fn add_gate_error(&mut self, gate: &StandardGate, error: GateError) {
        self.gate_errors.insert(gate.name(), error);
    }

    /// Builder form of [`add_gate_error`](Self::add_gate_error)
    pub fn with_gate_error(mut self, gate: &StandardGate, error: GateError) -> Self {
        self.add_gate_error(gate, error);
        self
    }

    /// Noise attached to the named gate
    pub fn gate_error(&self, name: &str) -> Option<&GateError> {
        self.gate_errors.get(name)
    }

    /// Get the number of qubits in the simulator
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Replace each noisy gate by one sampled realization
    ///
    /// Operations without attached noise pass through unchanged.
    pub fn sample_circuit<R: WeightedDraw + ?Sized>(
        &self,
        circuit: &[Operation],
        rng: &mut R,
    ) -> Result<Vec<Operation>, SimulationError> {
        let mut noisy = Vec::with_capacity(circuit.len());
        for op in circuit {
            match self.gate_errors.get(&op.name()) {
                Some(error) => noisy.extend(error.sample_noise(op, op.qubits(), rng)?),
                None => noisy.push(op.clone()),
            }
        }
        Ok(noisy)
    }

    /// Run one sampled trajectory starting from |0...0⟩
    pub fn run_shot<R: WeightedDraw + ?Sized>(
        &self,
        circuit: &[Operation],
        rng: &mut R,
    ) -> Result<DensityMatrix, SimulationError> {
        let noisy = self.sample_circuit(circuit, rng)?;
        DensityMatrix::zero_state(self.qubit_count).apply_operations(&noisy)
    }

    /// Run `shots` trajectories in parallel and average the final states.
    ///
    /// Shot `i` uses its own engine seeded with `seed + i`.
    pub fn run_shots(&self, circuit: &[Operation], shots: usize, seed: u64) -> Result<DensityMatrix, SimulationError> {
        if shots == 0 {
            return Err(SimulationError::NoShots);
        }
        debug!(shots, ops = circuit.len(), qubits = self.qubit_count, "running trajectories");

        let states = (0..shots)
            .into_par_iter()
            .map(|shot| {
                let mut rng = RngEngine::new(seed.wrapping_add(shot as u64));
                self.run_shot(circuit, &mut rng)
            })
            .collect::<Result<Vec<_>, _>>()?;

        DensityMatrix::average(&states).ok_or(SimulationError::NoShots)
    }
}
