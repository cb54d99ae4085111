// src/simulation/engine.rs
use crate::core::{StateVector, SurfaceCodeError};
use num_complex::Complex;
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::FRAC_1_SQRT_2;

/// Amplitudes below this squared magnitude are treated as zero.
const AMPLITUDE_TOLERANCE: f64 = 1e-12;

/// Dense state-vector engine over `num_qubits` wires.
///
/// Wire `w` lives at bit position `num_qubits - 1 - w` of the basis index.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    state: StateVector,
    num_qubits: usize,
    rng: StdRng,
}

impl SimulationEngine {
    /// Initializes `|0...0>` over `num_qubits` wires with a seeded sampler.
    pub(crate) fn init(num_qubits: usize, seed: u64) -> Result<Self, SurfaceCodeError> {
        if num_qubits == 0 {
            return Err(SurfaceCodeError::SimulationError {
                message: "cannot initialize simulation engine with zero qubits".to_string(),
            });
        }
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| SurfaceCodeError::SimulationError {
            message: format!("{} qubits overflow the state vector dimension", num_qubits),
        })?;

        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::one();

        Ok(Self { state: StateVector::new(amplitudes), num_qubits, rng: StdRng::seed_from_u64(seed) })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), SurfaceCodeError> {
        if state.dim() != self.state.dim() {
            return Err(SurfaceCodeError::SimulationError {
                message: format!(
                    "cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            });
        }
        self.state = state;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    pub(crate) fn hadamard(&mut self, wire: usize) -> Result<(), SurfaceCodeError> {
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        self.apply_single_qubit_gate(wire, &[[h, h], [h, -h]])
    }

    pub(crate) fn pauli_x(&mut self, wire: usize) -> Result<(), SurfaceCodeError> {
        let mask = self.bit_mask(wire)?;
        let amplitudes = self.state.amplitudes_mut();
        for i in 0..amplitudes.len() {
            if i & mask == 0 {
                amplitudes.swap(i, i | mask);
            }
        }
        Ok(())
    }

    /// Controlled NOT: swaps the target pair inside the control's `|1>` subspace.
    pub(crate) fn controlled_x(&mut self, control: usize, target: usize) -> Result<(), SurfaceCodeError> {
        if control == target {
            return Err(SurfaceCodeError::InvalidOperation {
                message: "control and target cannot be the same wire".to_string(),
            });
        }
        let control_mask = self.bit_mask(control)?;
        let target_mask = self.bit_mask(target)?;
        let amplitudes = self.state.amplitudes_mut();
        for i in 0..amplitudes.len() {
            if i & control_mask != 0 && i & target_mask == 0 {
                amplitudes.swap(i, i | target_mask);
            }
        }
        Ok(())
    }

    /// Z-basis measurement of `wire` following the Born rule.
    ///
    /// The state collapses onto the sampled outcome and is renormalized.
    pub(crate) fn measure(&mut self, wire: usize) -> Result<u8, SurfaceCodeError> {
        let mask = self.bit_mask(wire)?;
        let p_one: f64 = self
            .state
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|(k, _)| k & mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum();

        let sample: f64 = self.rng.random::<f64>();
        let mut outcome: u8 = if sample < p_one { 1 } else { 0 };
        // Rounding can leave a sliver of probability on an impossible branch.
        if outcome == 0 && 1.0 - p_one < AMPLITUDE_TOLERANCE {
            outcome = 1;
        } else if outcome == 1 && p_one < AMPLITUDE_TOLERANCE {
            outcome = 0;
        }
        let p_outcome = if outcome == 1 { p_one } else { 1.0 - p_one };
        if p_outcome < AMPLITUDE_TOLERANCE {
            return Err(SurfaceCodeError::SimulationError {
                message: format!("wire {} measured on an unnormalized state", wire),
            });
        }

        let scale = 1.0 / p_outcome.sqrt();
        for (k, c) in self.state.amplitudes_mut().iter_mut().enumerate() {
            let bit = u8::from(k & mask != 0);
            if bit == outcome {
                *c *= scale;
            } else {
                *c = Complex::zero();
            }
        }
        log::trace!("measured wire {} -> {} (p1 = {:.4})", wire, outcome, p_one);
        Ok(outcome)
    }

    /// Returns `wire` to `|0>` by measuring it and flipping a `1` outcome.
    pub(crate) fn reset(&mut self, wire: usize) -> Result<(), SurfaceCodeError> {
        if self.measure(wire)? == 1 {
            self.pauli_x(wire)?;
        }
        Ok(())
    }

    fn bit_mask(&self, wire: usize) -> Result<usize, SurfaceCodeError> {
        if wire >= self.num_qubits {
            return Err(SurfaceCodeError::SimulationError {
                message: format!("wire {} outside a {}-qubit register", wire, self.num_qubits),
            });
        }
        Ok(1 << (self.num_qubits - 1 - wire))
    }

    /// Applies a 2x2 matrix to `wire` within the global state vector.
    fn apply_single_qubit_gate(&mut self, wire: usize, matrix: &[[Complex<f64>; 2]; 2]) -> Result<(), SurfaceCodeError> {
        let k_mask = self.bit_mask(wire)?;
        let lower_mask = k_mask - 1;
        let upper_mask = !((k_mask << 1) - 1);

        let amplitudes = self.state.amplitudes_mut();
        let dim = amplitudes.len();
        // Iterate over pairs of basis states differing only at the target bit
        for i in 0..dim / 2 {
            let i0 = ((i & upper_mask) << 1) | (i & lower_mask);
            let i1 = i0 | k_mask;

            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }
}
