// src/core/state.rs

use num_complex::Complex;
use std::fmt;

/// Amplitude vector of an n-qubit register.
///
/// Wire `w` of an n-qubit program is stored at bit position `n - 1 - w` of
/// the basis index, so wire 0 is the most significant bit.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates a state from raw amplitudes. The caller guarantees the length
    /// is a power of two.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits the vector describes.
    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// Probability of observing basis state `k`.
    pub fn probability(&self, k: usize) -> f64 {
        self.amplitudes.get(k).map(|c| c.norm_sqr()).unwrap_or(0.0)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVector[")?;
        let mut first = true;
        for (k, c) in self.amplitudes.iter().enumerate() {
            // Only the support is printed; full 2^n listings are unreadable.
            if c.norm_sqr() < 1e-12 {
                continue;
            }
            write!(f, "{}|{:0width$b}>: {:.4}", if first { "" } else { ", " }, k, c, width = self.num_qubits())?;
            first = false;
        }
        write!(f, "]")
    }
}
