//! Error handling logic

use std::fmt;

/// Error types raised by lattice construction, program generation and execution.
///
/// Every error is returned synchronously by the component that detected it.
/// No stage ever hands back a partially built lattice, table or program.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum SurfaceCodeError {
    /// Code parameters outside the supported range (even, or smaller than 3).
    InvalidParameters {
        /// InvalidParameters failure message
        message: String,
    },

    /// Fewer than one syndrome extraction round was requested.
    InvalidRoundCount {
        /// The rejected round count.
        rounds: usize,
    },

    /// The lattice or stabilizer table broke one of its own invariants.
    /// Indicates a construction bug, never expected in correct operation.
    LatticeInconsistency {
        /// LatticeInconsistency failure message
        message: String,
    },

    /// An operation, register or readout does not match the qubits and
    /// classical bits it was declared against.
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// A configuration document could not be parsed.
    InvalidConfig {
        /// InvalidConfig failure message
        message: String,
    },

    /// General error encountered while executing a program on a backend.
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}

impl fmt::Display for SurfaceCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceCodeError::InvalidParameters { message } => write!(f, "Invalid Parameters: {}", message),
            SurfaceCodeError::InvalidRoundCount { rounds } => {
                write!(f, "Invalid Round Count: {} (at least one round is required)", rounds)
            }
            SurfaceCodeError::LatticeInconsistency { message } => write!(f, "Lattice Inconsistency: {}", message),
            SurfaceCodeError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            SurfaceCodeError::InvalidConfig { message } => write!(f, "Invalid Config: {}", message),
            SurfaceCodeError::SimulationError { message } => write!(f, "Simulation Process Error: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for SurfaceCodeError {}

impl From<serde_json::Error> for SurfaceCodeError {
    fn from(err: serde_json::Error) -> Self {
        SurfaceCodeError::InvalidConfig { message: err.to_string() }
    }
}
