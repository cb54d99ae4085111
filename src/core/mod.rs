// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod qubit;
pub mod coordinate;
pub mod state;

// Re-export public types for convenient access via `surface_qec::core::TypeName`
pub use error::SurfaceCodeError;
pub use qubit::{DataIndex, MeasureIndex, Qubit, QubitRef, StabilizerKind};
pub use coordinate::Coordinate;
pub use state::StateVector;

pub mod constants;
pub use constants::surface_constants::{
    MAX_SIMULATED_QUBITS, MIN_CODE_SIZE, NORM_TOLERANCE, READOUT_REGISTER, ROUND_REGISTER_PREFIX,
}; // Re-export
