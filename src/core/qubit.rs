// src/core/qubit.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a data qubit within the data class.
pub type DataIndex = usize;

/// Index of a measurement qubit within the measurement class.
pub type MeasureIndex = usize;

/// The Pauli type of check a measurement qubit performs.
///
/// X-type checks are measured through a Hadamard sandwich with the measurement
/// qubit acting as control; Z-type checks use the data qubits as controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StabilizerKind {
    /// Product of Pauli X on the neighboring data qubits.
    X,
    /// Product of Pauli Z on the neighboring data qubits.
    Z,
}

impl StabilizerKind {
    /// Short label used by renderers and diagrams.
    pub fn label(&self) -> &'static str {
        match self {
            StabilizerKind::X => "X",
            StabilizerKind::Z => "Z",
        }
    }
}

impl fmt::Display for StabilizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A qubit placed on the lattice.
///
/// Indices are dense and zero-based within their class, assigned once during
/// lattice construction and never re-assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Qubit {
    /// A qubit holding encoded logical information.
    Data {
        /// Index within the data class.
        index: DataIndex,
    },
    /// An ancilla extracting one stabilizer eigenvalue per round.
    Measurement {
        /// Index within the measurement class.
        index: MeasureIndex,
        /// The check this ancilla performs.
        kind: StabilizerKind,
    },
}

impl Qubit {
    /// The address of this qubit as used by operations.
    pub fn reference(&self) -> QubitRef {
        match self {
            Qubit::Data { index } => QubitRef::Data(*index),
            Qubit::Measurement { index, .. } => QubitRef::Measure(*index),
        }
    }

    /// Stabilizer kind for measurement qubits, `None` for data qubits.
    pub fn kind(&self) -> Option<StabilizerKind> {
        match self {
            Qubit::Data { .. } => None,
            Qubit::Measurement { kind, .. } => Some(*kind),
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qubit::Data { .. } => write!(f, "{}", self.reference()),
            Qubit::Measurement { kind, .. } => write!(f, "{}({})", self.reference(), kind),
        }
    }
}

/// Address of a qubit inside an operation program.
///
/// Measurement qubits sort before data qubits, matching the wire order of
/// programs (`measure` register first, then `data`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QubitRef {
    /// Measurement qubit by measurement index.
    Measure(MeasureIndex),
    /// Data qubit by data index.
    Data(DataIndex),
}

impl QubitRef {
    /// Index of the qubit within its own class.
    pub fn index(&self) -> usize {
        match self {
            QubitRef::Measure(i) | QubitRef::Data(i) => *i,
        }
    }
}

impl fmt::Display for QubitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitRef::Measure(i) => write!(f, "M{}", i),
            QubitRef::Data(i) => write!(f, "D{}", i),
        }
    }
}
