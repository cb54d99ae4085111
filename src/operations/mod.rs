// src/operations/mod.rs

//! Defines the abstract operations a syndrome extraction program is made of.
//!
//! Operations are purely descriptive: they name qubits by [`QubitRef`] and
//! classical bits by [`ClassicalBit`], and carry no state of their own.

use crate::core::QubitRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single bit of a classical register, addressed by register position and bit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassicalBit {
    /// Position of the register in the program's register list.
    pub register: usize,
    /// Bit index within the register.
    pub bit: usize,
}

impl ClassicalBit {
    /// Bit `bit` of register `register`.
    pub fn new(register: usize, bit: usize) -> Self {
        Self { register, bit }
    }
}

impl fmt::Display for ClassicalBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}[{}]", self.register, self.bit)
    }
}

/// One step of an operation program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Basis change between Z and X eigenbases on one qubit.
    Hadamard {
        /// Qubit the gate acts on.
        target: QubitRef,
    },
    /// Controlled NOT.
    ControlledX {
        /// Qubit whose `|1>` component triggers the flip.
        control: QubitRef,
        /// Qubit that is flipped.
        target: QubitRef,
    },
    /// Z-basis measurement of `qubit` written into `bit`.
    Measure {
        /// Measured qubit.
        qubit: QubitRef,
        /// Destination classical bit.
        bit: ClassicalBit,
    },
    /// Returns a qubit to `|0>`.
    Reset {
        /// Qubit to reset.
        target: QubitRef,
    },
    /// Scheduling fence. Not a logical operation.
    Barrier,
    /// Bit flip, used for logical state preparation.
    PauliX {
        /// Qubit the gate acts on.
        target: QubitRef,
    },
}

impl Operation {
    /// Returns the qubits directly named by the operation.
    /// `Barrier` spans every qubit and therefore names none.
    pub fn involved_qubits(&self) -> Vec<QubitRef> {
        match self {
            Operation::Hadamard { target } | Operation::Reset { target } | Operation::PauliX { target } => vec![*target],
            Operation::ControlledX { control, target } => vec![*control, *target],
            Operation::Measure { qubit, .. } => vec![*qubit],
            Operation::Barrier => Vec::new(),
        }
    }

    /// Whether the operation acts on two qubits.
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Operation::ControlledX { .. })
    }

    /// Lower-case mnemonic (OpenQASM gate name where one exists).
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Operation::Hadamard { .. } => "h",
            Operation::ControlledX { .. } => "cx",
            Operation::Measure { .. } => "measure",
            Operation::Reset { .. } => "reset",
            Operation::Barrier => "barrier",
            Operation::PauliX { .. } => "x",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Hadamard { target } | Operation::Reset { target } | Operation::PauliX { target } => {
                write!(f, "{} {}", self.mnemonic(), target)
            }
            Operation::ControlledX { control, target } => write!(f, "cx {}, {}", control, target),
            Operation::Measure { qubit, bit } => write!(f, "measure {} -> {}", qubit, bit),
            Operation::Barrier => write!(f, "barrier"),
        }
    }
}
