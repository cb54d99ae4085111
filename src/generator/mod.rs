// src/generator/mod.rs

//! Expands a [`StabilizerTable`] into T rounds of syndrome extraction.
//!
//! Each round runs four sub-steps. In sub-step `j` every measurement qubit
//! touches the data qubit in its slot `j`:
//!
//! * X-type: `H` before step 0, `CX(measure -> data)`, `H` after step 3.
//! * Z-type: `CX(data -> measure)`.
//!
//! A barrier closes the four sub-steps, every measurement qubit is then
//! measured into the round's register and reset, and a second barrier ends
//! the round.

use crate::circuits::{OperationProgram, ProgramBuilder};
use crate::core::{QubitRef, READOUT_REGISTER, ROUND_REGISTER_PREFIX, StabilizerKind, SurfaceCodeError};
use crate::operations::{ClassicalBit, Operation};
use crate::stabilizers::StabilizerTable;
use serde::{Deserialize, Serialize};

/// Logical state the data qubits are prepared in before round 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialState {
    /// Logical `|0>`: no preparation.
    #[default]
    Zero,
    /// Logical `|1>`: `PauliX` on every data qubit.
    One,
}

/// Options controlling program generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Number of syndrome extraction rounds, at least 1.
    pub rounds: usize,
    /// Logical state prepared before round 1.
    pub initial_state: InitialState,
    /// Measure every data qubit into `data_output` after the last round.
    pub logical_readout: bool,
    /// Emit a barrier after each of the four sub-steps.
    pub step_barriers: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { rounds: 1, initial_state: InitialState::Zero, logical_readout: false, step_barriers: false }
    }
}

impl GeneratorOptions {
    /// Options for `rounds` rounds starting from `initial_state`.
    pub fn new(rounds: usize, initial_state: InitialState) -> Self {
        Self { rounds, initial_state, ..Self::default() }
    }

    /// Enables or disables the final data-qubit readout.
    pub fn with_logical_readout(mut self, enabled: bool) -> Self {
        self.logical_readout = enabled;
        self
    }

    /// Enables or disables barriers between sub-steps.
    pub fn with_step_barriers(mut self, enabled: bool) -> Self {
        self.step_barriers = enabled;
        self
    }
}

/// Builds operation programs from a stabilizer table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircuitProgramGenerator {
    options: GeneratorOptions,
}

impl CircuitProgramGenerator {
    /// Creates a generator with the given options.
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// The generator's options.
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Emits the program for `table`.
    ///
    /// # Errors
    /// * `InvalidRoundCount` if fewer than one round is requested.
    /// * `InvalidOperation` if the table addresses qubits outside its own counts.
    pub fn generate(&self, table: &StabilizerTable) -> Result<OperationProgram, SurfaceCodeError> {
        let options = &self.options;
        if options.rounds < 1 {
            return Err(SurfaceCodeError::InvalidRoundCount { rounds: options.rounds });
        }

        let num_measure = table.num_measure_qubits();
        let num_data = table.num_data_qubits();
        let mut builder = ProgramBuilder::new(num_measure, num_data);

        if options.initial_state == InitialState::One {
            builder = builder.add_ops((0..num_data).map(|d| Operation::PauliX { target: QubitRef::Data(d) }));
        }

        for round in 0..options.rounds {
            let register = builder.register_count();
            builder = builder.add_register(format!("{}{}", ROUND_REGISTER_PREFIX, round), num_measure).begin_round();

            for step in 0..4 {
                builder = builder.add_ops(step_operations(table, step));
                if options.step_barriers {
                    builder = builder.add_op(Operation::Barrier);
                }
            }

            builder = builder.add_op(Operation::Barrier);
            for m in 0..num_measure {
                let qubit = QubitRef::Measure(m);
                builder = builder
                    .add_op(Operation::Measure { qubit, bit: ClassicalBit::new(register, m) })
                    .add_op(Operation::Reset { target: qubit });
            }
            builder = builder.add_op(Operation::Barrier).end_round();
        }

        if options.logical_readout {
            let register = builder.register_count();
            builder = builder.add_register(READOUT_REGISTER, num_data);
            builder = builder.add_ops((0..num_data).map(|d| Operation::Measure {
                qubit: QubitRef::Data(d),
                bit: ClassicalBit::new(register, d),
            }));
        }

        builder.build()
    }
}

/// Operations of sub-step `step` for every measurement qubit, in index order.
fn step_operations(table: &StabilizerTable, step: usize) -> Vec<Operation> {
    let mut ops = Vec::new();
    for (m, entry) in table.entries().iter().enumerate() {
        let measure = QubitRef::Measure(m);
        let neighbor = entry.neighbors[step].map(QubitRef::Data);
        match entry.kind {
            StabilizerKind::X => {
                if step == 0 {
                    ops.push(Operation::Hadamard { target: measure });
                }
                if let Some(data) = neighbor {
                    ops.push(Operation::ControlledX { control: measure, target: data });
                }
                if step == 3 {
                    ops.push(Operation::Hadamard { target: measure });
                }
            }
            StabilizerKind::Z => {
                if let Some(data) = neighbor {
                    ops.push(Operation::ControlledX { control: data, target: measure });
                }
            }
        }
    }
    ops
}

/// Generates `rounds` rounds of syndrome extraction for `table`.
///
/// Shorthand for [`CircuitProgramGenerator`] with default options otherwise.
pub fn generate(
    table: &StabilizerTable,
    rounds: usize,
    initial_state: InitialState,
) -> Result<OperationProgram, SurfaceCodeError> {
    CircuitProgramGenerator::new(GeneratorOptions::new(rounds, initial_state)).generate(table)
}
