// src/config/mod.rs

//! Serde configuration and the [`SurfaceCode`] facade bundling every stage.

use crate::circuits::OperationProgram;
use crate::core::SurfaceCodeError;
use crate::generator::{CircuitProgramGenerator, GeneratorOptions, InitialState};
use crate::lattice::{CodeParams, Lattice};
use crate::render::LatticeGraph;
use crate::report::ResultFormatter;
use crate::simulation::{ExecutionBackend, ExecutionResult};
use crate::stabilizers::StabilizerTable;
use crate::validation::{InterleavingConflict, find_interleaving_conflicts, validate_table};
use serde::{Deserialize, Serialize};

fn default_rounds() -> usize {
    1
}

/// Everything needed to build a syndrome extraction program.
///
/// ```json
/// { "code": { "variant": "rotated", "distance": 3 },
///   "rounds": 2, "initial_state": "one",
///   "logical_readout": true, "step_barriers": false }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceCodeConfig {
    /// Layout variant and size.
    pub code: CodeParams,
    /// Syndrome extraction rounds, at least 1.
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Logical state prepared before the first round.
    #[serde(default)]
    pub initial_state: InitialState,
    /// Measure every data qubit after the last round.
    #[serde(default)]
    pub logical_readout: bool,
    /// Barrier after each of the four entangling sub-steps.
    #[serde(default)]
    pub step_barriers: bool,
}

impl SurfaceCodeConfig {
    /// One round of a code prepared in logical `|0>`, no readout.
    pub fn new(code: CodeParams) -> Self {
        Self { code, rounds: default_rounds(), initial_state: InitialState::Zero, logical_readout: false, step_barriers: false }
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    /// `InvalidConfig` when the document is malformed or misses `code`.
    pub fn from_json(text: &str) -> Result<Self, SurfaceCodeError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Pretty-printed JSON, readable by [`SurfaceCodeConfig::from_json`].
    pub fn to_json(&self) -> Result<String, SurfaceCodeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks code parameters and round count.
    pub fn validate(&self) -> Result<(), SurfaceCodeError> {
        self.code.validate()?;
        if self.rounds < 1 {
            return Err(SurfaceCodeError::InvalidRoundCount { rounds: self.rounds });
        }
        Ok(())
    }

    /// Generator options carried by this configuration.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions::new(self.rounds, self.initial_state)
            .with_logical_readout(self.logical_readout)
            .with_step_barriers(self.step_barriers)
    }

    /// Runs lattice construction, table derivation and program generation.
    pub fn build(&self) -> Result<SurfaceCode, SurfaceCodeError> {
        self.validate()?;
        let lattice = Lattice::build(self.code)?;
        let table = StabilizerTable::build(&lattice)?;
        validate_table(&table)?;
        let program = CircuitProgramGenerator::new(self.generator_options()).generate(&table)?;
        Ok(SurfaceCode { config: *self, lattice, table, program })
    }
}

/// A built surface code: lattice, stabilizer table and generated program.
///
/// # Examples
/// ```
/// use surface_qec::SurfaceCode;
/// use surface_qec::generator::InitialState;
///
/// let code = SurfaceCode::rotated(3, 1, InitialState::Zero).expect("valid parameters");
/// assert_eq!(code.lattice().num_data_qubits(), 9);
/// assert_eq!(code.program().registers()[0].size, 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceCode {
    config: SurfaceCodeConfig,
    lattice: Lattice,
    table: StabilizerTable,
    program: OperationProgram,
}

impl SurfaceCode {
    /// Rotated code of distance `distance`.
    pub fn rotated(distance: usize, rounds: usize, initial_state: InitialState) -> Result<Self, SurfaceCodeError> {
        let config = SurfaceCodeConfig { rounds, initial_state, ..SurfaceCodeConfig::new(CodeParams::Rotated { distance }) };
        config.build()
    }

    /// Unrotated code on a `columns x rows` site grid.
    pub fn unrotated(
        columns: usize,
        rows: usize,
        rounds: usize,
        initial_state: InitialState,
    ) -> Result<Self, SurfaceCodeError> {
        let config =
            SurfaceCodeConfig { rounds, initial_state, ..SurfaceCodeConfig::new(CodeParams::Unrotated { columns, rows }) };
        config.build()
    }

    /// Configuration the code was built from.
    pub fn config(&self) -> &SurfaceCodeConfig {
        &self.config
    }

    /// Qubit placement.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Ordered neighbors of every measurement qubit.
    pub fn table(&self) -> &StabilizerTable {
        &self.table
    }

    /// The generated operation program.
    pub fn program(&self) -> &OperationProgram {
        &self.program
    }

    /// Renderer graph of the lattice.
    pub fn graph(&self) -> LatticeGraph {
        LatticeGraph::new(&self.lattice, &self.table)
    }

    /// X/Z check pairs whose schedules interfere; empty for rotated codes.
    pub fn interleaving_conflicts(&self) -> Vec<InterleavingConflict> {
        find_interleaving_conflicts(&self.table)
    }

    /// Formatter matching this code's measurement qubits.
    pub fn formatter(&self) -> ResultFormatter {
        ResultFormatter::new(self.table.num_measure_qubits())
    }

    /// Executes the program on `backend`.
    pub fn execute<B: ExecutionBackend>(&self, backend: &B, shots: usize) -> Result<ExecutionResult, SurfaceCodeError> {
        backend.execute(&self.program, shots)
    }
}
