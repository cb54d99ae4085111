// src/simulation/mod.rs

//! Executes `surface_qec::circuits::OperationProgram` on a backend.
//!
//! [`ExecutionBackend`] is the seam external executors plug into.
//! [`StateVectorSimulator`] is the bundled noiseless backend: it replays the
//! program once per shot on a dense state vector, in program order.

mod results;
pub(crate) mod engine;

pub use results::ExecutionResult;

use crate::circuits::OperationProgram;
use crate::core::{MAX_SIMULATED_QUBITS, SurfaceCodeError};
use crate::operations::Operation;
use engine::SimulationEngine;

/// Anything that can execute an operation program for a number of shots.
pub trait ExecutionBackend {
    /// Runs `program` `shots` times and tallies the classical outcomes.
    ///
    /// Implementations must apply operations in program order.
    fn execute(&self, program: &OperationProgram, shots: usize) -> Result<ExecutionResult, SurfaceCodeError>;
}

/// Noiseless dense state-vector backend.
///
/// Sampling is driven by `StdRng::seed_from_u64`, so a fixed seed reproduces
/// the same counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateVectorSimulator {
    seed: u64,
}

impl StateVectorSimulator {
    /// Creates a simulator with seed 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator whose sampling starts from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Base seed; shot `k` runs with `seed + k` (wrapping).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs a single shot.
    pub fn run(&self, program: &OperationProgram) -> Result<ExecutionResult, SurfaceCodeError> {
        self.execute(program, 1)
    }

    fn check_size(program: &OperationProgram) -> Result<(), SurfaceCodeError> {
        let n = program.num_qubits();
        if n == 0 {
            return Err(SurfaceCodeError::SimulationError { message: "program declares no qubits".to_string() });
        }
        if n > MAX_SIMULATED_QUBITS {
            return Err(SurfaceCodeError::SimulationError {
                message: format!("{} qubits exceed the simulator limit of {}", n, MAX_SIMULATED_QUBITS),
            });
        }
        Ok(())
    }

    /// Replays `program` once on a fresh engine, writing measured bits into `clbits`.
    fn run_shot(
        program: &OperationProgram,
        engine: &mut SimulationEngine,
        clbits: &mut [u8],
    ) -> Result<(), SurfaceCodeError> {
        for op in program.operations() {
            match op {
                Operation::Hadamard { target } => engine.hadamard(program.wire_index(*target))?,
                Operation::PauliX { target } => engine.pauli_x(program.wire_index(*target))?,
                Operation::ControlledX { control, target } => {
                    engine.controlled_x(program.wire_index(*control), program.wire_index(*target))?
                }
                Operation::Measure { qubit, bit } => {
                    let outcome = engine.measure(program.wire_index(*qubit))?;
                    let slot = program.clbit_index(*bit);
                    let cell = clbits.get_mut(slot).ok_or_else(|| SurfaceCodeError::InvalidOperation {
                        message: format!("classical bit {} outside the declared registers", bit),
                    })?;
                    *cell = outcome;
                }
                Operation::Reset { target } => engine.reset(program.wire_index(*target))?,
                Operation::Barrier => {}
            }
        }
        Ok(())
    }

    /// Formats classical bits as per-register bitstrings joined by spaces.
    fn outcome_key(program: &OperationProgram, clbits: &[u8]) -> String {
        let mut offset = 0;
        let mut parts = Vec::with_capacity(program.registers().len());
        for register in program.registers() {
            let bits: String = clbits[offset..offset + register.size]
                .iter()
                .map(|&b| if b == 1 { '1' } else { '0' })
                .collect();
            parts.push(bits);
            offset += register.size;
        }
        parts.join(" ")
    }
}

impl ExecutionBackend for StateVectorSimulator {
    fn execute(&self, program: &OperationProgram, shots: usize) -> Result<ExecutionResult, SurfaceCodeError> {
        Self::check_size(program)?;
        let mut result = ExecutionResult::new();

        for shot in 0..shots {
            let mut engine = SimulationEngine::init(program.num_qubits(), self.seed.wrapping_add(shot as u64))?;
            let mut clbits = vec![0u8; program.num_clbits()];
            Self::run_shot(program, &mut engine, &mut clbits)?;
            result.record_shot(Self::outcome_key(program, &clbits));
            if shot + 1 == shots {
                result.set_final_state(engine.into_state());
            }
        }

        log::debug!(
            "simulated {} shots of {} operations on {} qubits: {} distinct outcomes",
            shots,
            program.len(),
            program.num_qubits(),
            result.counts().len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::ProgramBuilder;
    use crate::core::QubitRef;
    use crate::operations::ClassicalBit;
    use crate::validation::check_normalization;

    fn bell_program() -> Result<OperationProgram, SurfaceCodeError> {
        ProgramBuilder::new(1, 1)
            .add_register("round_0", 1)
            .add_register("data_output", 1)
            .add_op(Operation::Hadamard { target: QubitRef::Data(0) })
            .add_op(Operation::ControlledX { control: QubitRef::Data(0), target: QubitRef::Measure(0) })
            .add_op(Operation::Measure { qubit: QubitRef::Measure(0), bit: ClassicalBit::new(0, 0) })
            .add_op(Operation::Measure { qubit: QubitRef::Data(0), bit: ClassicalBit::new(1, 0) })
            .build()
    }

    #[test]
    fn bell_outcomes_are_correlated() -> Result<(), SurfaceCodeError> {
        let result = StateVectorSimulator::with_seed(11).execute(&bell_program()?, 32)?;
        assert_eq!(result.shots(), 32);
        for key in result.counts().keys() {
            assert!(key == "0 0" || key == "1 1", "unexpected key {}", key);
        }
        Ok(())
    }

    #[test]
    fn seed_reproduces_counts() -> Result<(), SurfaceCodeError> {
        let program = bell_program()?;
        let a = StateVectorSimulator::with_seed(5).execute(&program, 16)?;
        let b = StateVectorSimulator::with_seed(5).execute(&program, 16)?;
        assert_eq!(a.counts(), b.counts());
        Ok(())
    }

    #[test]
    fn final_state_is_normalized() -> Result<(), SurfaceCodeError> {
        let result = StateVectorSimulator::new().run(&bell_program()?)?;
        let state = result.final_state().ok_or_else(|| SurfaceCodeError::SimulationError {
            message: "missing final state".to_string(),
        })?;
        check_normalization(state, None)?;
        assert_eq!(state.num_qubits(), 2);
        Ok(())
    }

    #[test]
    fn bits_fill_register_left_to_right() -> Result<(), SurfaceCodeError> {
        let program = ProgramBuilder::new(3, 0)
            .add_register("round_0", 3)
            .add_op(Operation::PauliX { target: QubitRef::Measure(2) })
            .add_ops((0..3).map(|m| Operation::Measure { qubit: QubitRef::Measure(m), bit: ClassicalBit::new(0, m) }))
            .build()?;
        let result = StateVectorSimulator::new().execute(&program, 3)?;
        assert_eq!(result.count("001"), 3);
        Ok(())
    }

    #[test]
    fn refuses_oversized_programs() -> Result<(), SurfaceCodeError> {
        let program = ProgramBuilder::new(MAX_SIMULATED_QUBITS, 1).build()?;
        let err = StateVectorSimulator::new().execute(&program, 1);
        assert!(matches!(err, Err(SurfaceCodeError::SimulationError { .. })));
        Ok(())
    }
}
