// src/lib.rs

//! `surface_qec` - Surface code lattices and syndrome extraction programs
//!
//! This library lays out rotated and unrotated surface code patches, derives
//! the ordered neighbor table of every measurement qubit, and expands it into
//! an abstract operation program that any execution backend can run.

pub mod core;
pub mod lattice;
pub mod stabilizers;
pub mod operations;
pub mod circuits;
pub mod generator;
pub mod simulation;
pub mod report;
pub mod render;
pub mod validation;
pub mod config;

// Re-export the most common types for easier top-level use
pub use self::core::{Coordinate, Qubit, QubitRef, StabilizerKind, StateVector, SurfaceCodeError};
pub use lattice::{CodeParams, Lattice};
pub use stabilizers::{StabilizerEntry, StabilizerTable};
pub use operations::{ClassicalBit, Operation};
pub use circuits::{OperationProgram, ProgramBuilder};
pub use generator::{CircuitProgramGenerator, GeneratorOptions, InitialState, generate};
pub use simulation::{ExecutionBackend, ExecutionResult, StateVectorSimulator};
pub use report::ResultFormatter;
pub use render::LatticeGraph;
pub use validation::{
    check_checkerboard,
    check_neighbor_weights,
    check_normalization,
    check_step_disjointness,
    find_interleaving_conflicts,
    validate_table,
};
pub use config::{SurfaceCode, SurfaceCodeConfig};

// Example 1: Distance-3 Rotated Code
// Builds the lattice and stabilizer table stage by stage and generates one
// round of syndrome extraction.
/// ```
/// use surface_qec::{Lattice, StabilizerTable, StabilizerKind, InitialState, SurfaceCodeError, generate};
///
/// fn main() -> Result<(), SurfaceCodeError> {
///     let lattice = Lattice::rotated(3)?;
///     assert_eq!(lattice.num_data_qubits(), 9);
///     assert_eq!(lattice.count_kind(StabilizerKind::X), 4);
///     assert_eq!(lattice.count_kind(StabilizerKind::Z), 4);
///
///     let table = StabilizerTable::build(&lattice)?;
///     println!("{}", table);
///     // M1 is the bulk Z check on the upper-left plaquette.
///     let m1 = table.entry(1).expect("eight entries");
///     assert_eq!(m1.neighbors, [Some(0), Some(1), Some(3), Some(4)]);
///
///     let program = generate(&table, 1, InitialState::Zero)?;
///     let counts = program.counts();
///     assert_eq!(counts.controlled_x, table.total_weight());
///     assert_eq!(counts.hadamard, 2 * 4);
///     assert_eq!(counts.measure, 8);
///     assert_eq!(program.registers()[0].name, "round_0");
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Noiseless Execution
// Runs a distance-3 program on the bundled state-vector backend. Z checks on
// a freshly prepared logical |0> always report 0.
/// ```
/// use surface_qec::{SurfaceCode, InitialState, StateVectorSimulator, StabilizerKind, SurfaceCodeError};
///
/// fn main() -> Result<(), SurfaceCodeError> {
///     let code = SurfaceCode::rotated(3, 1, InitialState::Zero)?;
///     let result = code.execute(&StateVectorSimulator::with_seed(42), 1)?;
///     let (key, _) = result.most_frequent().expect("one shot recorded");
///
///     println!("{}", code.formatter().format_round(key)?);
///     for (m, entry) in code.table().entries().iter().enumerate() {
///         if entry.kind == StabilizerKind::Z {
///             assert_eq!(key.as_bytes()[m], b'0', "Z check M{} fired", m);
///         }
///     }
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
