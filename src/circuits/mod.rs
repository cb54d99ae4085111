// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`surface_qec::operations::Operation`).
//!
//! An [`OperationProgram`] declares its qubits (measurement qubits first, then
//! data qubits), its named classical registers and the ordered operations
//! acting on them. It owns no quantum state and can be inspected, serialized
//! or handed to any execution backend.

mod qasm;

use crate::core::{QubitRef, SurfaceCodeError};
use crate::operations::{ClassicalBit, Operation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A named group of classical bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassicalRegister {
    /// Register name, e.g. `round_0`.
    pub name: String,
    /// Number of bits.
    pub size: usize,
}

/// Per-variant operation tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationCounts {
    /// `Hadamard` count.
    pub hadamard: usize,
    /// `ControlledX` count.
    pub controlled_x: usize,
    /// `Measure` count.
    pub measure: usize,
    /// `Reset` count.
    pub reset: usize,
    /// `Barrier` count.
    pub barrier: usize,
    /// `PauliX` count.
    pub pauli_x: usize,
}

/// An ordered, validated sequence of operations over declared qubits and registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationProgram {
    num_measure: usize,
    num_data: usize,
    registers: Vec<ClassicalRegister>,
    operations: Vec<Operation>,
    /// Half-open operation ranges, one per syndrome extraction round.
    rounds: Vec<(usize, usize)>,
}

impl OperationProgram {
    /// Slice containing the ordered sequence of operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Declared classical registers in declaration order.
    pub fn registers(&self) -> &[ClassicalRegister] {
        &self.registers
    }

    /// Position of the register called `name`.
    pub fn register_index(&self, name: &str) -> Option<usize> {
        self.registers.iter().position(|r| r.name == name)
    }

    /// Operations of round `round` (zero-based), including its closing barrier.
    pub fn round(&self, round: usize) -> Option<&[Operation]> {
        self.rounds.get(round).map(|&(start, end)| &self.operations[start..end])
    }

    /// Number of recorded rounds.
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Number of measurement qubits.
    pub fn num_measure_qubits(&self) -> usize {
        self.num_measure
    }

    /// Number of data qubits.
    pub fn num_data_qubits(&self) -> usize {
        self.num_data
    }

    /// Total number of qubits (wires).
    pub fn num_qubits(&self) -> usize {
        self.num_measure + self.num_data
    }

    /// Total number of classical bits across all registers.
    pub fn num_clbits(&self) -> usize {
        self.registers.iter().map(|r| r.size).sum()
    }

    /// Returns the total number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the program contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Flat wire number of `qubit`: measurement qubits first, then data qubits.
    pub fn wire_index(&self, qubit: QubitRef) -> usize {
        match qubit {
            QubitRef::Measure(i) => i,
            QubitRef::Data(i) => self.num_measure + i,
        }
    }

    /// The qubit on wire `wire`.
    pub fn wire_qubit(&self, wire: usize) -> Option<QubitRef> {
        if wire < self.num_measure {
            Some(QubitRef::Measure(wire))
        } else if wire < self.num_qubits() {
            Some(QubitRef::Data(wire - self.num_measure))
        } else {
            None
        }
    }

    /// Flat classical bit number of `bit` (registers laid out in declaration order).
    pub fn clbit_index(&self, bit: ClassicalBit) -> usize {
        self.registers.iter().take(bit.register).map(|r| r.size).sum::<usize>() + bit.bit
    }

    /// Tallies operations by variant.
    pub fn counts(&self) -> OperationCounts {
        let mut counts = OperationCounts::default();
        for op in &self.operations {
            match op {
                Operation::Hadamard { .. } => counts.hadamard += 1,
                Operation::ControlledX { .. } => counts.controlled_x += 1,
                Operation::Measure { .. } => counts.measure += 1,
                Operation::Reset { .. } => counts.reset += 1,
                Operation::Barrier => counts.barrier += 1,
                Operation::PauliX { .. } => counts.pauli_x += 1,
            }
        }
        counts
    }

    /// Wire diagram of the program, one row per qubit.
    pub fn diagram(&self) -> ProgramDiagram<'_> {
        ProgramDiagram { program: self }
    }

    /// Serializes the program to JSON.
    pub fn to_json(&self) -> Result<String, SurfaceCodeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for OperationProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "OperationProgram[{} operations on {} qubits ({} measure, {} data), {} classical bits]",
            self.len(),
            self.num_qubits(),
            self.num_measure,
            self.num_data,
            self.num_clbits()
        )?;
        for (index, register) in self.registers.iter().enumerate() {
            writeln!(f, "  c{} = {}[{}]", index, register.name, register.size)?;
        }
        for (pc, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {:04}: {}", pc, op)?;
        }
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Program Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing [`OperationProgram`]
/// instances using method chaining.
///
/// # Examples
/// ```
/// use surface_qec::circuits::ProgramBuilder;
/// use surface_qec::core::QubitRef;
/// use surface_qec::operations::{ClassicalBit, Operation};
///
/// let program = ProgramBuilder::new(1, 2)
///     .add_register("round_0", 1)
///     .add_op(Operation::ControlledX { control: QubitRef::Data(0), target: QubitRef::Measure(0) })
///     .add_op(Operation::ControlledX { control: QubitRef::Data(1), target: QubitRef::Measure(0) })
///     .add_op(Operation::Measure { qubit: QubitRef::Measure(0), bit: ClassicalBit::new(0, 0) })
///     .build()
///     .expect("valid program");
/// assert_eq!(program.num_qubits(), 3);
/// assert_eq!(program.counts().controlled_x, 2);
/// ```
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    num_measure: usize,
    num_data: usize,
    registers: Vec<ClassicalRegister>,
    operations: Vec<Operation>,
    rounds: Vec<(usize, usize)>,
    open_round: Option<usize>,
}

impl ProgramBuilder {
    /// Creates a builder for `num_measure` measurement and `num_data` data qubits.
    pub fn new(num_measure: usize, num_data: usize) -> Self {
        Self {
            num_measure,
            num_data,
            registers: Vec::new(),
            operations: Vec::new(),
            rounds: Vec::new(),
            open_round: None,
        }
    }

    /// Declares a classical register. Registers are addressed by declaration position.
    pub fn add_register(mut self, name: impl Into<String>, size: usize) -> Self {
        self.registers.push(ClassicalRegister { name: name.into(), size });
        self
    }

    /// Number of registers declared so far; the position the next one will get.
    pub fn register_count(&self) -> usize {
        self.registers.len()
    }

    /// Adds a single operation to the program being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Adds multiple operations from an iterator to the program being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
        self
    }

    /// Marks the start of a syndrome extraction round.
    pub fn begin_round(mut self) -> Self {
        self.open_round = Some(self.operations.len());
        self
    }

    /// Closes the round opened by [`ProgramBuilder::begin_round`].
    pub fn end_round(mut self) -> Self {
        if let Some(start) = self.open_round.take() {
            self.rounds.push((start, self.operations.len()));
        }
        self
    }

    /// Validates every operation against the declared qubits and registers and
    /// returns the finished program.
    ///
    /// # Errors
    /// Returns `InvalidOperation` if an operation names an undeclared qubit or
    /// classical bit, a controlled gate uses one qubit twice, a classical bit
    /// is written more than once, or a round was left open.
    pub fn build(self) -> Result<OperationProgram, SurfaceCodeError> {
        if self.open_round.is_some() {
            return Err(SurfaceCodeError::InvalidOperation { message: "round opened but never closed".to_string() });
        }

        let mut written: HashSet<ClassicalBit> = HashSet::new();
        for (pc, op) in self.operations.iter().enumerate() {
            for qubit in op.involved_qubits() {
                let limit = match qubit {
                    QubitRef::Measure(_) => self.num_measure,
                    QubitRef::Data(_) => self.num_data,
                };
                if qubit.index() >= limit {
                    return Err(SurfaceCodeError::InvalidOperation {
                        message: format!("operation {:04} ({}) names undeclared qubit {}", pc, op, qubit),
                    });
                }
            }
            match op {
                Operation::ControlledX { control, target } if control == target => {
                    return Err(SurfaceCodeError::InvalidOperation {
                        message: format!("operation {:04} uses {} as both control and target", pc, control),
                    });
                }
                Operation::Measure { bit, .. } => {
                    let declared = self.registers.get(bit.register).is_some_and(|r| bit.bit < r.size);
                    if !declared {
                        return Err(SurfaceCodeError::InvalidOperation {
                            message: format!("operation {:04} ({}) writes undeclared classical bit", pc, op),
                        });
                    }
                    if !written.insert(*bit) {
                        return Err(SurfaceCodeError::InvalidOperation {
                            message: format!("operation {:04} ({}) overwrites an already measured bit", pc, op),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(OperationProgram {
            num_measure: self.num_measure,
            num_data: self.num_data,
            registers: self.registers,
            operations: self.operations,
            rounds: self.rounds,
        })
    }
}

//-------------------------------------------------------------------------
// Wire diagram
//-------------------------------------------------------------------------

/// Text rendering of a program with one row per wire and one column per operation.
pub struct ProgramDiagram<'a> {
    program: &'a OperationProgram,
}

impl fmt::Display for ProgramDiagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.program;
        let num_ops = program.len();
        let num_wires = program.num_qubits();
        if num_ops == 0 || num_wires == 0 {
            return writeln!(f, "OperationProgram[0 operations]");
        }

        const GATE_WIDTH: usize = 5; // e.g., "──H──"
        const H_WIRE: char = '─';
        const V_WIRE: char = '│';

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                return symbol.chars().take(GATE_WIDTH).collect();
            }
            let pre = (GATE_WIDTH - slen) / 2;
            let post = GATE_WIDTH - slen - pre;
            format!("{}{}{}", H_WIRE.to_string().repeat(pre), symbol, H_WIRE.to_string().repeat(post))
        }

        let wire = H_WIRE.to_string().repeat(GATE_WIDTH);
        let mut grid: Vec<Vec<String>> = vec![vec![wire; num_ops]; num_wires];
        // v_connect[row][t]: connector drawn below `row` at time `t`
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_wires];

        for (t, op) in program.operations().iter().enumerate() {
            match op {
                Operation::Hadamard { target } => grid[program.wire_index(*target)][t] = format_gate("H"),
                Operation::PauliX { target } => grid[program.wire_index(*target)][t] = format_gate("X"),
                Operation::Reset { target } => grid[program.wire_index(*target)][t] = format_gate("|0>"),
                Operation::Measure { qubit, .. } => grid[program.wire_index(*qubit)][t] = format_gate("M"),
                Operation::ControlledX { control, target } => {
                    let (rc, rt) = (program.wire_index(*control), program.wire_index(*target));
                    grid[rc][t] = format_gate("@");
                    grid[rt][t] = format_gate("X");
                    for row in v_connect.iter_mut().take(rc.max(rt)).skip(rc.min(rt)) {
                        row[t] = V_WIRE;
                    }
                }
                Operation::Barrier => {
                    for row in grid.iter_mut() {
                        row[t] = format_gate("░");
                    }
                }
            }
        }

        let labels: Vec<String> = (0..num_wires)
            .map(|w| program.wire_qubit(w).map(|q| q.to_string()).unwrap_or_default())
            .collect();
        let label_width = labels.iter().map(String::len).max().unwrap_or(0) + 2;

        for (r, label) in labels.iter().enumerate() {
            writeln!(f, "{:<width$}{}", format!("{}: ", label), grid[r].join(""), width = label_width)?;
            if r + 1 < num_wires {
                write!(f, "{}", " ".repeat(label_width))?;
                for t in 0..num_ops {
                    let pre = (GATE_WIDTH - 1) / 2;
                    let post = GATE_WIDTH - 1 - pre;
                    write!(f, "{}{}{}", " ".repeat(pre), v_connect[r][t], " ".repeat(post))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cx(control: QubitRef, target: QubitRef) -> Operation {
        Operation::ControlledX { control, target }
    }

    #[test]
    fn wires_put_measurement_qubits_first() -> Result<(), SurfaceCodeError> {
        let program = ProgramBuilder::new(2, 3).build()?;
        assert_eq!(program.wire_index(QubitRef::Measure(1)), 1);
        assert_eq!(program.wire_index(QubitRef::Data(0)), 2);
        assert_eq!(program.wire_qubit(4), Some(QubitRef::Data(2)));
        assert_eq!(program.wire_qubit(5), None);
        Ok(())
    }

    #[test]
    fn clbits_are_laid_out_by_register() -> Result<(), SurfaceCodeError> {
        let program = ProgramBuilder::new(2, 3).add_register("round_0", 2).add_register("round_1", 2).build()?;
        assert_eq!(program.num_clbits(), 4);
        assert_eq!(program.clbit_index(ClassicalBit::new(1, 1)), 3);
        assert_eq!(program.register_index("round_1"), Some(1));
        Ok(())
    }

    #[test]
    fn build_rejects_undeclared_qubits() {
        let err = ProgramBuilder::new(1, 1).add_op(cx(QubitRef::Data(1), QubitRef::Measure(0))).build();
        assert!(matches!(err, Err(SurfaceCodeError::InvalidOperation { .. })));
    }

    #[test]
    fn build_rejects_self_controlled_gate() {
        let err = ProgramBuilder::new(1, 1).add_op(cx(QubitRef::Data(0), QubitRef::Data(0))).build();
        assert!(matches!(err, Err(SurfaceCodeError::InvalidOperation { .. })));
    }

    #[test]
    fn build_rejects_bad_or_repeated_bits() {
        let measure = Operation::Measure { qubit: QubitRef::Measure(0), bit: ClassicalBit::new(0, 0) };
        let undeclared = ProgramBuilder::new(1, 1).add_op(measure).build();
        assert!(matches!(undeclared, Err(SurfaceCodeError::InvalidOperation { .. })));

        let repeated = ProgramBuilder::new(1, 1).add_register("r", 1).add_op(measure).add_op(measure).build();
        assert!(matches!(repeated, Err(SurfaceCodeError::InvalidOperation { .. })));
    }

    #[test]
    fn build_rejects_open_round() {
        let err = ProgramBuilder::new(1, 1).begin_round().add_op(Operation::Barrier).build();
        assert!(matches!(err, Err(SurfaceCodeError::InvalidOperation { .. })));
    }

    #[test]
    fn rounds_slice_operations() -> Result<(), SurfaceCodeError> {
        let program = ProgramBuilder::new(1, 1)
            .add_op(Operation::PauliX { target: QubitRef::Data(0) })
            .begin_round()
            .add_op(Operation::Barrier)
            .end_round()
            .build()?;
        assert_eq!(program.num_rounds(), 1);
        assert_eq!(program.round(0), Some(&[Operation::Barrier][..]));
        assert_eq!(program.round(1), None);
        Ok(())
    }

    #[test]
    fn diagram_draws_every_wire() -> Result<(), SurfaceCodeError> {
        let program = ProgramBuilder::new(1, 2)
            .add_op(cx(QubitRef::Data(1), QubitRef::Measure(0)))
            .add_op(Operation::Barrier)
            .build()?;
        let text = program.diagram().to_string();
        let lines: Vec<&str> = text.lines().collect();
        // three wires plus two connector rows
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("M0: "));
        assert!(lines[0].contains('X'));
        assert!(lines[4].starts_with("D1: "));
        assert!(lines[4].contains('@'));
        assert!(lines[1].contains('│'));
        Ok(())
    }

    #[test]
    fn json_round_trip_preserves_program() -> Result<(), SurfaceCodeError> {
        let program = ProgramBuilder::new(1, 1)
            .add_register("round_0", 1)
            .add_op(Operation::Hadamard { target: QubitRef::Measure(0) })
            .add_op(Operation::Measure { qubit: QubitRef::Measure(0), bit: ClassicalBit::new(0, 0) })
            .build()?;
        let parsed: OperationProgram = serde_json::from_str(&program.to_json()?)?;
        assert_eq!(parsed, program);
        Ok(())
    }
}
