// src/circuits/qasm.rs

//! OpenQASM 2.0 export, the flattened gate list handed to external backends.

use super::OperationProgram;
use crate::core::QubitRef;
use crate::operations::Operation;
use std::fmt::Write;

fn qasm_qubit(qubit: &QubitRef) -> String {
    match qubit {
        QubitRef::Measure(i) => format!("ancilla[{}]", i),
        QubitRef::Data(i) => format!("data[{}]", i),
    }
}

impl OperationProgram {
    /// Renders the program as OpenQASM 2.0 source.
    ///
    /// Measurement qubits are declared as `qreg ancilla[M]` (`measure` is a
    /// reserved word) followed by `qreg data[D]`. Every classical register
    /// keeps its name and barriers span both quantum registers.
    pub fn to_qasm(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "OPENQASM 2.0;");
        let _ = writeln!(out, "include \"qelib1.inc\";");
        if self.num_measure_qubits() > 0 {
            let _ = writeln!(out, "qreg ancilla[{}];", self.num_measure_qubits());
        }
        if self.num_data_qubits() > 0 {
            let _ = writeln!(out, "qreg data[{}];", self.num_data_qubits());
        }
        for register in self.registers() {
            let _ = writeln!(out, "creg {}[{}];", register.name, register.size);
        }

        let barrier_span = match (self.num_measure_qubits() > 0, self.num_data_qubits() > 0) {
            (true, true) => "ancilla,data",
            (true, false) => "ancilla",
            (false, true) => "data",
            (false, false) => "",
        };

        for op in self.operations() {
            let _ = match op {
                Operation::Hadamard { target } | Operation::Reset { target } | Operation::PauliX { target } => {
                    writeln!(out, "{} {};", op.mnemonic(), qasm_qubit(target))
                }
                Operation::ControlledX { control, target } => {
                    writeln!(out, "cx {},{};", qasm_qubit(control), qasm_qubit(target))
                }
                Operation::Measure { qubit, bit } => {
                    let name = self.registers().get(bit.register).map(|r| r.name.as_str()).unwrap_or("c");
                    writeln!(out, "measure {} -> {}[{}];", qasm_qubit(qubit), name, bit.bit)
                }
                Operation::Barrier => writeln!(out, "barrier {};", barrier_span),
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::circuits::ProgramBuilder;
    use crate::core::{QubitRef, SurfaceCodeError};
    use crate::operations::{ClassicalBit, Operation};

    #[test]
    fn qasm_declares_registers_and_gates() -> Result<(), SurfaceCodeError> {
        let program = ProgramBuilder::new(1, 2)
            .add_register("round_0", 1)
            .add_op(Operation::Hadamard { target: QubitRef::Measure(0) })
            .add_op(Operation::ControlledX { control: QubitRef::Measure(0), target: QubitRef::Data(1) })
            .add_op(Operation::Barrier)
            .add_op(Operation::Measure { qubit: QubitRef::Measure(0), bit: ClassicalBit::new(0, 0) })
            .add_op(Operation::Reset { target: QubitRef::Measure(0) })
            .build()?;
        let expected = "OPENQASM 2.0;\n\
                        include \"qelib1.inc\";\n\
                        qreg ancilla[1];\n\
                        qreg data[2];\n\
                        creg round_0[1];\n\
                        h ancilla[0];\n\
                        cx ancilla[0],data[1];\n\
                        barrier ancilla,data;\n\
                        measure ancilla[0] -> round_0[0];\n\
                        reset ancilla[0];\n";
        assert_eq!(program.to_qasm(), expected);
        Ok(())
    }
}
