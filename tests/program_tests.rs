// tests/program_tests.rs

use surface_qec::{
    CircuitProgramGenerator, CodeParams, GeneratorOptions, InitialState, Lattice, Operation, QubitRef, StabilizerKind,
    StabilizerTable, SurfaceCode, SurfaceCodeError, generate, lattice::UnrotatedDims, validate_table,
};

fn rotated_table(distance: usize) -> Result<StabilizerTable, SurfaceCodeError> {
    StabilizerTable::build(&Lattice::rotated(distance)?)
}

#[test]
fn test_single_round_distance_three() -> Result<(), SurfaceCodeError> {
    let code = SurfaceCode::rotated(3, 1, InitialState::Zero)?;
    assert_eq!(code.lattice().num_data_qubits(), 9);
    assert_eq!(code.lattice().num_measure_qubits(), 8);
    assert_eq!(code.table().count_kind(StabilizerKind::X), 4);
    assert_eq!(code.table().count_kind(StabilizerKind::Z), 4);
    assert_eq!(code.program().registers().len(), 1);
    assert_eq!(code.program().registers()[0].size, 8);
    Ok(())
}

#[test]
fn test_second_round_repeats_first() -> Result<(), SurfaceCodeError> {
    let program = generate(&rotated_table(3)?, 2, InitialState::Zero)?;
    let first = program.round(0).ok_or_else(|| SurfaceCodeError::InvalidOperation { message: "round 0".into() })?;
    let second = program.round(1).ok_or_else(|| SurfaceCodeError::InvalidOperation { message: "round 1".into() })?;
    assert_eq!(first.len(), second.len());

    for (a, b) in first.iter().zip(second) {
        match (a, b) {
            (Operation::Measure { qubit: qa, bit: ba }, Operation::Measure { qubit: qb, bit: bb }) => {
                assert_eq!(qa, qb);
                assert_eq!(ba.bit, bb.bit);
                assert_eq!(ba.register, 0);
                assert_eq!(bb.register, 1);
            }
            _ => assert_eq!(a, b),
        }
    }

    // Nothing is reset before the first entangling gate of round 0.
    let first_gate = program
        .operations()
        .iter()
        .position(Operation::is_two_qubit)
        .ok_or_else(|| SurfaceCodeError::InvalidOperation { message: "no gates".into() })?;
    assert!(!program.operations()[..first_gate].iter().any(|op| matches!(op, Operation::Reset { .. })));
    Ok(())
}

#[test]
fn test_unrotated_three_by_three() -> Result<(), SurfaceCodeError> {
    let dims = UnrotatedDims::new(3, 3);
    assert_eq!((dims.n_dqb, dims.m_dqb, dims.n_mqb, dims.m_mqb), (2, 2, 1, 1));

    let lattice = Lattice::unrotated(3, 3)?;
    assert_eq!(lattice.num_data_qubits(), 5);
    assert_eq!(lattice.num_measure_qubits(), 4);

    let table = StabilizerTable::build(&lattice)?;
    validate_table(&table)?;
    assert!(table.entries().iter().all(|e| e.weight() == 3));
    Ok(())
}

#[test]
fn test_operation_count_law() -> Result<(), SurfaceCodeError> {
    for params in [
        CodeParams::Rotated { distance: 5 },
        CodeParams::Rotated { distance: 7 },
        CodeParams::Unrotated { columns: 5, rows: 3 },
        CodeParams::Unrotated { columns: 7, rows: 7 },
    ] {
        let table = StabilizerTable::build(&Lattice::build(params)?)?;
        let x_checks = table.count_kind(StabilizerKind::X);
        let m = table.num_measure_qubits();
        for rounds in [1, 3] {
            let counts = generate(&table, rounds, InitialState::Zero)?.counts();
            assert_eq!(counts.controlled_x, rounds * table.total_weight(), "{} x{}", params, rounds);
            assert_eq!(counts.hadamard, rounds * 2 * x_checks);
            assert_eq!(counts.measure, rounds * m);
            assert_eq!(counts.reset, rounds * m);
            assert_eq!(counts.barrier, rounds * 2);
        }
    }
    Ok(())
}

#[test]
fn test_boundary_parameters() {
    for distance in [0, 1, 2, 4] {
        assert!(matches!(Lattice::rotated(distance), Err(SurfaceCodeError::InvalidParameters { .. })));
    }
    assert!(matches!(Lattice::unrotated(3, 4), Err(SurfaceCodeError::InvalidParameters { .. })));
    assert!(matches!(
        SurfaceCode::rotated(3, 0, InitialState::Zero),
        Err(SurfaceCodeError::InvalidRoundCount { rounds: 0 })
    ));
}

#[test]
fn test_identical_parameters_give_identical_programs() -> Result<(), SurfaceCodeError> {
    let options = GeneratorOptions::new(2, InitialState::One).with_logical_readout(true);
    let a = CircuitProgramGenerator::new(options).generate(&rotated_table(5)?)?;
    let b = CircuitProgramGenerator::new(options).generate(&rotated_table(5)?)?;
    assert_eq!(a, b);
    assert_eq!(a.to_qasm(), b.to_qasm());
    Ok(())
}

#[test]
fn test_x_checks_control_data_and_z_checks_target_measure() -> Result<(), SurfaceCodeError> {
    let table = rotated_table(5)?;
    let program = generate(&table, 1, InitialState::Zero)?;
    for op in program.operations() {
        if let Operation::ControlledX { control, target } = op {
            match (control, target) {
                (QubitRef::Measure(m), QubitRef::Data(_)) => {
                    assert_eq!(table.entries()[*m].kind, StabilizerKind::X);
                }
                (QubitRef::Data(_), QubitRef::Measure(m)) => {
                    assert_eq!(table.entries()[*m].kind, StabilizerKind::Z);
                }
                _ => panic!("unexpected gate {}", op),
            }
        }
    }
    Ok(())
}

#[test]
fn test_qasm_lists_every_operation() -> Result<(), SurfaceCodeError> {
    let program = generate(&rotated_table(3)?, 1, InitialState::Zero)?;
    let qasm = program.to_qasm();
    assert!(qasm.contains("qreg ancilla[8];"));
    assert!(qasm.contains("qreg data[9];"));
    assert!(qasm.contains("creg round_0[8];"));
    let body = qasm.lines().filter(|l| !l.starts_with("OPENQASM") && !l.starts_with("include")).count();
    // two qreg lines, one creg line, then one line per operation
    assert_eq!(body, 3 + program.len());
    Ok(())
}
