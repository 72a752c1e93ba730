//! End-to-end conversions between the Qiskit and Braket models.

use std::collections::BTreeSet;

use num_complex::Complex64;
use proptest::prelude::*;
use qbridge_adapter_braket::{self as braket, BraketError, Gate, Instruction, ResultType};
use qbridge_adapter_qiskit::{Param, QuantumCircuit, library, qasm2};
use qbridge_convert::{
    ConvertError, convert_qiskit_to_braket_circuit, from_braket_circuit,
};

fn braket_names(circ: &braket::Circuit) -> Vec<&'static str> {
    circ.instructions()
        .iter()
        .filter_map(|i| i.gate().map(Gate::name))
        .collect()
}

#[test]
fn qiskit_gate_names_map_to_braket() {
    let table: Vec<(qbridge_adapter_qiskit::Operation, &[&str])> = vec![
        (library::u1(0.1), &["phaseshift"]),
        (library::p(0.1), &["phaseshift"]),
        (library::u(0.1, 0.2, 0.3), &["rz", "rx", "rz", "rx", "rz"]),
        (library::u2(0.2, 0.3), &["rz", "rx", "rz", "rx", "rz"]),
        (library::u3(0.1, 0.2, 0.3), &["rz", "rx", "rz", "rx", "rz"]),
        (library::x(), &["x"]),
        (library::y(), &["y"]),
        (library::z(), &["z"]),
        (library::t(), &["t"]),
        (library::tdg(), &["ti"]),
        (library::s(), &["s"]),
        (library::sdg(), &["si"]),
        (library::sx(), &["v"]),
        (library::sxdg(), &["vi"]),
        (library::rx(0.1), &["rx"]),
        (library::ry(0.1), &["ry"]),
        (library::rz(0.1), &["rz"]),
        (library::id(), &["i"]),
        (library::h(), &["h"]),
        (library::r(0.1, 0.2), &["prx"]),
        (library::cx(), &["cnot"]),
        (library::swap(), &["swap"]),
        (library::rzz(0.1), &["zz"]),
        (library::cy(), &["cy"]),
        (library::cz(), &["cz"]),
        (library::cp(0.1), &["cphaseshift"]),
        (library::rxx(0.1), &["xx"]),
        (library::ryy(0.1), &["yy"]),
        (library::ecr(), &["ecr"]),
        (library::iswap(), &["iswap"]),
        (library::xx_plus_yy(0.1, 0.0), &["xy"]),
        (library::ccx(), &["ccnot"]),
        (library::cswap(), &["cswap"]),
    ];

    for (op, expected) in table {
        let name = op.name.clone();
        let qargs: Vec<u32> = (0..op.num_qubits).collect();
        let mut qc = QuantumCircuit::new(3, 0);
        qc.append(op, &qargs, &[]).unwrap();
        let circ = convert_qiskit_to_braket_circuit(&qc).unwrap();
        assert_eq!(braket_names(&circ), expected, "mapping of {name}");
    }
}

#[test]
fn xx_plus_yy_with_phase_is_rejected() {
    let mut qc = QuantumCircuit::new(2, 0);
    qc.append(library::xx_plus_yy(0.1, 0.5), &[0, 1], &[]).unwrap();
    assert!(convert_qiskit_to_braket_circuit(&qc).is_err());
}

#[test]
fn qiskit_unitary_reverses_braket_targets() {
    let one = Complex64::new(1.0, 0.0);
    let zero = Complex64::new(0.0, 0.0);
    // CNOT with qubit 0 as control in little-endian order.
    let matrix = vec![
        one, zero, zero, zero, //
        zero, zero, zero, one, //
        zero, zero, one, zero, //
        zero, one, zero, zero,
    ];
    let mut qc = QuantumCircuit::new(2, 0);
    qc.append(library::unitary(2, matrix.clone()).unwrap(), &[0, 1], &[])
        .unwrap();

    let circ = convert_qiskit_to_braket_circuit(&qc).unwrap();
    let inst = &circ.instructions()[0];
    assert_eq!(inst.target(), &[1, 0]);
    assert_eq!(
        inst.gate(),
        Some(&Gate::Unitary {
            matrix: matrix.clone(),
            qubit_count: 2
        })
    );

    let back = from_braket_circuit(&circ).unwrap();
    assert_eq!(back.data()[0].qubits, vec![0, 1]);
    assert_eq!(back.data()[0].operation.matrix.as_ref(), Some(&matrix));
}

#[test]
fn braket_controls_map_to_controlled_gates() {
    let mut circ = braket::Circuit::new();
    for (gate, target, controls) in [
        (Gate::X, 1, vec![0]),
        (Gate::H, 2, vec![1]),
        (Gate::PhaseShift { angle: 0.5.into() }, 0, vec![2]),
        (Gate::X, 2, vec![0, 1]),
        (Gate::Swap, 1, vec![0]),
    ] {
        let inst = if matches!(gate, Gate::Swap) {
            Instruction::new(gate, [1, 2]).unwrap().with_control(controls).unwrap()
        } else {
            Instruction::new(gate, [target]).unwrap().with_control(controls).unwrap()
        };
        circ.add_instruction(inst).unwrap();
    }
    circ.probability([0, 1, 2]).unwrap();

    let qc = from_braket_circuit(&circ).unwrap();
    let names: Vec<&str> = qc
        .data()
        .iter()
        .map(|d| d.operation.name.as_str())
        .filter(|n| *n != "measure")
        .collect();
    assert_eq!(names, ["cx", "ch", "cp", "ccx", "cswap"]);
    assert_eq!(qc.data()[3].qubits, vec![0, 1, 2]);
}

#[test]
fn braket_unsupported_constructs_are_errors() {
    let mut pswap = braket::Circuit::new();
    pswap.pswap(0, 1, 0.3).unwrap();
    assert!(matches!(
        from_braket_circuit(&pswap).unwrap_err(),
        ConvertError::Braket(BraketError::UnsupportedGate(name)) if name == "pswap"
    ));

    let mut negated = braket::Circuit::new();
    negated
        .add_instruction(
            Instruction::new(Gate::X, [1])
                .unwrap()
                .with_control([0])
                .unwrap()
                .with_control_state(vec![0])
                .unwrap(),
        )
        .unwrap();
    assert!(matches!(
        from_braket_circuit(&negated).unwrap_err(),
        ConvertError::Braket(BraketError::NegativeControl(_))
    ));

    let mut powered = braket::Circuit::new();
    powered
        .add_instruction(Instruction::new(Gate::H, [0]).unwrap().with_power(2.0))
        .unwrap();
    assert!(matches!(
        from_braket_circuit(&powered).unwrap_err(),
        ConvertError::Braket(BraketError::UnsupportedPower { .. })
    ));
}

#[test]
fn qiskit_reset_and_mid_circuit_measure_are_errors() {
    let mut reset = QuantumCircuit::new(1, 0);
    reset.reset(0).unwrap();
    assert!(convert_qiskit_to_braket_circuit(&reset).is_err());

    let mut mid = QuantumCircuit::new(1, 1);
    mid.measure(0, 0).unwrap().x(0).unwrap();
    assert!(matches!(
        convert_qiskit_to_braket_circuit(&mid).unwrap_err(),
        ConvertError::Braket(BraketError::MidCircuitMeasurement(0))
    ));
}

#[test]
fn parameters_survive_both_directions() {
    let mut qc = QuantumCircuit::new(1, 0);
    qc.rx(Param::parameter("theta"), 0).unwrap();
    let circ = convert_qiskit_to_braket_circuit(&qc).unwrap();
    let params: Vec<String> = circ.parameters().into_iter().map(|p| p.name).collect();
    assert_eq!(params, ["theta"]);

    let back = from_braket_circuit(&circ).unwrap();
    assert!(back.parameters().contains("theta"));
}

#[test]
fn converted_circuit_prints_as_qasm2() {
    let mut circ = braket::Circuit::new();
    circ.h(0)
        .unwrap()
        .cnot(0, 1)
        .unwrap()
        .add_result_type(ResultType::sample_z([0, 1]))
        .unwrap();
    let qc = from_braket_circuit(&circ).unwrap();
    let text = qasm2::dumps(&qc).unwrap();
    assert!(text.starts_with("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n"));
    assert!(text.contains("cx q[0],q[1];"));
    assert!(text.contains("measure q[1] -> c[1];"));
}

#[derive(Debug, Clone)]
enum BraketOp {
    Plain(Gate, usize),
    Controlled(Gate),
}

fn arb_braket_op() -> impl Strategy<Value = BraketOp> {
    let angle = -3.0f64..3.0;
    prop_oneof![
        prop::sample::select(vec![
            Gate::H,
            Gate::X,
            Gate::Y,
            Gate::Z,
            Gate::S,
            Gate::Si,
            Gate::T,
            Gate::Ti,
            Gate::V,
            Gate::Vi,
            Gate::I,
        ])
        .prop_map(|g| BraketOp::Plain(g, 1)),
        angle.clone().prop_map(|a| BraketOp::Plain(Gate::Rx { angle: a.into() }, 1)),
        angle.clone().prop_map(|a| BraketOp::Plain(Gate::Ry { angle: a.into() }, 1)),
        angle.clone().prop_map(|a| BraketOp::Plain(Gate::Rz { angle: a.into() }, 1)),
        angle.clone().prop_map(|a| BraketOp::Plain(Gate::PhaseShift { angle: a.into() }, 1)),
        (angle.clone(), angle.clone()).prop_map(|(a, b)| BraketOp::Plain(
            Gate::Prx {
                angle_1: a.into(),
                angle_2: b.into(),
            },
            1
        )),
        prop::sample::select(vec![
            Gate::CNot,
            Gate::CY,
            Gate::CZ,
            Gate::Swap,
            Gate::ISwap,
            Gate::ECR
        ])
        .prop_map(|g| BraketOp::Plain(g, 2)),
        angle.clone().prop_map(|a| BraketOp::Plain(Gate::XX { angle: a.into() }, 2)),
        angle.clone().prop_map(|a| BraketOp::Plain(Gate::YY { angle: a.into() }, 2)),
        angle.clone().prop_map(|a| BraketOp::Plain(Gate::ZZ { angle: a.into() }, 2)),
        angle.clone().prop_map(|a| BraketOp::Plain(Gate::XY { angle: a.into() }, 2)),
        angle.clone().prop_map(|a| BraketOp::Plain(Gate::CPhaseShift { angle: a.into() }, 2)),
        prop::sample::select(vec![Gate::CCNot, Gate::CSwap]).prop_map(|g| BraketOp::Plain(g, 3)),
        // `ctrl @ x` and friends return as named gates, so only forms
        // without a named counterpart are generated here.
        prop_oneof![
            Just(Gate::H),
            angle.clone().prop_map(|a| Gate::Rx { angle: a.into() }),
            angle.clone().prop_map(|a| Gate::Ry { angle: a.into() }),
            angle.prop_map(|a| Gate::Rz { angle: a.into() }),
        ]
        .prop_map(BraketOp::Controlled),
    ]
}

fn braket_instruction(op: BraketOp, qubits: Vec<u32>) -> Instruction {
    match op {
        BraketOp::Plain(gate, arity) => {
            Instruction::new(gate, qubits.into_iter().take(arity)).unwrap()
        }
        BraketOp::Controlled(gate) => Instruction::new(gate, [qubits[1]])
            .unwrap()
            .with_control([qubits[0]])
            .unwrap(),
    }
}

/// The Braket circuit expected back from a Qiskit round trip.
///
/// Braket measures used qubits implicitly, while the Qiskit side measures
/// every qubit; idle qubits therefore come back as an explicit sample, and
/// a sample over every used qubit comes back implicit.
fn expected_roundtrip(circ: &braket::Circuit) -> braket::Circuit {
    let used: BTreeSet<u32> = circ.instructions().iter().flat_map(Instruction::qubits).collect();
    let width = circ.qubits().last().map_or(0, |&q| q + 1);
    let all: Vec<u32> = (0..width).collect();
    let dense = used.len() == all.len();

    let mut expected = braket::Circuit::from_instructions(circ.instructions().iter().cloned()).unwrap();
    match circ.result_types() {
        [] if !dense => {
            expected.add_result_type(ResultType::sample_z(all)).unwrap();
        }
        [ResultType::Sample { target, .. }] if dense && target.as_slice() == all.as_slice() => {}
        types => {
            for rt in types {
                expected.add_result_type(rt.clone()).unwrap();
            }
        }
    }
    expected
}

proptest! {
    #[test]
    fn braket_qiskit_braket_is_identity(
        ops in prop::collection::vec((arb_braket_op(), prop::sample::subsequence(vec![0_u32, 1, 2, 3], 3)), 1..12),
        sample in prop::sample::subsequence(vec![0_u32, 1, 2, 3], 0..=4),
    ) {
        let mut circ = braket::Circuit::new();
        for (op, qubits) in ops {
            circ.add_instruction(braket_instruction(op, qubits)).unwrap();
        }
        if !sample.is_empty() {
            circ.add_result_type(ResultType::sample_z(sample)).unwrap();
        }
        let qc = from_braket_circuit(&circ).unwrap();
        let back = convert_qiskit_to_braket_circuit(&qc).unwrap();
        prop_assert_eq!(back, expected_roundtrip(&circ));
    }
}

#[test]
fn qiskit_measure_all_with_idle_qubit_keeps_width() {
    let mut qc = QuantumCircuit::new(3, 0);
    qc.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();

    let circ = convert_qiskit_to_braket_circuit(&qc).unwrap();
    assert_eq!(circ.result_types(), &[ResultType::sample_z([0, 1, 2])]);

    let back = from_braket_circuit(&circ).unwrap();
    assert_eq!(back.num_qubits(), 3);
    assert_eq!(back.count_ops().get("measure"), Some(&3));
}
