//! Qiskit → IR → Qiskit keeps circuits built from the shared vocabulary.

use proptest::prelude::*;
use qbridge_adapter_qiskit::{Param, QuantumCircuit, Target, from_ir, library, qasm2, to_ir};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Op {
    One(&'static str, u32),
    Rot(&'static str, f64, u32),
    Two(&'static str, u32, u32),
    Measure(u32),
}

fn arb_op(n: u32) -> impl Strategy<Value = Op> {
    prop_oneof![
        (prop::sample::select(vec!["h", "x", "sdg", "sx", "t"]), 0..n).prop_map(|(g, q)| Op::One(g, q)),
        (prop::sample::select(vec!["rx", "ry", "rz", "p"]), -3.0f64..3.0, 0..n)
            .prop_map(|(g, a, q)| Op::Rot(g, a, q)),
        (prop::sample::select(vec!["cx", "cz", "swap", "ecr"]), 0..n, 0..n)
            .prop_map(|(g, a, b)| Op::Two(g, a, b)),
        (0..n).prop_map(Op::Measure),
    ]
}

fn build(n: u32, ops: &[Op]) -> QuantumCircuit {
    let mut qc = QuantumCircuit::new(n, n).with_name("prop");
    for op in ops {
        let _ = match *op {
            Op::One(g, q) => qc.append(library::standard_gate(g, vec![]).unwrap(), &[q], &[]),
            Op::Rot(g, a, q) => {
                qc.append(library::standard_gate(g, vec![Param::Float(a)]).unwrap(), &[q], &[])
            }
            Op::Two(g, a, b) => qc.append(library::standard_gate(g, vec![]).unwrap(), &[a, b], &[]),
            Op::Measure(q) => qc.measure(q, q),
        };
    }
    qc
}

proptest! {
    #[test]
    fn qiskit_ir_qiskit_is_identity(
        (n, ops) in (1_u32..=4).prop_flat_map(|n| (Just(n), prop::collection::vec(arb_op(n), 0..16)))
    ) {
        let qc = build(n, &ops);
        let back = from_ir(&to_ir(&qc).unwrap()).unwrap();
        prop_assert_eq!(back, qc);
    }
}

#[test]
fn measure_all_circuit_prints_as_qasm() {
    let mut qc = QuantumCircuit::new(2, 0);
    qc.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
    let qasm = qasm2::dumps(&qc).unwrap();
    assert!(qasm.contains("creg meas[2];"));
    assert!(qasm.contains("barrier q[0],q[1];"));
    assert!(qasm.contains("measure q[1] -> meas[1];"));
}

#[test]
fn target_serializes() {
    let mut target = Target::with_description("demo");
    let singles: BTreeMap<Vec<u32>, _> = (0..2).map(|i| (vec![i], None)).collect();
    target.add_instruction(library::rx(Param::parameter("theta")), Some(singles)).unwrap();
    let json = serde_json::to_string(&target).unwrap();
    let back: Target = serde_json::from_str(&json).unwrap();
    assert_eq!(back, target);
}
