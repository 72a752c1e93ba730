//! Property-based tests for the equivalence checker.

use qbridge_ir::equivalence::{EquivalenceOptions, check};
use qbridge_ir::{Circuit, QubitId};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Rz(f64, u32),
    CX(u32, u32),
}

impl GateOp {
    fn apply(&self, circuit: &mut Circuit) {
        let _ = match *self {
            GateOp::H(q) => circuit.h(QubitId(q)),
            GateOp::X(q) => circuit.x(QubitId(q)),
            GateOp::Rz(theta, q) => circuit.rz(theta, QubitId(q)),
            GateOp::CX(c, t) => circuit.cx(QubitId(c), QubitId(t)),
        };
    }
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..num_qubits).prop_map(GateOp::H),
        (0..num_qubits).prop_map(GateOp::X),
        (-3.0f64..3.0, 0..num_qubits).prop_map(|(t, q)| GateOp::Rz(t, q)),
        (0..num_qubits, 0..num_qubits).prop_map(|(c, t)| GateOp::CX(c, t)),
    ]
}

fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (2_u32..=5).prop_flat_map(|n| {
        prop::collection::vec(arb_gate_op(n), 1..=12).prop_map(move |ops| {
            let mut circuit = Circuit::with_size("prop", n, n);
            for op in &ops {
                op.apply(&mut circuit);
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn circuit_is_equivalent_to_itself(circuit in arb_circuit()) {
        let report = check(&circuit, &circuit.clone(), &EquivalenceOptions::default());
        prop_assert!(report.equivalent, "{}", report);
    }

    #[test]
    fn json_roundtrip_preserves_equivalence(circuit in arb_circuit()) {
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        prop_assert!(check(&circuit, &back, &EquivalenceOptions::default()).equivalent);
    }

    #[test]
    fn strict_equivalence_implies_layered(circuit in arb_circuit()) {
        let strict = EquivalenceOptions { strict_order: true, ..EquivalenceOptions::default() };
        let copy = circuit.clone();
        if check(&circuit, &copy, &strict).equivalent {
            prop_assert!(check(&circuit, &copy, &EquivalenceOptions::default()).equivalent);
        }
    }

    #[test]
    fn extra_gate_is_detected(circuit in arb_circuit()) {
        let mut longer = circuit.clone();
        longer.x(QubitId(0)).unwrap();
        let report = check(&circuit, &longer, &EquivalenceOptions::default());
        prop_assert!(!report.equivalent);
        prop_assert!(!report.differences.is_empty());
    }

    #[test]
    fn depth_never_exceeds_op_count(circuit in arb_circuit()) {
        prop_assert!(circuit.depth() <= circuit.num_ops());
        prop_assert_eq!(circuit.dag().layers().iter().map(Vec::len).sum::<usize>(), circuit.num_ops());
    }
}
