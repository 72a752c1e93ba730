//! Structural equivalence of IR circuits.
//!
//! Two circuits are equivalent when they have the same width and apply the
//! same operations to the same bits. Names, register labels and gate labels
//! are ignored. By default operations are compared layer by layer on the
//! dependency DAG, so reordering gates that act on disjoint qubits does not
//! make circuits differ.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuit::Circuit;
use crate::dag::CircuitDag;
use crate::gate::{Gate, GateKind};
use crate::instruction::{Instruction, InstructionKind};

/// Default absolute tolerance for numeric parameters.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Options for [`check`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceOptions {
    /// Absolute tolerance for numeric parameters and matrix entries.
    pub tolerance: f64,
    /// Compare the instruction sequence instead of DAG layers.
    pub strict_order: bool,
    /// Drop barriers before comparing.
    pub ignore_barriers: bool,
}

impl Default for EquivalenceOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            strict_order: false,
            ignore_barriers: true,
        }
    }
}

/// One way in which two circuits differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// Different number of qubits.
    QubitCount {
        /// Qubits in the left circuit.
        left: usize,
        /// Qubits in the right circuit.
        right: usize,
    },
    /// Different number of classical bits.
    ClbitCount {
        /// Classical bits in the left circuit.
        left: usize,
        /// Classical bits in the right circuit.
        right: usize,
    },
    /// Different number of compared operations.
    OpCount {
        /// Operations in the left circuit.
        left: usize,
        /// Operations in the right circuit.
        right: usize,
    },
    /// A DAG layer holds different operations.
    Layer {
        /// Layer index, starting at 0.
        index: usize,
        /// Operations in the left layer.
        left: Vec<String>,
        /// Operations in the right layer.
        right: Vec<String>,
    },
    /// Operations differ at a position in program order.
    Instruction {
        /// Position, starting at 0.
        position: usize,
        /// Left operation, if any.
        left: Option<String>,
        /// Right operation, if any.
        right: Option<String>,
    },
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::QubitCount { left, right } => {
                write!(f, "qubit count: {left} vs {right}")
            }
            Difference::ClbitCount { left, right } => {
                write!(f, "clbit count: {left} vs {right}")
            }
            Difference::OpCount { left, right } => {
                write!(f, "operation count: {left} vs {right}")
            }
            Difference::Layer { index, left, right } => write!(
                f,
                "layer {index}: [{}] vs [{}]",
                left.join(", "),
                right.join(", ")
            ),
            Difference::Instruction {
                position,
                left,
                right,
            } => write!(
                f,
                "instruction {position}: {} vs {}",
                left.as_deref().unwrap_or("<none>"),
                right.as_deref().unwrap_or("<none>")
            ),
        }
    }
}

/// Result of comparing two circuits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceReport {
    /// Whether no difference was found.
    pub equivalent: bool,
    /// Every difference found.
    pub differences: Vec<Difference>,
}

impl EquivalenceReport {
    fn from_differences(differences: Vec<Difference>) -> Self {
        Self {
            equivalent: differences.is_empty(),
            differences,
        }
    }
}

impl fmt::Display for EquivalenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.equivalent {
            return write!(f, "circuits are equivalent");
        }
        write!(f, "circuits differ ({} differences)", self.differences.len())?;
        for diff in &self.differences {
            write!(f, "\n  - {diff}")?;
        }
        Ok(())
    }
}

/// Compare two circuits.
pub fn check(left: &Circuit, right: &Circuit, options: &EquivalenceOptions) -> EquivalenceReport {
    let mut differences = Vec::new();

    if left.num_qubits() != right.num_qubits() {
        differences.push(Difference::QubitCount {
            left: left.num_qubits(),
            right: right.num_qubits(),
        });
    }
    if left.num_clbits() != right.num_clbits() {
        differences.push(Difference::ClbitCount {
            left: left.num_clbits(),
            right: right.num_clbits(),
        });
    }

    let left_ops = normalize(left, options);
    let right_ops = normalize(right, options);
    if left_ops.len() != right_ops.len() {
        differences.push(Difference::OpCount {
            left: left_ops.len(),
            right: right_ops.len(),
        });
    }

    if options.strict_order {
        compare_sequences(&left_ops, &right_ops, options.tolerance, &mut differences);
    } else {
        compare_layers(left_ops, right_ops, options.tolerance, &mut differences);
    }

    debug!(
        left = left.name(),
        right = right.name(),
        differences = differences.len(),
        "compared circuits"
    );
    EquivalenceReport::from_differences(differences)
}

/// Compare with default options.
pub fn equivalent(left: &Circuit, right: &Circuit) -> bool {
    check(left, right, &EquivalenceOptions::default()).equivalent
}

fn normalize(circuit: &Circuit, options: &EquivalenceOptions) -> Vec<Instruction> {
    circuit
        .instructions()
        .iter()
        .flat_map(Instruction::split_broadcast)
        .filter(|inst| !(options.ignore_barriers && inst.is_barrier()))
        .collect()
}

fn compare_sequences(
    left: &[Instruction],
    right: &[Instruction],
    tolerance: f64,
    differences: &mut Vec<Difference>,
) {
    for position in 0..left.len().max(right.len()) {
        let l = left.get(position);
        let r = right.get(position);
        let same = match (l, r) {
            (Some(a), Some(b)) => instructions_match(a, b, tolerance),
            _ => false,
        };
        if !same {
            differences.push(Difference::Instruction {
                position,
                left: l.map(describe),
                right: r.map(describe),
            });
        }
    }
}

fn compare_layers(
    left: Vec<Instruction>,
    right: Vec<Instruction>,
    tolerance: f64,
    differences: &mut Vec<Difference>,
) {
    let left_dag = CircuitDag::from_instructions(left);
    let right_dag = CircuitDag::from_instructions(right);
    let left_layers = left_dag.layers();
    let right_layers = right_dag.layers();

    for index in 0..left_layers.len().max(right_layers.len()) {
        let mut l = left_layers.get(index).cloned().unwrap_or_default();
        let mut r = right_layers.get(index).cloned().unwrap_or_default();
        // Operations in one layer touch disjoint wires, so this key is unique
        // within the layer.
        l.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        r.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

        let same = l.len() == r.len()
            && l
                .iter()
                .zip(&r)
                .all(|(a, b)| instructions_match(a, b, tolerance));
        if !same {
            differences.push(Difference::Layer {
                index,
                left: l.into_iter().map(describe).collect(),
                right: r.into_iter().map(describe).collect(),
            });
        }
    }
}

fn sort_key(inst: &Instruction) -> (Vec<u32>, Vec<u32>, &str) {
    (
        inst.qubits.iter().map(|q| q.0).collect(),
        inst.clbits.iter().map(|c| c.0).collect(),
        inst.name(),
    )
}

fn instructions_match(a: &Instruction, b: &Instruction, tolerance: f64) -> bool {
    if a.qubits != b.qubits || a.clbits != b.clbits {
        return false;
    }
    match (&a.kind, &b.kind) {
        (InstructionKind::Gate(ga), InstructionKind::Gate(gb)) => gates_match(ga, gb, tolerance),
        (InstructionKind::Measure, InstructionKind::Measure)
        | (InstructionKind::Reset, InstructionKind::Reset)
        | (InstructionKind::Barrier, InstructionKind::Barrier) => true,
        (InstructionKind::Delay { duration: da }, InstructionKind::Delay { duration: db }) => {
            da == db
        }
        _ => false,
    }
}

fn gates_match(a: &Gate, b: &Gate, tolerance: f64) -> bool {
    if a.name() != b.name() {
        return false;
    }
    let pa = a.kind.parameters();
    let pb = b.kind.parameters();
    if pa.len() != pb.len() || !pa.iter().zip(&pb).all(|(x, y)| x.approx_eq(y, tolerance)) {
        return false;
    }
    match (&a.kind, &b.kind) {
        (GateKind::Custom(ca), GateKind::Custom(cb)) => match (&ca.matrix, &cb.matrix) {
            (Some(ma), Some(mb)) => {
                ma.len() == mb.len()
                    && ma.iter().zip(mb).all(|(x, y)| (x - y).norm() <= tolerance)
            }
            (None, None) => true,
            _ => false,
        },
        _ => true,
    }
}

/// Short textual form of an operation, e.g. `rx(0.5) q0` or `measure q1 -> c1`.
pub fn describe(inst: &Instruction) -> String {
    let mut out = inst.name().to_string();
    if let Some(gate) = inst.as_gate() {
        let params = gate.kind.parameters();
        if !params.is_empty() {
            let rendered: Vec<String> = params.iter().map(|p| p.simplify().to_string()).collect();
            out.push('(');
            out.push_str(&rendered.join(", "));
            out.push(')');
        }
    }
    if let InstructionKind::Delay { duration } = inst.kind {
        out.push_str(&format!("[{duration}]"));
    }
    let qubits: Vec<String> = inst.qubits.iter().map(ToString::to_string).collect();
    if !qubits.is_empty() {
        out.push(' ');
        out.push_str(&qubits.join(","));
    }
    if !inst.clbits.is_empty() {
        let clbits: Vec<String> = inst.clbits.iter().map(ToString::to_string).collect();
        out.push_str(" -> ");
        out.push_str(&clbits.join(","));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterExpression;
    use crate::qubit::{ClbitId, QubitId};

    #[test]
    fn test_identical_circuits_are_equivalent() {
        let a = Circuit::ghz(3).unwrap();
        let b = Circuit::ghz(3).unwrap();
        let report = check(&a, &b, &EquivalenceOptions::default());
        assert!(report.equivalent);
        assert_eq!(report.to_string(), "circuits are equivalent");
    }

    #[test]
    fn test_names_and_registers_ignored() {
        let mut a = Circuit::new("a");
        a.add_qreg("q", 2);
        a.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();

        let mut b = Circuit::with_size("b", 2, 0);
        b.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();

        assert!(equivalent(&a, &b));
    }

    #[test]
    fn test_disjoint_reordering_is_equivalent() {
        let mut a = Circuit::with_size("a", 2, 0);
        a.h(QubitId(0)).unwrap().x(QubitId(1)).unwrap();
        let mut b = Circuit::with_size("b", 2, 0);
        b.x(QubitId(1)).unwrap().h(QubitId(0)).unwrap();

        assert!(equivalent(&a, &b));

        let strict = EquivalenceOptions {
            strict_order: true,
            ..EquivalenceOptions::default()
        };
        let report = check(&a, &b, &strict);
        assert!(!report.equivalent);
        assert_eq!(report.differences.len(), 2);
    }

    #[test]
    fn test_parameter_tolerance() {
        let mut a = Circuit::with_size("a", 1, 0);
        a.rx(0.5, QubitId(0)).unwrap();
        let mut b = Circuit::with_size("b", 1, 0);
        b.rx(0.5 + 1e-12, QubitId(0)).unwrap();
        assert!(equivalent(&a, &b));

        let mut c = Circuit::with_size("c", 1, 0);
        c.rx(0.6, QubitId(0)).unwrap();
        let report = check(&a, &c, &EquivalenceOptions::default());
        assert!(matches!(&report.differences[0], Difference::Layer { index: 0, .. }));
    }

    #[test]
    fn test_symbols_compare_by_name() {
        let mut a = Circuit::with_size("a", 1, 0);
        a.rz(ParameterExpression::symbol("theta"), QubitId(0)).unwrap();
        let mut b = Circuit::with_size("b", 1, 0);
        b.rz(ParameterExpression::symbol("phi"), QubitId(0)).unwrap();
        assert!(!equivalent(&a, &b));
        assert!(equivalent(&a, &a.clone()));
    }

    #[test]
    fn test_width_differences_reported() {
        let a = Circuit::with_size("a", 2, 2);
        let b = Circuit::with_size("b", 3, 1);
        let report = check(&a, &b, &EquivalenceOptions::default());
        assert_eq!(
            report.differences,
            vec![
                Difference::QubitCount { left: 2, right: 3 },
                Difference::ClbitCount { left: 2, right: 1 },
            ]
        );
    }

    #[test]
    fn test_barriers_ignored_by_default() {
        let mut a = Circuit::with_size("a", 2, 0);
        a.h(QubitId(0)).unwrap().barrier_all().unwrap();
        let mut b = Circuit::with_size("b", 2, 0);
        b.h(QubitId(0)).unwrap();
        assert!(equivalent(&a, &b));

        let keep = EquivalenceOptions {
            ignore_barriers: false,
            ..EquivalenceOptions::default()
        };
        assert!(!check(&a, &b, &keep).equivalent);
    }

    #[test]
    fn test_broadcast_measure_matches_single_measures() {
        let mut a = Circuit::with_size("a", 2, 2);
        a.measure_all().unwrap();
        let mut b = Circuit::with_size("b", 2, 2);
        b.measure(QubitId(1), ClbitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();
        assert!(equivalent(&a, &b));
    }

    #[test]
    fn test_describe() {
        let inst = Instruction::measure(QubitId(1), ClbitId(0));
        assert_eq!(describe(&inst), "measure q1 -> c0");
    }
}
