//! OpenQASM 2.0 output in `qelib1.inc` style.

use std::f64::consts::PI;

use qbridge_ir::ParameterExpression;

use crate::circuit::{CircuitInstruction, QuantumCircuit};
use crate::error::{QiskitError, QiskitResult};
use crate::operation::Param;

/// Gates needing an inline definition, in dependency order.
const EXTRA_GATE_DEFS: &[(&str, &str)] = &[
    ("r", "gate r(param0,param1) q0 { u3(param0,param1 - pi/2,-param1 + pi/2) q0; }"),
    (
        "ryy",
        "gate ryy(param0) q0,q1 { rx(pi/2) q0; rx(pi/2) q1; cx q0,q1; rz(param0) q1; cx q0,q1; rx(-pi/2) q0; rx(-pi/2) q1; }",
    ),
    (
        "xx_plus_yy",
        "gate xx_plus_yy(param0,param1) q0,q1 { rz(param1) q0; rxx(param0/2) q0,q1; ryy(param0/2) q0,q1; rz(-param1) q0; }",
    ),
    (
        "ecr",
        "gate ecr q0,q1 { h q1; cx q0,q1; rz(pi/4) q1; cx q0,q1; h q1; x q0; h q1; cx q0,q1; rz(-pi/4) q1; cx q0,q1; h q1; }",
    ),
    (
        "iswap",
        "gate iswap q0,q1 { s q0; s q1; h q0; cx q0,q1; cx q1,q0; h q1; }",
    ),
];

/// Serialize a circuit as OpenQASM 2.0.
///
/// Gates outside `qelib1.inc` get inline definitions. `unitary` and
/// `delay` have no OpenQASM 2 spelling and are rejected.
pub fn dumps(circuit: &QuantumCircuit) -> QiskitResult<String> {
    let mut out = String::new();
    out.push_str("OPENQASM 2.0;\n");
    out.push_str("include \"qelib1.inc\";\n");

    let used = |name: &str| circuit.data().iter().any(|i| i.operation.name == name);
    for &(name, def) in EXTRA_GATE_DEFS {
        let needed = used(name) || (name == "ryy" && used("xx_plus_yy"));
        if needed {
            out.push_str(def);
            out.push('\n');
        }
    }

    for qreg in circuit.qregs() {
        out.push_str(&format!("qreg {}[{}];\n", qreg.name, qreg.size));
    }
    for creg in circuit.cregs() {
        out.push_str(&format!("creg {}[{}];\n", creg.name, creg.size));
    }

    for inst in circuit.data() {
        out.push_str(&emit_instruction(circuit, inst)?);
        out.push('\n');
    }

    Ok(out)
}

fn emit_instruction(circuit: &QuantumCircuit, inst: &CircuitInstruction) -> QiskitResult<String> {
    let op = &inst.operation;
    let qubits = inst
        .qubits
        .iter()
        .map(|&q| bit_name(circuit.qubit(q).map(|b| b.to_string()), q))
        .collect::<Vec<_>>()
        .join(",");

    match op.name.as_str() {
        "measure" => {
            let clbit = inst
                .clbits
                .first()
                .map(|&c| bit_name(circuit.clbit(c).map(|b| b.to_string()), c))
                .unwrap_or_default();
            Ok(format!("measure {qubits} -> {clbit};"))
        }
        "unitary" | "delay" => Err(QiskitError::UnsupportedOperation(format!(
            "{} in OpenQASM 2",
            op.name
        ))),
        _ if op.params.is_empty() => Ok(format!("{} {qubits};", op.name)),
        _ => {
            let params = op.params.iter().map(emit_param).collect::<Vec<_>>().join(",");
            Ok(format!("{}({params}) {qubits};", op.name))
        }
    }
}

fn bit_name(name: Option<String>, index: u32) -> String {
    name.unwrap_or_else(|| format!("q[{index}]"))
}

fn emit_param(param: &Param) -> String {
    match param {
        Param::Float(v) => emit_float(*v),
        Param::Parameter(name) => name.clone(),
        Param::Expression(expr) => emit_expression(expr),
    }
}

fn emit_float(v: f64) -> String {
    const FRACTIONS: &[(f64, &str)] = &[
        (PI, "pi"),
        (PI / 2.0, "pi/2"),
        (PI / 4.0, "pi/4"),
        (PI / 8.0, "pi/8"),
        (2.0 * PI, "2*pi"),
    ];
    for &(value, text) in FRACTIONS {
        if (v - value).abs() < 1e-10 {
            return text.to_string();
        }
        if (v + value).abs() < 1e-10 {
            return format!("-{text}");
        }
    }
    format!("{v}")
}

fn emit_expression(expr: &ParameterExpression) -> String {
    if let Some(v) = expr.as_f64() {
        return emit_float(v);
    }
    match expr {
        ParameterExpression::Constant(v) => emit_float(*v),
        ParameterExpression::Symbol(name) => name.clone(),
        ParameterExpression::Pi => "pi".into(),
        ParameterExpression::Neg(e) => format!("-({})", emit_expression(e)),
        ParameterExpression::Add(a, b) => format!("({} + {})", emit_expression(a), emit_expression(b)),
        ParameterExpression::Sub(a, b) => format!("({} - {})", emit_expression(a), emit_expression(b)),
        ParameterExpression::Mul(a, b) => format!("({}*{})", emit_expression(a), emit_expression(b)),
        ParameterExpression::Div(a, b) => format!("({}/{})", emit_expression(a), emit_expression(b)),
    }
}
