//! Braket-dialect OpenQASM 3 output.
//!
//! Mirrors what the Braket SDK submits for the `braket.ir.openqasm.program`
//! action: `input float` declarations for free parameters, gate modifiers
//! for controls and powers, `#pragma braket` lines for verbatim boxes,
//! unitaries and result types. Circuits without result types measure every
//! used qubit.

use std::fmt::Write;

use num_complex::Complex64;

use crate::circuit::Circuit;
use crate::error::BraketResult;
use crate::gates::Gate;
use crate::instruction::{CompilerDirective, Instruction, Operator};
use crate::result_types::ResultType;

/// Render a circuit as an OpenQASM 3 program.
///
/// Circuits containing a verbatim box address physical qubits (`$n`);
/// others declare a `qubit` register sized to the highest index used.
pub fn to_openqasm(circuit: &Circuit) -> BraketResult<String> {
    let mut out = String::from("OPENQASM 3.0;\n");
    let physical = circuit
        .instructions()
        .iter()
        .any(|i| i.compiler_directive().is_some());
    let qubit = |q: u32| {
        if physical {
            format!("${q}")
        } else {
            format!("q[{q}]")
        }
    };

    for param in circuit.parameters() {
        writeln!(out, "input float {param};").ok();
    }

    let qubits = circuit.qubits();
    let measure_all = circuit.result_types().is_empty() && !qubits.is_empty();
    if measure_all {
        writeln!(out, "bit[{}] b;", qubits.len()).ok();
    }
    if !physical {
        if let Some(&max) = qubits.last() {
            writeln!(out, "qubit[{}] q;", max + 1).ok();
        }
    }

    for inst in circuit.instructions() {
        emit_instruction(&mut out, inst, &qubit);
    }

    if measure_all {
        for (i, &q) in qubits.iter().enumerate() {
            writeln!(out, "b[{i}] = measure {};", qubit(q)).ok();
        }
    }
    for rt in circuit.result_types() {
        writeln!(out, "#pragma braket result {}", result_type(rt, &qubit)).ok();
    }

    Ok(out)
}

fn emit_instruction(out: &mut String, inst: &Instruction, qubit: &impl Fn(u32) -> String) {
    let gate = match inst.operator() {
        Operator::CompilerDirective(CompilerDirective::StartVerbatimBox) => {
            out.push_str("#pragma braket verbatim\nbox{\n");
            return;
        }
        Operator::CompilerDirective(CompilerDirective::EndVerbatimBox) => {
            out.push_str("}\n");
            return;
        }
        Operator::Gate(gate) => gate,
    };
    let args = inst.qubits().map(qubit).collect::<Vec<_>>().join(", ");

    if let Gate::Unitary {
        matrix,
        qubit_count,
    } = gate
    {
        writeln!(
            out,
            "#pragma braket unitary({}) {args}",
            format_matrix(matrix, 1usize << qubit_count)
        )
        .ok();
        return;
    }

    let mut prefix = String::new();
    for &bit in inst.control_state() {
        prefix.push_str(if bit == 0 { "negctrl @ " } else { "ctrl @ " });
    }
    if inst.power() != 1.0 {
        write!(prefix, "pow({}) @ ", inst.power()).ok();
    }

    let angles = gate.angles();
    let params = if angles.is_empty() {
        String::new()
    } else {
        let joined = angles
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("({joined})")
    };
    writeln!(out, "{prefix}{}{params} {args};", gate.name()).ok();
}

fn result_type(rt: &ResultType, qubit: &impl Fn(u32) -> String) -> String {
    let targets = if rt.target().is_empty() {
        "all".to_string()
    } else {
        rt.target().iter().map(|&q| qubit(q)).collect::<Vec<_>>().join(", ")
    };
    let observed = |obs: &str| {
        if rt.target().is_empty() {
            format!("{obs} all")
        } else {
            format!("{obs}({targets})")
        }
    };
    match rt {
        ResultType::Sample { observable, .. } => format!("sample {}", observed(observable.name())),
        ResultType::Expectation { observable, .. } => {
            format!("expectation {}", observed(observable.name()))
        }
        ResultType::Variance { observable, .. } => {
            format!("variance {}", observed(observable.name()))
        }
        ResultType::Probability { .. } => format!("probability {targets}"),
        ResultType::StateVector => "state_vector".to_string(),
        ResultType::Amplitude { states } => {
            let quoted = states
                .iter()
                .map(|s| format!("\"{s}\""))
                .collect::<Vec<_>>()
                .join(", ");
            format!("amplitude {quoted}")
        }
    }
}

fn format_complex(c: Complex64) -> String {
    match (c.re == 0.0, c.im == 0.0) {
        (_, true) => format!("{}", c.re),
        (true, false) => format!("{}im", c.im),
        (false, false) if c.im < 0.0 => format!("{}-{}im", c.re, -c.im),
        (false, false) => format!("{}+{}im", c.re, c.im),
    }
}

fn format_matrix(matrix: &[Complex64], dim: usize) -> String {
    let rows = matrix
        .chunks(dim)
        .map(|row| {
            let cells = row
                .iter()
                .map(|&c| format_complex(c))
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{cells}]")
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{rows}]")
}
