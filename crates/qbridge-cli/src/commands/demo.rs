//! Demo command implementation.
//!
//! Walks through both conversion directions and a device target, printing
//! each intermediate form.

use std::f64::consts::PI;

use anyhow::{Result, bail};
use console::style;

use qbridge_adapter_braket::{self as braket, to_openqasm};
use qbridge_adapter_qiskit::{QuantumCircuit, qasm2};
use qbridge_convert::Converter;

use super::target::target_for_name;

/// Execute the demo command.
pub fn execute(qubits: u32) -> Result<()> {
    if qubits < 2 {
        bail!("The GHZ example needs at least 2 qubits, got {qubits}");
    }
    let converter = Converter::default();

    // Part 1: Braket → Qiskit → Braket
    section(1, "Braket Bell circuit to Qiskit and back");
    let mut bell = braket::Circuit::new();
    bell.h(0)?.cnot(0, 1)?;
    println!("Braket instructions: {}", bell.instructions().len());

    let qc = converter.to_qiskit(&bell)?;
    println!("\nQiskit circuit (OpenQASM 2):\n{}", qasm2::dumps(&qc)?);

    let back = converter.to_braket(&qc)?;
    println!("Returned circuit equals the original: {}", flag(back == bell));

    // Part 2: Qiskit → Braket → Qiskit
    section(2, &format!("Qiskit {qubits}-qubit GHZ circuit to Braket and back"));
    let mut ghz = QuantumCircuit::new(qubits, 0);
    ghz.h(0)?;
    for q in 0..qubits - 1 {
        ghz.cx(q, q + 1)?;
    }
    ghz.u(PI / 2.0, 0.0, PI, qubits - 1)?;
    ghz.measure_all()?;

    let circ = converter.to_braket(&ghz)?;
    println!("Braket circuit (OpenQASM 3):\n{}", to_openqasm(&circ)?);

    let report = converter.qiskit_roundtrip(&ghz)?;
    println!("Identical:  {}", flag(report.identical));
    println!("Equivalent: {}", flag(report.equivalence.equivalent));
    for difference in &report.equivalence.differences {
        println!("  {} {}", style("•").yellow(), difference);
    }
    println!(
        "{}",
        style("`u` has no Braket counterpart and returns as five rotations.").dim()
    );

    // Part 3: device → target
    section(3, "IonQ Aria as a Qiskit target");
    let target = target_for_name("ionq")?;
    println!(
        "{}",
        target.description.as_deref().unwrap_or("(no description)")
    );
    println!("Qubits:       {}", target.num_qubits());
    println!("Instructions: {}", target.instruction_names().join(", "));

    Ok(())
}

fn section(number: u32, title: &str) {
    println!(
        "\n{} {}\n",
        style(format!("[{number}]")).cyan().bold(),
        style(title).bold()
    );
}

fn flag(value: bool) -> console::StyledObject<bool> {
    if value {
        style(value).green()
    } else {
        style(value).red()
    }
}
