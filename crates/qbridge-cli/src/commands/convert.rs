//! Convert command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use console::style;

use qbridge_adapter_braket::{self as braket, jaqcd, to_openqasm};
use qbridge_adapter_qiskit::{QuantumCircuit, qasm2};
use qbridge_convert::Converter;

use super::common::{CircuitFormat, LoadedCircuit, Sdk, load_circuit, load_config, write_output};

/// Arguments of the convert command.
pub struct ConvertArgs<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub from: Option<Sdk>,
    pub format: CircuitFormat,
    pub config: Option<&'a Path>,
    pub verbatim: bool,
    pub no_implicit_measure: bool,
    pub lenient_result_types: bool,
}

/// Execute the convert command.
pub fn execute(args: &ConvertArgs<'_>) -> Result<()> {
    let mut config = load_config(args.config)?;
    if args.verbatim {
        config.braket.verbatim = true;
    }
    if args.no_implicit_measure {
        config.braket.implicit_measure_all = false;
    }
    if args.lenient_result_types {
        config.braket.strict_result_types = false;
    }
    let converter = Converter::new(config)?;

    let text = match load_circuit(args.input, args.from)? {
        LoadedCircuit::Qiskit(qc) => {
            status(
                "Qiskit",
                "Braket",
                args.input,
                &format!("{} qubits, {} ops", qc.num_qubits(), qc.size()),
                args.output,
            );
            encode_braket(&converter.to_braket(&qc)?, args.format)?
        }
        LoadedCircuit::Braket(circ) => {
            status(
                "Braket",
                "Qiskit",
                args.input,
                &format!(
                    "{} qubits, {} instructions",
                    circ.qubit_count(),
                    circ.instructions().len()
                ),
                args.output,
            );
            encode_qiskit(&converter.to_qiskit(&circ)?, args.format)?
        }
    };

    write_output(&text, args.output)?;
    if let Some(path) = args.output {
        eprintln!("{} Wrote {}", style("✓").green().bold(), style(path.display()).green());
    }
    Ok(())
}

/// Progress goes to stderr so converted output on stdout stays parseable.
fn status(from: &str, to: &str, input: &Path, summary: &str, output: Option<&Path>) {
    if output.is_none() {
        return;
    }
    eprintln!(
        "{} Converting {} ({}) from {} to {}",
        style("→").cyan().bold(),
        style(input.display()).green(),
        summary,
        style(from).yellow(),
        style(to).yellow()
    );
}

fn encode_braket(circuit: &braket::Circuit, format: CircuitFormat) -> Result<String> {
    Ok(match format {
        CircuitFormat::Json => circuit.to_json()?,
        CircuitFormat::Jaqcd => jaqcd::to_json(circuit)?,
        CircuitFormat::Openqasm => to_openqasm(circuit)?,
        CircuitFormat::Qasm2 => bail!("qasm2 output needs a Qiskit circuit; use json, jaqcd or openqasm"),
    })
}

fn encode_qiskit(circuit: &QuantumCircuit, format: CircuitFormat) -> Result<String> {
    Ok(match format {
        CircuitFormat::Json => circuit.to_json()?,
        CircuitFormat::Qasm2 => qasm2::dumps(circuit)?,
        CircuitFormat::Jaqcd | CircuitFormat::Openqasm => {
            bail!("jaqcd and openqasm output need a Braket circuit; use json or qasm2")
        }
    })
}
