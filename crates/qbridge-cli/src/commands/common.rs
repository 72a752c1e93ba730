//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

use qbridge_adapter_braket::{self as braket, jaqcd};
use qbridge_adapter_qiskit::QuantumCircuit;
use qbridge_convert::ConversionConfig;

/// Circuit model of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sdk {
    /// Qiskit `QuantumCircuit` JSON.
    Qiskit,
    /// Braket circuit JSON or a JAQCD program.
    Braket,
}

/// Output encoding for converted circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CircuitFormat {
    /// Native JSON of the output model.
    Json,
    /// JAQCD program (Braket output only).
    Jaqcd,
    /// Braket OpenQASM 3 (Braket output only).
    Openqasm,
    /// OpenQASM 2 (Qiskit output only).
    Qasm2,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary.
    Table,
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

/// A circuit read from disk.
#[derive(Debug, Clone)]
pub enum LoadedCircuit {
    /// Qiskit model.
    Qiskit(QuantumCircuit),
    /// Braket model.
    Braket(braket::Circuit),
}

/// Guess the circuit model of a JSON document from its top-level keys.
pub fn detect_sdk(value: &Value) -> Option<Sdk> {
    let obj = value.as_object()?;
    if obj.contains_key("qregs") || obj.contains_key("data") {
        Some(Sdk::Qiskit)
    } else if obj.contains_key("braketSchemaHeader") || obj.contains_key("instructions") {
        Some(Sdk::Braket)
    } else {
        None
    }
}

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &Path, from: Option<Sdk>) -> Result<LoadedCircuit> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&source)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let sdk = match from {
        Some(sdk) => sdk,
        None => detect_sdk(&value).with_context(|| {
            format!(
                "Cannot tell whether {} holds a Qiskit or Braket circuit; pass --from",
                path.display()
            )
        })?,
    };

    match sdk {
        Sdk::Qiskit => Ok(LoadedCircuit::Qiskit(
            QuantumCircuit::from_json(&source).context("Invalid Qiskit circuit")?,
        )),
        Sdk::Braket if value.get("braketSchemaHeader").is_some() => Ok(LoadedCircuit::Braket(
            jaqcd::from_json(&source).context("Invalid JAQCD program")?,
        )),
        Sdk::Braket => Ok(LoadedCircuit::Braket(
            braket::Circuit::from_json(&source).context("Invalid Braket circuit")?,
        )),
    }
}

/// Load the configuration file (if any) and environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<ConversionConfig> {
    ConversionConfig::load(path).context("Failed to load configuration")
}

/// Write `text` to `output`, or print it.
pub fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

/// Render a serializable report as JSON or YAML.
pub fn render<T: Serialize>(value: &T, format: ReportFormat) -> Result<Option<String>> {
    match format {
        ReportFormat::Table => Ok(None),
        ReportFormat::Json => Ok(Some(serde_json::to_string_pretty(value)?)),
        ReportFormat::Yaml => Ok(Some(serde_yaml_ng::to_string(value)?)),
    }
}
