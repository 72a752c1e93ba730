//! Roundtrip command implementation.

use std::path::Path;

use anyhow::{Result, bail};
use console::style;
use serde::Serialize;

use qbridge_convert::{Converter, RoundTripReport};

use super::common::{LoadedCircuit, ReportFormat, Sdk, load_circuit, load_config, render};

/// Execute the roundtrip command.
pub fn execute(
    input: &Path,
    from: Option<Sdk>,
    config: Option<&Path>,
    strict_order: bool,
    tolerance: Option<f64>,
    format: ReportFormat,
) -> Result<()> {
    let mut config = load_config(config)?;
    if strict_order {
        config.equivalence.strict_order = true;
    }
    if let Some(tolerance) = tolerance {
        config.equivalence.tolerance = tolerance;
    }
    let converter = Converter::new(config)?;

    let preserved = match load_circuit(input, from)? {
        LoadedCircuit::Qiskit(qc) => {
            report(&converter.qiskit_roundtrip(&qc)?, "Qiskit", "Braket", format)?
        }
        LoadedCircuit::Braket(circ) => {
            report(&converter.braket_roundtrip(&circ)?, "Braket", "Qiskit", format)?
        }
    };

    if !preserved {
        bail!("Round trip changed the circuit");
    }
    Ok(())
}

fn report<C: Serialize>(
    report: &RoundTripReport<C>,
    from: &str,
    via: &str,
    format: ReportFormat,
) -> Result<bool> {
    if let Some(text) = render(report, format)? {
        println!("{text}");
        return Ok(report.is_preserved());
    }

    println!(
        "{} {} → {} → {}\n",
        style("Round trip").cyan().bold(),
        from,
        via,
        from
    );
    println!("  Identical:  {}", yes_no(report.identical));
    println!("  Equivalent: {}", yes_no(report.equivalence.equivalent));

    if !report.equivalence.differences.is_empty() {
        println!("\n  Differences:");
        for difference in &report.equivalence.differences {
            println!("    {} {}", style("•").yellow(), difference);
        }
    }
    Ok(report.is_preserved())
}

fn yes_no(value: bool) -> console::StyledObject<&'static str> {
    if value {
        style("yes").green()
    } else {
        style("no").red()
    }
}
