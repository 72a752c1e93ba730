//! Target command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use console::style;

use qbridge_adapter_braket::DeviceCapabilities;
use qbridge_adapter_braket::device::{self, LOCAL_SV};
use qbridge_adapter_qiskit::Target;
use qbridge_convert::{aws_device_to_target, local_simulator_to_target};

use super::common::{ReportFormat, render};

/// Execute the target command.
pub fn execute(
    device: Option<&str>,
    capabilities: Option<&Path>,
    format: ReportFormat,
) -> Result<()> {
    let target = match (device, capabilities) {
        (Some(name), _) => target_for_name(name)?,
        (None, Some(path)) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let caps = DeviceCapabilities::from_json(&json)
                .with_context(|| format!("Invalid device capabilities in {}", path.display()))?;
            aws_device_to_target(&caps)?
        }
        (None, None) => bail!("Pass --device or --capabilities"),
    };

    if let Some(text) = render(&target, format)? {
        println!("{text}");
        return Ok(());
    }
    print_table(&target);
    Ok(())
}

/// Resolve a friendly name, an ARN or the local simulator.
pub fn target_for_name(name: &str) -> Result<Target> {
    if name.eq_ignore_ascii_case("local") || name == LOCAL_SV {
        return Ok(local_simulator_to_target(&device::local_simulator())?);
    }
    let arn = device::arn_for_name(name).unwrap_or(name);
    let caps = device::capabilities_for_device(arn).with_context(|| {
        format!("Unknown device '{name}'; pass a capabilities file with --capabilities")
    })?;
    Ok(aws_device_to_target(&caps)?)
}

fn print_table(target: &Target) {
    println!(
        "{} {}\n",
        style("Target").cyan().bold(),
        target.description.as_deref().unwrap_or("(no description)")
    );
    println!("  Qubits:       {}", target.num_qubits());
    println!("  Instructions: {}", target.len());
    println!("  Couplings:    {}\n", target.coupling_edges().len());

    for name in target.instruction_names() {
        let Some(op) = target.operation(name) else {
            continue;
        };
        let qargs = target
            .qargs_for(name)
            .map_or_else(|| "all".to_string(), |q| q.len().to_string());
        println!(
            "  {:<14} qubits={} params={} qargs={}",
            style(name).bold(),
            op.num_qubits,
            op.params.len(),
            qargs
        );
    }
}
