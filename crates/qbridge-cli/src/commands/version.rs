//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Qiskit and Amazon Braket circuit conversion",
        style("qbridge").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qbridge-ir              Gate-level intermediate representation");
    println!("  qbridge-adapter-qiskit  Qiskit circuit model and targets");
    println!("  qbridge-adapter-braket  Braket circuit model and devices");
    println!("  qbridge-convert         Conversion and round-trip checks");
    println!("  qbridge-cli             Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/hiq-lab/qbridge").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
