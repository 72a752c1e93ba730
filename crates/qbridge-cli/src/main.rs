//! qbridge Command-Line Interface
//!
//! Converts circuits between the Qiskit and Amazon Braket models, checks
//! round trips and maps Braket devices to Qiskit targets.
//!
//! ```text
//!   Qiskit ──┐                ┌── Qiskit
//!            ├──▶  qbridge IR ─┤
//!   Braket ──┘                └── Braket
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{CircuitFormat, ReportFormat, Sdk};
use commands::{convert, demo, roundtrip, target, version};

/// qbridge - convert quantum circuits between Qiskit and Amazon Braket
#[derive(Parser)]
#[command(name = "qbridge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "QBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a circuit file to the other SDK
    Convert {
        /// Input file (Qiskit JSON, Braket JSON or JAQCD)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input model; detected from the file if omitted
        #[arg(long, value_enum)]
        from: Option<Sdk>,

        /// Output encoding
        #[arg(short, long, value_enum, default_value = "json")]
        format: CircuitFormat,

        /// Wrap Braket output in a verbatim box
        #[arg(long)]
        verbatim: bool,

        /// Do not add measurements to Braket circuits without result types
        #[arg(long)]
        no_implicit_measure: bool,

        /// Skip Braket result types with no measurement counterpart
        #[arg(long)]
        lenient_result_types: bool,
    },

    /// Convert a circuit to the other SDK and back, and compare
    Roundtrip {
        /// Input file (Qiskit JSON, Braket JSON or JAQCD)
        #[arg(short, long)]
        input: PathBuf,

        /// Input model; detected from the file if omitted
        #[arg(long, value_enum)]
        from: Option<Sdk>,

        /// Compare instruction order instead of DAG layers
        #[arg(long)]
        strict_order: bool,

        /// Absolute tolerance for numeric parameters
        #[arg(long)]
        tolerance: Option<f64>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ReportFormat,
    },

    /// Show the Qiskit target for a Braket device
    Target {
        /// Device name or ARN (rigetti, ionq, forte, oqc, iqm, sv1, tn1, dm1, local)
        #[arg(short, long, conflicts_with = "capabilities")]
        device: Option<String>,

        /// Device capabilities JSON file
        #[arg(long)]
        capabilities: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ReportFormat,
    },

    /// Walk through both conversion directions with example circuits
    Demo {
        /// Number of qubits for the GHZ example
        #[arg(short = 'n', long, default_value = "3")]
        qubits: u32,
    },

    /// Show version information
    Version,
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env("QBRIDGE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            from,
            format,
            verbatim,
            no_implicit_measure,
            lenient_result_types,
        } => convert::execute(&convert::ConvertArgs {
            input: &input,
            output: output.as_deref(),
            from,
            format,
            config,
            verbatim,
            no_implicit_measure,
            lenient_result_types,
        }),

        Commands::Roundtrip {
            input,
            from,
            strict_order,
            tolerance,
            format,
        } => roundtrip::execute(&input, from, config, strict_order, tolerance, format),

        Commands::Target {
            device,
            capabilities,
            format,
        } => target::execute(device.as_deref(), capabilities.as_deref(), format),

        Commands::Demo { qubits } => demo::execute(qubits),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
