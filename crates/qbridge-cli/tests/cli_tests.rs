//! CLI command parsing and end-to-end tests.
//!
//! Argument parsing is checked on a mirror of the CLI struct via clap
//! `try_parse_from`; the commands themselves run the built binary.

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand, ValueEnum};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum Sdk {
        Qiskit,
        Braket,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum CircuitFormat {
        Json,
        Jaqcd,
        Openqasm,
        Qasm2,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum ReportFormat {
        Table,
        Json,
        Yaml,
    }

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "qbridge")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[arg(short, long, global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Convert {
            #[arg(short, long)]
            input: PathBuf,
            #[arg(short, long)]
            output: Option<PathBuf>,
            #[arg(long, value_enum)]
            from: Option<Sdk>,
            #[arg(short, long, value_enum, default_value = "json")]
            format: CircuitFormat,
            #[arg(long)]
            verbatim: bool,
            #[arg(long)]
            no_implicit_measure: bool,
            #[arg(long)]
            lenient_result_types: bool,
        },
        Roundtrip {
            #[arg(short, long)]
            input: PathBuf,
            #[arg(long, value_enum)]
            from: Option<Sdk>,
            #[arg(long)]
            strict_order: bool,
            #[arg(long)]
            tolerance: Option<f64>,
            #[arg(short, long, value_enum, default_value = "table")]
            format: ReportFormat,
        },
        Target {
            #[arg(short, long, conflicts_with = "capabilities")]
            device: Option<String>,
            #[arg(long)]
            capabilities: Option<PathBuf>,
            #[arg(short, long, value_enum, default_value = "table")]
            format: ReportFormat,
        },
        Demo {
            #[arg(short = 'n', long, default_value = "3")]
            qubits: u32,
        },
        Version,
    }

    #[test]
    fn test_parse_convert_minimal() {
        let cli = TestCli::try_parse_from(["qbridge", "convert", "-i", "bell.json"]).unwrap();
        match cli.command {
            TestCommands::Convert {
                input,
                output,
                from,
                format,
                verbatim,
                no_implicit_measure,
                lenient_result_types,
            } => {
                assert_eq!(input, PathBuf::from("bell.json"));
                assert!(output.is_none());
                assert!(from.is_none());
                assert_eq!(format, CircuitFormat::Json);
                assert!(!verbatim && !no_implicit_measure && !lenient_result_types);
            }
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_parse_convert_with_all_args() {
        let cli = TestCli::try_parse_from([
            "qbridge",
            "-vv",
            "convert",
            "-i",
            "in.json",
            "-o",
            "out.qasm",
            "--from",
            "qiskit",
            "-f",
            "openqasm",
            "--verbatim",
            "--no-implicit-measure",
            "--lenient-result-types",
            "-c",
            "qbridge.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("qbridge.yaml")));
        match cli.command {
            TestCommands::Convert {
                output,
                from,
                format,
                verbatim,
                no_implicit_measure,
                lenient_result_types,
                ..
            } => {
                assert_eq!(output, Some(PathBuf::from("out.qasm")));
                assert_eq!(from, Some(Sdk::Qiskit));
                assert_eq!(format, CircuitFormat::Openqasm);
                assert!(verbatim && no_implicit_measure && lenient_result_types);
            }
            _ => panic!("Expected Convert command"),
        }
    }

    #[test]
    fn test_parse_convert_missing_input() {
        assert!(TestCli::try_parse_from(["qbridge", "convert"]).is_err());
    }

    #[test]
    fn test_parse_convert_unknown_format() {
        let result =
            TestCli::try_parse_from(["qbridge", "convert", "-i", "a.json", "-f", "quil"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_roundtrip_options() {
        let cli = TestCli::try_parse_from([
            "qbridge",
            "roundtrip",
            "-i",
            "a.json",
            "--strict-order",
            "--tolerance",
            "1e-6",
            "-f",
            "yaml",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Roundtrip {
                strict_order,
                tolerance,
                format,
                from,
                ..
            } => {
                assert!(strict_order);
                assert_eq!(tolerance, Some(1e-6));
                assert_eq!(format, ReportFormat::Yaml);
                assert!(from.is_none());
            }
            _ => panic!("Expected Roundtrip command"),
        }
    }

    #[test]
    fn test_parse_target_device() {
        let cli = TestCli::try_parse_from(["qbridge", "target", "-d", "ionq"]).unwrap();
        match cli.command {
            TestCommands::Target {
                device,
                capabilities,
                format,
            } => {
                assert_eq!(device.as_deref(), Some("ionq"));
                assert!(capabilities.is_none());
                assert_eq!(format, ReportFormat::Table);
            }
            _ => panic!("Expected Target command"),
        }
    }

    #[test]
    fn test_parse_target_device_conflicts_with_capabilities() {
        let result = TestCli::try_parse_from([
            "qbridge",
            "target",
            "-d",
            "ionq",
            "--capabilities",
            "caps.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_demo_default_qubits() {
        let cli = TestCli::try_parse_from(["qbridge", "demo"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Demo { qubits: 3 }));

        let cli = TestCli::try_parse_from(["qbridge", "demo", "-n", "5"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Demo { qubits: 5 }));
    }

    #[test]
    fn test_parse_version() {
        let cli = TestCli::try_parse_from(["qbridge", "version"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_parse_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["qbridge", "submit"]).is_err());
    }
}

// ============================================================================
// Binary end-to-end
// ============================================================================

mod binary {
    use std::fs;
    use std::path::Path;
    use std::process::{Command, Output};

    use qbridge_adapter_braket::{self as braket, device};
    use qbridge_adapter_qiskit::{QuantumCircuit, Target};

    fn qbridge(args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_qbridge"));
        for var in [
            "QBRIDGE_CONFIG",
            "QBRIDGE_LOG",
            "QBRIDGE_IMPLICIT_MEASURE_ALL",
            "QBRIDGE_STRICT_RESULT_TYPES",
            "QBRIDGE_VERBATIM",
            "QBRIDGE_STRICT_ORDER",
            "QBRIDGE_IGNORE_BARRIERS",
            "QBRIDGE_TOLERANCE",
        ] {
            cmd.env_remove(var);
        }
        cmd.args(args).output().unwrap()
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn stderr(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    fn write_braket_bell(dir: &Path) -> String {
        let mut bell = braket::Circuit::new();
        bell.h(0).unwrap().cnot(0, 1).unwrap();
        let path = dir.join("bell.json");
        fs::write(&path, bell.to_json().unwrap()).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn write_qiskit(dir: &Path, qc: &QuantumCircuit) -> String {
        let path = dir.join("qiskit.json");
        fs::write(&path, qc.to_json().unwrap()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_convert_braket_file_to_qiskit_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_braket_bell(dir.path());
        let out = dir.path().join("out.json");

        let output = qbridge(&["convert", "-i", &input, "-o", out.to_str().unwrap()]);
        assert!(output.status.success(), "{}", stderr(&output));

        let qc = QuantumCircuit::from_json(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(qc.num_qubits(), 2);
        assert_eq!(qc.count_ops().get("measure"), Some(&2));
        assert!(stderr(&output).contains("Wrote"));
    }

    #[test]
    fn test_convert_to_qasm2_on_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_braket_bell(dir.path());

        let output = qbridge(&["convert", "-i", &input, "-f", "qasm2"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let text = stdout(&output);
        assert!(text.starts_with("OPENQASM 2.0;"));
        assert!(text.contains("cx q[0],q[1];"));
    }

    #[test]
    fn test_convert_qiskit_with_verbatim_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut qc = QuantumCircuit::new(1, 0);
        qc.rx(0.25, 0).unwrap();
        let input = write_qiskit(dir.path(), &qc);
        let config = dir.path().join("qbridge.yaml");
        fs::write(&config, "braket:\n  verbatim: true\n").unwrap();

        let output = qbridge(&[
            "convert",
            "-c",
            config.to_str().unwrap(),
            "-i",
            &input,
            "-f",
            "openqasm",
        ]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert!(stdout(&output).contains("#pragma braket verbatim"));
    }

    #[test]
    fn test_convert_rejects_format_of_other_sdk() {
        let dir = tempfile::tempdir().unwrap();
        let mut qc = QuantumCircuit::new(1, 0);
        qc.h(0).unwrap();
        let input = write_qiskit(dir.path(), &qc);

        let output = qbridge(&["convert", "-i", &input, "-f", "qasm2"]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("qasm2"));
    }

    #[test]
    fn test_convert_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let output = qbridge(&["convert", "-i", missing.to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("File not found"));
    }

    #[test]
    fn test_convert_undetectable_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.json");
        fs::write(&path, r#"{"circuit": "test"}"#).unwrap();

        let output = qbridge(&["convert", "-i", path.to_str().unwrap()]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("--from"));
    }

    #[test]
    fn test_roundtrip_braket_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_braket_bell(dir.path());

        let output = qbridge(&["roundtrip", "-i", &input, "-f", "json"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(report["identical"], true);
        assert_eq!(report["equivalence"]["equivalent"], true);
    }

    #[test]
    fn test_roundtrip_u_gate_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut qc = QuantumCircuit::new(1, 0);
        qc.u(0.1, 0.2, 0.3, 0).unwrap();
        let input = write_qiskit(dir.path(), &qc);

        let output = qbridge(&["roundtrip", "-i", &input]);
        assert_eq!(output.status.code(), Some(1));
        assert!(stdout(&output).contains("Differences"));
        assert!(stderr(&output).contains("Round trip changed the circuit"));
    }

    #[test]
    fn test_target_ionq_json() {
        let output = qbridge(&["target", "-d", "ionq", "-f", "json"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let target: Target = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(target.num_qubits(), 25);
        assert!(target.operation("measure").is_some());
    }

    #[test]
    fn test_target_from_capabilities_file() {
        let dir = tempfile::tempdir().unwrap();
        let caps = device::capabilities_for_device(device::OQC_LUCY).unwrap();
        let path = dir.path().join("lucy.json");
        fs::write(&path, caps.to_json().unwrap()).unwrap();

        let output = qbridge(&["target", "--capabilities", path.to_str().unwrap(), "-f", "json"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let target: Target = serde_json::from_str(&stdout(&output)).unwrap();
        assert_eq!(target.num_qubits(), 8);
    }

    #[test]
    fn test_target_unknown_device() {
        let output = qbridge(&["target", "-d", "quokka"]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("Unknown device 'quokka'"));
    }

    #[test]
    fn test_version() {
        let output = qbridge(&["version"]);
        assert!(output.status.success());
        let text = stdout(&output);
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
        assert!(text.contains("qbridge-convert"));
    }

    #[test]
    fn test_demo_runs_all_parts() {
        let output = qbridge(&["demo", "-n", "4"]);
        assert!(output.status.success(), "{}", stderr(&output));
        let text = stdout(&output);
        assert!(text.contains("[1]") && text.contains("[2]") && text.contains("[3]"));
        assert!(text.contains("OPENQASM 3.0;"));
    }

    #[test]
    fn test_demo_rejects_one_qubit() {
        let output = qbridge(&["demo", "-n", "1"]);
        assert!(!output.status.success());
    }
}
