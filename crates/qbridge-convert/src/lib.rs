//! qbridge Conversion
//!
//! Conversion functions between the Qiskit and Amazon Braket circuit
//! models, built on the qbridge IR.
//!
//! # Overview
//!
//! | Function | Direction |
//! |---|---|
//! | [`convert_qiskit_to_braket_circuit`] | Qiskit → Braket |
//! | [`from_braket_circuit`] | Braket → Qiskit |
//! | [`wrap_circuits_in_verbatim_box`] | Braket → Braket |
//! | [`aws_device_to_target`] | Braket device → Qiskit `Target` |
//! | [`braket_roundtrip`] / [`qiskit_roundtrip`] | there and back, with an IR comparison |
//!
//! [`Converter`] bundles the same operations behind a
//! [`ConversionConfig`] loaded from YAML and `QBRIDGE_*` environment
//! variables.
//!
//! # Example
//!
//! ```rust
//! use qbridge_adapter_braket::Circuit;
//! use qbridge_convert::{convert_qiskit_to_braket_circuit, from_braket_circuit};
//!
//! let mut circ = Circuit::new();
//! circ.h(0).unwrap().cnot(0, 1).unwrap();
//!
//! let qc = from_braket_circuit(&circ).unwrap();
//! assert_eq!(qc.count_ops()["measure"], 2);
//!
//! let back = convert_qiskit_to_braket_circuit(&qc).unwrap();
//! assert_eq!(back, circ);
//! ```

pub mod circuits;
pub mod config;
pub mod converter;
mod error;
pub mod roundtrip;
pub mod target;

pub use circuits::{
    convert_qiskit_to_braket_circuit, convert_qiskit_to_braket_circuits, from_braket_circuit,
    from_braket_circuit_with, from_braket_circuits, wrap_circuits_in_verbatim_box,
};
pub use config::{BraketConfig, ConfigError, ConversionConfig, EquivalenceConfig};
pub use converter::Converter;
pub use error::{ConvertError, ConvertResult};
pub use roundtrip::{RoundTripReport, braket_roundtrip, qiskit_roundtrip};
pub use target::{aws_device_to_target, braket_operation_to_qiskit, local_simulator_to_target};
