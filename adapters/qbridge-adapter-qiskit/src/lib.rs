//! qbridge Adapter for Qiskit
//!
//! A native model of Qiskit's circuit objects and its conversions to and
//! from the qbridge IR.
//!
//! # Contents
//!
//! - [`QuantumCircuit`] with registers, `data`, `find_bit`, `measure_all`
//!   and parameter assignment, following Qiskit semantics
//! - [`library`] constructors for the standard gates
//! - [`Target`] describing which instructions a backend supports on which
//!   qubits
//! - [`qasm2::dumps`] for OpenQASM 2.0 text
//! - [`to_ir`] / [`from_ir`] for the IR boundary
//!
//! # Example
//!
//! ```rust
//! use qbridge_adapter_qiskit::{QuantumCircuit, to_ir};
//!
//! let mut qc = QuantumCircuit::new(2, 0);
//! qc.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
//!
//! let ir = to_ir(&qc).unwrap();
//! assert!(ir.has_terminal_measure_all());
//! ```

pub mod circuit;
mod error;
pub mod export;
pub mod import;
pub mod library;
pub mod operation;
pub mod qasm2;
pub mod register;
pub mod target;

pub use circuit::{CircuitInstruction, QuantumCircuit};
pub use error::{QiskitError, QiskitResult};
pub use export::from_ir;
pub use import::to_ir;
pub use operation::{Operation, Param};
pub use register::{BitLocations, ClassicalRegister, Clbit, QuantumRegister, Qubit};
pub use target::{InstructionProperties, QargsMap, Target};
