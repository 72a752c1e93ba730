//! qbridge Adapter for Amazon Braket
//!
//! A native model of Braket's gate-model circuits and its conversions to
//! and from the qbridge IR.
//!
//! # Contents
//!
//! | Module | Braket concept |
//! |--------|----------------|
//! | [`gates`] | `braket.circuits.gates`, `FreeParameter` |
//! | [`instruction`] | `Instruction`, control modifiers, compiler directives |
//! | [`result_types`] | `Sample`, `Probability`, `Expectation`, ... |
//! | [`circuit`] | `Circuit` with its fluent builder |
//! | [`jaqcd`] | `braket.ir.jaqcd.program` JSON |
//! | [`openqasm`] | `braket.ir.openqasm.program` text |
//! | [`device`] | device capabilities and known ARNs |
//!
//! # Measurement
//!
//! Braket circuits carry no measurement instructions. A circuit without
//! result types is measured on every qubit; [`to_ir`] makes that explicit
//! and [`from_ir`] leaves a final full measurement implicit again.
//!
//! # Example
//!
//! ```rust
//! use qbridge_adapter_braket::{Circuit, from_ir, to_ir};
//!
//! let mut circ = Circuit::new();
//! circ.h(0).unwrap().cnot(0, 1).unwrap();
//!
//! let ir = to_ir(&circ).unwrap();
//! assert!(ir.has_terminal_measure_all());
//! assert_eq!(from_ir(&ir).unwrap(), circ);
//! ```

pub mod circuit;
pub mod device;
mod error;
pub mod export;
pub mod gates;
pub mod import;
pub mod instruction;
pub mod jaqcd;
pub mod openqasm;
pub mod result_types;

pub use circuit::Circuit;
pub use device::{DeviceCapabilities, Paradigm, Provider};
pub use error::{BraketError, BraketResult};
pub use export::from_ir;
pub use gates::{Angle, FreeParameter, Gate};
pub use import::{ImportOptions, to_ir, to_ir_with};
pub use instruction::{CompilerDirective, Instruction, Operator, QubitSet};
pub use openqasm::to_openqasm;
pub use result_types::{Observable, ResultType};
