//! qbridge Circuit Intermediate Representation
//!
//! This crate provides the canonical circuit description that both SDK
//! adapters translate into and out of. A conversion from Qiskit to Braket
//! (or back) is always an import into [`Circuit`] followed by an export.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] flat indices,
//!   with optional register membership on [`Qubit`] / [`Clbit`]
//! - **Gates**: [`StandardGate`] for the gate vocabulary shared by both SDKs
//!   and [`CustomGate`] for named gates and raw unitaries
//! - **Parameters**: [`ParameterExpression`] for symbolic angles
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] ordered, validated builder API
//! - **DAG**: [`CircuitDag`] wire-dependency graph used for depth and layering
//! - **Equivalence**: [`equivalence::check`] compares two circuits
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qbridge_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert!(circuit.has_terminal_measure_all());
//! ```
//!
//! # Example: Comparing Circuits
//!
//! ```rust
//! use qbridge_ir::{Circuit, QubitId};
//! use qbridge_ir::equivalence::{check, EquivalenceOptions};
//!
//! let mut a = Circuit::with_size("a", 2, 0);
//! a.h(QubitId(0)).unwrap().x(QubitId(1)).unwrap();
//!
//! let mut b = Circuit::with_size("b", 2, 0);
//! b.x(QubitId(1)).unwrap().h(QubitId(0)).unwrap();
//!
//! assert!(check(&a, &b, &EquivalenceOptions::default()).equivalent);
//! ```

pub mod circuit;
pub mod dag;
pub mod equivalence;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, NodeIndex, WireId};
pub use equivalence::{Difference, EquivalenceOptions, EquivalenceReport};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
