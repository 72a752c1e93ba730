//! Error types for the Qiskit adapter.

use qbridge_ir::IrError;
use thiserror::Error;

/// Result type for Qiskit operations.
pub type QiskitResult<T> = Result<T, QiskitError>;

/// Errors raised by the Qiskit circuit model and its IR conversions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QiskitError {
    /// Qubit index outside the circuit.
    #[error("Qubit index {index} out of range for circuit with {num_qubits} qubits")]
    QubitOutOfRange {
        /// Requested flat index.
        index: u32,
        /// Qubits in the circuit.
        num_qubits: u32,
    },

    /// Classical bit index outside the circuit.
    #[error("Clbit index {index} out of range for circuit with {num_clbits} clbits")]
    ClbitOutOfRange {
        /// Requested flat index.
        index: u32,
        /// Classical bits in the circuit.
        num_clbits: u32,
    },

    /// Operation applied to the wrong number of bits.
    #[error(
        "Operation '{name}' acts on {expected_qubits} qubits and {expected_clbits} clbits, got {qubits} and {clbits}"
    )]
    ArityMismatch {
        /// Operation name.
        name: String,
        /// Qubits the operation expects.
        expected_qubits: u32,
        /// Clbits the operation expects.
        expected_clbits: u32,
        /// Qubits supplied.
        qubits: usize,
        /// Clbits supplied.
        clbits: usize,
    },

    /// Same qubit passed twice to one operation.
    #[error("Duplicate qubit {index} in arguments to '{name}'")]
    DuplicateQubit {
        /// Operation name.
        name: String,
        /// Repeated flat index.
        index: u32,
    },

    /// Register name already used in the circuit.
    #[error("Register name '{0}' already exists")]
    DuplicateRegister(String),

    /// Instruction name already present in a target.
    #[error("Instruction '{0}' is already in the target")]
    DuplicateInstruction(String),

    /// Operation with no counterpart in the other representation.
    #[error("Operation '{0}' is not supported")]
    UnsupportedOperation(String),

    /// Malformed operation parameter.
    #[error("Invalid parameter for '{name}': {reason}")]
    InvalidParameter {
        /// Operation name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// IR construction failed.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_out_of_range_display() {
        let err = QiskitError::QubitOutOfRange {
            index: 5,
            num_qubits: 2,
        };
        assert_eq!(
            err.to_string(),
            "Qubit index 5 out of range for circuit with 2 qubits"
        );
    }

    #[test]
    fn test_arity_mismatch_display() {
        let err = QiskitError::ArityMismatch {
            name: "cx".into(),
            expected_qubits: 2,
            expected_clbits: 0,
            qubits: 1,
            clbits: 0,
        };
        assert!(err.to_string().contains("'cx'"));
    }

    #[test]
    fn test_ir_error_converts() {
        let err: QiskitError = IrError::UnboundParameter("theta".into()).into();
        assert!(matches!(err, QiskitError::Ir(_)));
        assert!(err.to_string().contains("theta"));
    }
}
