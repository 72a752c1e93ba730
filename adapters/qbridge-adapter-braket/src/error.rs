//! Error types for the Braket adapter.

use qbridge_ir::IrError;
use thiserror::Error;

/// Result type for Braket operations.
pub type BraketResult<T> = Result<T, BraketError>;

/// Errors raised by the Braket circuit model and its IR conversions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BraketError {
    /// Gate applied to the wrong number of target qubits.
    #[error("Gate '{gate}' acts on {expected} target qubits, got {got}")]
    InvalidTarget {
        /// Gate name.
        gate: String,
        /// Qubits the gate expects.
        expected: u32,
        /// Qubits supplied.
        got: usize,
    },

    /// Same qubit used twice among an instruction's targets and controls.
    #[error("Qubit {qubit} appears more than once in '{gate}'")]
    DuplicateQubit {
        /// Gate name.
        gate: String,
        /// Repeated qubit.
        qubit: u32,
    },

    /// Control state length does not match the number of controls.
    #[error("Control state {state:?} does not match {controls} control qubits")]
    InvalidControlState {
        /// Supplied state.
        state: Vec<u8>,
        /// Number of control qubits.
        controls: usize,
    },

    /// Result type already requested by the circuit.
    #[error("Result type {0} is already in the circuit")]
    DuplicateResultType(String),

    /// Result type that cannot be mixed into the operation.
    #[error("Result types are not allowed in {0}")]
    ResultTypeNotAllowed(String),

    /// Gate with no counterpart in the other representation.
    #[error("Gate '{0}' is not supported")]
    UnsupportedGate(String),

    /// Controlled gate with no counterpart in the other representation.
    #[error("Gate '{gate}' with {controls} control qubits is not supported")]
    UnsupportedControl {
        /// Gate name.
        gate: String,
        /// Number of control qubits.
        controls: usize,
    },

    /// Control on `|0>`, which the other representation cannot express.
    #[error("Gate '{0}' with a negative control is not supported")]
    NegativeControl(String),

    /// Gate power other than one.
    #[error("Gate '{gate}' raised to power {power} is not supported")]
    UnsupportedPower {
        /// Gate name.
        gate: String,
        /// Requested power.
        power: f64,
    },

    /// Result type with no counterpart in the other representation.
    #[error("Result type {0} is not supported")]
    UnsupportedResultType(String),

    /// IR instruction with no Braket counterpart.
    #[error("Instruction '{0}' cannot be expressed in a Braket circuit")]
    UnsupportedInstruction(String),

    /// Feature that the chosen serialization format cannot express.
    #[error("{format} cannot express {what}")]
    UnsupportedByFormat {
        /// Serialization format.
        format: &'static str,
        /// What was rejected.
        what: String,
    },

    /// Measurement followed by a gate on the same qubit.
    #[error("Qubit {0} is used after being measured")]
    MidCircuitMeasurement(u32),

    /// Malformed unitary matrix.
    #[error("Invalid unitary: {0}")]
    InvalidMatrix(String),

    /// Free parameter left unbound.
    #[error("Unbound parameter: {0}")]
    UnboundParameter(String),

    /// Value supplied for a parameter the circuit does not use.
    #[error("No parameter in the circuit named: {0}")]
    UnknownParameter(String),

    /// Malformed serialized program or device document.
    #[error("Invalid {kind}: {reason}")]
    Parse {
        /// What was being parsed.
        kind: &'static str,
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

impl BraketError {
    pub(crate) fn parse(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            reason: reason.into(),
        }
    }
}
