//! Error types for conversions.

use qbridge_adapter_braket::BraketError;
use qbridge_adapter_qiskit::QiskitError;
use qbridge_ir::IrError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors raised while converting circuits or devices.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The Qiskit side rejected the circuit.
    #[error("Qiskit error: {0}")]
    Qiskit(#[from] QiskitError),

    /// The Braket side rejected the circuit.
    #[error("Braket error: {0}")]
    Braket(#[from] BraketError),

    /// IR construction failed.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Device with no Qiskit target mapping.
    #[error("Cannot convert device '{name}' (provider '{provider}') to a target")]
    UnsupportedDevice {
        /// Device name.
        name: String,
        /// Provider name as reported by the device.
        provider: String,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
