//! Configured conversion front end.

use qbridge_adapter_braket::{self as braket, DeviceCapabilities};
use qbridge_adapter_qiskit::{QuantumCircuit, Target};
use tracing::debug;

use crate::circuits::{self, wrap_in_verbatim_box};
use crate::config::ConversionConfig;
use crate::error::ConvertResult;
use crate::roundtrip::{self, RoundTripReport};
use crate::target;

/// Runs conversions with one [`ConversionConfig`].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    /// Create a converter, validating the configuration.
    pub fn new(config: ConversionConfig) -> ConvertResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Qiskit → Braket, wrapped in a verbatim box when configured.
    pub fn to_braket(&self, circuit: &QuantumCircuit) -> ConvertResult<braket::Circuit> {
        let out = circuits::convert_qiskit_to_braket_circuit(circuit)?;
        if self.config.braket.verbatim {
            debug!("wrapping in verbatim box");
            return wrap_in_verbatim_box(&out);
        }
        Ok(out)
    }

    /// Qiskit → Braket for each circuit.
    pub fn to_braket_all(&self, circuits: &[QuantumCircuit]) -> ConvertResult<Vec<braket::Circuit>> {
        circuits.iter().map(|c| self.to_braket(c)).collect()
    }

    /// Braket → Qiskit.
    pub fn to_qiskit(&self, circuit: &braket::Circuit) -> ConvertResult<QuantumCircuit> {
        circuits::from_braket_circuit_with(circuit, self.config.import_options())
    }

    /// Braket → Qiskit for each circuit.
    pub fn to_qiskit_all(&self, circuits: &[braket::Circuit]) -> ConvertResult<Vec<QuantumCircuit>> {
        circuits.iter().map(|c| self.to_qiskit(c)).collect()
    }

    /// Qiskit target for a Braket device.
    pub fn target(&self, device: &DeviceCapabilities) -> ConvertResult<Target> {
        target::aws_device_to_target(device)
    }

    /// Braket → Qiskit → Braket.
    pub fn braket_roundtrip(
        &self,
        circuit: &braket::Circuit,
    ) -> ConvertResult<RoundTripReport<braket::Circuit>> {
        roundtrip::braket_roundtrip(
            circuit,
            self.config.import_options(),
            &self.config.equivalence_options(),
        )
    }

    /// Qiskit → Braket → Qiskit.
    pub fn qiskit_roundtrip(
        &self,
        circuit: &QuantumCircuit,
    ) -> ConvertResult<RoundTripReport<QuantumCircuit>> {
        roundtrip::qiskit_roundtrip(
            circuit,
            self.config.import_options(),
            &self.config.equivalence_options(),
        )
    }
}
