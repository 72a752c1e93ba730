//! Round-trip checks.
//!
//! Braket circuits in the shared gate vocabulary survive Braket → Qiskit →
//! Braket unchanged. The other direction loses information (`u`
//! decomposition, barriers, register names), so a report carries the IR
//! equivalence check next to the plain equality test.

use qbridge_adapter_braket::{self as braket, ImportOptions};
use qbridge_adapter_qiskit::{self as qiskit, QuantumCircuit};
use qbridge_ir::equivalence::{self, EquivalenceOptions, EquivalenceReport};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::circuits::{convert_qiskit_to_braket_circuit, from_braket_circuit_with};
use crate::error::ConvertResult;

/// Outcome of converting a circuit to the other SDK and back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTripReport<C> {
    /// The input circuit.
    pub original: C,
    /// The circuit after the round trip.
    pub returned: C,
    /// Whether `returned == original`.
    pub identical: bool,
    /// IR comparison of the two circuits.
    pub equivalence: EquivalenceReport,
}

impl<C> RoundTripReport<C> {
    /// Identical, or equivalent in the IR.
    pub fn is_preserved(&self) -> bool {
        self.identical || self.equivalence.equivalent
    }
}

/// Braket → Qiskit → Braket.
#[instrument(skip_all)]
pub fn braket_roundtrip(
    circuit: &braket::Circuit,
    import: ImportOptions,
    options: &EquivalenceOptions,
) -> ConvertResult<RoundTripReport<braket::Circuit>> {
    let qc = from_braket_circuit_with(circuit, import)?;
    let returned = convert_qiskit_to_braket_circuit(&qc)?;

    let left = braket::to_ir_with(circuit, import)?;
    let right = braket::to_ir_with(&returned, import)?;
    let report = RoundTripReport {
        identical: returned == *circuit,
        equivalence: equivalence::check(&left, &right, options),
        original: circuit.clone(),
        returned,
    };
    info!(
        identical = report.identical,
        equivalent = report.equivalence.equivalent,
        "Braket round trip"
    );
    Ok(report)
}

/// Qiskit → Braket → Qiskit.
///
/// `import` controls how the Braket circuit is read back.
#[instrument(skip_all, fields(name = %circuit.name))]
pub fn qiskit_roundtrip(
    circuit: &QuantumCircuit,
    import: ImportOptions,
    options: &EquivalenceOptions,
) -> ConvertResult<RoundTripReport<QuantumCircuit>> {
    let braket_circuit = convert_qiskit_to_braket_circuit(circuit)?;
    let returned = from_braket_circuit_with(&braket_circuit, import)?;

    let left = qiskit::to_ir(circuit)?;
    let right = qiskit::to_ir(&returned)?;
    let report = RoundTripReport {
        identical: returned == *circuit,
        equivalence: equivalence::check(&left, &right, options),
        original: circuit.clone(),
        returned,
    };
    info!(
        identical = report.identical,
        equivalent = report.equivalence.equivalent,
        "Qiskit round trip"
    );
    Ok(report)
}
