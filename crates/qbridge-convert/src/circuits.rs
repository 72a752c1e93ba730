//! Circuit conversion between Qiskit and Braket.
//!
//! Every conversion goes through the IR: the source adapter imports, the
//! target adapter exports.

use qbridge_adapter_braket::{self as braket, ImportOptions};
use qbridge_adapter_qiskit::{self as qiskit, QuantumCircuit};
use tracing::{debug, instrument};

use crate::error::ConvertResult;

/// Convert a Qiskit circuit to a Braket circuit.
///
/// `u`, `u2` and `u3` are decomposed into `rz`/`rx` rotations, barriers
/// are dropped and measurements become `Sample(Z)` result types. A final
/// measurement of every qubit is left implicit.
#[instrument(skip(circuit), fields(name = %circuit.name))]
pub fn convert_qiskit_to_braket_circuit(circuit: &QuantumCircuit) -> ConvertResult<braket::Circuit> {
    let ir = qiskit::to_ir(circuit)?;
    let out = braket::from_ir(&ir)?;
    debug!(
        instructions = out.instructions().len(),
        result_types = out.result_types().len(),
        "converted to Braket"
    );
    Ok(out)
}

/// Convert several Qiskit circuits, lazily.
pub fn convert_qiskit_to_braket_circuits<'a, I>(
    circuits: I,
) -> impl Iterator<Item = ConvertResult<braket::Circuit>> + 'a
where
    I: IntoIterator<Item = &'a QuantumCircuit>,
    I::IntoIter: 'a,
{
    circuits.into_iter().map(convert_qiskit_to_braket_circuit)
}

/// Convert a Braket circuit to a Qiskit circuit with default import
/// options.
pub fn from_braket_circuit(circuit: &braket::Circuit) -> ConvertResult<QuantumCircuit> {
    from_braket_circuit_with(circuit, ImportOptions::default())
}

/// Convert a Braket circuit to a Qiskit circuit.
///
/// A circuit without result types gets a Qiskit-style `measure_all` when
/// `options.implicit_measure_all` is set. `Sample(Z)` and `Probability`
/// targets are measured into the classical bit of the same index.
#[instrument(skip(circuit), fields(instructions = circuit.instructions().len()))]
pub fn from_braket_circuit_with(
    circuit: &braket::Circuit,
    options: ImportOptions,
) -> ConvertResult<QuantumCircuit> {
    let ir = braket::to_ir_with(circuit, options)?;
    let out = qiskit::from_ir(&ir)?;
    debug!(
        qubits = out.num_qubits(),
        ops = out.size(),
        "converted to Qiskit"
    );
    Ok(out)
}

/// Convert several Braket circuits, lazily.
pub fn from_braket_circuits<'a, I>(
    circuits: I,
) -> impl Iterator<Item = ConvertResult<QuantumCircuit>> + 'a
where
    I: IntoIterator<Item = &'a braket::Circuit>,
    I::IntoIter: 'a,
{
    circuits.into_iter().map(from_braket_circuit)
}

/// Wrap the instructions of each circuit in one verbatim box, keeping its
/// result types.
pub fn wrap_circuits_in_verbatim_box(
    circuits: &[braket::Circuit],
) -> ConvertResult<Vec<braket::Circuit>> {
    circuits.iter().map(wrap_in_verbatim_box).collect()
}

pub(crate) fn wrap_in_verbatim_box(circuit: &braket::Circuit) -> ConvertResult<braket::Circuit> {
    let body = braket::Circuit::from_instructions(circuit.instructions().iter().cloned())?;
    let mut wrapped = braket::Circuit::from_result_types(circuit.result_types().iter().cloned())?;
    wrapped.add_verbatim_box(&body)?;
    Ok(wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbridge_adapter_braket::{CompilerDirective, Gate, Observable, ResultType};

    fn qiskit_bell() -> QuantumCircuit {
        let mut qc = QuantumCircuit::new(2, 0);
        qc.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
        qc
    }

    #[test]
    fn test_qiskit_bell_to_braket() {
        let circ = convert_qiskit_to_braket_circuit(&qiskit_bell()).unwrap();
        let mut expected = braket::Circuit::new();
        expected.h(0).unwrap().cnot(0, 1).unwrap();
        assert_eq!(circ, expected);
    }

    #[test]
    fn test_qiskit_u_decomposes() {
        let mut qc = QuantumCircuit::new(1, 0);
        qc.u(0.1, 0.2, 0.3, 0).unwrap();
        let circ = convert_qiskit_to_braket_circuit(&qc).unwrap();
        let names: Vec<_> = circ
            .instructions()
            .iter()
            .filter_map(|i| i.gate().map(Gate::name))
            .collect();
        assert_eq!(names, ["rz", "rx", "rz", "rx", "rz"]);
    }

    #[test]
    fn test_partial_measure_becomes_sample() {
        let mut qc = QuantumCircuit::new(3, 1);
        qc.h(0).unwrap().x(2).unwrap().measure(2, 0).unwrap();
        let circ = convert_qiskit_to_braket_circuit(&qc).unwrap();
        assert_eq!(circ.result_types(), &[ResultType::sample_z([2])]);
    }

    #[test]
    fn test_braket_bell_to_qiskit() {
        let mut circ = braket::Circuit::new();
        circ.h(0).unwrap().cnot(0, 1).unwrap();
        let qc = from_braket_circuit(&circ).unwrap();
        assert_eq!(qc.num_qubits(), 2);
        let ops = qc.count_ops();
        assert_eq!(ops["h"], 1);
        assert_eq!(ops["cx"], 1);
        assert_eq!(ops["measure"], 2);
        assert_eq!(ops["barrier"], 1);
        assert_eq!(qc.cregs()[0].name, "meas");
    }

    #[test]
    fn test_braket_without_implicit_measure() {
        let mut circ = braket::Circuit::new();
        circ.h(0).unwrap();
        let options = ImportOptions {
            implicit_measure_all: false,
            ..ImportOptions::default()
        };
        let qc = from_braket_circuit_with(&circ, options).unwrap();
        assert!(!qc.count_ops().contains_key("measure"));
        assert_eq!(qc.num_clbits(), 0);
    }

    #[test]
    fn test_expectation_rejected_unless_lenient() {
        let mut circ = braket::Circuit::new();
        circ.h(0).unwrap().expectation(Observable::X, [0]).unwrap();
        assert!(from_braket_circuit(&circ).is_err());

        let lenient = ImportOptions {
            strict_result_types: false,
            ..ImportOptions::default()
        };
        let qc = from_braket_circuit_with(&circ, lenient).unwrap();
        assert_eq!(qc.size(), 1);
    }

    #[test]
    fn test_batch_conversion_is_lazy_and_ordered() {
        let mut single = QuantumCircuit::new(1, 0);
        single.x(0).unwrap();
        let batch = [qiskit_bell(), single];
        let out: Vec<_> = convert_qiskit_to_braket_circuits(&batch)
            .collect::<ConvertResult<_>>()
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].instructions()[0].gate(), Some(&Gate::X));

        let back: Vec<_> = from_braket_circuits(&out).collect::<ConvertResult<_>>().unwrap();
        assert_eq!(back[0].count_ops()["cx"], 1);
    }

    #[test]
    fn test_verbatim_wrapping_keeps_result_types() {
        let mut circ = braket::Circuit::new();
        circ.rx(0, 0.5)
            .unwrap()
            .cz(0, 1)
            .unwrap()
            .probability([0, 1])
            .unwrap();
        let wrapped = wrap_circuits_in_verbatim_box(std::slice::from_ref(&circ)).unwrap();
        let wrapped = &wrapped[0];

        let insts = wrapped.instructions();
        assert_eq!(insts.len(), 4);
        assert_eq!(
            insts[0].compiler_directive(),
            Some(CompilerDirective::StartVerbatimBox)
        );
        assert_eq!(
            insts[3].compiler_directive(),
            Some(CompilerDirective::EndVerbatimBox)
        );
        assert_eq!(&insts[1..3], circ.instructions());
        assert_eq!(wrapped.result_types(), circ.result_types());
    }
}
