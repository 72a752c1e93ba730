//! High-level circuit builder API.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::ParameterExpression;
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit in canonical form.
///
/// Qubit and classical bit counts are fixed by the bits added to the
/// circuit; operations are kept in program order. Every operation is
/// validated against the circuit's bits when it is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// Operations in program order.
    instructions: Vec<Instruction>,
}

#[allow(clippy::cast_possible_truncation)]
impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = QubitId(self.qubits.len() as u32);
                self.qubits.push(Qubit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.clbits.len() as u32);
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        (0..size)
            .map(|i| {
                let id = ClbitId(self.clbits.len() as u32);
                self.clbits.push(Clbit::with_register(id, &name, i));
                id
            })
            .collect()
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            _ => None,
        };

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits();
            let got = instruction.qubits.len() as u32;
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }

        if instruction.is_measure() && instruction.qubits.len() != instruction.clbits.len() {
            return Err(IrError::MeasureArity {
                qubits: instruction.qubits.len(),
                clbits: instruction.clbits.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for &qubit in &instruction.qubits {
            if qubit.0 as usize >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if clbit.0 as usize >= self.clbits.len() {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply identity gate.
    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::I, qubit))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))
    }

    /// Apply sqrt(X) gate.
    pub fn sx(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::SX, qubit))
    }

    /// Apply sqrt(X)-dagger gate.
    pub fn sxdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::SXdg, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        ))
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Ry(theta.into()),
            qubit,
        ))
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))
    }

    /// Apply phase gate.
    pub fn p(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::P(theta.into()),
            qubit,
        ))
    }

    /// Apply universal U gate.
    pub fn u(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        lambda: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::U(theta.into(), phi.into(), lambda.into()),
            qubit,
        ))
    }

    /// Apply phased RX gate.
    pub fn prx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        phi: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::PRX(theta.into(), phi.into()),
            qubit,
        ))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CY, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply controlled-Hadamard gate.
    pub fn ch(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CH, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply iSWAP gate.
    pub fn iswap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::ISwap, q1, q2))
    }

    /// Apply ECR gate.
    pub fn ecr(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::ECR, q1, q2))
    }

    /// Apply controlled-Rx gate.
    pub fn crx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CRx(theta.into()),
            control,
            target,
        ))
    }

    /// Apply controlled-Ry gate.
    pub fn cry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CRy(theta.into()),
            control,
            target,
        ))
    }

    /// Apply controlled-Rz gate.
    pub fn crz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CRz(theta.into()),
            control,
            target,
        ))
    }

    /// Apply controlled-phase gate.
    pub fn cp(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CP(theta.into()),
            control,
            target,
        ))
    }

    /// Apply RXX (XX rotation) gate.
    pub fn rxx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::RXX(theta.into()),
            q1,
            q2,
        ))
    }

    /// Apply RYY (YY rotation) gate.
    pub fn ryy(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::RYY(theta.into()),
            q1,
            q2,
        ))
    }

    /// Apply RZZ (ZZ rotation) gate.
    pub fn rzz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::RZZ(theta.into()),
            q1,
            q2,
        ))
    }

    /// Apply XY interaction gate.
    pub fn xy(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::XY(theta.into()),
            q1,
            q2,
        ))
    }

    // =========================================================================
    // Three-qubit gates
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply Fredkin (CSWAP) gate.
    pub fn cswap(&mut self, control: QubitId, t1: QubitId, t2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CSwap, [control, t1, t2]))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Measure all qubits to corresponding classical bits.
    ///
    /// Classical bits are added until there is one per qubit.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        while self.clbits.len() < self.qubits.len() {
            self.add_clbit();
        }

        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        let clbits: Vec<_> = self
            .clbits
            .iter()
            .map(|c| c.id)
            .take(qubits.len())
            .collect();

        self.apply(Instruction::measure_many(qubits, clbits)?)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::reset(qubit))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a delay to a qubit.
    pub fn delay(&mut self, qubit: QubitId, duration: u64) -> IrResult<&mut Self> {
        self.apply(Instruction::delay(qubit, duration))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the circuit.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Get the operations in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of operations.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Build the wire-dependency DAG of this circuit.
    pub fn dag(&self) -> CircuitDag {
        CircuitDag::from_circuit(self)
    }

    /// Get the circuit depth. Barriers do not add to the depth.
    pub fn depth(&self) -> usize {
        self.dag().depth()
    }

    /// Count operations by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Names of all free parameters, sorted.
    pub fn parameters(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        for inst in &self.instructions {
            if let Some(gate) = inst.as_gate() {
                for p in gate.kind.parameters() {
                    p.collect_symbols(&mut set);
                }
            }
        }
        set
    }

    /// Return a copy with one parameter bound to a value.
    pub fn bind_parameter(&self, name: &str, value: f64) -> Self {
        let mut values = FxHashMap::default();
        values.insert(name.to_string(), value);
        self.bind_parameters(&values)
    }

    /// Return a copy with the given parameters bound to values.
    pub fn bind_parameters(&self, values: &FxHashMap<String, f64>) -> Self {
        let mut bound = self.clone();
        for inst in &mut bound.instructions {
            if let Some(gate) = inst.gate_mut() {
                for p in gate.kind.parameters_mut() {
                    *p = p.bind_all(values).simplify();
                }
            }
        }
        bound
    }

    /// Return a copy with every parameter bound, failing on any symbol left free.
    pub fn assign_all(&self, values: &FxHashMap<String, f64>) -> IrResult<Self> {
        let bound = self.bind_parameters(values);
        match bound.parameters().into_iter().next() {
            Some(name) => Err(IrError::UnboundParameter(name)),
            None => Ok(bound),
        }
    }

    /// Whether any measurement is present.
    pub fn is_measured(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// The set of qubits that are measured anywhere in the circuit.
    pub fn measured_qubits(&self) -> BTreeSet<QubitId> {
        self.instructions
            .iter()
            .filter(|inst| inst.is_measure())
            .flat_map(|inst| inst.qubits.iter().copied())
            .collect()
    }

    /// Index of the first instruction of the trailing block made only of
    /// measurements and barriers.
    pub fn terminal_block_start(&self) -> usize {
        self.instructions
            .iter()
            .rposition(|inst| !(inst.is_measure() || inst.is_barrier()))
            .map_or(0, |i| i + 1)
    }

    /// Whether the circuit ends by measuring every qubit exactly once
    /// (barriers may be interleaved) with no earlier measurement.
    pub fn has_terminal_measure_all(&self) -> bool {
        if self.qubits.is_empty() {
            return false;
        }
        let start = self.terminal_block_start();
        if self.instructions[..start].iter().any(Instruction::is_measure) {
            return false;
        }
        let mut measured = BTreeSet::new();
        for inst in &self.instructions[start..] {
            if inst.is_measure() {
                for &q in &inst.qubits {
                    if !measured.insert(q) {
                        return false;
                    }
                }
            }
        }
        measured.len() == self.qubits.len()
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        let q0 = QubitId(0);
        let q1 = QubitId(1);
        let c0 = ClbitId(0);
        let c1 = ClbitId(1);

        circuit
            .h(q0)?
            .cx(q0, q1)?
            .measure(q0, c0)?
            .measure(q1, c1)?;

        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz_0"));
        }

        let mut circuit = Self::with_size("ghz", n, n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        for i in 0..n {
            circuit.measure(QubitId(i), ClbitId(i))?;
        }

        Ok(circuit)
    }

    /// Create a QFT circuit (without measurements).
    pub fn qft(n: u32) -> IrResult<Self> {
        use std::f64::consts::PI;

        if n == 0 {
            return Ok(Self::new("qft_0"));
        }

        let mut circuit = Self::with_size("qft", n, 0);

        for i in 0..n {
            circuit.h(QubitId(i))?;
            for j in (i + 1)..n {
                let k = j - i;
                let angle = PI / 2f64.powf(f64::from(k));
                circuit.cp(angle, QubitId(j), QubitId(i))?;
            }
        }

        // Bit reversal
        for i in 0..n / 2 {
            circuit.swap(QubitId(i), QubitId(n - 1 - i))?;
        }

        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 4);
        let creg = circuit.add_creg("c", 4);

        assert_eq!(qreg.len(), 4);
        assert_eq!(creg.len(), 4);
        assert_eq!(circuit.qubits()[2].to_string(), "q[2]");
        assert_eq!(circuit.num_clbits(), 4);
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.depth(), 3);
        assert!(circuit.has_terminal_measure_all());
    }

    #[test]
    fn test_qubit_out_of_range_rejected() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        let err = circuit.cx(QubitId(0), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(1), .. }));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_arity_checked_for_raw_instructions() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit
            .apply(Instruction::gate(StandardGate::CX, [QubitId(0)]))
            .unwrap_err();
        assert!(matches!(err, IrError::QubitCountMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_measure_all_grows_clbits() {
        let mut circuit = Circuit::with_size("test", 3, 1);
        circuit.h(QubitId(0)).unwrap().measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);
        assert!(circuit.has_terminal_measure_all());
    }

    #[test]
    fn test_partial_measurement_is_not_measure_all() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(!circuit.has_terminal_measure_all());
        assert_eq!(circuit.measured_qubits().len(), 1);
    }

    #[test]
    fn test_mid_circuit_measurement_is_not_measure_all() {
        let mut circuit = Circuit::with_size("test", 1, 2);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.x(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(1)).unwrap();
        assert!(!circuit.has_terminal_measure_all());
        assert_eq!(circuit.terminal_block_start(), 2);
    }

    #[test]
    fn test_parameters_and_binding() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.rx(PI / 2.0, QubitId(0)).unwrap();
        circuit
            .ry(ParameterExpression::symbol("theta"), QubitId(0))
            .unwrap();
        assert_eq!(circuit.parameters().len(), 1);

        let mut values = FxHashMap::default();
        values.insert("theta".to_string(), 0.5);
        let bound = circuit.assign_all(&values).unwrap();
        assert!(bound.parameters().is_empty());

        let err = circuit.assign_all(&FxHashMap::default()).unwrap_err();
        assert!(matches!(err, IrError::UnboundParameter(name) if name == "theta"));
    }

    #[test]
    fn test_count_ops() {
        let circuit = Circuit::ghz(3).unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts["h"], 1);
        assert_eq!(counts["cx"], 2);
        assert_eq!(counts["measure"], 3);
    }
}
