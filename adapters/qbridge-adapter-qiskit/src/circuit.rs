//! The Qiskit `QuantumCircuit` model.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{QiskitError, QiskitResult};
use crate::library;
use crate::operation::{Operation, Param};
use crate::register::{BitLocations, ClassicalRegister, Clbit, QuantumRegister, Qubit};

/// One entry of `QuantumCircuit::data`: an operation and the flat indices
/// of the bits it acts on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitInstruction {
    /// The operation applied.
    pub operation: Operation,
    /// Flat qubit indices.
    pub qubits: Vec<u32>,
    /// Flat classical bit indices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clbits: Vec<u32>,
}

/// A Qiskit quantum circuit.
///
/// Bits are owned by registers; the flat index of a bit is its position in
/// the concatenation of all registers of its kind, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumCircuit {
    /// Circuit name.
    pub name: String,
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
    data: Vec<CircuitInstruction>,
    /// Global phase in radians.
    #[serde(default)]
    pub global_phase: f64,
}

impl Default for QuantumCircuit {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl QuantumCircuit {
    /// Create a circuit with a `q` register of `num_qubits` and a `c`
    /// register of `num_clbits`. Empty registers are omitted.
    pub fn new(num_qubits: u32, num_clbits: u32) -> Self {
        let mut qregs = vec![];
        let mut cregs = vec![];
        if num_qubits > 0 {
            qregs.push(QuantumRegister::new(num_qubits, "q"));
        }
        if num_clbits > 0 {
            cregs.push(ClassicalRegister::new(num_clbits, "c"));
        }
        Self {
            name: "circuit".into(),
            qregs,
            cregs,
            data: vec![],
            global_phase: 0.0,
        }
    }

    /// Create a circuit from explicit registers.
    pub fn from_registers(
        qregs: Vec<QuantumRegister>,
        cregs: Vec<ClassicalRegister>,
    ) -> QiskitResult<Self> {
        let mut circuit = Self::new(0, 0);
        for qreg in qregs {
            circuit.add_qreg(qreg)?;
        }
        for creg in cregs {
            circuit.add_creg(creg)?;
        }
        Ok(circuit)
    }

    /// Set the circuit name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn register_exists(&self, name: &str) -> bool {
        self.qregs.iter().any(|r| r.name == name) || self.cregs.iter().any(|r| r.name == name)
    }

    /// Add a quantum register.
    pub fn add_qreg(&mut self, qreg: QuantumRegister) -> QiskitResult<()> {
        if self.register_exists(&qreg.name) {
            return Err(QiskitError::DuplicateRegister(qreg.name));
        }
        self.qregs.push(qreg);
        Ok(())
    }

    /// Add a classical register.
    pub fn add_creg(&mut self, creg: ClassicalRegister) -> QiskitResult<()> {
        if self.register_exists(&creg.name) {
            return Err(QiskitError::DuplicateRegister(creg.name));
        }
        self.cregs.push(creg);
        Ok(())
    }

    /// Quantum registers in declaration order.
    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    /// Classical registers in declaration order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Instructions in program order.
    pub fn data(&self) -> &[CircuitInstruction] {
        &self.data
    }

    /// Total number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.qregs.iter().map(|r| r.size).sum()
    }

    /// Total number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.cregs.iter().map(|r| r.size).sum()
    }

    /// Number of instructions.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// All qubits in flat order.
    pub fn qubits(&self) -> Vec<Qubit> {
        self.qregs
            .iter()
            .flat_map(|r| (0..r.size).filter_map(move |i| r.bit(i)))
            .collect()
    }

    /// All classical bits in flat order.
    pub fn clbits(&self) -> Vec<Clbit> {
        self.cregs
            .iter()
            .flat_map(|r| (0..r.size).filter_map(move |i| r.bit(i)))
            .collect()
    }

    /// The qubit at a flat index.
    pub fn qubit(&self, index: u32) -> Option<Qubit> {
        let mut offset = 0;
        for reg in &self.qregs {
            if index < offset + reg.size {
                return reg.bit(index - offset);
            }
            offset += reg.size;
        }
        None
    }

    /// The classical bit at a flat index.
    pub fn clbit(&self, index: u32) -> Option<Clbit> {
        let mut offset = 0;
        for reg in &self.cregs {
            if index < offset + reg.size {
                return reg.bit(index - offset);
            }
            offset += reg.size;
        }
        None
    }

    /// Locate a qubit: its flat index and the registers containing it.
    pub fn find_bit(&self, qubit: &Qubit) -> Option<BitLocations> {
        let mut offset = 0;
        for reg in &self.qregs {
            if reg.name == qubit.register && qubit.index < reg.size {
                return Some(BitLocations {
                    index: offset + qubit.index,
                    registers: vec![(reg.name.clone(), qubit.index)],
                });
            }
            offset += reg.size;
        }
        None
    }

    /// Locate a classical bit: its flat index and the registers containing it.
    pub fn find_clbit(&self, clbit: &Clbit) -> Option<BitLocations> {
        let mut offset = 0;
        for reg in &self.cregs {
            if reg.name == clbit.register && clbit.index < reg.size {
                return Some(BitLocations {
                    index: offset + clbit.index,
                    registers: vec![(reg.name.clone(), clbit.index)],
                });
            }
            offset += reg.size;
        }
        None
    }

    /// Append an operation, validating its bit arguments.
    pub fn append(
        &mut self,
        operation: Operation,
        qargs: &[u32],
        cargs: &[u32],
    ) -> QiskitResult<&mut Self> {
        if qargs.len() != operation.num_qubits as usize
            || cargs.len() != operation.num_clbits as usize
        {
            return Err(QiskitError::ArityMismatch {
                name: operation.name,
                expected_qubits: operation.num_qubits,
                expected_clbits: operation.num_clbits,
                qubits: qargs.len(),
                clbits: cargs.len(),
            });
        }

        let num_qubits = self.num_qubits();
        let mut seen = BTreeSet::new();
        for &index in qargs {
            if index >= num_qubits {
                return Err(QiskitError::QubitOutOfRange { index, num_qubits });
            }
            if !seen.insert(index) {
                return Err(QiskitError::DuplicateQubit {
                    name: operation.name,
                    index,
                });
            }
        }

        let num_clbits = self.num_clbits();
        if let Some(&index) = cargs.iter().find(|&&c| c >= num_clbits) {
            return Err(QiskitError::ClbitOutOfRange { index, num_clbits });
        }

        self.data.push(CircuitInstruction {
            operation,
            qubits: qargs.to_vec(),
            clbits: cargs.to_vec(),
        });
        Ok(self)
    }

    // =========================================================================
    // Gate shorthands
    // =========================================================================

    /// Apply `id`.
    pub fn id(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::id(), &[qubit], &[])
    }

    /// Apply `x`.
    pub fn x(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::x(), &[qubit], &[])
    }

    /// Apply `y`.
    pub fn y(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::y(), &[qubit], &[])
    }

    /// Apply `z`.
    pub fn z(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::z(), &[qubit], &[])
    }

    /// Apply `h`.
    pub fn h(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::h(), &[qubit], &[])
    }

    /// Apply `s`.
    pub fn s(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::s(), &[qubit], &[])
    }

    /// Apply `sdg`.
    pub fn sdg(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::sdg(), &[qubit], &[])
    }

    /// Apply `t`.
    pub fn t(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::t(), &[qubit], &[])
    }

    /// Apply `tdg`.
    pub fn tdg(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::tdg(), &[qubit], &[])
    }

    /// Apply `sx`.
    pub fn sx(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::sx(), &[qubit], &[])
    }

    /// Apply `sxdg`.
    pub fn sxdg(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::sxdg(), &[qubit], &[])
    }

    /// Apply `rx`.
    pub fn rx(&mut self, theta: impl Into<Param>, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::rx(theta), &[qubit], &[])
    }

    /// Apply `ry`.
    pub fn ry(&mut self, theta: impl Into<Param>, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::ry(theta), &[qubit], &[])
    }

    /// Apply `rz`.
    pub fn rz(&mut self, phi: impl Into<Param>, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::rz(phi), &[qubit], &[])
    }

    /// Apply `p`.
    pub fn p(&mut self, theta: impl Into<Param>, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::p(theta), &[qubit], &[])
    }

    /// Apply `u`.
    pub fn u(
        &mut self,
        theta: impl Into<Param>,
        phi: impl Into<Param>,
        lam: impl Into<Param>,
        qubit: u32,
    ) -> QiskitResult<&mut Self> {
        self.append(library::u(theta, phi, lam), &[qubit], &[])
    }

    /// Apply `r`.
    pub fn r(
        &mut self,
        theta: impl Into<Param>,
        phi: impl Into<Param>,
        qubit: u32,
    ) -> QiskitResult<&mut Self> {
        self.append(library::r(theta, phi), &[qubit], &[])
    }

    /// Apply `cx`.
    pub fn cx(&mut self, control: u32, target: u32) -> QiskitResult<&mut Self> {
        self.append(library::cx(), &[control, target], &[])
    }

    /// Apply `cy`.
    pub fn cy(&mut self, control: u32, target: u32) -> QiskitResult<&mut Self> {
        self.append(library::cy(), &[control, target], &[])
    }

    /// Apply `cz`.
    pub fn cz(&mut self, control: u32, target: u32) -> QiskitResult<&mut Self> {
        self.append(library::cz(), &[control, target], &[])
    }

    /// Apply `ch`.
    pub fn ch(&mut self, control: u32, target: u32) -> QiskitResult<&mut Self> {
        self.append(library::ch(), &[control, target], &[])
    }

    /// Apply `swap`.
    pub fn swap(&mut self, q1: u32, q2: u32) -> QiskitResult<&mut Self> {
        self.append(library::swap(), &[q1, q2], &[])
    }

    /// Apply `iswap`.
    pub fn iswap(&mut self, q1: u32, q2: u32) -> QiskitResult<&mut Self> {
        self.append(library::iswap(), &[q1, q2], &[])
    }

    /// Apply `ecr`.
    pub fn ecr(&mut self, q1: u32, q2: u32) -> QiskitResult<&mut Self> {
        self.append(library::ecr(), &[q1, q2], &[])
    }

    /// Apply `cp`.
    pub fn cp(
        &mut self,
        theta: impl Into<Param>,
        control: u32,
        target: u32,
    ) -> QiskitResult<&mut Self> {
        self.append(library::cp(theta), &[control, target], &[])
    }

    /// Apply `crx`.
    pub fn crx(
        &mut self,
        theta: impl Into<Param>,
        control: u32,
        target: u32,
    ) -> QiskitResult<&mut Self> {
        self.append(library::crx(theta), &[control, target], &[])
    }

    /// Apply `rxx`.
    pub fn rxx(&mut self, theta: impl Into<Param>, q1: u32, q2: u32) -> QiskitResult<&mut Self> {
        self.append(library::rxx(theta), &[q1, q2], &[])
    }

    /// Apply `ryy`.
    pub fn ryy(&mut self, theta: impl Into<Param>, q1: u32, q2: u32) -> QiskitResult<&mut Self> {
        self.append(library::ryy(theta), &[q1, q2], &[])
    }

    /// Apply `rzz`.
    pub fn rzz(&mut self, theta: impl Into<Param>, q1: u32, q2: u32) -> QiskitResult<&mut Self> {
        self.append(library::rzz(theta), &[q1, q2], &[])
    }

    /// Apply `ccx`.
    pub fn ccx(&mut self, c1: u32, c2: u32, target: u32) -> QiskitResult<&mut Self> {
        self.append(library::ccx(), &[c1, c2, target], &[])
    }

    /// Apply `cswap`.
    pub fn cswap(&mut self, control: u32, t1: u32, t2: u32) -> QiskitResult<&mut Self> {
        self.append(library::cswap(), &[control, t1, t2], &[])
    }

    // =========================================================================
    // Non-unitary operations
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: u32, clbit: u32) -> QiskitResult<&mut Self> {
        self.append(library::measure(), &[qubit], &[clbit])
    }

    /// Measure every qubit.
    ///
    /// Adds a classical register `meas` with one bit per qubit, a barrier
    /// across all qubits, then measures qubit `i` into `meas[i]`.
    pub fn measure_all(&mut self) -> QiskitResult<&mut Self> {
        let num_qubits = self.num_qubits();
        let offset = self.num_clbits();
        self.add_creg(ClassicalRegister::new(num_qubits, "meas"))?;
        self.barrier_all()?;
        for i in 0..num_qubits {
            self.measure(i, offset + i)?;
        }
        Ok(self)
    }

    /// Barrier across the given qubits.
    pub fn barrier(&mut self, qubits: &[u32]) -> QiskitResult<&mut Self> {
        #[allow(clippy::cast_possible_truncation)]
        let width = qubits.len() as u32;
        self.append(library::barrier(width), qubits, &[])
    }

    /// Barrier across all qubits.
    pub fn barrier_all(&mut self) -> QiskitResult<&mut Self> {
        let qubits: Vec<u32> = (0..self.num_qubits()).collect();
        self.barrier(&qubits)
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::reset(), &[qubit], &[])
    }

    /// Idle a qubit for `duration` time units.
    pub fn delay(&mut self, duration: u64, qubit: u32) -> QiskitResult<&mut Self> {
        self.append(library::delay(duration), &[qubit], &[])
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Count operations by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.data {
            *counts.entry(inst.operation.name.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Names of all free parameters, sorted.
    pub fn parameters(&self) -> BTreeSet<String> {
        self.data
            .iter()
            .flat_map(|inst| inst.operation.params.iter())
            .flat_map(Param::symbols)
            .collect()
    }

    /// Number of free parameters.
    pub fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Return a copy with the given parameters bound.
    ///
    /// Parameters not named in `values` stay free.
    pub fn assign_parameters(&self, values: &FxHashMap<String, f64>) -> Self {
        let mut bound = self.clone();
        for inst in &mut bound.data {
            for param in &mut inst.operation.params {
                *param = param.bind_all(values);
            }
        }
        bound
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> QiskitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, validating every instruction.
    pub fn from_json(json: &str) -> QiskitResult<Self> {
        let raw: QuantumCircuit = serde_json::from_str(json)?;
        let mut circuit = QuantumCircuit::from_registers(raw.qregs, raw.cregs)?.with_name(raw.name);
        circuit.global_phase = raw.global_phase;
        for inst in raw.data {
            circuit.append(inst.operation, &inst.qubits, &inst.clbits)?;
        }
        Ok(circuit)
    }
}
