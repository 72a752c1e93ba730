//! Qiskit `Target`: what a backend can run and on which qubits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{QiskitError, QiskitResult};
use crate::operation::Operation;

/// Calibration data for one instruction on one qubit tuple.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionProperties {
    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Average error rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<f64>,
}

/// Map from qubit tuple to its properties.
pub type QargsMap = BTreeMap<Vec<u32>, Option<InstructionProperties>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TargetEntry {
    operation: Operation,
    /// `None` means the instruction is available on any qubits.
    #[serde(with = "qargs_serde")]
    qargs: Option<QargsMap>,
}

/// JSON object keys must be strings, so qargs are stored as a list of
/// `[qubits, properties]` pairs.
mod qargs_serde {
    use super::{InstructionProperties, QargsMap};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    type Entries = Vec<(Vec<u32>, Option<InstructionProperties>)>;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(qargs: &Option<QargsMap>, s: S) -> Result<S::Ok, S::Error> {
        qargs
            .as_ref()
            .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect::<Entries>())
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<QargsMap>, D::Error> {
        let entries: Option<Entries> = Option::deserialize(d)?;
        Ok(entries.map(|e| e.into_iter().collect()))
    }
}

/// Description of a backend's instruction set architecture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    num_qubits: u32,
    instructions: BTreeMap<String, TargetEntry>,
}

impl Target {
    /// Create an empty target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty target with a description.
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Add an instruction with the qubit tuples it supports.
    ///
    /// `None` registers a global instruction. The target grows to cover
    /// every qubit named in `qargs`.
    pub fn add_instruction(
        &mut self,
        operation: Operation,
        qargs: Option<QargsMap>,
    ) -> QiskitResult<()> {
        if self.instructions.contains_key(&operation.name) {
            return Err(QiskitError::DuplicateInstruction(operation.name));
        }
        if let Some(map) = &qargs {
            for args in map.keys() {
                if args.len() != operation.num_qubits as usize {
                    return Err(QiskitError::ArityMismatch {
                        name: operation.name,
                        expected_qubits: operation.num_qubits,
                        expected_clbits: operation.num_clbits,
                        qubits: args.len(),
                        clbits: 0,
                    });
                }
                if let Some(&max) = args.iter().max() {
                    self.num_qubits = self.num_qubits.max(max + 1);
                }
            }
        }
        self.instructions
            .insert(operation.name.clone(), TargetEntry { operation, qargs });
        Ok(())
    }

    /// Number of qubits the target covers.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether no instruction has been added.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction names, sorted.
    pub fn instruction_names(&self) -> Vec<&str> {
        self.instructions.keys().map(String::as_str).collect()
    }

    /// The operation registered under `name`.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.instructions.get(name).map(|e| &e.operation)
    }

    /// Qubit tuples supporting `name`, sorted.
    ///
    /// Returns `None` for unknown names and for global instructions.
    pub fn qargs_for(&self, name: &str) -> Option<Vec<&[u32]>> {
        let entry = self.instructions.get(name)?;
        entry
            .qargs
            .as_ref()
            .map(|map| map.keys().map(Vec::as_slice).collect())
    }

    /// Properties of `name` on `qargs`, if calibrated.
    pub fn properties(&self, name: &str, qargs: &[u32]) -> Option<&InstructionProperties> {
        self.instructions
            .get(name)?
            .qargs
            .as_ref()?
            .get(qargs)?
            .as_ref()
    }

    /// Whether `name` can run on `qargs`.
    pub fn instruction_supported(&self, name: &str, qargs: &[u32]) -> bool {
        match self.instructions.get(name) {
            None => false,
            Some(entry) => match &entry.qargs {
                None => {
                    qargs.len() == entry.operation.num_qubits as usize
                        && qargs.iter().all(|&q| q < self.num_qubits.max(1))
                }
                Some(map) => map.contains_key(qargs),
            },
        }
    }

    /// Undirected coupling edges derived from the two-qubit instructions.
    pub fn coupling_edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<(u32, u32)> = self
            .instructions
            .values()
            .filter_map(|e| e.qargs.as_ref())
            .flat_map(|map| map.keys())
            .filter(|args| args.len() == 2)
            .map(|args| (args[0].min(args[1]), args[0].max(args[1])))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }
}
