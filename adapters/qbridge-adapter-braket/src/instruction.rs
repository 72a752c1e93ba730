//! Braket instructions: an operator applied to target and control qubits.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{BraketError, BraketResult};
use crate::gates::Gate;

/// Ordered qubit indices.
pub type QubitSet = Vec<u32>;

/// Compiler directives understood by Braket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilerDirective {
    /// Opens a verbatim box.
    StartVerbatimBox,
    /// Closes a verbatim box.
    EndVerbatimBox,
}

impl CompilerDirective {
    /// Braket name of the directive.
    pub fn name(self) -> &'static str {
        match self {
            CompilerDirective::StartVerbatimBox => "StartVerbatimBox",
            CompilerDirective::EndVerbatimBox => "EndVerbatimBox",
        }
    }
}

/// What an instruction applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Operator {
    /// A quantum gate.
    Gate(Gate),
    /// A compiler directive.
    CompilerDirective(CompilerDirective),
}

impl Operator {
    /// Braket name of the operator.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Gate(g) => g.name(),
            Operator::CompilerDirective(d) => d.name(),
        }
    }
}

fn default_power() -> f64 {
    1.0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_unit_power(power: &f64) -> bool {
    *power == 1.0
}

/// An operator applied to qubits, with optional control qubits and power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    operator: Operator,
    #[serde(default)]
    target: QubitSet,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    control: QubitSet,
    /// One bit per control qubit; `1` controls on `|1>`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    control_state: Vec<u8>,
    #[serde(default = "default_power", skip_serializing_if = "is_unit_power")]
    power: f64,
}

impl Instruction {
    /// Apply `gate` to `target`.
    pub fn new(gate: Gate, target: impl IntoIterator<Item = u32>) -> BraketResult<Self> {
        let inst = Self {
            operator: Operator::Gate(gate),
            target: target.into_iter().collect(),
            control: vec![],
            control_state: vec![],
            power: 1.0,
        };
        inst.validate()?;
        Ok(inst)
    }

    /// A compiler directive instruction.
    pub fn directive(directive: CompilerDirective) -> Self {
        Self {
            operator: Operator::CompilerDirective(directive),
            target: vec![],
            control: vec![],
            control_state: vec![],
            power: 1.0,
        }
    }

    /// Add control qubits, all controlling on `|1>`.
    pub fn with_control(mut self, control: impl IntoIterator<Item = u32>) -> BraketResult<Self> {
        self.control = control.into_iter().collect();
        self.control_state = vec![1; self.control.len()];
        self.validate()?;
        Ok(self)
    }

    /// Set the control state, one bit per control qubit.
    pub fn with_control_state(mut self, state: Vec<u8>) -> BraketResult<Self> {
        self.control_state = state;
        self.validate()?;
        Ok(self)
    }

    /// Raise the operator to `power`.
    #[must_use]
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// The operator.
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// The gate, unless this is a directive.
    pub fn gate(&self) -> Option<&Gate> {
        match &self.operator {
            Operator::Gate(g) => Some(g),
            Operator::CompilerDirective(_) => None,
        }
    }

    /// The directive, if this is one.
    pub fn compiler_directive(&self) -> Option<CompilerDirective> {
        match self.operator {
            Operator::CompilerDirective(d) => Some(d),
            Operator::Gate(_) => None,
        }
    }

    /// Target qubits.
    pub fn target(&self) -> &[u32] {
        &self.target
    }

    /// Control qubits.
    pub fn control(&self) -> &[u32] {
        &self.control
    }

    /// Control state; all ones unless set otherwise.
    pub fn control_state(&self) -> &[u8] {
        &self.control_state
    }

    /// Power the operator is raised to.
    pub fn power(&self) -> f64 {
        self.power
    }

    /// Whether the instruction has control qubits.
    pub fn is_controlled(&self) -> bool {
        !self.control.is_empty()
    }

    /// Control and target qubits, controls first.
    pub fn qubits(&self) -> impl Iterator<Item = u32> + '_ {
        self.control.iter().chain(self.target.iter()).copied()
    }

    /// Copy with free parameters substituted.
    #[must_use]
    pub fn bind_all(&self, values: &FxHashMap<String, f64>) -> Self {
        let mut inst = self.clone();
        if let Operator::Gate(gate) = &mut inst.operator {
            for angle in gate.angles_mut() {
                *angle = angle.bind_all(values);
            }
        }
        inst
    }

    /// Check target arity, qubit uniqueness, the control state and the
    /// size of a unitary matrix.
    pub fn validate(&self) -> BraketResult<()> {
        let Operator::Gate(gate) = &self.operator else {
            return Ok(());
        };
        if let Gate::Unitary {
            matrix,
            qubit_count,
        } = gate
        {
            let entries = qubit_count
                .checked_mul(2)
                .and_then(|bits| 1usize.checked_shl(bits));
            if entries != Some(matrix.len()) {
                return Err(BraketError::InvalidMatrix(format!(
                    "{} entries do not form a unitary on {qubit_count} qubits",
                    matrix.len()
                )));
            }
        }
        if self.target.len() != gate.qubit_count() as usize {
            return Err(BraketError::InvalidTarget {
                gate: gate.name().to_string(),
                expected: gate.qubit_count(),
                got: self.target.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for q in self.qubits() {
            if !seen.insert(q) {
                return Err(BraketError::DuplicateQubit {
                    gate: gate.name().to_string(),
                    qubit: q,
                });
            }
        }
        if self.control_state.len() != self.control.len()
            || self.control_state.iter().any(|&b| b > 1)
        {
            return Err(BraketError::InvalidControlState {
                state: self.control_state.clone(),
                controls: self.control.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_unitary_size_must_match_qubit_count() {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let gate = Gate::Unitary {
            matrix: vec![one, zero, zero, one],
            qubit_count: 40,
        };
        let err = Instruction::new(gate, 0..40).unwrap_err();
        assert!(matches!(err, BraketError::InvalidMatrix(_)));

        let gate = Gate::Unitary {
            matrix: vec![one, zero, zero, one],
            qubit_count: 1,
        };
        assert!(Instruction::new(gate, [3]).is_ok());
    }

    #[test]
    fn test_target_arity_checked() {
        assert!(Instruction::new(Gate::CNot, [0, 1]).is_ok());
        let err = Instruction::new(Gate::CNot, [0]).unwrap_err();
        assert!(matches!(err, BraketError::InvalidTarget { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_duplicate_qubit_across_control_and_target() {
        let err = Instruction::new(Gate::H, [1])
            .unwrap()
            .with_control([1])
            .unwrap_err();
        assert!(matches!(err, BraketError::DuplicateQubit { qubit: 1, .. }));
    }

    #[test]
    fn test_control_state_defaults_to_ones() {
        let inst = Instruction::new(Gate::X, [2]).unwrap().with_control([0, 1]).unwrap();
        assert_eq!(inst.control_state(), &[1, 1]);
        assert_eq!(inst.qubits().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(inst.with_control_state(vec![1]).is_err());
    }

    #[test]
    fn test_directive_has_no_qubits() {
        let inst = Instruction::directive(CompilerDirective::StartVerbatimBox);
        assert!(inst.gate().is_none());
        assert_eq!(inst.operator().name(), "StartVerbatimBox");
        assert!(inst.validate().is_ok());
    }

    #[test]
    fn test_serde_skips_defaults() {
        let inst = Instruction::new(Gate::H, [0]).unwrap();
        let json = serde_json::to_value(&inst).unwrap();
        assert!(json.get("control").is_none());
        assert!(json.get("power").is_none());
        let back: Instruction = serde_json::from_value(json).unwrap();
        assert_eq!(back, inst);
    }
}
