//! Result types and observables requested from a Braket circuit.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BraketError, BraketResult};
use crate::instruction::QubitSet;

/// Single-qubit observables, applied to every target qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Observable {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
}

impl Observable {
    /// Lowercase name used in serialized programs.
    pub fn name(self) -> &'static str {
        match self {
            Observable::I => "i",
            Observable::X => "x",
            Observable::Y => "y",
            Observable::Z => "z",
            Observable::H => "h",
        }
    }

    /// Parse a lowercase observable name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "i" => Some(Observable::I),
            "x" => Some(Observable::X),
            "y" => Some(Observable::Y),
            "z" => Some(Observable::Z),
            "h" => Some(Observable::H),
            _ => None,
        }
    }
}

impl fmt::Display for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_uppercase())
    }
}

/// A result requested from a circuit run.
///
/// An empty target means every qubit of the circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultType {
    /// Measurement samples in the observable's eigenbasis.
    Sample {
        /// Observable to sample.
        observable: Observable,
        /// Target qubits.
        #[serde(default)]
        target: QubitSet,
    },
    /// Computational-basis probabilities.
    Probability {
        /// Target qubits.
        #[serde(default)]
        target: QubitSet,
    },
    /// Expectation value of the observable.
    Expectation {
        /// Observable to evaluate.
        observable: Observable,
        /// Target qubits.
        #[serde(default)]
        target: QubitSet,
    },
    /// Variance of the observable.
    Variance {
        /// Observable to evaluate.
        observable: Observable,
        /// Target qubits.
        #[serde(default)]
        target: QubitSet,
    },
    /// Full state vector. Simulators only.
    StateVector,
    /// Amplitudes of the given basis states. Simulators only.
    Amplitude {
        /// Bitstrings, one character per qubit.
        states: Vec<String>,
    },
}

impl ResultType {
    /// `Sample(Z)` on the given qubits.
    pub fn sample_z(target: impl IntoIterator<Item = u32>) -> Self {
        ResultType::Sample {
            observable: Observable::Z,
            target: target.into_iter().collect(),
        }
    }

    /// Braket class name of the result type.
    pub fn name(&self) -> &'static str {
        match self {
            ResultType::Sample { .. } => "Sample",
            ResultType::Probability { .. } => "Probability",
            ResultType::Expectation { .. } => "Expectation",
            ResultType::Variance { .. } => "Variance",
            ResultType::StateVector => "StateVector",
            ResultType::Amplitude { .. } => "Amplitude",
        }
    }

    /// Target qubits; empty for whole-circuit result types.
    pub fn target(&self) -> &[u32] {
        match self {
            ResultType::Sample { target, .. }
            | ResultType::Probability { target }
            | ResultType::Expectation { target, .. }
            | ResultType::Variance { target, .. } => target,
            ResultType::StateVector | ResultType::Amplitude { .. } => &[],
        }
    }

    /// Observable, for observable result types.
    pub fn observable(&self) -> Option<Observable> {
        match self {
            ResultType::Sample { observable, .. }
            | ResultType::Expectation { observable, .. }
            | ResultType::Variance { observable, .. } => Some(*observable),
            _ => None,
        }
    }

    /// Check targets are distinct and amplitude states are bitstrings of
    /// one length.
    pub fn validate(&self) -> BraketResult<()> {
        let mut seen = BTreeSet::new();
        if let Some(&q) = self.target().iter().find(|&&q| !seen.insert(q)) {
            return Err(BraketError::DuplicateQubit {
                gate: self.name().to_string(),
                qubit: q,
            });
        }
        if let ResultType::Amplitude { states } = self {
            let width = states.first().map_or(0, String::len);
            let valid = !states.is_empty()
                && states
                    .iter()
                    .all(|s| s.len() == width && s.chars().all(|c| c == '0' || c == '1'));
            if !valid {
                return Err(BraketError::parse(
                    "amplitude states",
                    format!("{states:?} are not bitstrings of equal length"),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultType::Sample { observable, target }
            | ResultType::Expectation { observable, target }
            | ResultType::Variance { observable, target } => {
                write!(f, "{}(observable={observable}, target={target:?})", self.name())
            }
            ResultType::Probability { target } => write!(f, "Probability(target={target:?})"),
            ResultType::StateVector => f.write_str("StateVector()"),
            ResultType::Amplitude { states } => write!(f, "Amplitude(state={states:?})"),
        }
    }
}
