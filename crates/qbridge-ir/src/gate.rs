//! Quantum gate types.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::parameter::ParameterExpression;

/// Standard gates with known semantics.
///
/// This is the union of the gate vocabularies the Qiskit and Braket
/// representations can both name, so every gate here has a direct
/// counterpart on at least one side of the conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Y axis.
    Ry(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// Phase gate.
    P(ParameterExpression),
    /// Universal single-qubit gate U(θ, φ, λ).
    U(
        ParameterExpression,
        ParameterExpression,
        ParameterExpression,
    ),
    /// Phased RX gate: PRX(θ, φ) = RZ(φ) · RX(θ) · RZ(-φ).
    PRX(ParameterExpression, ParameterExpression),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Echoed cross-resonance gate.
    ECR,
    /// Controlled rotation around X.
    CRx(ParameterExpression),
    /// Controlled rotation around Y.
    CRy(ParameterExpression),
    /// Controlled rotation around Z.
    CRz(ParameterExpression),
    /// Controlled phase gate.
    CP(ParameterExpression),
    /// XX rotation gate.
    RXX(ParameterExpression),
    /// YY rotation gate.
    RYY(ParameterExpression),
    /// ZZ rotation gate.
    RZZ(ParameterExpression),
    /// XY interaction gate (Qiskit `XXPlusYYGate` with β = 0).
    XY(ParameterExpression),

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::U(_, _, _) => "u",
            StandardGate::PRX(_, _) => "prx",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::ECR => "ecr",
            StandardGate::CRx(_) => "crx",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::RZZ(_) => "rzz",
            StandardGate::XY(_) => "xy",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::U(_, _, _)
            | StandardGate::PRX(_, _) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::ECR
            | StandardGate::CRx(_)
            | StandardGate::CRy(_)
            | StandardGate::CRz(_)
            | StandardGate::CP(_)
            | StandardGate::RXX(_)
            | StandardGate::RYY(_)
            | StandardGate::RZZ(_)
            | StandardGate::XY(_) => 2,

            StandardGate::CCX | StandardGate::CSwap => 3,
        }
    }

    /// Check if this gate has symbolic parameters.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// Get parameters of this gate.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRx(p)
            | StandardGate::CRy(p)
            | StandardGate::CRz(p)
            | StandardGate::CP(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p)
            | StandardGate::XY(p) => vec![p],

            StandardGate::U(a, b, c) => vec![a, b, c],

            StandardGate::PRX(theta, phi) => vec![theta, phi],

            _ => vec![],
        }
    }

    /// Get mutable references to the parameters of this gate.
    pub fn parameters_mut(&mut self) -> Vec<&mut ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Ry(p)
            | StandardGate::Rz(p)
            | StandardGate::P(p)
            | StandardGate::CRx(p)
            | StandardGate::CRy(p)
            | StandardGate::CRz(p)
            | StandardGate::CP(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p)
            | StandardGate::XY(p) => vec![p],

            StandardGate::U(a, b, c) => vec![a, b, c],

            StandardGate::PRX(theta, phi) => vec![theta, phi],

            _ => vec![],
        }
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A custom gate, typically a raw unitary.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }

    /// Get the parameters of this gate.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            GateKind::Standard(g) => g.parameters(),
            GateKind::Custom(g) => g.params.iter().collect(),
        }
    }

    /// Get mutable references to the parameters of this gate.
    pub fn parameters_mut(&mut self) -> Vec<&mut ParameterExpression> {
        match self {
            GateKind::Standard(g) => g.parameters_mut(),
            GateKind::Custom(g) => g.params.iter_mut().collect(),
        }
    }
}

/// A user-defined gate, usually carrying an explicit unitary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Parameters of the gate.
    pub params: Vec<ParameterExpression>,
    /// Optional unitary matrix (row-major, 2^n × 2^n).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Complex64>>,
}

impl CustomGate {
    /// Create a new custom gate.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            params: vec![],
            matrix: None,
        }
    }

    /// Create a `unitary` gate from a row-major matrix.
    pub fn unitary(num_qubits: u32, matrix: Vec<Complex64>) -> IrResult<Self> {
        Self::new("unitary", num_qubits).with_matrix(matrix)
    }

    /// Add parameters to the gate.
    #[must_use]
    pub fn with_params(mut self, params: Vec<ParameterExpression>) -> Self {
        self.params = params;
        self
    }

    /// Attach a unitary matrix, checking it is `2^n × 2^n`.
    ///
    /// Widths whose matrix size does not fit in `usize` are rejected.
    pub fn with_matrix(mut self, matrix: Vec<Complex64>) -> IrResult<Self> {
        let expected = matrix_entries(self.num_qubits);
        if expected != Some(matrix.len()) {
            return Err(IrError::InvalidMatrix {
                gate_name: self.name,
                expected: expected.unwrap_or(usize::MAX),
                got: matrix.len(),
            });
        }
        self.matrix = Some(matrix);
        Ok(self)
    }

    /// Matrix dimension (rows) if a matrix is attached.
    pub fn dimension(&self) -> Option<usize> {
        self.matrix
            .as_ref()
            .and_then(|_| 1usize.checked_shl(self.num_qubits))
    }
}

/// Entries of a `2^n × 2^n` matrix, `None` on overflow.
fn matrix_entries(num_qubits: u32) -> Option<usize> {
    let dim = 1usize.checked_shl(num_qubits)?;
    dim.checked_mul(dim)
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Create a new gate from a custom gate.
    pub fn custom(gate: CustomGate) -> Self {
        Self {
            kind: GateKind::Custom(gate),
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// The standard gate, if this is one.
    pub fn as_standard(&self) -> Option<&StandardGate> {
        match &self.kind {
            GateKind::Standard(g) => Some(g),
            GateKind::Custom(_) => None,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::XY(ParameterExpression::constant(0.1)).num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);

        assert!(!StandardGate::H.is_parameterized());
        assert!(!StandardGate::Rx(ParameterExpression::constant(PI)).is_parameterized());
        assert!(StandardGate::Rx(ParameterExpression::symbol("theta")).is_parameterized());
    }

    #[test]
    fn test_parameters_mut_rewrites_in_place() {
        let mut gate = StandardGate::U(
            ParameterExpression::symbol("a"),
            ParameterExpression::constant(0.0),
            ParameterExpression::constant(0.0),
        );
        for p in gate.parameters_mut() {
            *p = p.bind("a", 1.0);
        }
        assert!(!gate.is_parameterized());
    }

    #[test]
    fn test_gate_creation() {
        let h = Gate::standard(StandardGate::H);
        assert_eq!(h.name(), "h");
        assert_eq!(h.num_qubits(), 1);
        assert!(h.label.is_none());

        let h_labeled = Gate::standard(StandardGate::H).with_label("my_hadamard");
        assert_eq!(h_labeled.label, Some("my_hadamard".to_string()));
    }

    #[test]
    fn test_unitary_dimension_checked() {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let ok = CustomGate::unitary(1, vec![one, zero, zero, one]).unwrap();
        assert_eq!(ok.dimension(), Some(2));

        let err = CustomGate::unitary(2, vec![one, zero, zero, one]).unwrap_err();
        assert!(matches!(err, IrError::InvalidMatrix { expected: 16, got: 4, .. }));
    }

    #[test]
    fn test_unitary_width_too_large_rejected() {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        for width in [40, 64, 200] {
            let err = CustomGate::unitary(width, vec![one, zero, zero, one]).unwrap_err();
            assert!(matches!(err, IrError::InvalidMatrix { got: 4, .. }));
        }
    }
}
