//! Braket gates and their angles.

use std::collections::BTreeSet;
use std::fmt;

use num_complex::Complex64;
use qbridge_ir::ParameterExpression;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{BraketError, BraketResult};

/// Tolerance used when checking that a matrix is unitary.
const UNITARY_TOLERANCE: f64 = 1e-8;

/// A named symbolic angle, Braket's `FreeParameter`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FreeParameter {
    /// Parameter name.
    pub name: String,
}

impl FreeParameter {
    /// Create a free parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for FreeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The angle of a parameterized gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Angle {
    /// A bound value in radians.
    Value(f64),
    /// A single free parameter.
    Parameter(FreeParameter),
    /// An expression over free parameters.
    Expression(ParameterExpression),
}

impl Angle {
    /// A free-parameter angle.
    pub fn parameter(name: impl Into<String>) -> Self {
        Angle::Parameter(FreeParameter::new(name))
    }

    /// The most specific angle for an IR expression.
    pub fn from_expression(expr: &ParameterExpression) -> Self {
        let simplified = expr.simplify();
        if let Some(value) = simplified.as_f64() {
            return Angle::Value(value);
        }
        match simplified {
            ParameterExpression::Symbol(name) => Angle::Parameter(FreeParameter { name }),
            other => Angle::Expression(other),
        }
    }

    /// The angle as an IR expression.
    pub fn to_expression(&self) -> ParameterExpression {
        match self {
            Angle::Value(v) => ParameterExpression::constant(*v),
            Angle::Parameter(p) => ParameterExpression::symbol(p.name.clone()),
            Angle::Expression(e) => e.clone(),
        }
    }

    /// The value in radians, if bound.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Angle::Value(v) => Some(*v),
            Angle::Parameter(_) => None,
            Angle::Expression(e) => e.as_f64(),
        }
    }

    /// Whether the angle depends on a free parameter.
    pub fn is_parameterized(&self) -> bool {
        match self {
            Angle::Value(_) => false,
            Angle::Parameter(_) => true,
            Angle::Expression(e) => e.is_symbolic(),
        }
    }

    /// Free parameter names in the angle.
    pub fn symbols(&self) -> BTreeSet<String> {
        match self {
            Angle::Value(_) => BTreeSet::new(),
            Angle::Parameter(p) => BTreeSet::from([p.name.clone()]),
            Angle::Expression(e) => e.symbols(),
        }
    }

    /// Substitute values for free parameters.
    #[must_use]
    pub fn bind_all(&self, values: &FxHashMap<String, f64>) -> Self {
        match self {
            Angle::Value(_) => self.clone(),
            Angle::Parameter(p) => values
                .get(&p.name)
                .map_or_else(|| self.clone(), |&v| Angle::Value(v)),
            Angle::Expression(e) => Angle::from_expression(&e.bind_all(values)),
        }
    }
}

impl From<f64> for Angle {
    fn from(value: f64) -> Self {
        Angle::Value(value)
    }
}

impl From<FreeParameter> for Angle {
    fn from(param: FreeParameter) -> Self {
        Angle::Parameter(param)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Angle::Value(v) => write!(f, "{v}"),
            Angle::Parameter(p) => write!(f, "{p}"),
            Angle::Expression(e) => write!(f, "{e}"),
        }
    }
}

/// A Braket gate. Names and qubit order follow `braket.circuits.gates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "lowercase")]
pub enum Gate {
    /// Identity.
    I,
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// S gate.
    S,
    /// S-dagger.
    Si,
    /// T gate.
    T,
    /// T-dagger.
    Ti,
    /// Square root of X.
    V,
    /// Adjoint of V.
    Vi,
    /// X rotation.
    Rx {
        /// Rotation angle.
        angle: Angle,
    },
    /// Y rotation.
    Ry {
        /// Rotation angle.
        angle: Angle,
    },
    /// Z rotation.
    Rz {
        /// Rotation angle.
        angle: Angle,
    },
    /// Phase shift.
    PhaseShift {
        /// Phase angle.
        angle: Angle,
    },
    /// Phased X rotation.
    Prx {
        /// Rotation angle.
        angle_1: Angle,
        /// Phase of the rotation axis.
        angle_2: Angle,
    },
    /// Controlled NOT, `[control, target]`.
    CNot,
    /// Swap.
    Swap,
    /// iSwap.
    ISwap,
    /// Parameterized swap.
    PSwap {
        /// Phase angle.
        angle: Angle,
    },
    /// XY interaction.
    XY {
        /// Interaction angle.
        angle: Angle,
    },
    /// Controlled phase shift.
    CPhaseShift {
        /// Phase angle.
        angle: Angle,
    },
    /// Controlled phase shift on `|00>`.
    CPhaseShift00 {
        /// Phase angle.
        angle: Angle,
    },
    /// Controlled phase shift on `|01>`.
    CPhaseShift01 {
        /// Phase angle.
        angle: Angle,
    },
    /// Controlled phase shift on `|10>`.
    CPhaseShift10 {
        /// Phase angle.
        angle: Angle,
    },
    /// Controlled Y.
    CY,
    /// Controlled Z.
    CZ,
    /// Echoed cross-resonance.
    ECR,
    /// Ising XX coupling.
    XX {
        /// Coupling angle.
        angle: Angle,
    },
    /// Ising YY coupling.
    YY {
        /// Coupling angle.
        angle: Angle,
    },
    /// Ising ZZ coupling.
    ZZ {
        /// Coupling angle.
        angle: Angle,
    },
    /// Toffoli, `[control, control, target]`.
    CCNot,
    /// Fredkin, `[control, target, target]`.
    CSwap,
    /// Arbitrary unitary, row-major.
    Unitary {
        /// Row-major matrix of dimension `2^qubit_count`.
        matrix: Vec<Complex64>,
        /// Number of qubits the matrix acts on.
        qubit_count: u32,
    },
}

impl Gate {
    /// Braket name of the gate.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I => "i",
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::Si => "si",
            Gate::T => "t",
            Gate::Ti => "ti",
            Gate::V => "v",
            Gate::Vi => "vi",
            Gate::Rx { .. } => "rx",
            Gate::Ry { .. } => "ry",
            Gate::Rz { .. } => "rz",
            Gate::PhaseShift { .. } => "phaseshift",
            Gate::Prx { .. } => "prx",
            Gate::CNot => "cnot",
            Gate::Swap => "swap",
            Gate::ISwap => "iswap",
            Gate::PSwap { .. } => "pswap",
            Gate::XY { .. } => "xy",
            Gate::CPhaseShift { .. } => "cphaseshift",
            Gate::CPhaseShift00 { .. } => "cphaseshift00",
            Gate::CPhaseShift01 { .. } => "cphaseshift01",
            Gate::CPhaseShift10 { .. } => "cphaseshift10",
            Gate::CY => "cy",
            Gate::CZ => "cz",
            Gate::ECR => "ecr",
            Gate::XX { .. } => "xx",
            Gate::YY { .. } => "yy",
            Gate::ZZ { .. } => "zz",
            Gate::CCNot => "ccnot",
            Gate::CSwap => "cswap",
            Gate::Unitary { .. } => "unitary",
        }
    }

    /// Number of target qubits.
    pub fn qubit_count(&self) -> u32 {
        match self {
            Gate::I
            | Gate::H
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::S
            | Gate::Si
            | Gate::T
            | Gate::Ti
            | Gate::V
            | Gate::Vi
            | Gate::Rx { .. }
            | Gate::Ry { .. }
            | Gate::Rz { .. }
            | Gate::PhaseShift { .. }
            | Gate::Prx { .. } => 1,
            Gate::CCNot | Gate::CSwap => 3,
            Gate::Unitary { qubit_count, .. } => *qubit_count,
            _ => 2,
        }
    }

    /// Angles of the gate, in signature order.
    pub fn angles(&self) -> Vec<&Angle> {
        match self {
            Gate::Rx { angle }
            | Gate::Ry { angle }
            | Gate::Rz { angle }
            | Gate::PhaseShift { angle }
            | Gate::PSwap { angle }
            | Gate::XY { angle }
            | Gate::CPhaseShift { angle }
            | Gate::CPhaseShift00 { angle }
            | Gate::CPhaseShift01 { angle }
            | Gate::CPhaseShift10 { angle }
            | Gate::XX { angle }
            | Gate::YY { angle }
            | Gate::ZZ { angle } => vec![angle],
            Gate::Prx { angle_1, angle_2 } => vec![angle_1, angle_2],
            _ => vec![],
        }
    }

    /// Mutable angles of the gate, in signature order.
    pub fn angles_mut(&mut self) -> Vec<&mut Angle> {
        match self {
            Gate::Rx { angle }
            | Gate::Ry { angle }
            | Gate::Rz { angle }
            | Gate::PhaseShift { angle }
            | Gate::PSwap { angle }
            | Gate::XY { angle }
            | Gate::CPhaseShift { angle }
            | Gate::CPhaseShift00 { angle }
            | Gate::CPhaseShift01 { angle }
            | Gate::CPhaseShift10 { angle }
            | Gate::XX { angle }
            | Gate::YY { angle }
            | Gate::ZZ { angle } => vec![angle],
            Gate::Prx { angle_1, angle_2 } => vec![angle_1, angle_2],
            _ => vec![],
        }
    }

    /// Whether any angle depends on a free parameter.
    pub fn is_parameterized(&self) -> bool {
        self.angles().iter().any(|a| a.is_parameterized())
    }

    /// Build a unitary gate from a square matrix whose dimension is a power
    /// of two.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn unitary(matrix: Vec<Complex64>) -> BraketResult<Self> {
        let dim = (matrix.len() as f64).sqrt().round() as usize;
        if dim < 2 || dim * dim != matrix.len() || !dim.is_power_of_two() {
            return Err(BraketError::InvalidMatrix(format!(
                "{} entries is not a 2^n x 2^n matrix",
                matrix.len()
            )));
        }
        if !is_unitary(&matrix, dim) {
            return Err(BraketError::InvalidMatrix("matrix is not unitary".into()));
        }
        Ok(Gate::Unitary {
            qubit_count: dim.trailing_zeros(),
            matrix,
        })
    }

    /// Build a gate from its Braket name and angles.
    pub fn from_name(name: &str, angles: Vec<Angle>) -> BraketResult<Self> {
        let mut angles = angles.into_iter();
        let mut next = |count: usize| -> BraketResult<Angle> {
            angles.next().ok_or_else(|| {
                BraketError::parse("gate", format!("'{name}' expects {count} angle(s)"))
            })
        };
        let gate = match name {
            "i" => Gate::I,
            "h" => Gate::H,
            "x" => Gate::X,
            "y" => Gate::Y,
            "z" => Gate::Z,
            "s" => Gate::S,
            "si" => Gate::Si,
            "t" => Gate::T,
            "ti" => Gate::Ti,
            "v" => Gate::V,
            "vi" => Gate::Vi,
            "rx" => Gate::Rx { angle: next(1)? },
            "ry" => Gate::Ry { angle: next(1)? },
            "rz" => Gate::Rz { angle: next(1)? },
            "phaseshift" => Gate::PhaseShift { angle: next(1)? },
            "prx" => Gate::Prx {
                angle_1: next(2)?,
                angle_2: next(2)?,
            },
            "cnot" => Gate::CNot,
            "swap" => Gate::Swap,
            "iswap" => Gate::ISwap,
            "pswap" => Gate::PSwap { angle: next(1)? },
            "xy" => Gate::XY { angle: next(1)? },
            "cphaseshift" => Gate::CPhaseShift { angle: next(1)? },
            "cphaseshift00" => Gate::CPhaseShift00 { angle: next(1)? },
            "cphaseshift01" => Gate::CPhaseShift01 { angle: next(1)? },
            "cphaseshift10" => Gate::CPhaseShift10 { angle: next(1)? },
            "cy" => Gate::CY,
            "cz" => Gate::CZ,
            "ecr" => Gate::ECR,
            "xx" => Gate::XX { angle: next(1)? },
            "yy" => Gate::YY { angle: next(1)? },
            "zz" => Gate::ZZ { angle: next(1)? },
            "ccnot" => Gate::CCNot,
            "cswap" => Gate::CSwap,
            other => return Err(BraketError::UnsupportedGate(other.to_string())),
        };
        Ok(gate)
    }

    /// Names of every named gate, in declaration order.
    pub fn names() -> &'static [&'static str] {
        &[
            "i",
            "h",
            "x",
            "y",
            "z",
            "s",
            "si",
            "t",
            "ti",
            "v",
            "vi",
            "rx",
            "ry",
            "rz",
            "phaseshift",
            "prx",
            "cnot",
            "swap",
            "iswap",
            "pswap",
            "xy",
            "cphaseshift",
            "cphaseshift00",
            "cphaseshift01",
            "cphaseshift10",
            "cy",
            "cz",
            "ecr",
            "xx",
            "yy",
            "zz",
            "ccnot",
            "cswap",
            "unitary",
        ]
    }
}

/// Check `U U^† = I` for a row-major `dim x dim` matrix.
fn is_unitary(matrix: &[Complex64], dim: usize) -> bool {
    (0..dim).all(|i| {
        (0..dim).all(|j| {
            let dot: Complex64 = (0..dim)
                .map(|k| matrix[i * dim + k] * matrix[j * dim + k].conj())
                .sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            (dot - Complex64::new(expected, 0.0)).norm() <= UNITARY_TOLERANCE
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_names_roundtrip_through_from_name() {
        for &name in Gate::names() {
            if name == "unitary" {
                continue;
            }
            let angles = vec![Angle::Value(0.1), Angle::Value(0.2)];
            let gate = Gate::from_name(name, angles).unwrap();
            assert_eq!(gate.name(), name);
        }
    }

    #[test]
    fn test_qubit_counts() {
        assert_eq!(Gate::H.qubit_count(), 1);
        assert_eq!(Gate::CNot.qubit_count(), 2);
        assert_eq!(Gate::XX { angle: 0.1.into() }.qubit_count(), 2);
        assert_eq!(Gate::CSwap.qubit_count(), 3);
    }

    #[test]
    fn test_unitary_validation() {
        let x = vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)];
        let gate = Gate::unitary(x).unwrap();
        assert_eq!(gate.qubit_count(), 1);

        let not_square = vec![c(1.0, 0.0); 3];
        assert!(matches!(
            Gate::unitary(not_square).unwrap_err(),
            BraketError::InvalidMatrix(_)
        ));

        let not_unitary = vec![c(1.0, 0.0); 4];
        assert!(Gate::unitary(not_unitary).is_err());
    }

    #[test]
    fn test_missing_angle_is_parse_error() {
        assert!(matches!(
            Gate::from_name("rx", vec![]).unwrap_err(),
            BraketError::Parse { .. }
        ));
        assert!(matches!(
            Gate::from_name("toffoli", vec![]).unwrap_err(),
            BraketError::UnsupportedGate(_)
        ));
    }

    #[test]
    fn test_angle_from_expression() {
        let e = ParameterExpression::pi() / ParameterExpression::constant(2.0);
        assert!(matches!(Angle::from_expression(&e), Angle::Value(_)));
        let s = ParameterExpression::symbol("theta");
        assert_eq!(Angle::from_expression(&s), Angle::parameter("theta"));
        let sum = ParameterExpression::symbol("a") + ParameterExpression::constant(1.0);
        assert!(matches!(Angle::from_expression(&sum), Angle::Expression(_)));
    }

    #[test]
    fn test_angle_binding() {
        let mut values = FxHashMap::default();
        values.insert("theta".to_string(), 0.5);
        assert_eq!(Angle::parameter("theta").bind_all(&values), Angle::Value(0.5));
        assert_eq!(
            Angle::parameter("other").bind_all(&values),
            Angle::parameter("other")
        );
        let expr = Angle::Expression(
            ParameterExpression::symbol("theta") * ParameterExpression::constant(2.0),
        );
        assert_eq!(expr.bind_all(&values).as_f64(), Some(1.0));
    }

    #[test]
    fn test_gate_serde_tag() {
        let json = serde_json::to_value(Gate::Rz { angle: 0.25.into() }).unwrap();
        assert_eq!(json["gate"], "rz");
        let back: Gate = serde_json::from_value(json).unwrap();
        assert_eq!(back, Gate::Rz { angle: 0.25.into() });
    }
}
