//! Operations and their parameters.

use std::collections::BTreeSet;
use std::fmt;

use num_complex::Complex64;
use qbridge_ir::ParameterExpression;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A gate parameter: a number, a named `Parameter`, or an expression of
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Param {
    /// A bound numeric value.
    Float(f64),
    /// A free parameter, by name.
    Parameter(String),
    /// An expression over free parameters.
    Expression(ParameterExpression),
}

impl Param {
    /// A free parameter with the given name.
    pub fn parameter(name: impl Into<String>) -> Self {
        Param::Parameter(name.into())
    }

    /// Build the most specific form of an IR expression.
    pub fn from_expression(expr: &ParameterExpression) -> Self {
        if let Some(name) = expr.as_symbol() {
            return Param::Parameter(name.to_string());
        }
        match expr.as_f64() {
            Some(v) => Param::Float(v),
            None => Param::Expression(expr.clone()),
        }
    }

    /// The IR form of this parameter.
    pub fn to_expression(&self) -> ParameterExpression {
        match self {
            Param::Float(v) => ParameterExpression::constant(*v),
            Param::Parameter(name) => ParameterExpression::symbol(name.clone()),
            Param::Expression(expr) => expr.clone(),
        }
    }

    /// Numeric value, if bound.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Param::Float(v) => Some(*v),
            Param::Parameter(_) => None,
            Param::Expression(expr) => expr.as_f64(),
        }
    }

    /// Whether this parameter depends on a free parameter.
    pub fn is_parameterized(&self) -> bool {
        self.as_f64().is_none()
    }

    /// Names of the free parameters this depends on.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.to_expression().symbols()
    }

    /// Bind known parameters, keeping the rest free.
    pub fn bind_all(&self, values: &FxHashMap<String, f64>) -> Self {
        match self {
            Param::Float(_) => self.clone(),
            _ => Param::from_expression(&self.to_expression().bind_all(values).simplify()),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Float(v) => write!(f, "{v}"),
            Param::Parameter(name) => write!(f, "{name}"),
            Param::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<ParameterExpression> for Param {
    fn from(expr: ParameterExpression) -> Self {
        Param::from_expression(&expr)
    }
}

/// An operation that can be appended to a circuit: a gate, a measurement,
/// a directive such as `barrier`, or a non-unitary like `reset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Qiskit name, e.g. `cx` or `measure`.
    pub name: String,
    /// Number of qubits the operation acts on.
    pub num_qubits: u32,
    /// Number of classical bits the operation writes.
    pub num_clbits: u32,
    /// Gate parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    /// Optional user label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Row-major matrix, only for `unitary`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Complex64>>,
}

impl Operation {
    /// Create an operation.
    pub fn new(name: impl Into<String>, num_qubits: u32, num_clbits: u32, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            params,
            label: None,
            matrix: None,
        }
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether this is a compiler directive rather than a quantum operation.
    pub fn is_directive(&self) -> bool {
        self.name == "barrier"
    }

    /// Whether any parameter is free.
    pub fn is_parameterized(&self) -> bool {
        self.params.iter().any(Param::is_parameterized)
    }
}
