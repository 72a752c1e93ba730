//! Parameter expressions for parameterized circuits.
//!
//! Both SDKs carry symbolic angles: Qiskit as `Parameter` /
//! `ParameterExpression`, Braket as `FreeParameter` /
//! `FreeParameterExpression`. The IR keeps a small expression tree that
//! covers both.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::fmt;

use rustc_hash::FxHashMap;

/// A symbolic or concrete parameter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A constant numeric value.
    Constant(f64),
    /// A symbolic parameter.
    Symbol(String),
    /// The constant π.
    Pi,
    /// Negation.
    Neg(Box<ParameterExpression>),
    /// Addition.
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Subtraction.
    Sub(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Multiplication.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Division.
    Div(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a constant parameter.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Create a symbolic parameter.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParameterExpression::Symbol(name.into())
    }

    /// Create a π constant.
    pub fn pi() -> Self {
        ParameterExpression::Pi
    }

    /// Check if this expression contains any symbols.
    pub fn is_symbolic(&self) -> bool {
        match self {
            ParameterExpression::Symbol(_) => true,
            ParameterExpression::Constant(_) | ParameterExpression::Pi => false,
            ParameterExpression::Neg(e) => e.is_symbolic(),
            ParameterExpression::Add(a, b)
            | ParameterExpression::Sub(a, b)
            | ParameterExpression::Mul(a, b)
            | ParameterExpression::Div(a, b) => a.is_symbolic() || b.is_symbolic(),
        }
    }

    /// The symbol name if this expression is a bare symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            ParameterExpression::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Try to evaluate as a concrete f64 value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Symbol(_) => None,
            ParameterExpression::Pi => Some(PI),
            ParameterExpression::Neg(e) => e.as_f64().map(|v| -v),
            ParameterExpression::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            ParameterExpression::Sub(a, b) => Some(a.as_f64()? - b.as_f64()?),
            ParameterExpression::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
            ParameterExpression::Div(a, b) => {
                let divisor = b.as_f64()?;
                if divisor == 0.0 {
                    return None;
                }
                Some(a.as_f64()? / divisor)
            }
        }
    }

    /// Get all symbol names in this expression, sorted.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        self.collect_symbols(&mut set);
        set
    }

    pub(crate) fn collect_symbols(&self, set: &mut BTreeSet<String>) {
        match self {
            ParameterExpression::Constant(_) | ParameterExpression::Pi => {}
            ParameterExpression::Symbol(name) => {
                set.insert(name.clone());
            }
            ParameterExpression::Neg(e) => e.collect_symbols(set),
            ParameterExpression::Add(a, b)
            | ParameterExpression::Sub(a, b)
            | ParameterExpression::Mul(a, b)
            | ParameterExpression::Div(a, b) => {
                a.collect_symbols(set);
                b.collect_symbols(set);
            }
        }
    }

    /// Bind a symbol to a value, returning a new expression.
    pub fn bind(&self, name: &str, value: f64) -> Self {
        self.map_symbols(&|n| (n == name).then_some(value))
    }

    /// Bind every symbol found in `values`, leaving the others symbolic.
    pub fn bind_all(&self, values: &FxHashMap<String, f64>) -> Self {
        self.map_symbols(&|n| values.get(n).copied())
    }

    fn map_symbols(&self, lookup: &dyn Fn(&str) -> Option<f64>) -> Self {
        match self {
            ParameterExpression::Symbol(n) => match lookup(n) {
                Some(value) => ParameterExpression::Constant(value),
                None => self.clone(),
            },
            ParameterExpression::Constant(_) | ParameterExpression::Pi => self.clone(),
            ParameterExpression::Neg(e) => ParameterExpression::Neg(Box::new(e.map_symbols(lookup))),
            ParameterExpression::Add(a, b) => ParameterExpression::Add(
                Box::new(a.map_symbols(lookup)),
                Box::new(b.map_symbols(lookup)),
            ),
            ParameterExpression::Sub(a, b) => ParameterExpression::Sub(
                Box::new(a.map_symbols(lookup)),
                Box::new(b.map_symbols(lookup)),
            ),
            ParameterExpression::Mul(a, b) => ParameterExpression::Mul(
                Box::new(a.map_symbols(lookup)),
                Box::new(b.map_symbols(lookup)),
            ),
            ParameterExpression::Div(a, b) => ParameterExpression::Div(
                Box::new(a.map_symbols(lookup)),
                Box::new(b.map_symbols(lookup)),
            ),
        }
    }

    /// Simplify the expression by evaluating constant subexpressions.
    pub fn simplify(&self) -> Self {
        if let Some(v) = self.as_f64() {
            return ParameterExpression::Constant(v);
        }
        match self {
            ParameterExpression::Neg(e) => {
                let e = e.simplify();
                if let Some(v) = e.as_f64() {
                    ParameterExpression::Constant(-v)
                } else {
                    ParameterExpression::Neg(Box::new(e))
                }
            }
            ParameterExpression::Add(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (a.as_f64(), b.as_f64()) {
                    (Some(av), Some(bv)) => ParameterExpression::Constant(av + bv),
                    _ => ParameterExpression::Add(Box::new(a), Box::new(b)),
                }
            }
            ParameterExpression::Sub(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (a.as_f64(), b.as_f64()) {
                    (Some(av), Some(bv)) => ParameterExpression::Constant(av - bv),
                    _ => ParameterExpression::Sub(Box::new(a), Box::new(b)),
                }
            }
            ParameterExpression::Mul(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (a.as_f64(), b.as_f64()) {
                    (Some(av), Some(bv)) => ParameterExpression::Constant(av * bv),
                    _ => ParameterExpression::Mul(Box::new(a), Box::new(b)),
                }
            }
            ParameterExpression::Div(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (a.as_f64(), b.as_f64()) {
                    (Some(av), Some(bv)) if bv != 0.0 => ParameterExpression::Constant(av / bv),
                    _ => ParameterExpression::Div(Box::new(a), Box::new(b)),
                }
            }
            _ => self.clone(),
        }
    }

    /// Compare two expressions, allowing `tolerance` on every numeric leaf.
    ///
    /// Concrete expressions compare by value; symbolic ones compare
    /// structurally after constant folding.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        close(&self.simplify(), &other.simplify(), tolerance)
    }
}

fn close(a: &ParameterExpression, b: &ParameterExpression, tolerance: f64) -> bool {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return (x - y).abs() <= tolerance;
    }
    match (a, b) {
        (ParameterExpression::Symbol(x), ParameterExpression::Symbol(y)) => x == y,
        (ParameterExpression::Neg(x), ParameterExpression::Neg(y)) => close(x, y, tolerance),
        (ParameterExpression::Add(a1, b1), ParameterExpression::Add(a2, b2))
        | (ParameterExpression::Sub(a1, b1), ParameterExpression::Sub(a2, b2))
        | (ParameterExpression::Mul(a1, b1), ParameterExpression::Mul(a2, b2))
        | (ParameterExpression::Div(a1, b1), ParameterExpression::Div(a2, b2)) => {
            close(a1, a2, tolerance) && close(b1, b2, tolerance)
        }
        _ => false,
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Symbol(name) => write!(f, "{name}"),
            ParameterExpression::Pi => write!(f, "pi"),
            ParameterExpression::Neg(e) => write!(f, "-({e})"),
            ParameterExpression::Add(a, b) => write!(f, "({a} + {b})"),
            ParameterExpression::Sub(a, b) => write!(f, "({a} - {b})"),
            ParameterExpression::Mul(a, b) => write!(f, "({a} * {b})"),
            ParameterExpression::Div(a, b) => write!(f, "({a} / {b})"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl From<i32> for ParameterExpression {
    fn from(value: i32) -> Self {
        ParameterExpression::Constant(f64::from(value))
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        ParameterExpression::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for ParameterExpression {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        ParameterExpression::Sub(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        ParameterExpression::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Div for ParameterExpression {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        ParameterExpression::Div(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        ParameterExpression::Neg(Box::new(self))
    }
}
