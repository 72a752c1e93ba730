//! Registers and bits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named quantum register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantumRegister {
    /// Register name.
    pub name: String,
    /// Number of qubits.
    pub size: u32,
}

impl QuantumRegister {
    /// Create a new quantum register.
    pub fn new(size: u32, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// The qubit at `index` within this register.
    pub fn bit(&self, index: u32) -> Option<Qubit> {
        (index < self.size).then(|| Qubit {
            register: self.name.clone(),
            index,
        })
    }
}

/// A named classical register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassicalRegister {
    /// Register name.
    pub name: String,
    /// Number of bits.
    pub size: u32,
}

impl ClassicalRegister {
    /// Create a new classical register.
    pub fn new(size: u32, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// The bit at `index` within this register.
    pub fn bit(&self, index: u32) -> Option<Clbit> {
        (index < self.size).then(|| Clbit {
            register: self.name.clone(),
            index,
        })
    }
}

/// A qubit, identified by its register and position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Qubit {
    /// Owning register name.
    pub register: String,
    /// Position within the register.
    pub index: u32,
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

/// A classical bit, identified by its register and position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Clbit {
    /// Owning register name.
    pub register: String,
    /// Position within the register.
    pub index: u32,
}

impl fmt::Display for Clbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.register, self.index)
    }
}

/// Where a bit lives in a circuit, as returned by `find_bit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitLocations {
    /// Flat index of the bit in the circuit.
    pub index: u32,
    /// `(register name, index in register)` for each register holding the bit.
    pub registers: Vec<(String, u32)>,
}
