//! The Braket `Circuit`: instructions plus requested result types.

use std::collections::BTreeSet;

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{BraketError, BraketResult};
use crate::gates::{Angle, FreeParameter, Gate};
use crate::instruction::{CompilerDirective, Instruction};
use crate::result_types::{Observable, ResultType};

/// A Braket gate-model circuit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    instructions: Vec<Instruction>,
    #[serde(default)]
    result_types: Vec<ResultType>,
}

macro_rules! fixed_gates {
    ($($(#[$doc:meta])* $name:ident => $gate:expr, ($($q:ident),+);)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&mut self, $($q: u32),+) -> BraketResult<&mut Self> {
                self.add($gate, [$($q),+])
            }
        )*
    };
}

macro_rules! angle_gates {
    ($($(#[$doc:meta])* $name:ident => $variant:ident, ($($q:ident),+);)*) => {
        $(
            $(#[$doc])*
            pub fn $name(
                &mut self,
                $($q: u32,)+
                angle: impl Into<Angle>,
            ) -> BraketResult<&mut Self> {
                self.add(Gate::$variant { angle: angle.into() }, [$($q),+])
            }
        )*
    };
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit holding only result types.
    pub fn from_result_types(
        result_types: impl IntoIterator<Item = ResultType>,
    ) -> BraketResult<Self> {
        let mut circuit = Self::new();
        for rt in result_types {
            circuit.add_result_type(rt)?;
        }
        Ok(circuit)
    }

    /// Create a circuit from instructions, without result types.
    pub fn from_instructions(
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> BraketResult<Self> {
        let mut circuit = Self::new();
        for inst in instructions {
            circuit.add_instruction(inst)?;
        }
        Ok(circuit)
    }

    /// Append a validated instruction.
    pub fn add_instruction(&mut self, instruction: Instruction) -> BraketResult<&mut Self> {
        instruction.validate()?;
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append `gate` on `target`.
    pub fn add(
        &mut self,
        gate: Gate,
        target: impl IntoIterator<Item = u32>,
    ) -> BraketResult<&mut Self> {
        self.add_instruction(Instruction::new(gate, target)?)
    }

    /// Request a result type. Requesting the same one twice is an error.
    pub fn add_result_type(&mut self, result_type: ResultType) -> BraketResult<&mut Self> {
        result_type.validate()?;
        if self.result_types.contains(&result_type) {
            return Err(BraketError::DuplicateResultType(result_type.to_string()));
        }
        self.result_types.push(result_type);
        Ok(self)
    }

    /// Append the instructions of `other` inside a verbatim box.
    ///
    /// `other` must not request result types.
    pub fn add_verbatim_box(&mut self, other: &Circuit) -> BraketResult<&mut Self> {
        if !other.result_types.is_empty() {
            return Err(BraketError::ResultTypeNotAllowed("a verbatim box".into()));
        }
        self.instructions
            .push(Instruction::directive(CompilerDirective::StartVerbatimBox));
        self.instructions.extend(other.instructions.iter().cloned());
        self.instructions
            .push(Instruction::directive(CompilerDirective::EndVerbatimBox));
        Ok(self)
    }

    fixed_gates! {
        /// Identity.
        i => Gate::I, (target);
        /// Hadamard.
        h => Gate::H, (target);
        /// Pauli-X.
        x => Gate::X, (target);
        /// Pauli-Y.
        y => Gate::Y, (target);
        /// Pauli-Z.
        z => Gate::Z, (target);
        /// S gate.
        s => Gate::S, (target);
        /// S-dagger.
        si => Gate::Si, (target);
        /// T gate.
        t => Gate::T, (target);
        /// T-dagger.
        ti => Gate::Ti, (target);
        /// Square root of X.
        v => Gate::V, (target);
        /// Adjoint of V.
        vi => Gate::Vi, (target);
        /// Controlled NOT.
        cnot => Gate::CNot, (control, target);
        /// Swap.
        swap => Gate::Swap, (target1, target2);
        /// iSwap.
        iswap => Gate::ISwap, (target1, target2);
        /// Controlled Y.
        cy => Gate::CY, (control, target);
        /// Controlled Z.
        cz => Gate::CZ, (control, target);
        /// Echoed cross-resonance.
        ecr => Gate::ECR, (target1, target2);
        /// Toffoli.
        ccnot => Gate::CCNot, (control1, control2, target);
        /// Fredkin.
        cswap => Gate::CSwap, (control, target1, target2);
    }

    angle_gates! {
        /// X rotation.
        rx => Rx, (target);
        /// Y rotation.
        ry => Ry, (target);
        /// Z rotation.
        rz => Rz, (target);
        /// Phase shift.
        phaseshift => PhaseShift, (target);
        /// Parameterized swap.
        pswap => PSwap, (target1, target2);
        /// XY interaction.
        xy => XY, (target1, target2);
        /// Controlled phase shift.
        cphaseshift => CPhaseShift, (control, target);
        /// Controlled phase shift on `|00>`.
        cphaseshift00 => CPhaseShift00, (control, target);
        /// Controlled phase shift on `|01>`.
        cphaseshift01 => CPhaseShift01, (control, target);
        /// Controlled phase shift on `|10>`.
        cphaseshift10 => CPhaseShift10, (control, target);
        /// Ising XX coupling.
        xx => XX, (target1, target2);
        /// Ising YY coupling.
        yy => YY, (target1, target2);
        /// Ising ZZ coupling.
        zz => ZZ, (target1, target2);
    }

    /// Phased X rotation.
    pub fn prx(
        &mut self,
        target: u32,
        angle_1: impl Into<Angle>,
        angle_2: impl Into<Angle>,
    ) -> BraketResult<&mut Self> {
        self.add(
            Gate::Prx {
                angle_1: angle_1.into(),
                angle_2: angle_2.into(),
            },
            [target],
        )
    }

    /// Arbitrary unitary on `targets`.
    pub fn unitary(
        &mut self,
        targets: impl IntoIterator<Item = u32>,
        matrix: Vec<Complex64>,
    ) -> BraketResult<&mut Self> {
        self.add(Gate::unitary(matrix)?, targets)
    }

    /// Request `Sample(observable)` on `target`.
    pub fn sample(
        &mut self,
        observable: Observable,
        target: impl IntoIterator<Item = u32>,
    ) -> BraketResult<&mut Self> {
        self.add_result_type(ResultType::Sample {
            observable,
            target: target.into_iter().collect(),
        })
    }

    /// Request probabilities on `target`.
    pub fn probability(&mut self, target: impl IntoIterator<Item = u32>) -> BraketResult<&mut Self> {
        self.add_result_type(ResultType::Probability {
            target: target.into_iter().collect(),
        })
    }

    /// Request an expectation value.
    pub fn expectation(
        &mut self,
        observable: Observable,
        target: impl IntoIterator<Item = u32>,
    ) -> BraketResult<&mut Self> {
        self.add_result_type(ResultType::Expectation {
            observable,
            target: target.into_iter().collect(),
        })
    }

    /// Request a variance.
    pub fn variance(
        &mut self,
        observable: Observable,
        target: impl IntoIterator<Item = u32>,
    ) -> BraketResult<&mut Self> {
        self.add_result_type(ResultType::Variance {
            observable,
            target: target.into_iter().collect(),
        })
    }

    /// Request the state vector.
    pub fn state_vector(&mut self) -> BraketResult<&mut Self> {
        self.add_result_type(ResultType::StateVector)
    }

    /// Request amplitudes of basis states.
    pub fn amplitude<S: Into<String>>(
        &mut self,
        states: impl IntoIterator<Item = S>,
    ) -> BraketResult<&mut Self> {
        self.add_result_type(ResultType::Amplitude {
            states: states.into_iter().map(Into::into).collect(),
        })
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Requested result types.
    pub fn result_types(&self) -> &[ResultType] {
        &self.result_types
    }

    /// Qubits used by instructions or result types, sorted.
    pub fn qubits(&self) -> BTreeSet<u32> {
        self.instructions
            .iter()
            .flat_map(Instruction::qubits)
            .chain(self.result_types.iter().flat_map(|rt| rt.target().iter().copied()))
            .collect()
    }

    /// Number of distinct qubits used.
    pub fn qubit_count(&self) -> usize {
        self.qubits().len()
    }

    /// Free parameters of every gate.
    pub fn parameters(&self) -> BTreeSet<FreeParameter> {
        self.instructions
            .iter()
            .filter_map(Instruction::gate)
            .flat_map(|g| g.angles().into_iter().flat_map(|a| a.symbols()))
            .map(FreeParameter::new)
            .collect()
    }

    /// Copy with parameters bound to `values`.
    ///
    /// With `strict`, every name in `values` must be a parameter of the
    /// circuit.
    pub fn make_bound_circuit(
        &self,
        values: &FxHashMap<String, f64>,
        strict: bool,
    ) -> BraketResult<Self> {
        if strict {
            let params = self.parameters();
            let mut names: Vec<&String> = values.keys().collect();
            names.sort();
            if let Some(unknown) = names
                .into_iter()
                .find(|name| !params.contains(&FreeParameter::new(name.as_str())))
            {
                return Err(BraketError::UnknownParameter(unknown.clone()));
            }
        }
        Ok(Self {
            instructions: self
                .instructions
                .iter()
                .map(|inst| inst.bind_all(values))
                .collect(),
            result_types: self.result_types.clone(),
        })
    }

    /// Number of gate moments. Directives take no time.
    pub fn depth(&self) -> usize {
        let mut front: FxHashMap<u32, usize> = FxHashMap::default();
        let mut depth = 0;
        for inst in self.instructions.iter().filter(|i| i.gate().is_some()) {
            let level = inst
                .qubits()
                .map(|q| front.get(&q).copied().unwrap_or(0))
                .max()
                .unwrap_or(0)
                + 1;
            for q in inst.qubits() {
                front.insert(q, level);
            }
            depth = depth.max(level);
        }
        depth
    }

    /// Serialize with serde.
    pub fn to_json(&self) -> BraketResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize and re-validate every instruction and result type.
    pub fn from_json(json: &str) -> BraketResult<Self> {
        let raw: Circuit = serde_json::from_str(json)?;
        let mut circuit = Self::from_instructions(raw.instructions)?;
        for rt in raw.result_types {
            circuit.add_result_type(rt)?;
        }
        Ok(circuit)
    }
}
