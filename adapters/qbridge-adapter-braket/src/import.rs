//! Braket → IR.

use std::collections::BTreeSet;

use qbridge_ir::{
    Circuit as IrCircuit, ClbitId, CustomGate, Gate as IrGate, Instruction as IrInstruction,
    QubitId, StandardGate,
};
use tracing::{debug, instrument, warn};

use crate::circuit::Circuit;
use crate::error::{BraketError, BraketResult};
use crate::gates::Gate;
use crate::instruction::{Instruction, Operator};
use crate::result_types::{Observable, ResultType};

/// How result types become IR measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// A circuit without result types measures every qubit, like Braket's
    /// implicit measurement; emitted as a `meas` register, a barrier and
    /// one measure per qubit.
    pub implicit_measure_all: bool,
    /// Fail on result types other than `Sample(Z)` and `Probability`
    /// instead of skipping them.
    pub strict_result_types: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            implicit_measure_all: true,
            strict_result_types: true,
        }
    }
}

/// Import a Braket circuit with default options.
pub fn to_ir(circuit: &Circuit) -> BraketResult<IrCircuit> {
    to_ir_with(circuit, ImportOptions::default())
}

/// Import a Braket circuit into the IR.
///
/// The IR circuit has `max qubit index + 1` qubits. Verbatim-box
/// directives are dropped. `Sample(Z)` and `Probability` targets are
/// measured into the classical bit of the same index, each qubit once.
#[instrument(skip(circuit), fields(
    instructions = circuit.instructions().len(),
    result_types = circuit.result_types().len(),
))]
pub fn to_ir_with(circuit: &Circuit, options: ImportOptions) -> BraketResult<IrCircuit> {
    let num_qubits = circuit.qubits().last().map_or(0, |&q| q + 1);
    let mut ir = IrCircuit::with_size("braket", num_qubits, 0);

    for inst in circuit.instructions() {
        match inst.operator() {
            Operator::CompilerDirective(directive) => {
                debug!(directive = directive.name(), "dropping compiler directive");
            }
            Operator::Gate(gate) => {
                let (ir_gate, qubits) = convert_gate(inst, gate)?;
                ir.apply(IrInstruction::gate(ir_gate, qubits))?;
            }
        }
    }

    if circuit.result_types().is_empty() {
        if options.implicit_measure_all && num_qubits > 0 {
            ir.add_creg("meas", num_qubits);
            ir.barrier_all()?;
            for q in 0..num_qubits {
                ir.measure(QubitId(q), ClbitId(q))?;
            }
        }
        return Ok(ir);
    }

    let mut seen = BTreeSet::new();
    let mut measured = Vec::new();
    for rt in circuit.result_types() {
        match rt {
            ResultType::Sample {
                observable: Observable::Z,
                target,
            }
            | ResultType::Probability { target } => {
                let target: Vec<u32> = if target.is_empty() {
                    (0..num_qubits).collect()
                } else {
                    target.clone()
                };
                measured.extend(target.into_iter().filter(|&q| seen.insert(q)));
            }
            other if options.strict_result_types => {
                return Err(BraketError::UnsupportedResultType(other.to_string()));
            }
            other => warn!(result_type = %other, "skipping result type without a measurement counterpart"),
        }
    }
    if !measured.is_empty() {
        ir.add_creg("c", num_qubits);
        for q in measured {
            ir.measure(QubitId(q), ClbitId(q))?;
        }
    }
    Ok(ir)
}

/// The IR gate and qubit list, controls first, for a gate instruction.
fn convert_gate(inst: &Instruction, gate: &Gate) -> BraketResult<(IrGate, Vec<QubitId>)> {
    if inst.power() != 1.0 {
        return Err(BraketError::UnsupportedPower {
            gate: gate.name().to_string(),
            power: inst.power(),
        });
    }
    if inst.control_state().contains(&0) {
        return Err(BraketError::NegativeControl(gate.name().to_string()));
    }

    let unsupported_control = || BraketError::UnsupportedControl {
        gate: gate.name().to_string(),
        controls: inst.control().len(),
    };
    let ir_gate = match inst.control().len() {
        0 => uncontrolled(gate)?,
        1 => IrGate::standard(match gate {
            Gate::X => StandardGate::CX,
            Gate::Y => StandardGate::CY,
            Gate::Z => StandardGate::CZ,
            Gate::H => StandardGate::CH,
            Gate::Rx { angle } => StandardGate::CRx(angle.to_expression()),
            Gate::Ry { angle } => StandardGate::CRy(angle.to_expression()),
            Gate::Rz { angle } => StandardGate::CRz(angle.to_expression()),
            Gate::PhaseShift { angle } => StandardGate::CP(angle.to_expression()),
            Gate::Swap => StandardGate::CSwap,
            Gate::CNot => StandardGate::CCX,
            _ => return Err(unsupported_control()),
        }),
        2 if matches!(gate, Gate::X) => IrGate::standard(StandardGate::CCX),
        _ => return Err(unsupported_control()),
    };

    let qubits = match gate {
        // Braket matrices index the first target as the most significant
        // bit; the IR follows Qiskit and uses the last.
        Gate::Unitary { .. } => inst.target().iter().rev().map(|&q| QubitId(q)).collect(),
        _ => inst.qubits().map(QubitId).collect(),
    };
    Ok((ir_gate, qubits))
}

fn uncontrolled(gate: &Gate) -> BraketResult<IrGate> {
    let std = match gate {
        Gate::I => StandardGate::I,
        Gate::H => StandardGate::H,
        Gate::X => StandardGate::X,
        Gate::Y => StandardGate::Y,
        Gate::Z => StandardGate::Z,
        Gate::S => StandardGate::S,
        Gate::Si => StandardGate::Sdg,
        Gate::T => StandardGate::T,
        Gate::Ti => StandardGate::Tdg,
        Gate::V => StandardGate::SX,
        Gate::Vi => StandardGate::SXdg,
        Gate::Rx { angle } => StandardGate::Rx(angle.to_expression()),
        Gate::Ry { angle } => StandardGate::Ry(angle.to_expression()),
        Gate::Rz { angle } => StandardGate::Rz(angle.to_expression()),
        Gate::PhaseShift { angle } => StandardGate::P(angle.to_expression()),
        Gate::Prx { angle_1, angle_2 } => {
            StandardGate::PRX(angle_1.to_expression(), angle_2.to_expression())
        }
        Gate::CNot => StandardGate::CX,
        Gate::Swap => StandardGate::Swap,
        Gate::ISwap => StandardGate::ISwap,
        Gate::XY { angle } => StandardGate::XY(angle.to_expression()),
        Gate::CPhaseShift { angle } => StandardGate::CP(angle.to_expression()),
        Gate::CY => StandardGate::CY,
        Gate::CZ => StandardGate::CZ,
        Gate::ECR => StandardGate::ECR,
        Gate::XX { angle } => StandardGate::RXX(angle.to_expression()),
        Gate::YY { angle } => StandardGate::RYY(angle.to_expression()),
        Gate::ZZ { angle } => StandardGate::RZZ(angle.to_expression()),
        Gate::CCNot => StandardGate::CCX,
        Gate::CSwap => StandardGate::CSwap,
        Gate::Unitary {
            matrix,
            qubit_count,
        } => {
            return Ok(IrGate::custom(CustomGate::unitary(
                *qubit_count,
                matrix.clone(),
            )?));
        }
        Gate::PSwap { .. }
        | Gate::CPhaseShift00 { .. }
        | Gate::CPhaseShift01 { .. }
        | Gate::CPhaseShift10 { .. } => {
            return Err(BraketError::UnsupportedGate(gate.name().to_string()));
        }
    };
    Ok(IrGate::standard(std))
}
