//! IR → Braket.

use std::collections::BTreeSet;
use std::f64::consts::FRAC_PI_2;

use qbridge_ir::{
    Circuit as IrCircuit, Gate as IrGate, GateKind, InstructionKind, ParameterExpression,
    StandardGate,
};
use tracing::{debug, instrument};

use crate::circuit::Circuit;
use crate::error::{BraketError, BraketResult};
use crate::gates::{Angle, Gate};
use crate::instruction::Instruction;
use crate::result_types::ResultType;

/// Export an IR circuit to Braket.
///
/// - A trailing block measuring every qubit exactly once becomes Braket's
///   implicit measurement and emits no result type, provided every qubit is
///   used by some instruction. Braket measures only used qubits, so a block
///   covering idle qubits becomes one `Sample(Z)` instead.
/// - Other measurements become `Sample(Z)`; consecutive measurements are
///   merged into one result type. A qubit may not be used after it is
///   measured.
/// - Barriers are dropped; resets and delays are rejected.
/// - `U(θ, φ, λ)` is decomposed into `Rz(λ) Rx(π/2) Rz(θ) Rx(−π/2) Rz(φ)`.
#[instrument(skip(circuit), fields(name = circuit.name(), ops = circuit.num_ops()))]
pub fn from_ir(circuit: &IrCircuit) -> BraketResult<Circuit> {
    let implicit = circuit.has_terminal_measure_all();
    let mut out = Circuit::new();
    let mut measured: BTreeSet<u32> = BTreeSet::new();
    let mut run: Vec<u32> = Vec::new();
    let mut terminal: Vec<u32> = Vec::new();

    for inst in circuit.instructions() {
        let qubits: Vec<u32> = inst.qubits.iter().map(|q| q.0).collect();
        match &inst.kind {
            InstructionKind::Measure => {
                for &q in &qubits {
                    if !measured.insert(q) {
                        return Err(BraketError::MidCircuitMeasurement(q));
                    }
                }
                if implicit {
                    terminal.extend(qubits);
                } else {
                    run.extend(qubits);
                }
                continue;
            }
            InstructionKind::Barrier => {
                debug!(qubits = qubits.len(), "dropping barrier");
                continue;
            }
            _ => {}
        }

        if let Some(&q) = qubits.iter().find(|&&q| measured.contains(&q)) {
            return Err(BraketError::MidCircuitMeasurement(q));
        }
        flush(&mut out, &mut run)?;

        match &inst.kind {
            InstructionKind::Gate(gate) => {
                for braket_inst in gate_instructions(gate, &qubits)? {
                    out.add_instruction(braket_inst)?;
                }
            }
            InstructionKind::Reset => {
                return Err(BraketError::UnsupportedInstruction("reset".into()));
            }
            InstructionKind::Delay { .. } => {
                return Err(BraketError::UnsupportedInstruction("delay".into()));
            }
            InstructionKind::Measure | InstructionKind::Barrier => {}
        }
    }
    flush(&mut out, &mut run)?;

    if implicit {
        let used = out.qubits();
        if (0..circuit.num_qubits() as u32).all(|q| used.contains(&q)) {
            debug!("terminal measurement of every qubit left implicit");
        } else {
            debug!(used = used.len(), "idle qubits measured, emitting sample");
            out.add_result_type(ResultType::sample_z(terminal))?;
        }
    }
    Ok(out)
}

fn flush(out: &mut Circuit, run: &mut Vec<u32>) -> BraketResult<()> {
    if !run.is_empty() {
        out.add_result_type(ResultType::sample_z(run.drain(..)))?;
    }
    Ok(())
}

/// Braket instructions for one IR gate on `qubits`.
pub fn gate_instructions(gate: &IrGate, qubits: &[u32]) -> BraketResult<Vec<Instruction>> {
    if qubits.len() != gate.num_qubits() as usize {
        return Err(BraketError::InvalidTarget {
            gate: gate.name().to_string(),
            expected: gate.num_qubits(),
            got: qubits.len(),
        });
    }
    if let Some(label) = &gate.label {
        debug!(label = %label, gate = gate.name(), "dropping gate label");
    }
    match &gate.kind {
        GateKind::Standard(std) => standard_instructions(std, qubits),
        GateKind::Custom(custom) => match &custom.matrix {
            Some(matrix) => {
                // Braket orders unitary targets most-significant first.
                let target = qubits.iter().rev().copied();
                Ok(vec![Instruction::new(Gate::unitary(matrix.clone())?, target)?])
            }
            None => Err(BraketError::UnsupportedGate(custom.name.clone())),
        },
    }
}

fn standard_instructions(gate: &StandardGate, q: &[u32]) -> BraketResult<Vec<Instruction>> {
    let a = Angle::from_expression;
    let on = |g: Gate| Instruction::new(g, q.iter().copied());
    let controlled = |g: Gate| -> BraketResult<Instruction> {
        Instruction::new(g, [q[1]])?.with_control([q[0]])
    };

    let inst = match gate {
        StandardGate::I => on(Gate::I),
        StandardGate::X => on(Gate::X),
        StandardGate::Y => on(Gate::Y),
        StandardGate::Z => on(Gate::Z),
        StandardGate::H => on(Gate::H),
        StandardGate::S => on(Gate::S),
        StandardGate::Sdg => on(Gate::Si),
        StandardGate::T => on(Gate::T),
        StandardGate::Tdg => on(Gate::Ti),
        StandardGate::SX => on(Gate::V),
        StandardGate::SXdg => on(Gate::Vi),
        StandardGate::Rx(t) => on(Gate::Rx { angle: a(t) }),
        StandardGate::Ry(t) => on(Gate::Ry { angle: a(t) }),
        StandardGate::Rz(t) => on(Gate::Rz { angle: a(t) }),
        StandardGate::P(t) => on(Gate::PhaseShift { angle: a(t) }),
        StandardGate::U(theta, phi, lambda) => return decompose_u(theta, phi, lambda, q[0]),
        StandardGate::PRX(theta, phi) => on(Gate::Prx {
            angle_1: a(theta),
            angle_2: a(phi),
        }),
        StandardGate::CX => on(Gate::CNot),
        StandardGate::CY => on(Gate::CY),
        StandardGate::CZ => on(Gate::CZ),
        StandardGate::CH => controlled(Gate::H),
        StandardGate::Swap => on(Gate::Swap),
        StandardGate::ISwap => on(Gate::ISwap),
        StandardGate::ECR => on(Gate::ECR),
        StandardGate::CRx(t) => controlled(Gate::Rx { angle: a(t) }),
        StandardGate::CRy(t) => controlled(Gate::Ry { angle: a(t) }),
        StandardGate::CRz(t) => controlled(Gate::Rz { angle: a(t) }),
        StandardGate::CP(t) => on(Gate::CPhaseShift { angle: a(t) }),
        StandardGate::RXX(t) => on(Gate::XX { angle: a(t) }),
        StandardGate::RYY(t) => on(Gate::YY { angle: a(t) }),
        StandardGate::RZZ(t) => on(Gate::ZZ { angle: a(t) }),
        StandardGate::XY(t) => on(Gate::XY { angle: a(t) }),
        StandardGate::CCX => on(Gate::CCNot),
        StandardGate::CSwap => on(Gate::CSwap),
    }?;
    Ok(vec![inst])
}

fn decompose_u(
    theta: &ParameterExpression,
    phi: &ParameterExpression,
    lambda: &ParameterExpression,
    qubit: u32,
) -> BraketResult<Vec<Instruction>> {
    [
        Gate::Rz {
            angle: Angle::from_expression(lambda),
        },
        Gate::Rx {
            angle: Angle::Value(FRAC_PI_2),
        },
        Gate::Rz {
            angle: Angle::from_expression(theta),
        },
        Gate::Rx {
            angle: Angle::Value(-FRAC_PI_2),
        },
        Gate::Rz {
            angle: Angle::from_expression(phi),
        },
    ]
    .into_iter()
    .map(|g| Instruction::new(g, [qubit]))
    .collect()
}
