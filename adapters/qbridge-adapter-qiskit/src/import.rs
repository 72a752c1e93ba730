//! Qiskit → IR.

use qbridge_ir::{
    Circuit, ClbitId, CustomGate, Gate, Instruction, ParameterExpression, QubitId, StandardGate,
};
use tracing::{debug, instrument};

use crate::circuit::{CircuitInstruction, QuantumCircuit};
use crate::error::{QiskitError, QiskitResult};
use crate::operation::{Operation, Param};

/// Import a Qiskit circuit into the IR.
///
/// Register names and sizes are kept on the IR bits. `u1` becomes a phase
/// gate, `u2`/`u3` become `U`, `r` becomes `PRX` and `xx_plus_yy` with a
/// zero phase becomes `XY`. The global phase is dropped.
#[instrument(skip(circuit), fields(name = %circuit.name, ops = circuit.size()))]
pub fn to_ir(circuit: &QuantumCircuit) -> QiskitResult<Circuit> {
    let mut ir = Circuit::new(circuit.name.clone());
    for qreg in circuit.qregs() {
        ir.add_qreg(qreg.name.clone(), qreg.size);
    }
    for creg in circuit.cregs() {
        ir.add_creg(creg.name.clone(), creg.size);
    }
    if circuit.global_phase != 0.0 {
        debug!(global_phase = circuit.global_phase, "dropping global phase");
    }

    for inst in circuit.data() {
        ir.apply(convert_instruction(inst)?)?;
    }

    Ok(ir)
}

fn convert_instruction(inst: &CircuitInstruction) -> QiskitResult<Instruction> {
    let op = &inst.operation;
    let qubits = inst.qubits.iter().map(|&q| QubitId(q));

    let instruction = match op.name.as_str() {
        "measure" => {
            Instruction::measure_many(qubits, inst.clbits.iter().map(|&c| ClbitId(c)))?
        }
        "barrier" => Instruction::barrier(qubits),
        "reset" => match inst.qubits.as_slice() {
            [q] => Instruction::reset(QubitId(*q)),
            _ => return Err(arity_error(op, inst)),
        },
        "delay" => match inst.qubits.as_slice() {
            [q] => Instruction::delay(QubitId(*q), delay_duration(op)?),
            _ => return Err(arity_error(op, inst)),
        },
        _ => Instruction::gate(to_ir_gate(op)?, qubits),
    };
    Ok(instruction)
}

fn arity_error(op: &Operation, inst: &CircuitInstruction) -> QiskitError {
    QiskitError::ArityMismatch {
        name: op.name.clone(),
        expected_qubits: op.num_qubits,
        expected_clbits: op.num_clbits,
        qubits: inst.qubits.len(),
        clbits: inst.clbits.len(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn delay_duration(op: &Operation) -> QiskitResult<u64> {
    let invalid = |reason: &str| QiskitError::InvalidParameter {
        name: op.name.clone(),
        reason: reason.to_string(),
    };
    let value = op
        .params
        .first()
        .and_then(Param::as_f64)
        .ok_or_else(|| invalid("duration must be a bound number"))?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(invalid("duration must be a non-negative integer"));
    }
    Ok(value as u64)
}

/// Convert a Qiskit gate operation into an IR gate.
pub fn to_ir_gate(op: &Operation) -> QiskitResult<Gate> {
    let gate = if op.name == "unitary" {
        let matrix = op.matrix.clone().ok_or_else(|| QiskitError::InvalidParameter {
            name: op.name.clone(),
            reason: "missing matrix".into(),
        })?;
        Gate::custom(CustomGate::unitary(op.num_qubits, matrix)?)
    } else {
        Gate::standard(to_standard_gate(op)?)
    };
    Ok(match &op.label {
        Some(label) => gate.with_label(label.clone()),
        None => gate,
    })
}

fn to_standard_gate(op: &Operation) -> QiskitResult<StandardGate> {
    let p: Vec<ParameterExpression> = op.params.iter().map(Param::to_expression).collect();
    let wrong_params = || QiskitError::InvalidParameter {
        name: op.name.clone(),
        reason: format!("unexpected parameter count {}", op.params.len()),
    };

    let gate = match (op.name.as_str(), p.as_slice()) {
        ("id", []) => StandardGate::I,
        ("x", []) => StandardGate::X,
        ("y", []) => StandardGate::Y,
        ("z", []) => StandardGate::Z,
        ("h", []) => StandardGate::H,
        ("s", []) => StandardGate::S,
        ("sdg", []) => StandardGate::Sdg,
        ("t", []) => StandardGate::T,
        ("tdg", []) => StandardGate::Tdg,
        ("sx", []) => StandardGate::SX,
        ("sxdg", []) => StandardGate::SXdg,
        ("rx", [a]) => StandardGate::Rx(a.clone()),
        ("ry", [a]) => StandardGate::Ry(a.clone()),
        ("rz", [a]) => StandardGate::Rz(a.clone()),
        ("p" | "u1", [a]) => StandardGate::P(a.clone()),
        ("u2", [phi, lam]) => StandardGate::U(
            ParameterExpression::pi() / ParameterExpression::constant(2.0),
            phi.clone(),
            lam.clone(),
        ),
        ("u" | "u3", [theta, phi, lam]) => {
            StandardGate::U(theta.clone(), phi.clone(), lam.clone())
        }
        ("r", [theta, phi]) => StandardGate::PRX(theta.clone(), phi.clone()),
        ("cx", []) => StandardGate::CX,
        ("cy", []) => StandardGate::CY,
        ("cz", []) => StandardGate::CZ,
        ("ch", []) => StandardGate::CH,
        ("swap", []) => StandardGate::Swap,
        ("iswap", []) => StandardGate::ISwap,
        ("ecr", []) => StandardGate::ECR,
        ("crx", [a]) => StandardGate::CRx(a.clone()),
        ("cry", [a]) => StandardGate::CRy(a.clone()),
        ("crz", [a]) => StandardGate::CRz(a.clone()),
        ("cp", [a]) => StandardGate::CP(a.clone()),
        ("rxx", [a]) => StandardGate::RXX(a.clone()),
        ("ryy", [a]) => StandardGate::RYY(a.clone()),
        ("rzz", [a]) => StandardGate::RZZ(a.clone()),
        ("xx_plus_yy", [theta, beta]) => {
            if beta.as_f64() != Some(0.0) {
                return Err(QiskitError::UnsupportedOperation(
                    "xx_plus_yy with non-zero beta".into(),
                ));
            }
            StandardGate::XY(theta.clone())
        }
        ("ccx", []) => StandardGate::CCX,
        ("cswap", []) => StandardGate::CSwap,
        (name, _) if crate::library::gate_signature(name).is_some() => {
            return Err(wrong_params());
        }
        (name, _) => return Err(QiskitError::UnsupportedOperation(name.to_string())),
    };
    Ok(gate)
}
