//! IR → Qiskit.

use qbridge_ir::{Circuit, GateKind, Instruction, InstructionKind, StandardGate};
use tracing::instrument;

use crate::circuit::QuantumCircuit;
use crate::error::QiskitResult;
use crate::library;
use crate::operation::{Operation, Param};
use crate::register::{ClassicalRegister, QuantumRegister};

/// Export an IR circuit to Qiskit.
///
/// Registers are rebuilt from the IR bits when every bit carries register
/// membership in contiguous blocks; otherwise a single `q` / `c` register
/// is used. Broadcast measurements and resets are split per qubit.
#[instrument(skip(circuit), fields(name = circuit.name(), ops = circuit.num_ops()))]
pub fn from_ir(circuit: &Circuit) -> QiskitResult<QuantumCircuit> {
    let qregs = registers(
        circuit
            .qubits()
            .iter()
            .map(|q| (q.register.as_deref(), q.index)),
        "q",
    )
    .into_iter()
    .map(|(name, size)| QuantumRegister::new(size, name))
    .collect();
    let cregs = registers(
        circuit
            .clbits()
            .iter()
            .map(|c| (c.register.as_deref(), c.index)),
        "c",
    )
    .into_iter()
    .map(|(name, size)| ClassicalRegister::new(size, name))
    .collect();

    let mut qc = QuantumCircuit::from_registers(qregs, cregs)?.with_name(circuit.name());

    for inst in circuit.instructions().iter().flat_map(Instruction::split_broadcast) {
        let qargs: Vec<u32> = inst.qubits.iter().map(|q| q.0).collect();
        let cargs: Vec<u32> = inst.clbits.iter().map(|c| c.0).collect();
        qc.append(to_operation(&inst), &qargs, &cargs)?;
    }

    Ok(qc)
}

/// Group bits into `(register name, size)` blocks.
///
/// Falls back to one register named `default` when any bit lacks
/// membership or a register's indices are not `0..size` in order.
#[allow(clippy::cast_possible_truncation)]
fn registers<'a>(
    bits: impl Iterator<Item = (Option<&'a str>, Option<u32>)>,
    default: &str,
) -> Vec<(String, u32)> {
    let bits: Vec<_> = bits.collect();
    if bits.is_empty() {
        return vec![];
    }

    let mut blocks: Vec<(String, u32)> = Vec::new();
    for (register, index) in &bits {
        let (Some(register), Some(index)) = (register, index) else {
            return vec![(default.to_string(), bits.len() as u32)];
        };
        let extends_last =
            matches!(blocks.last(), Some((name, size)) if name.as_str() == *register && size == index);
        if extends_last {
            if let Some((_, size)) = blocks.last_mut() {
                *size += 1;
            }
        } else if *index == 0 && !blocks.iter().any(|(n, _)| n.as_str() == *register) {
            blocks.push(((*register).to_string(), 1));
        } else {
            return vec![(default.to_string(), bits.len() as u32)];
        }
    }
    blocks
}

fn to_operation(inst: &Instruction) -> Operation {
    match &inst.kind {
        InstructionKind::Measure => library::measure(),
        InstructionKind::Reset => library::reset(),
        #[allow(clippy::cast_possible_truncation)]
        InstructionKind::Barrier => library::barrier(inst.qubits.len() as u32),
        InstructionKind::Delay { duration } => library::delay(*duration),
        InstructionKind::Gate(gate) => {
            let op = match &gate.kind {
                GateKind::Standard(std) => standard_operation(std),
                GateKind::Custom(custom) => match &custom.matrix {
                    Some(matrix) => {
                        let mut op = Operation::new("unitary", custom.num_qubits, 0, vec![]);
                        op.matrix = Some(matrix.clone());
                        op
                    }
                    None => Operation::new(
                        custom.name.clone(),
                        custom.num_qubits,
                        0,
                        custom.params.iter().map(Param::from_expression).collect(),
                    ),
                },
            };
            match &gate.label {
                Some(label) => op.with_label(label.clone()),
                None => op,
            }
        }
    }
}

/// The Qiskit operation for an IR standard gate.
pub fn standard_operation(gate: &StandardGate) -> Operation {
    let p = |e: &qbridge_ir::ParameterExpression| Param::from_expression(e);
    match gate {
        StandardGate::I => library::id(),
        StandardGate::X => library::x(),
        StandardGate::Y => library::y(),
        StandardGate::Z => library::z(),
        StandardGate::H => library::h(),
        StandardGate::S => library::s(),
        StandardGate::Sdg => library::sdg(),
        StandardGate::T => library::t(),
        StandardGate::Tdg => library::tdg(),
        StandardGate::SX => library::sx(),
        StandardGate::SXdg => library::sxdg(),
        StandardGate::Rx(a) => library::rx(p(a)),
        StandardGate::Ry(a) => library::ry(p(a)),
        StandardGate::Rz(a) => library::rz(p(a)),
        StandardGate::P(a) => library::p(p(a)),
        StandardGate::U(theta, phi, lam) => library::u(p(theta), p(phi), p(lam)),
        StandardGate::PRX(theta, phi) => library::r(p(theta), p(phi)),
        StandardGate::CX => library::cx(),
        StandardGate::CY => library::cy(),
        StandardGate::CZ => library::cz(),
        StandardGate::CH => library::ch(),
        StandardGate::Swap => library::swap(),
        StandardGate::ISwap => library::iswap(),
        StandardGate::ECR => library::ecr(),
        StandardGate::CRx(a) => library::crx(p(a)),
        StandardGate::CRy(a) => library::cry(p(a)),
        StandardGate::CRz(a) => library::crz(p(a)),
        StandardGate::CP(a) => library::cp(p(a)),
        StandardGate::RXX(a) => library::rxx(p(a)),
        StandardGate::RYY(a) => library::ryy(p(a)),
        StandardGate::RZZ(a) => library::rzz(p(a)),
        StandardGate::XY(a) => library::xx_plus_yy(p(a), 0.0),
        StandardGate::CCX => library::ccx(),
        StandardGate::CSwap => library::cswap(),
    }
}
