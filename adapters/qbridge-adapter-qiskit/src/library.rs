//! Constructors for the standard Qiskit operations.

use num_complex::Complex64;

use crate::error::{QiskitError, QiskitResult};
use crate::operation::{Operation, Param};

/// Qubit count and parameter count of every standard gate this library
/// can build, keyed by Qiskit name.
const GATE_SIGNATURES: &[(&str, u32, usize)] = &[
    ("id", 1, 0),
    ("x", 1, 0),
    ("y", 1, 0),
    ("z", 1, 0),
    ("h", 1, 0),
    ("s", 1, 0),
    ("sdg", 1, 0),
    ("t", 1, 0),
    ("tdg", 1, 0),
    ("sx", 1, 0),
    ("sxdg", 1, 0),
    ("rx", 1, 1),
    ("ry", 1, 1),
    ("rz", 1, 1),
    ("p", 1, 1),
    ("u", 1, 3),
    ("u1", 1, 1),
    ("u2", 1, 2),
    ("u3", 1, 3),
    ("r", 1, 2),
    ("cx", 2, 0),
    ("cy", 2, 0),
    ("cz", 2, 0),
    ("ch", 2, 0),
    ("swap", 2, 0),
    ("iswap", 2, 0),
    ("ecr", 2, 0),
    ("crx", 2, 1),
    ("cry", 2, 1),
    ("crz", 2, 1),
    ("cp", 2, 1),
    ("rxx", 2, 1),
    ("ryy", 2, 1),
    ("rzz", 2, 1),
    ("xx_plus_yy", 2, 2),
    ("ccx", 3, 0),
    ("cswap", 3, 0),
];

/// `(num_qubits, num_params)` of a standard gate, or `None` for unknown names.
pub fn gate_signature(name: &str) -> Option<(u32, usize)> {
    GATE_SIGNATURES
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|&(_, q, p)| (q, p))
}

/// Names of every standard gate in the library.
pub fn standard_gate_names() -> impl Iterator<Item = &'static str> {
    GATE_SIGNATURES.iter().map(|(n, _, _)| *n)
}

/// Build a standard gate by name, checking the parameter count.
pub fn standard_gate(name: &str, params: Vec<Param>) -> QiskitResult<Operation> {
    let (num_qubits, num_params) =
        gate_signature(name).ok_or_else(|| QiskitError::UnsupportedOperation(name.to_string()))?;
    if params.len() != num_params {
        return Err(QiskitError::InvalidParameter {
            name: name.to_string(),
            reason: format!("expected {num_params} parameters, got {}", params.len()),
        });
    }
    Ok(Operation::new(name, num_qubits, 0, params))
}

fn fixed(name: &str, num_qubits: u32) -> Operation {
    Operation::new(name, num_qubits, 0, vec![])
}

fn rotation(name: &str, num_qubits: u32, params: Vec<Param>) -> Operation {
    Operation::new(name, num_qubits, 0, params)
}

/// Identity.
pub fn id() -> Operation {
    fixed("id", 1)
}

/// Pauli-X.
pub fn x() -> Operation {
    fixed("x", 1)
}

/// Pauli-Y.
pub fn y() -> Operation {
    fixed("y", 1)
}

/// Pauli-Z.
pub fn z() -> Operation {
    fixed("z", 1)
}

/// Hadamard.
pub fn h() -> Operation {
    fixed("h", 1)
}

/// S.
pub fn s() -> Operation {
    fixed("s", 1)
}

/// S-dagger.
pub fn sdg() -> Operation {
    fixed("sdg", 1)
}

/// T.
pub fn t() -> Operation {
    fixed("t", 1)
}

/// T-dagger.
pub fn tdg() -> Operation {
    fixed("tdg", 1)
}

/// sqrt(X).
pub fn sx() -> Operation {
    fixed("sx", 1)
}

/// sqrt(X)-dagger.
pub fn sxdg() -> Operation {
    fixed("sxdg", 1)
}

/// X rotation.
pub fn rx(theta: impl Into<Param>) -> Operation {
    rotation("rx", 1, vec![theta.into()])
}

/// Y rotation.
pub fn ry(theta: impl Into<Param>) -> Operation {
    rotation("ry", 1, vec![theta.into()])
}

/// Z rotation.
pub fn rz(phi: impl Into<Param>) -> Operation {
    rotation("rz", 1, vec![phi.into()])
}

/// Phase gate.
pub fn p(theta: impl Into<Param>) -> Operation {
    rotation("p", 1, vec![theta.into()])
}

/// Generic single-qubit rotation U(θ, φ, λ).
pub fn u(theta: impl Into<Param>, phi: impl Into<Param>, lam: impl Into<Param>) -> Operation {
    rotation("u", 1, vec![theta.into(), phi.into(), lam.into()])
}

/// U1(λ), equal to the phase gate.
pub fn u1(lam: impl Into<Param>) -> Operation {
    rotation("u1", 1, vec![lam.into()])
}

/// U2(φ, λ) = U(π/2, φ, λ).
pub fn u2(phi: impl Into<Param>, lam: impl Into<Param>) -> Operation {
    rotation("u2", 1, vec![phi.into(), lam.into()])
}

/// U3(θ, φ, λ), equal to U.
pub fn u3(theta: impl Into<Param>, phi: impl Into<Param>, lam: impl Into<Param>) -> Operation {
    rotation("u3", 1, vec![theta.into(), phi.into(), lam.into()])
}

/// Rotation by θ around the axis cos(φ)x + sin(φ)y.
pub fn r(theta: impl Into<Param>, phi: impl Into<Param>) -> Operation {
    rotation("r", 1, vec![theta.into(), phi.into()])
}

/// Controlled-X.
pub fn cx() -> Operation {
    fixed("cx", 2)
}

/// Controlled-Y.
pub fn cy() -> Operation {
    fixed("cy", 2)
}

/// Controlled-Z.
pub fn cz() -> Operation {
    fixed("cz", 2)
}

/// Controlled-Hadamard.
pub fn ch() -> Operation {
    fixed("ch", 2)
}

/// SWAP.
pub fn swap() -> Operation {
    fixed("swap", 2)
}

/// iSWAP.
pub fn iswap() -> Operation {
    fixed("iswap", 2)
}

/// Echoed cross-resonance.
pub fn ecr() -> Operation {
    fixed("ecr", 2)
}

/// Controlled X rotation.
pub fn crx(theta: impl Into<Param>) -> Operation {
    rotation("crx", 2, vec![theta.into()])
}

/// Controlled Y rotation.
pub fn cry(theta: impl Into<Param>) -> Operation {
    rotation("cry", 2, vec![theta.into()])
}

/// Controlled Z rotation.
pub fn crz(theta: impl Into<Param>) -> Operation {
    rotation("crz", 2, vec![theta.into()])
}

/// Controlled phase.
pub fn cp(theta: impl Into<Param>) -> Operation {
    rotation("cp", 2, vec![theta.into()])
}

/// XX rotation.
pub fn rxx(theta: impl Into<Param>) -> Operation {
    rotation("rxx", 2, vec![theta.into()])
}

/// YY rotation.
pub fn ryy(theta: impl Into<Param>) -> Operation {
    rotation("ryy", 2, vec![theta.into()])
}

/// ZZ rotation.
pub fn rzz(theta: impl Into<Param>) -> Operation {
    rotation("rzz", 2, vec![theta.into()])
}

/// XX+YY interaction with phase β.
pub fn xx_plus_yy(theta: impl Into<Param>, beta: impl Into<Param>) -> Operation {
    rotation("xx_plus_yy", 2, vec![theta.into(), beta.into()])
}

/// Toffoli.
pub fn ccx() -> Operation {
    fixed("ccx", 3)
}

/// Fredkin.
pub fn cswap() -> Operation {
    fixed("cswap", 3)
}

/// Arbitrary unitary given as a row-major `2^n × 2^n` matrix.
pub fn unitary(num_qubits: u32, matrix: Vec<Complex64>) -> QiskitResult<Operation> {
    let entries = 1usize
        .checked_shl(num_qubits)
        .and_then(|dim| dim.checked_mul(dim));
    if entries != Some(matrix.len()) {
        return Err(QiskitError::InvalidParameter {
            name: "unitary".into(),
            reason: format!(
                "{} matrix entries do not form a unitary on {num_qubits} qubits",
                matrix.len()
            ),
        });
    }
    let mut op = fixed("unitary", num_qubits);
    op.matrix = Some(matrix);
    Ok(op)
}

/// Z-basis measurement of one qubit into one classical bit.
pub fn measure() -> Operation {
    Operation::new("measure", 1, 1, vec![])
}

/// Barrier across `num_qubits` qubits.
pub fn barrier(num_qubits: u32) -> Operation {
    fixed("barrier", num_qubits)
}

/// Reset to |0⟩.
pub fn reset() -> Operation {
    fixed("reset", 1)
}

/// Idle for `duration` device time units.
#[allow(clippy::cast_precision_loss)]
pub fn delay(duration: u64) -> Operation {
    rotation("delay", 1, vec![Param::Float(duration as f64)])
}
