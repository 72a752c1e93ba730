//! JAQCD JSON programs (`braket.ir.jaqcd.program`).
//!
//! JAQCD predates free parameters, gate modifiers and verbatim boxes, so
//! circuits using any of them are rejected; use [`crate::openqasm`] for
//! those. `prx` has no JAQCD form either.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::{BraketError, BraketResult};
use crate::gates::{Angle, Gate};
use crate::instruction::Instruction;
use crate::result_types::{Observable, ResultType};

/// Schema name of a JAQCD program.
pub const SCHEMA_NAME: &str = "braket.ir.jaqcd.program";
/// Schema version written by [`to_program`].
pub const SCHEMA_VERSION: &str = "1";

const FORMAT: &str = "JAQCD";

/// Schema header of a Braket IR document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaHeader {
    /// Schema name.
    pub name: String,
    /// Schema version.
    pub version: String,
}

/// A JAQCD program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Schema header.
    #[serde(rename = "braketSchemaHeader")]
    pub braket_schema_header: SchemaHeader,
    /// Gate instructions.
    pub instructions: Vec<JaqcdInstruction>,
    /// Requested results.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<JaqcdResult>,
}

/// One JAQCD instruction. Which qubit fields are set depends on the gate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JaqcdInstruction {
    /// Gate name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Single target qubit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    /// Multiple target qubits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<u32>>,
    /// Single control qubit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<u32>,
    /// Multiple control qubits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<Vec<u32>>,
    /// Gate angle in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Unitary matrix as rows of `[re, im]` pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Vec<[f64; 2]>>>,
}

/// One JAQCD result type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JaqcdResult {
    /// Result type name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Observable factors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observable: Option<Vec<String>>,
    /// Target qubits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<u32>>,
    /// Basis states for amplitudes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
}

/// How a gate lays out its qubits in JAQCD.
enum Layout {
    Target,
    ControlTarget,
    ControlsTarget,
    ControlTargets,
    Targets,
}

fn layout(gate: &Gate) -> Layout {
    match gate {
        Gate::CNot
        | Gate::CY
        | Gate::CZ
        | Gate::CPhaseShift { .. }
        | Gate::CPhaseShift00 { .. }
        | Gate::CPhaseShift01 { .. }
        | Gate::CPhaseShift10 { .. } => Layout::ControlTarget,
        Gate::CCNot => Layout::ControlsTarget,
        Gate::CSwap => Layout::ControlTargets,
        Gate::Unitary { .. } => Layout::Targets,
        g if g.qubit_count() == 1 => Layout::Target,
        _ => Layout::Targets,
    }
}

/// Convert a circuit to a JAQCD program.
pub fn to_program(circuit: &Circuit) -> BraketResult<Program> {
    let mut instructions = Vec::with_capacity(circuit.instructions().len());
    for inst in circuit.instructions() {
        instructions.push(instruction_to_jaqcd(inst)?);
    }
    let results = circuit
        .result_types()
        .iter()
        .map(result_to_jaqcd)
        .collect();
    Ok(Program {
        braket_schema_header: SchemaHeader {
            name: SCHEMA_NAME.into(),
            version: SCHEMA_VERSION.into(),
        },
        instructions,
        results,
    })
}

/// Serialize a circuit as a pretty-printed JAQCD document.
pub fn to_json(circuit: &Circuit) -> BraketResult<String> {
    Ok(serde_json::to_string_pretty(&to_program(circuit)?)?)
}

/// Parse a JAQCD document into a circuit.
pub fn from_json(json: &str) -> BraketResult<Circuit> {
    from_program(&serde_json::from_str(json)?)
}

fn unsupported(what: impl Into<String>) -> BraketError {
    BraketError::UnsupportedByFormat {
        format: FORMAT,
        what: what.into(),
    }
}

fn instruction_to_jaqcd(inst: &Instruction) -> BraketResult<JaqcdInstruction> {
    let Some(gate) = inst.gate() else {
        return Err(unsupported("compiler directives"));
    };
    if inst.is_controlled() {
        return Err(unsupported(format!("controlled '{}'", gate.name())));
    }
    if inst.power() != 1.0 {
        return Err(unsupported(format!("'{}' raised to a power", gate.name())));
    }
    if matches!(gate, Gate::Prx { .. }) {
        return Err(unsupported("the 'prx' gate"));
    }

    let mut out = JaqcdInstruction {
        kind: gate.name().to_string(),
        ..JaqcdInstruction::default()
    };
    if let Some(angle) = gate.angles().first() {
        out.angle = Some(
            angle
                .as_f64()
                .ok_or_else(|| unsupported(format!("free parameter '{angle}'")))?,
        );
    }
    if let Gate::Unitary {
        matrix,
        qubit_count,
    } = gate
    {
        let dim = 1usize << qubit_count;
        out.matrix = Some(
            matrix
                .chunks(dim)
                .map(|row| row.iter().map(|c| [c.re, c.im]).collect())
                .collect(),
        );
    }

    let t = inst.target();
    match layout(gate) {
        Layout::Target => out.target = Some(t[0]),
        Layout::ControlTarget => {
            out.control = Some(t[0]);
            out.target = Some(t[1]);
        }
        Layout::ControlsTarget => {
            out.controls = Some(t[..2].to_vec());
            out.target = Some(t[2]);
        }
        Layout::ControlTargets => {
            out.control = Some(t[0]);
            out.targets = Some(t[1..].to_vec());
        }
        Layout::Targets => out.targets = Some(t.to_vec()),
    }
    Ok(out)
}

fn result_to_jaqcd(rt: &ResultType) -> JaqcdResult {
    let kind = match rt {
        ResultType::Sample { .. } => "sample",
        ResultType::Probability { .. } => "probability",
        ResultType::Expectation { .. } => "expectation",
        ResultType::Variance { .. } => "variance",
        ResultType::StateVector => "statevector",
        ResultType::Amplitude { .. } => "amplitude",
    };
    JaqcdResult {
        kind: kind.to_string(),
        observable: rt.observable().map(|o| vec![o.name().to_string()]),
        targets: (!rt.target().is_empty()).then(|| rt.target().to_vec()),
        states: match rt {
            ResultType::Amplitude { states } => Some(states.clone()),
            _ => None,
        },
    }
}

/// Convert a JAQCD program to a circuit.
pub fn from_program(program: &Program) -> BraketResult<Circuit> {
    if program.braket_schema_header.name != SCHEMA_NAME {
        return Err(BraketError::parse(
            "JAQCD program",
            format!("unexpected schema '{}'", program.braket_schema_header.name),
        ));
    }
    let mut circuit = Circuit::new();
    for inst in &program.instructions {
        circuit.add_instruction(instruction_from_jaqcd(inst)?)?;
    }
    for result in &program.results {
        circuit.add_result_type(result_from_jaqcd(result)?)?;
    }
    Ok(circuit)
}

fn instruction_from_jaqcd(inst: &JaqcdInstruction) -> BraketResult<Instruction> {
    let missing = |field: &str| {
        BraketError::parse(
            "JAQCD instruction",
            format!("'{}' is missing '{field}'", inst.kind),
        )
    };

    let gate = if inst.kind == "unitary" {
        let rows = inst.matrix.as_ref().ok_or_else(|| missing("matrix"))?;
        let matrix = rows
            .iter()
            .flatten()
            .map(|&[re, im]| Complex64::new(re, im))
            .collect();
        Gate::unitary(matrix)?
    } else {
        let angles = inst.angle.map(Angle::Value).into_iter().collect();
        Gate::from_name(&inst.kind, angles)?
    };

    let target = match layout(&gate) {
        Layout::Target => vec![inst.target.ok_or_else(|| missing("target"))?],
        Layout::ControlTarget => vec![
            inst.control.ok_or_else(|| missing("control"))?,
            inst.target.ok_or_else(|| missing("target"))?,
        ],
        Layout::ControlsTarget => {
            let mut qubits = inst.controls.clone().ok_or_else(|| missing("controls"))?;
            qubits.push(inst.target.ok_or_else(|| missing("target"))?);
            qubits
        }
        Layout::ControlTargets => {
            let mut qubits = vec![inst.control.ok_or_else(|| missing("control"))?];
            qubits.extend(inst.targets.clone().ok_or_else(|| missing("targets"))?);
            qubits
        }
        Layout::Targets => inst.targets.clone().ok_or_else(|| missing("targets"))?,
    };
    Instruction::new(gate, target)
}

fn result_from_jaqcd(result: &JaqcdResult) -> BraketResult<ResultType> {
    let target = result.targets.clone().unwrap_or_default();
    let observable = || -> BraketResult<Observable> {
        match result.observable.as_deref() {
            Some([name]) => Observable::from_name(name).ok_or_else(|| {
                BraketError::UnsupportedResultType(format!("observable '{name}'"))
            }),
            Some(_) => Err(BraketError::UnsupportedResultType(
                "tensor-product observables".into(),
            )),
            None => Err(BraketError::parse(
                "JAQCD result",
                format!("'{}' is missing 'observable'", result.kind),
            )),
        }
    };
    let rt = match result.kind.as_str() {
        "sample" => ResultType::Sample {
            observable: observable()?,
            target,
        },
        "probability" => ResultType::Probability { target },
        "expectation" => ResultType::Expectation {
            observable: observable()?,
            target,
        },
        "variance" => ResultType::Variance {
            observable: observable()?,
            target,
        },
        "statevector" => ResultType::StateVector,
        "amplitude" => ResultType::Amplitude {
            states: result.states.clone().unwrap_or_default(),
        },
        other => return Err(BraketError::UnsupportedResultType(other.to_string())),
    };
    Ok(rt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_program_layout() {
        let mut circ = Circuit::new();
        circ.h(0)
            .unwrap()
            .cnot(0, 1)
            .unwrap()
            .sample(Observable::Z, [0, 1])
            .unwrap();
        let value = serde_json::to_value(to_program(&circ).unwrap()).unwrap();
        assert_eq!(value["braketSchemaHeader"]["name"], SCHEMA_NAME);
        assert_eq!(value["instructions"][0]["type"], "h");
        assert_eq!(value["instructions"][0]["target"], 0);
        assert_eq!(value["instructions"][1]["control"], 0);
        assert_eq!(value["instructions"][1]["target"], 1);
        assert_eq!(value["results"][0]["observable"][0], "z");
        assert!(value["instructions"][0].get("angle").is_none());
    }

    #[test]
    fn test_roundtrip_through_json() {
        let mut circ = Circuit::new();
        circ.rx(0, 0.25)
            .unwrap()
            .ccnot(0, 1, 2)
            .unwrap()
            .cswap(2, 0, 1)
            .unwrap()
            .xx(1, 2, 0.5)
            .unwrap()
            .unitary([1], vec![
                Complex64::new(0.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, 0.0),
            ])
            .unwrap()
            .probability([0, 2])
            .unwrap();
        let json = to_json(&circ).unwrap();
        assert_eq!(from_json(&json).unwrap(), circ);
    }

    #[test]
    fn test_free_parameter_rejected() {
        let mut circ = Circuit::new();
        circ.rz(0, Angle::parameter("theta")).unwrap();
        assert!(matches!(
            to_program(&circ).unwrap_err(),
            BraketError::UnsupportedByFormat { format: "JAQCD", .. }
        ));
    }

    #[test]
    fn test_controlled_and_verbatim_rejected() {
        let mut circ = Circuit::new();
        circ.add_instruction(Instruction::new(Gate::H, [1]).unwrap().with_control([0]).unwrap())
            .unwrap();
        assert!(to_program(&circ).is_err());

        let mut inner = Circuit::new();
        inner.x(0).unwrap();
        let mut boxed = Circuit::new();
        boxed.add_verbatim_box(&inner).unwrap();
        assert!(to_program(&boxed).is_err());
    }

    #[test]
    fn test_parse_errors() {
        let json = r#"{"braketSchemaHeader":{"name":"braket.ir.jaqcd.program","version":"1"},
                       "instructions":[{"type":"cnot","target":1}]}"#;
        assert!(matches!(
            from_json(json).unwrap_err(),
            BraketError::Parse { .. }
        ));

        let json = r#"{"braketSchemaHeader":{"name":"braket.ir.openqasm.program","version":"1"},
                       "instructions":[]}"#;
        assert!(from_json(json).is_err());
    }
}
