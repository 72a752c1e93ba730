//! Braket device capabilities → Qiskit `Target`.

use qbridge_adapter_braket::{DeviceCapabilities, Paradigm, Provider};
use qbridge_adapter_qiskit::{Operation, Param, QargsMap, Target, library};
use tracing::{debug, instrument};

use crate::error::{ConvertError, ConvertResult};

/// The Qiskit operation for a Braket operation name, case-insensitively.
///
/// Parameterized gates carry placeholder parameters. Names with no Qiskit
/// counterpart (`pswap`, `cphaseshift00`, `unitary`, ...) map to `None`.
pub fn braket_operation_to_qiskit(name: &str) -> Option<Operation> {
    let theta = || Param::parameter("theta");
    let op = match name.to_lowercase().as_str() {
        "i" => library::id(),
        "h" => library::h(),
        "x" => library::x(),
        "y" => library::y(),
        "z" => library::z(),
        "s" => library::s(),
        "si" => library::sdg(),
        "t" => library::t(),
        "ti" => library::tdg(),
        "v" => library::sx(),
        "vi" => library::sxdg(),
        "rx" => library::rx(theta()),
        "ry" => library::ry(theta()),
        "rz" => library::rz(Param::parameter("phi")),
        "phaseshift" => library::p(theta()),
        "prx" => library::r(theta(), Param::parameter("phi")),
        "cnot" => library::cx(),
        "cy" => library::cy(),
        "cz" => library::cz(),
        "swap" => library::swap(),
        "iswap" => library::iswap(),
        "ecr" => library::ecr(),
        "cphaseshift" => library::cp(theta()),
        "xx" => library::rxx(theta()),
        "yy" => library::ryy(theta()),
        "zz" => library::rzz(theta()),
        "xy" => library::xx_plus_yy(theta(), 0.0),
        "ccnot" => library::ccx(),
        "cswap" => library::cswap(),
        _ => return None,
    };
    Some(op)
}

/// Build a Qiskit target for a Braket device.
///
/// IonQ, Rigetti, OQC and IQM QPUs and gate-model simulators are
/// supported. Supported operations with a Qiskit counterpart on at most
/// two qubits become target instructions: one-qubit gates on every qubit,
/// two-qubit gates on every ordered pair for fully connected devices and
/// simulators, or on the connectivity-graph edges otherwise. `measure` is
/// available on every qubit.
#[instrument(skip(device), fields(device = %device.name))]
pub fn aws_device_to_target(device: &DeviceCapabilities) -> ConvertResult<Target> {
    let supported = match device.provider() {
        Provider::IonQ | Provider::Rigetti | Provider::Oqc | Provider::Iqm => {
            !device.is_simulator()
        }
        Provider::Amazon | Provider::Local => device.is_simulator(),
        Provider::Unknown => false,
    };
    if !supported {
        return Err(ConvertError::UnsupportedDevice {
            name: device.name.clone(),
            provider: device.provider_name.clone(),
        });
    }

    let num_qubits = device.qubit_count();
    let pairs = match &device.paradigm {
        Paradigm::Qpu { connectivity, .. } if !connectivity.fully_connected => {
            connectivity.edges()
        }
        _ => all_pairs(num_qubits),
    };

    let operations = device
        .supported_operations()
        .iter()
        .filter_map(|name| braket_operation_to_qiskit(name));
    build_target(
        format!("Target for AWS Device: {}", device.name),
        num_qubits,
        operations,
        &pairs,
    )
}

/// Build a Qiskit target for a local simulator.
///
/// Every standard Qiskit gate on at most two qubits is available,
/// including the `u` family, on all qubits and ordered pairs.
#[instrument(skip(simulator), fields(device = %simulator.name))]
pub fn local_simulator_to_target(simulator: &DeviceCapabilities) -> ConvertResult<Target> {
    let num_qubits = simulator.qubit_count();
    let operations = library::standard_gate_names()
        .filter_map(|name| library::standard_gate(name, placeholder_params(name)).ok());
    build_target(
        format!("Target for local simulator: {}", simulator.name),
        num_qubits,
        operations,
        &all_pairs(num_qubits),
    )
}

fn placeholder_params(name: &str) -> Vec<Param> {
    let count = library::gate_signature(name).map_or(0, |(_, params)| params);
    ["theta", "phi", "lam"]
        .iter()
        .take(count)
        .map(|p| Param::parameter(*p))
        .collect()
}

fn all_pairs(num_qubits: u32) -> Vec<(u32, u32)> {
    (0..num_qubits)
        .flat_map(|src| {
            (0..num_qubits)
                .filter(move |&dst| dst != src)
                .map(move |dst| (src, dst))
        })
        .collect()
}

fn build_target(
    description: String,
    num_qubits: u32,
    operations: impl Iterator<Item = Operation>,
    pairs: &[(u32, u32)],
) -> ConvertResult<Target> {
    let mut target = Target::with_description(description);
    let singles: QargsMap = (0..num_qubits).map(|i| (vec![i], None)).collect();
    target.add_instruction(library::measure(), Some(singles.clone()))?;

    for op in operations {
        if target.operation(&op.name).is_some() {
            continue;
        }
        let qargs: QargsMap = match op.num_qubits {
            1 => singles.clone(),
            2 => pairs.iter().map(|&(a, b)| (vec![a, b], None)).collect(),
            n => {
                debug!(gate = %op.name, qubits = n, "skipping gate on more than two qubits");
                continue;
            }
        };
        target.add_instruction(op, Some(qargs))?;
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbridge_adapter_braket::device::{
        self, IONQ_ARIA, IQM_GARNET, OQC_LUCY, RIGETTI_ANKAA_3, SV1,
    };
    use qbridge_adapter_braket::device::{ActionProperties, Connectivity};
    use std::collections::BTreeMap;

    fn preset(arn: &str) -> DeviceCapabilities {
        device::capabilities_for_device(arn).unwrap()
    }

    #[test]
    fn test_operation_mapping() {
        assert_eq!(braket_operation_to_qiskit("CNOT").unwrap().name, "cx");
        assert_eq!(braket_operation_to_qiskit("si").unwrap().name, "sdg");
        assert_eq!(braket_operation_to_qiskit("xy").unwrap().name, "xx_plus_yy");
        assert_eq!(braket_operation_to_qiskit("prx").unwrap().name, "r");
        assert!(braket_operation_to_qiskit("pswap").is_none());
        assert!(braket_operation_to_qiskit("cphaseshift01").is_none());
        assert!(braket_operation_to_qiskit("unitary").is_none());
    }

    #[test]
    fn test_ionq_is_fully_connected() {
        let caps = preset(IONQ_ARIA);
        let target = aws_device_to_target(&caps).unwrap();
        let n = caps.qubit_count();
        assert_eq!(target.num_qubits(), n);
        assert_eq!(target.qargs_for("cx").unwrap().len(), (n * (n - 1)) as usize);
        assert!(target.instruction_supported("cx", &[5, 2]));
        assert!(target.instruction_supported("measure", &[n - 1]));
        assert!(target.instruction_supported("rxx", &[0, 1]));
        assert!(
            target
                .description
                .as_deref()
                .unwrap()
                .starts_with("Target for AWS Device:")
        );
    }

    #[test]
    fn test_rigetti_uses_connectivity_graph() {
        let caps = preset(RIGETTI_ANKAA_3);
        let target = aws_device_to_target(&caps).unwrap();
        assert!(target.instruction_supported("cz", &[0, 1]));
        assert!(target.instruction_supported("cz", &[1, 0]));
        assert!(!target.instruction_supported("cz", &[0, 2]));
        assert!(target.instruction_supported("xx_plus_yy", &[0, 12]));
        assert!(!target.instruction_supported("cx", &[0, 1]));
        assert_eq!(target.qargs_for("rz").unwrap().len(), 84);
    }

    #[test]
    fn test_three_qubit_gates_skipped() {
        let target = aws_device_to_target(&preset(OQC_LUCY)).unwrap();
        assert!(target.operation("ccx").is_none());
        assert!(target.operation("cswap").is_none());
        assert!(target.operation("ecr").is_some());

        let target = aws_device_to_target(&preset(IQM_GARNET)).unwrap();
        assert!(target.operation("r").is_some());
        assert!(target.operation("ccx").is_none());
    }

    #[test]
    fn test_simulator_gets_all_pairs() {
        let caps = preset(SV1);
        let target = aws_device_to_target(&caps).unwrap();
        let n = caps.qubit_count();
        assert!(target.instruction_supported("cp", &[n - 1, 0]));
        assert!(target.operation("unitary").is_none());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let mut action = BTreeMap::new();
        action.insert(
            device::OPENQASM_ACTION.to_string(),
            ActionProperties {
                version: vec!["1".into()],
                supported_operations: vec!["h".into()],
            },
        );
        let caps = DeviceCapabilities {
            name: "Aquila".into(),
            arn: None,
            provider_name: "QuEra".into(),
            paradigm: Paradigm::Qpu {
                qubit_count: 256,
                connectivity: Connectivity::default(),
            },
            action,
        };
        assert!(matches!(
            aws_device_to_target(&caps).unwrap_err(),
            ConvertError::UnsupportedDevice { provider, .. } if provider == "QuEra"
        ));
    }

    #[test]
    fn test_duplicate_operation_names_collapse() {
        let mut caps = preset(IONQ_ARIA);
        for props in caps.action.values_mut() {
            props.supported_operations.push("CNOT".into());
        }
        let target = aws_device_to_target(&caps).unwrap();
        assert!(target.operation("cx").is_some());
    }

    #[test]
    fn test_local_simulator_target() {
        let sim = device::local_simulator();
        let target = local_simulator_to_target(&sim).unwrap();
        let n = sim.qubit_count();
        assert_eq!(target.num_qubits(), n);
        for name in ["u", "u1", "u2", "u3", "measure", "cx", "rzz"] {
            assert!(target.operation(name).is_some(), "{name} missing");
        }
        assert!(target.operation("ccx").is_none());
        assert_eq!(target.qargs_for("swap").unwrap().len(), (n * (n - 1)) as usize);
    }

    #[test]
    fn test_local_simulator_target_small_device() {
        let mut sim = device::local_simulator();
        sim.paradigm = Paradigm::Simulator { qubit_count: 1 };
        let target = local_simulator_to_target(&sim).unwrap();
        assert_eq!(target.num_qubits(), 1);
        assert_eq!(target.qargs_for("h").unwrap().len(), 1);
        assert!(target.qargs_for("cx").map_or(true, |q| q.is_empty()));
        assert!(target.operation("measure").is_some());
    }
}
