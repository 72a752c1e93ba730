//! Braket device capabilities.
//!
//! [`DeviceCapabilities`] deserializes the subset of the Braket device
//! schema needed to build a Qiskit target: paradigm, connectivity and the
//! operations each action supports. Known device ARNs map to presets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{BraketError, BraketResult};

// ──────────────────────────────────────────────────────────────────────
// Known device ARNs
// ──────────────────────────────────────────────────────────────────────

/// Rigetti Ankaa-3 (84 qubits, superconducting).
pub const RIGETTI_ANKAA_3: &str = "arn:aws:braket:us-west-1::device/qpu/rigetti/Ankaa-3";

/// IonQ Aria (25 qubits, trapped-ion).
pub const IONQ_ARIA: &str = "arn:aws:braket:us-east-1::device/qpu/ionq/Aria-1";

/// IonQ Aria 2 (25 qubits, trapped-ion).
pub const IONQ_ARIA_2: &str = "arn:aws:braket:us-east-1::device/qpu/ionq/Aria-2";

/// IonQ Forte (36 qubits, trapped-ion).
pub const IONQ_FORTE: &str = "arn:aws:braket:us-east-1::device/qpu/ionq/Forte-1";

/// OQC Lucy (8 qubits, superconducting ring).
pub const OQC_LUCY: &str = "arn:aws:braket:eu-west-2::device/qpu/oqc/Lucy";

/// IQM Garnet (20 qubits, superconducting).
pub const IQM_GARNET: &str = "arn:aws:braket:eu-north-1::device/qpu/iqm/Garnet";

/// SV1 state vector simulator.
pub const SV1: &str = "arn:aws:braket:::device/quantum-simulator/amazon/sv1";

/// TN1 tensor network simulator.
pub const TN1: &str = "arn:aws:braket:::device/quantum-simulator/amazon/tn1";

/// DM1 density matrix simulator.
pub const DM1: &str = "arn:aws:braket:::device/quantum-simulator/amazon/dm1";

/// Name of the local state vector simulator.
pub const LOCAL_SV: &str = "braket_sv";

/// Action key for OpenQASM programs.
pub const OPENQASM_ACTION: &str = "braket.ir.openqasm.program";

/// Action key for JAQCD programs.
pub const JAQCD_ACTION: &str = "braket.ir.jaqcd.program";

// ──────────────────────────────────────────────────────────────────────
// Schema
// ──────────────────────────────────────────────────────────────────────

/// Device vendor, derived from the provider name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// IonQ trapped-ion QPUs.
    IonQ,
    /// Rigetti superconducting QPUs.
    Rigetti,
    /// Oxford Quantum Circuits QPUs.
    Oqc,
    /// IQM superconducting QPUs.
    Iqm,
    /// Amazon managed simulators.
    Amazon,
    /// Simulators running in-process.
    Local,
    /// Anything else.
    Unknown,
}

impl Provider {
    /// Classify a provider name, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "ionq" => Provider::IonQ,
            "rigetti" => Provider::Rigetti,
            "oqc" | "oxford" => Provider::Oqc,
            "iqm" => Provider::Iqm,
            "amazon" | "amazon braket" => Provider::Amazon,
            "local" => Provider::Local,
            _ => Provider::Unknown,
        }
    }
}

/// Qubit connectivity of a QPU.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connectivity {
    /// Every qubit pair is coupled.
    pub fully_connected: bool,
    /// Directed edges keyed by source qubit; indices are strings, as in
    /// the Braket schema.
    #[serde(default)]
    pub connectivity_graph: BTreeMap<String, Vec<String>>,
}

impl Connectivity {
    /// Directed edges as numeric pairs, skipping malformed entries.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        self.connectivity_graph
            .iter()
            .filter_map(|(src, dsts)| src.parse::<u32>().ok().map(|s| (s, dsts)))
            .flat_map(|(src, dsts)| {
                dsts.iter()
                    .filter_map(move |d| d.parse::<u32>().ok().map(|d| (src, d)))
            })
            .collect()
    }
}

/// Gate-model paradigm properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paradigm {
    /// Physical hardware.
    Qpu {
        /// Number of qubits.
        #[serde(rename = "qubitCount")]
        qubit_count: u32,
        /// Coupling between qubits.
        connectivity: Connectivity,
    },
    /// Simulator; every qubit pair is coupled.
    Simulator {
        /// Maximum number of qubits.
        #[serde(rename = "qubitCount")]
        qubit_count: u32,
    },
}

/// Properties of one device action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionProperties {
    /// Supported schema versions.
    #[serde(default)]
    pub version: Vec<String>,
    /// Gate names the action accepts.
    pub supported_operations: Vec<String>,
}

/// Device capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCapabilities {
    /// Display name.
    pub name: String,
    /// Device ARN, absent for local simulators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    /// Vendor name as reported by Braket.
    pub provider_name: String,
    /// Paradigm properties.
    pub paradigm: Paradigm,
    /// Actions keyed by program schema name.
    pub action: BTreeMap<String, ActionProperties>,
}

impl DeviceCapabilities {
    /// Parse capabilities from JSON.
    pub fn from_json(json: &str) -> BraketResult<Self> {
        let caps: Self = serde_json::from_str(json)?;
        if caps.action.is_empty() {
            return Err(BraketError::parse(
                "device capabilities",
                format!("'{}' declares no actions", caps.name),
            ));
        }
        Ok(caps)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> BraketResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Vendor classification.
    pub fn provider(&self) -> Provider {
        Provider::from_name(&self.provider_name)
    }

    /// Number of qubits.
    pub fn qubit_count(&self) -> u32 {
        match &self.paradigm {
            Paradigm::Qpu { qubit_count, .. } | Paradigm::Simulator { qubit_count } => {
                *qubit_count
            }
        }
    }

    /// Whether the device is a simulator.
    pub fn is_simulator(&self) -> bool {
        matches!(self.paradigm, Paradigm::Simulator { .. })
    }

    /// Properties of the OpenQASM action, if offered.
    pub fn openqasm(&self) -> Option<&ActionProperties> {
        self.action.get(OPENQASM_ACTION)
    }

    /// Properties of the JAQCD action, if offered.
    pub fn jaqcd(&self) -> Option<&ActionProperties> {
        self.action.get(JAQCD_ACTION)
    }

    /// Supported operations, preferring the OpenQASM action.
    pub fn supported_operations(&self) -> &[String] {
        self.openqasm()
            .or_else(|| self.jaqcd())
            .map_or(&[], |a| a.supported_operations.as_slice())
    }
}

// ──────────────────────────────────────────────────────────────────────
// Presets
// ──────────────────────────────────────────────────────────────────────

const IONQ_OPERATIONS: &[&str] = &[
    "x", "y", "z", "rx", "ry", "rz", "h", "cnot", "s", "si", "t", "ti", "v", "vi", "xx", "yy",
    "zz", "swap",
];

const RIGETTI_OPERATIONS: &[&str] = &["cz", "iswap", "rx", "rz", "xy"];

const OQC_OPERATIONS: &[&str] = &[
    "ccnot", "cnot", "cphaseshift", "cswap", "ecr", "h", "i", "phaseshift", "rx", "ry", "rz", "s",
    "si", "swap", "t", "ti", "v", "vi", "x", "y", "z",
];

const IQM_OPERATIONS: &[&str] = &[
    "ccnot", "cnot", "cphaseshift", "cswap", "swap", "iswap", "cy", "cz", "xy", "h", "i",
    "phaseshift", "prx", "rx", "ry", "rz", "s", "si", "t", "ti", "v", "vi", "x", "y", "z",
];

const SIMULATOR_OPERATIONS: &[&str] = &[
    "ccnot",
    "cnot",
    "cphaseshift",
    "cphaseshift00",
    "cphaseshift01",
    "cphaseshift10",
    "cswap",
    "cy",
    "cz",
    "ecr",
    "h",
    "i",
    "iswap",
    "pswap",
    "phaseshift",
    "rx",
    "ry",
    "rz",
    "s",
    "si",
    "swap",
    "t",
    "ti",
    "unitary",
    "v",
    "vi",
    "x",
    "xx",
    "xy",
    "y",
    "yy",
    "z",
    "zz",
];

fn action(operations: &[&str], jaqcd: bool) -> BTreeMap<String, ActionProperties> {
    let props = ActionProperties {
        version: vec!["1".into()],
        supported_operations: operations.iter().map(|s| (*s).to_string()).collect(),
    };
    let mut map = BTreeMap::new();
    if jaqcd {
        map.insert(JAQCD_ACTION.to_string(), props.clone());
    }
    map.insert(OPENQASM_ACTION.to_string(), props);
    map
}

/// Nearest-neighbour edges of a `rows x cols` lattice, both directions.
fn lattice(rows: u32, cols: u32) -> Connectivity {
    let mut graph: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut link = |a: u32, b: u32| {
        graph.entry(a.to_string()).or_default().push(b.to_string());
        graph.entry(b.to_string()).or_default().push(a.to_string());
    };
    for r in 0..rows {
        for c in 0..cols {
            let q = r * cols + c;
            if c + 1 < cols {
                link(q, q + 1);
            }
            if r + 1 < rows {
                link(q, q + cols);
            }
        }
    }
    Connectivity {
        fully_connected: false,
        connectivity_graph: graph,
    }
}

fn ring(n: u32) -> Connectivity {
    let graph = (0..n)
        .map(|q| (q.to_string(), vec![((q + 1) % n).to_string()]))
        .collect();
    Connectivity {
        fully_connected: false,
        connectivity_graph: graph,
    }
}

fn qpu(
    name: &str,
    arn: &str,
    provider: &str,
    qubit_count: u32,
    connectivity: Connectivity,
    operations: &[&str],
) -> DeviceCapabilities {
    DeviceCapabilities {
        name: name.into(),
        arn: Some(arn.into()),
        provider_name: provider.into(),
        paradigm: Paradigm::Qpu {
            qubit_count,
            connectivity,
        },
        action: action(operations, false),
    }
}

fn simulator(name: &str, arn: &str, qubit_count: u32) -> DeviceCapabilities {
    DeviceCapabilities {
        name: name.into(),
        arn: Some(arn.into()),
        provider_name: "Amazon Braket".into(),
        paradigm: Paradigm::Simulator { qubit_count },
        action: action(SIMULATOR_OPERATIONS, true),
    }
}

fn all_to_all() -> Connectivity {
    Connectivity {
        fully_connected: true,
        connectivity_graph: BTreeMap::new(),
    }
}

/// Capabilities for a known Braket device ARN.
///
/// Returns `None` for unknown devices; callers should load capabilities
/// from JSON instead.
pub fn capabilities_for_device(device_arn: &str) -> Option<DeviceCapabilities> {
    let caps = match device_arn {
        RIGETTI_ANKAA_3 => qpu(
            "Ankaa-3",
            RIGETTI_ANKAA_3,
            "Rigetti",
            84,
            lattice(7, 12),
            RIGETTI_OPERATIONS,
        ),
        IONQ_ARIA | IONQ_ARIA_2 => qpu(
            if device_arn == IONQ_ARIA { "Aria 1" } else { "Aria 2" },
            device_arn,
            "IonQ",
            25,
            all_to_all(),
            IONQ_OPERATIONS,
        ),
        IONQ_FORTE => qpu("Forte 1", IONQ_FORTE, "IonQ", 36, all_to_all(), IONQ_OPERATIONS),
        OQC_LUCY => qpu("Lucy", OQC_LUCY, "OQC", 8, ring(8), OQC_OPERATIONS),
        IQM_GARNET => qpu("Garnet", IQM_GARNET, "IQM", 20, lattice(4, 5), IQM_OPERATIONS),
        SV1 => simulator("SV1", SV1, 34),
        TN1 => simulator("TN1", TN1, 50),
        DM1 => simulator("DM1", DM1, 17),
        _ => return None,
    };
    Some(caps)
}

/// Capabilities of the local state vector simulator.
pub fn local_simulator() -> DeviceCapabilities {
    DeviceCapabilities {
        name: "StateVectorSimulator".into(),
        arn: None,
        provider_name: "Local".into(),
        paradigm: Paradigm::Simulator { qubit_count: 25 },
        action: action(SIMULATOR_OPERATIONS, true),
    }
}

/// Map a friendly device name to its ARN.
pub fn arn_for_name(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "rigetti" | "ankaa" | "ankaa-3" | "ankaa3" => Some(RIGETTI_ANKAA_3),
        "ionq" | "aria" | "aria-1" => Some(IONQ_ARIA),
        "aria-2" => Some(IONQ_ARIA_2),
        "forte" | "forte-1" => Some(IONQ_FORTE),
        "oqc" | "lucy" => Some(OQC_LUCY),
        "iqm" | "garnet" | "iqm-garnet" => Some(IQM_GARNET),
        "sv1" | "braket-sv1" => Some(SV1),
        "tn1" | "braket-tn1" => Some(TN1),
        "dm1" | "braket-dm1" => Some(DM1),
        _ => None,
    }
}

/// Extract the provider segment from a device ARN.
pub fn provider_from_arn(device_arn: &str) -> &str {
    // arn:aws:braket:<region>::device/<type>/<provider>/<device>
    device_arn.split('/').nth(2).unwrap_or("unknown")
}
