//! Wire-dependency DAG over a circuit's operations.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

/// Dependency graph of a circuit.
///
/// Every node is an operation; an edge `a -> b` labelled with a wire means
/// `b` is the next operation after `a` on that wire. Nodes are inserted in
/// program order, so node index order is a valid topological order.
#[derive(Debug, Clone)]
pub struct CircuitDag {
    graph: DiGraph<Instruction, WireId, u32>,
}

impl CircuitDag {
    /// Build the DAG of a circuit.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        Self::from_instructions(circuit.instructions().iter().cloned())
    }

    /// Build a DAG from operations in program order.
    pub fn from_instructions(instructions: impl IntoIterator<Item = Instruction>) -> Self {
        let mut graph = DiGraph::default();
        let mut wire_front: FxHashMap<WireId, NodeIndex> = FxHashMap::default();

        for inst in instructions {
            let wires: Vec<WireId> = inst
                .qubits
                .iter()
                .map(|&q| WireId::from(q))
                .chain(inst.clbits.iter().map(|&c| WireId::from(c)))
                .collect();
            let node = graph.add_node(inst);
            for wire in wires {
                if let Some(prev) = wire_front.insert(wire, node) {
                    graph.add_edge(prev, node, wire);
                }
            }
        }

        Self { graph }
    }

    /// Number of operation nodes.
    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the instruction stored at a node.
    pub fn instruction(&self, node: NodeIndex) -> Option<&Instruction> {
        self.graph.node_weight(node)
    }

    /// Direct predecessors of a node, one per incoming wire.
    pub fn predecessors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| e.source())
    }

    /// Longest path length from the start of the circuit to each node,
    /// counting a node as `weight(node)`.
    fn levels(&self, weight: impl Fn(&Instruction) -> usize) -> Vec<usize> {
        let mut levels = vec![0usize; self.graph.node_count()];
        for node in self.graph.node_indices() {
            let max_pred = self
                .predecessors(node)
                .map(|p| levels[p.index()])
                .max()
                .unwrap_or(0);
            levels[node.index()] = max_pred + weight(&self.graph[node]);
        }
        levels
    }

    /// Circuit depth. Barriers do not contribute.
    pub fn depth(&self) -> usize {
        self.levels(|inst| usize::from(!inst.is_barrier()))
            .into_iter()
            .max()
            .unwrap_or(0)
    }

    /// Group operations into ASAP layers.
    ///
    /// Each operation sits in the layer right after the latest layer of any
    /// operation it depends on; within a layer, program order is kept.
    pub fn layers(&self) -> Vec<Vec<&Instruction>> {
        let levels = self.levels(|_| 1);
        let num_layers = levels.iter().copied().max().unwrap_or(0);
        let mut layers = vec![Vec::new(); num_layers];
        for node in self.graph.node_indices() {
            layers[levels[node.index()] - 1].push(&self.graph[node]);
        }
        layers
    }
}
