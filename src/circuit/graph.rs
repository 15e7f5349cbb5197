//! Circuit structure.

use super::payload::CircuitPayload;
use super::types::{BranchId, NodeId, VarIndex};
use super::validate::{check_node, validate_payload};
use crate::components::{Component, Resistor, VoltageSource};
use crate::error::Result;

/// A validated circuit ready for assembly.
///
/// Components are stored resistors first, then voltage sources, each group
/// in payload order. That is also the stamping order.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// All components in the circuit
    pub components: Vec<Component>,

    /// Number of nodes (including ground)
    pub num_nodes: usize,

    /// Number of branch current variables (voltage sources)
    pub num_branches: usize,
}

impl Circuit {
    /// Build a circuit from a payload, validating it first.
    pub fn from_payload(payload: &CircuitPayload) -> Result<Self> {
        let num_nodes = validate_payload(payload)?;

        let mut components = Vec::with_capacity(payload.resistors.len() + payload.voltage_sources.len());

        for (index, spec) in payload.resistors.iter().enumerate() {
            let name = format!("resistors[{}]", index);
            let nodes = [
                check_node(&name, "n1", spec.n1, num_nodes)?,
                check_node(&name, "n2", spec.n2, num_nodes)?,
            ];
            components.push(Component::Resistor(Resistor::new(nodes, spec.value)));
        }

        for (index, spec) in payload.voltage_sources.iter().enumerate() {
            let name = format!("voltageSources[{}]", index);
            let nodes = [
                check_node(&name, "nPlus", spec.n_plus, num_nodes)?,
                check_node(&name, "nMinus", spec.n_minus, num_nodes)?,
            ];
            components.push(Component::VoltageSource(VoltageSource::new(
                nodes,
                spec.value,
                BranchId(index),
            )));
        }

        Ok(Circuit {
            components,
            num_nodes,
            num_branches: payload.voltage_sources.len(),
        })
    }

    /// Number of non-ground nodes (N).
    pub fn num_unknown_nodes(&self) -> usize {
        self.num_nodes - 1
    }

    /// Get the total size of the MNA solution vector (S = N + M).
    pub fn matrix_size(&self) -> usize {
        // Nodes (excluding ground) + branch currents
        self.num_unknown_nodes() + self.num_branches
    }

    /// Get the matrix index for a node voltage.
    /// Returns None for ground (node 0).
    pub fn node_index(&self, node: NodeId) -> Option<usize> {
        if node.is_ground() {
            None
        } else {
            Some(VarIndex::Voltage(node).to_index(self.num_nodes))
        }
    }

    /// Get the matrix index for a branch current.
    pub fn branch_index(&self, branch: BranchId) -> usize {
        VarIndex::Current(branch).to_index(self.num_nodes)
    }

    /// Iterate over the resistors in stamping order.
    pub fn resistors(&self) -> impl Iterator<Item = &Resistor> {
        self.components.iter().filter_map(|c| match c {
            Component::Resistor(r) => Some(r),
            _ => None,
        })
    }

    /// Iterate over the voltage sources in branch order.
    pub fn voltage_sources(&self) -> impl Iterator<Item = &VoltageSource> {
        self.components.iter().filter_map(|c| match c {
            Component::VoltageSource(v) => Some(v),
            _ => None,
        })
    }
}
