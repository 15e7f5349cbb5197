//! Independent sources.

use crate::circuit::{BranchId, NodeId};

/// An ideal voltage source component.
///
/// Voltage sources require an extra row/column in the MNA matrix for the
/// branch current. The source enforces: V+ - V- = V_source
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageSource {
    pub nodes: [NodeId; 2], // [positive, negative]
    /// Source voltage in volts
    pub voltage: f64,
    pub branch: BranchId,
}

impl VoltageSource {
    /// Create a new voltage source.
    pub fn new(nodes: [NodeId; 2], voltage: f64, branch: BranchId) -> Self {
        Self {
            nodes,
            voltage,
            branch,
        }
    }

    pub fn positive(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn negative(&self) -> NodeId {
        self.nodes[1]
    }
}
