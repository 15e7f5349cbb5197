//! Topology normalization.
//!
//! The schematic editor (and the netlist parser) describe circuits with
//! arbitrary node labels. [`normalize`] maps those labels onto the dense
//! index space the solver expects: node 0 is ground, every other label gets
//! the next free index in first-encounter order.
//!
//! Ground selection, in order of precedence:
//! 1. the schematic's explicit `ground` label
//! 2. any terminal spelled `0` or `GND` (case-insensitive)
//! 3. the first terminal of the first element
//!
//! `0` and `GND` always resolve to ground, whichever label was chosen.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::payload::{CircuitPayload, ResistorEntry, ResistorSpec, VoltageSourceEntry, VoltageSourceSpec};
use super::types::NodeId;
use crate::error::{NodalError, Result};
use crate::solver::Solution;

/// Kind of a schematic element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    Resistor,
    VoltageSource,
}

/// A two-terminal element placed in a schematic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Caller component id, reported back as `compId`
    pub id: u32,
    /// Unique element name, used as the reporting map key
    pub name: String,
    pub kind: ElementKind,
    /// `[n1, n2]` for resistors, `[n+, n-]` for sources
    pub terminals: [String; 2],
    pub value: f64,
}

/// A circuit described with free-form node labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schematic {
    /// Explicit ground label, if the caller designated one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Schematic {
    /// Create an empty schematic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Designate the ground label.
    pub fn with_ground(mut self, label: impl Into<String>) -> Self {
        self.ground = Some(label.into());
        self
    }

    /// Append an element.
    pub fn with_element(
        mut self,
        id: u32,
        name: impl Into<String>,
        kind: ElementKind,
        terminals: [&str; 2],
        value: f64,
    ) -> Self {
        self.elements.push(Element {
            id,
            name: name.into(),
            kind,
            terminals: [terminals[0].to_string(), terminals[1].to_string()],
            value,
        });
        self
    }
}

/// A solution extended with voltages keyed by the caller's node labels.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelledSolution<'a> {
    #[serde(flatten)]
    pub solution: &'a Solution,
    pub named_voltages: IndexMap<String, f64>,
}

/// Result of normalizing a [`Schematic`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Solver-ready payload with reporting maps filled in
    pub payload: CircuitPayload,
    /// Caller label of each node; `node_names[0]` is the ground label
    pub node_names: Vec<String>,
}

impl Normalized {
    /// Re-key solved voltages by the caller's node labels.
    pub fn label_voltages(&self, solution: &Solution) -> IndexMap<String, f64> {
        self.node_names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| solution.voltage(NodeId(i)).map(|v| (name.clone(), v)))
            .collect()
    }

    /// Pair a solution with its label-keyed voltages for output.
    pub fn labelled<'a>(&self, solution: &'a Solution) -> LabelledSolution<'a> {
        LabelledSolution {
            solution,
            named_voltages: self.label_voltages(solution),
        }
    }
}

fn is_ground_alias(label: &str) -> bool {
    label == "0" || label.eq_ignore_ascii_case("GND")
}

fn select_ground(schematic: &Schematic) -> Result<String> {
    if let Some(label) = &schematic.ground {
        let label = label.trim();
        if label.is_empty() {
            return Err(NodalError::topology("ground label is empty"));
        }
        return Ok(label.to_string());
    }

    let mut terminals = schematic.elements.iter().flat_map(|e| e.terminals.iter());
    if let Some(alias) = terminals.clone().find(|t| is_ground_alias(t.trim())) {
        return Ok(alias.trim().to_string());
    }
    Ok(terminals
        .next()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "0".to_string()))
}

/// Map a schematic onto a dense, ground-at-zero payload.
pub fn normalize(schematic: &Schematic) -> Result<Normalized> {
    let ground = select_ground(schematic)?;
    log::debug!("normalizing {} elements, ground = '{}'", schematic.elements.len(), ground);

    let mut node_map: IndexMap<String, NodeId> = IndexMap::new();
    node_map.insert(ground.clone(), NodeId::GROUND);
    let mut node_names = vec![ground];

    let mut seen = HashSet::new();
    let mut payload = CircuitPayload::new(1);
    let mut resistor_map = IndexMap::new();
    let mut source_map = IndexMap::new();

    for element in &schematic.elements {
        if element.name.is_empty() {
            return Err(NodalError::topology(format!("element {} has no name", element.id)));
        }
        if !seen.insert(element.name.as_str()) {
            return Err(NodalError::DuplicateComponent {
                name: element.name.clone(),
            });
        }

        let mut nodes = [0i64; 2];
        for (slot, raw) in nodes.iter_mut().zip(&element.terminals) {
            let label = raw.trim();
            if label.is_empty() {
                return Err(NodalError::topology(format!(
                    "element '{}' has an unconnected terminal",
                    element.name
                )));
            }
            let node = if is_ground_alias(label) {
                NodeId::GROUND
            } else if let Some(&id) = node_map.get(label) {
                id
            } else {
                let id = NodeId(node_names.len());
                node_map.insert(label.to_string(), id);
                node_names.push(label.to_string());
                id
            };
            *slot = node.0 as i64;
        }

        let [a, b] = nodes;
        match element.kind {
            ElementKind::Resistor => {
                payload.resistors.push(ResistorSpec {
                    n1: a,
                    n2: b,
                    value: element.value,
                });
                resistor_map.insert(
                    element.name.clone(),
                    ResistorEntry {
                        comp_id: element.id,
                        n1: a,
                        n2: b,
                        value: element.value,
                    },
                );
            }
            ElementKind::VoltageSource => {
                payload.voltage_sources.push(VoltageSourceSpec {
                    n_plus: a,
                    n_minus: b,
                    value: element.value,
                });
                source_map.insert(
                    element.name.clone(),
                    VoltageSourceEntry {
                        comp_id: element.id,
                        n_plus: a,
                        n_minus: b,
                        value: element.value,
                    },
                );
            }
        }
    }

    payload.node_count = node_names.len() as i64;
    payload.resistor_map = Some(resistor_map);
    payload.voltage_source_map = Some(source_map);

    Ok(Normalized { payload, node_names })
}
