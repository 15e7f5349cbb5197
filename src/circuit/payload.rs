//! Wire format of a solve request.
//!
//! Field names follow the JSON body the schematic editor posts
//! (`nodeCount`, `voltageSources`, `nPlus`, ...). Node references are kept
//! signed here so that a negative terminal surfaces as a range error from
//! [`validate_payload`](super::validate_payload) instead of a decode error.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// A resistor between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistorSpec {
    pub n1: i64,
    pub n2: i64,
    /// Resistance in ohms
    pub value: f64,
}

/// An ideal voltage source forcing `V(nPlus) - V(nMinus) = value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltageSourceSpec {
    pub n_plus: i64,
    pub n_minus: i64,
    /// Source voltage in volts
    pub value: f64,
}

/// Reporting entry for a resistor, keyed by an opaque caller key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResistorEntry {
    pub comp_id: u32,
    pub n1: i64,
    pub n2: i64,
    pub value: f64,
}

/// Reporting entry for a voltage source, keyed by an opaque caller key.
///
/// The i-th entry of the map reports the branch current of the i-th source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltageSourceEntry {
    pub comp_id: u32,
    pub n_plus: i64,
    pub n_minus: i64,
    pub value: f64,
}

/// A complete, already-normalized circuit description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitPayload {
    /// Number of nodes including ground (node 0)
    #[serde(default = "default_node_count", deserialize_with = "null_node_count")]
    pub node_count: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub resistors: Vec<ResistorSpec>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub voltage_sources: Vec<VoltageSourceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistor_map: Option<IndexMap<String, ResistorEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_source_map: Option<IndexMap<String, VoltageSourceEntry>>,
}

fn default_node_count() -> i64 {
    1
}

// Editors send `null` for absent fields; treat it like a missing key.
fn null_node_count<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_else(default_node_count))
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for CircuitPayload {
    fn default() -> Self {
        Self::new(1)
    }
}

impl CircuitPayload {
    /// Create an empty payload with the given node count.
    pub fn new(node_count: i64) -> Self {
        Self {
            node_count,
            resistors: Vec::new(),
            voltage_sources: Vec::new(),
            resistor_map: None,
            voltage_source_map: None,
        }
    }

    /// Decode a payload from its JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Add a resistor.
    pub fn with_resistor(mut self, n1: i64, n2: i64, value: f64) -> Self {
        self.resistors.push(ResistorSpec { n1, n2, value });
        self
    }

    /// Add a voltage source.
    pub fn with_voltage_source(mut self, n_plus: i64, n_minus: i64, value: f64) -> Self {
        self.voltage_sources.push(VoltageSourceSpec {
            n_plus,
            n_minus,
            value,
        });
        self
    }

    /// Whether per-component results were requested.
    pub fn wants_component_results(&self) -> bool {
        self.resistor_map.is_some() || self.voltage_source_map.is_some()
    }
}
