//! Mapping solved unknowns back onto the caller's names.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::circuit::{BranchId, Circuit, CircuitPayload, NodeId};

/// Per-component figures reported for the schematic editor.
///
/// Voltage and current are magnitudes; direction is only available from the
/// raw node voltages and source currents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentResult {
    /// |V(a) - V(b)| in volts
    pub voltage: f64,
    /// |I| in amps
    pub current: f64,
    /// Resistance in ohms (0 for ideal sources)
    pub resistance: f64,
    /// voltage * current in watts
    pub power: f64,
}

impl ComponentResult {
    fn from_drop(v_drop: f64, current: f64, resistance: f64) -> Self {
        let voltage = v_drop.abs();
        let current = current.abs();
        Self {
            voltage,
            current,
            resistance,
            power: voltage * current,
        }
    }
}

/// Output of a successful solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// Node potentials keyed `n0`..`n{nodeCount-1}`; `n0` is always 0
    pub voltages: IndexMap<String, f64>,
    /// Voltage-source branch currents keyed `i_vs{k}`
    pub source_currents: IndexMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_results: Option<IndexMap<String, ComponentResult>>,
    /// Raw unknown vector, node voltages then branch currents
    #[serde(skip)]
    pub unknowns: Vec<f64>,
}

impl Solution {
    /// Voltage of a node, `None` if the node does not exist.
    pub fn voltage(&self, node: NodeId) -> Option<f64> {
        self.voltages.get(&node.label()).copied()
    }

    /// Branch current of a voltage source, `None` if it does not exist.
    pub fn source_current(&self, branch: BranchId) -> Option<f64> {
        self.source_currents.get(&branch.label()).copied()
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to an indented JSON string.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Build a [`Solution`] from the unknown vector `x`.
///
/// `x` must follow the circuit's layout: `N` node voltages then `M`
/// branch currents. Reporting maps are read from `payload` and only used
/// when `report_components` is set.
pub fn project(circuit: &Circuit, payload: &CircuitPayload, x: Vec<f64>, report_components: bool) -> Solution {
    let node_voltage = |node: NodeId| circuit.node_index(node).map_or(0.0, |i| x[i]);

    let voltages: IndexMap<String, f64> = (0..circuit.num_nodes)
        .map(|n| (NodeId(n).label(), node_voltage(NodeId(n))))
        .collect();

    let source_currents: IndexMap<String, f64> = (0..circuit.num_branches)
        .map(|k| {
            let branch = BranchId(k);
            (branch.label(), x[circuit.branch_index(branch)])
        })
        .collect();

    let component_results = (report_components && payload.wants_component_results()).then(|| {
        let mut results = IndexMap::new();

        if let Some(map) = &payload.resistor_map {
            for entry in map.values() {
                let v_drop = node_voltage(NodeId(entry.n1 as usize)) - node_voltage(NodeId(entry.n2 as usize));
                let current = v_drop / entry.value;
                results.insert(
                    format!("resistor_{}", entry.comp_id),
                    ComponentResult::from_drop(v_drop, current, entry.value),
                );
            }
        }

        // The k-th map entry reports the k-th source's branch current
        if let Some(map) = &payload.voltage_source_map {
            for (k, entry) in map.values().enumerate() {
                let v_drop =
                    node_voltage(NodeId(entry.n_plus as usize)) - node_voltage(NodeId(entry.n_minus as usize));
                let current = x[circuit.branch_index(BranchId(k))];
                results.insert(
                    format!("voltage_{}", entry.comp_id),
                    ComponentResult::from_drop(v_drop, current, 0.0),
                );
            }
        }

        results
    });

    Solution {
        voltages,
        source_currents,
        component_results,
        unknowns: x,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use indexmap::indexmap;

    use crate::circuit::{ResistorEntry, VoltageSourceEntry};

    fn series_loop() -> (Circuit, CircuitPayload) {
        let mut payload = CircuitPayload::new(2)
            .with_resistor(1, 0, 1000.0)
            .with_voltage_source(1, 0, 10.0);
        payload.resistor_map = Some(indexmap! {
            "r".to_string() => ResistorEntry { comp_id: 4, n1: 1, n2: 0, value: 1000.0 },
        });
        payload.voltage_source_map = Some(indexmap! {
            "v".to_string() => VoltageSourceEntry { comp_id: 5, n_plus: 1, n_minus: 0, value: 10.0 },
        });
        (Circuit::from_payload(&payload).unwrap(), payload)
    }

    #[test]
    fn test_labels_and_ground() {
        let (circuit, payload) = series_loop();
        let solution = project(&circuit, &payload, vec![10.0, -0.01], false);

        let labels: Vec<_> = solution.voltages.keys().cloned().collect();
        assert_eq!(labels, vec!["n0", "n1"]);
        assert_eq!(solution.voltages["n0"], 0.0);
        assert_eq!(solution.voltage(NodeId(1)), Some(10.0));
        assert_eq!(solution.source_current(BranchId(0)), Some(-0.01));
        assert!(solution.component_results.is_none());
    }

    #[test]
    fn test_component_magnitudes() {
        let (circuit, payload) = series_loop();
        let solution = project(&circuit, &payload, vec![10.0, -0.01], true);
        let results = solution.component_results.unwrap();

        let r = results["resistor_4"];
        assert_relative_eq!(r.voltage, 10.0);
        assert_relative_eq!(r.current, 0.01);
        assert_relative_eq!(r.resistance, 1000.0);
        assert_relative_eq!(r.power, 0.1, max_relative = 1e-12);

        let v = results["voltage_5"];
        assert_relative_eq!(v.current, 0.01);
        assert_eq!(v.resistance, 0.0);
        assert_relative_eq!(v.power, 0.1, max_relative = 1e-12);
    }

    #[test]
    fn test_json_shape() {
        let (circuit, payload) = series_loop();
        let solution = project(&circuit, &payload, vec![10.0, -0.01], true);
        let json: serde_json::Value = serde_json::from_str(&solution.to_json().unwrap()).unwrap();

        assert_eq!(json["voltages"]["n1"], 10.0);
        assert_eq!(json["sourceCurrents"]["i_vs0"], -0.01);
        assert_eq!(json["componentResults"]["resistor_4"]["resistance"], 1000.0);
        assert!(json.get("unknowns").is_none());
    }
}
