//! Payload validation.

use crate::error::{NodalError, Result};

use super::payload::CircuitPayload;
use super::NodeId;

/// Largest number of MNA unknowns (non-ground nodes plus voltage sources)
/// accepted for the dense solver.
pub const MAX_UNKNOWNS: usize = 4096;

/// Validate a payload before assembly.
///
/// Checks:
/// - `nodeCount >= 1`
/// - `nodeCount - 1 + voltageSources.len() <= MAX_UNKNOWNS`
/// - every terminal (including reporting map terminals) is in `[0, nodeCount)`
/// - resistances are finite with a finite conductance
/// - source voltages are finite
///
/// Returns the node count as `usize` on success.
pub fn validate_payload(payload: &CircuitPayload) -> Result<usize> {
    if payload.node_count < 1 {
        return Err(NodalError::InvalidNodeCount {
            node_count: payload.node_count,
        });
    }
    let node_count = usize::try_from(payload.node_count).map_err(|_| NodalError::InvalidNodeCount {
        node_count: payload.node_count,
    })?;

    let unknowns = (node_count - 1).saturating_add(payload.voltage_sources.len());
    if unknowns > MAX_UNKNOWNS {
        return Err(NodalError::SystemTooLarge {
            unknowns,
            limit: MAX_UNKNOWNS,
        });
    }

    for (i, r) in payload.resistors.iter().enumerate() {
        let name = format!("resistors[{}]", i);
        check_node(&name, "n1", r.n1, node_count)?;
        check_node(&name, "n2", r.n2, node_count)?;
        check_resistance(&name, r.value)?;
    }

    for (i, vs) in payload.voltage_sources.iter().enumerate() {
        let name = format!("voltageSources[{}]", i);
        check_node(&name, "nPlus", vs.n_plus, node_count)?;
        check_node(&name, "nMinus", vs.n_minus, node_count)?;
        if !vs.value.is_finite() {
            return Err(NodalError::invalid_value(name, vs.value, "source voltage must be finite"));
        }
    }

    if let Some(map) = &payload.resistor_map {
        for (key, entry) in map {
            let name = format!("resistorMap[{}]", key);
            check_node(&name, "n1", entry.n1, node_count)?;
            check_node(&name, "n2", entry.n2, node_count)?;
            check_resistance(&name, entry.value)?;
        }
    }

    if let Some(map) = &payload.voltage_source_map {
        if map.len() > payload.voltage_sources.len() {
            return Err(NodalError::topology(format!(
                "voltageSourceMap has {} entries but only {} voltage sources are defined",
                map.len(),
                payload.voltage_sources.len()
            )));
        }
        for (key, entry) in map {
            let name = format!("voltageSourceMap[{}]", key);
            check_node(&name, "nPlus", entry.n_plus, node_count)?;
            check_node(&name, "nMinus", entry.n_minus, node_count)?;
        }
    }

    Ok(node_count)
}

/// Resolve a raw terminal reference into a [`NodeId`].
pub(crate) fn check_node(component: &str, terminal: &'static str, node: i64, node_count: usize) -> Result<NodeId> {
    match usize::try_from(node) {
        Ok(n) if n < node_count => Ok(NodeId(n)),
        _ => Err(NodalError::NodeOutOfRange {
            component: component.to_string(),
            terminal,
            node,
            node_count,
        }),
    }
}

fn check_resistance(component: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(NodalError::invalid_value(component, value, "resistance must be finite"));
    }
    if !(1.0 / value).is_finite() {
        return Err(NodalError::invalid_value(
            component,
            value,
            "resistance too small: conductance is infinite",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{ResistorEntry, VoltageSourceEntry};
    use indexmap::indexmap;

    #[test]
    fn test_valid_payload() {
        let payload = CircuitPayload::new(2)
            .with_resistor(1, 0, 1000.0)
            .with_voltage_source(1, 0, 10.0);
        assert_eq!(validate_payload(&payload).unwrap(), 2);
    }

    #[test]
    fn test_node_count_below_one() {
        let err = validate_payload(&CircuitPayload::new(0)).unwrap_err();
        assert!(matches!(err, NodalError::InvalidNodeCount { node_count: 0 }));
    }

    #[test]
    fn test_terminal_out_of_range() {
        let payload = CircuitPayload::new(2).with_resistor(1, 2, 100.0);
        match validate_payload(&payload).unwrap_err() {
            NodalError::NodeOutOfRange {
                component,
                terminal,
                node,
                node_count,
            } => {
                assert_eq!(component, "resistors[0]");
                assert_eq!(terminal, "n2");
                assert_eq!(node, 2);
                assert_eq!(node_count, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_terminal() {
        let payload = CircuitPayload::new(2).with_voltage_source(-1, 0, 1.0);
        assert!(matches!(
            validate_payload(&payload),
            Err(NodalError::NodeOutOfRange { terminal: "nPlus", node: -1, .. })
        ));
    }

    #[test]
    fn test_zero_resistance_rejected() {
        let payload = CircuitPayload::new(2).with_resistor(1, 0, 0.0);
        assert!(matches!(
            validate_payload(&payload),
            Err(NodalError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_subnormal_resistance_rejected() {
        let payload = CircuitPayload::new(2).with_resistor(1, 0, 1e-320);
        assert!(matches!(
            validate_payload(&payload),
            Err(NodalError::InvalidValue { .. })
        ));
        // Tiny but normal values still have a finite conductance
        let payload = CircuitPayload::new(2).with_resistor(1, 0, 1e-300);
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn test_system_size_limit() {
        let at_limit = CircuitPayload::new(MAX_UNKNOWNS as i64 + 1);
        assert_eq!(validate_payload(&at_limit).unwrap(), MAX_UNKNOWNS + 1);

        let over = CircuitPayload::new(MAX_UNKNOWNS as i64)
            .with_voltage_source(1, 0, 1.0)
            .with_voltage_source(2, 0, 1.0);
        assert!(matches!(
            validate_payload(&over),
            Err(NodalError::SystemTooLarge { unknowns, limit: MAX_UNKNOWNS }) if unknowns == MAX_UNKNOWNS + 1
        ));

        let huge = CircuitPayload::new(100_000);
        assert!(matches!(
            validate_payload(&huge),
            Err(NodalError::SystemTooLarge { unknowns: 99_999, .. })
        ));
    }

    #[test]
    fn test_source_map_longer_than_sources() {
        let mut payload = CircuitPayload::new(2).with_voltage_source(1, 0, 5.0);
        payload.voltage_source_map = Some(indexmap! {
            "a".to_string() => VoltageSourceEntry { comp_id: 1, n_plus: 1, n_minus: 0, value: 5.0 },
            "b".to_string() => VoltageSourceEntry { comp_id: 2, n_plus: 1, n_minus: 0, value: 5.0 },
        });
        assert!(matches!(
            validate_payload(&payload),
            Err(NodalError::InvalidTopology { .. })
        ));
    }

    #[test]
    fn test_resistor_map_terminal_out_of_range() {
        let mut payload = CircuitPayload::new(2).with_resistor(1, 0, 10.0);
        payload.resistor_map = Some(indexmap! {
            "r".to_string() => ResistorEntry { comp_id: 1, n1: 1, n2: 4, value: 10.0 },
        });
        match validate_payload(&payload).unwrap_err() {
            NodalError::NodeOutOfRange { component, terminal, node, .. } => {
                assert_eq!(component, "resistorMap[r]");
                assert_eq!(terminal, "n2");
                assert_eq!(node, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_source_map_terminal_out_of_range() {
        let mut payload = CircuitPayload::new(2).with_voltage_source(1, 0, 5.0);
        payload.voltage_source_map = Some(indexmap! {
            "v".to_string() => VoltageSourceEntry { comp_id: 1, n_plus: -2, n_minus: 0, value: 5.0 },
        });
        assert!(matches!(
            validate_payload(&payload),
            Err(NodalError::NodeOutOfRange { terminal: "nPlus", node: -2, .. })
        ));
    }

    #[test]
    fn test_negative_resistance_allowed() {
        let payload = CircuitPayload::new(2).with_resistor(1, 0, -50.0);
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn test_non_finite_source_rejected() {
        let payload = CircuitPayload::new(2).with_voltage_source(1, 0, f64::NAN);
        assert!(matches!(
            validate_payload(&payload),
            Err(NodalError::InvalidValue { .. })
        ));
    }
}
