//! MNA matrix assembly.

use crate::circuit::Circuit;
use crate::components::Component;

/// MNA matrix system Ax = z.
#[derive(Debug, Clone, PartialEq)]
pub struct MnaMatrix {
    /// System matrix A (row-major)
    pub a: Vec<f64>,
    /// Source vector z
    pub z: Vec<f64>,
    /// Matrix dimension
    pub size: usize,
}

impl MnaMatrix {
    /// Create a zeroed system of the given dimension.
    pub fn new(size: usize) -> Self {
        Self {
            a: vec![0.0; size * size],
            z: vec![0.0; size],
            size,
        }
    }

    /// Assemble the system for a circuit.
    ///
    /// Resistors are stamped before voltage sources, each in payload order.
    pub fn assemble(circuit: &Circuit) -> Self {
        let mut matrix = Self::new(circuit.matrix_size());
        log::debug!(
            "assembling {}x{} system ({} nodes, {} sources)",
            matrix.size,
            matrix.size,
            circuit.num_unknown_nodes(),
            circuit.num_branches
        );

        for component in &circuit.components {
            match component {
                Component::Resistor(r) => {
                    let n1 = circuit.node_index(r.nodes[0]);
                    let n2 = circuit.node_index(r.nodes[1]);
                    matrix.stamp_conductance(n1, n2, r.conductance());
                }

                Component::VoltageSource(v) => {
                    let n_pos = circuit.node_index(v.positive());
                    let n_neg = circuit.node_index(v.negative());
                    let br = circuit.branch_index(v.branch);
                    matrix.stamp_voltage_source(n_pos, n_neg, br, v.voltage);
                }
            }
        }

        matrix
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.a[row * self.size + col]
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.a[row * self.size + col] += value;
    }

    /// Stamp a conductance between two nodes.
    /// For a conductance G between nodes n1 and n2:
    ///   A[n1,n1] += G
    ///   A[n2,n2] += G
    ///   A[n1,n2] -= G
    ///   A[n2,n1] -= G
    pub fn stamp_conductance(&mut self, n1: Option<usize>, n2: Option<usize>, g: f64) {
        if let Some(i) = n1 {
            self.add(i, i, g);
        }
        if let Some(j) = n2 {
            self.add(j, j, g);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -g);
            self.add(j, i, -g);
        }
    }

    /// Stamp a voltage source between two nodes with branch current at index br.
    /// V[n+] - V[n-] = E
    pub fn stamp_voltage_source(
        &mut self,
        n_pos: Option<usize>,
        n_neg: Option<usize>,
        br: usize,
        voltage: f64,
    ) {
        if let Some(i) = n_pos {
            self.add(i, br, 1.0);
            self.add(br, i, 1.0);
        }
        if let Some(j) = n_neg {
            self.add(j, br, -1.0);
            self.add(br, j, -1.0);
        }
        self.z[br] = voltage;
    }

    /// Check `A[i][j] == A[j][i]` over the leading `n x n` block.
    ///
    /// With `n` = number of non-ground nodes this is the conductance block,
    /// which resistor stamps keep exactly symmetric.
    pub fn is_symmetric_block(&self, n: usize) -> bool {
        let n = n.min(self.size);
        (0..n).all(|i| (i + 1..n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Build the augmented matrix `[A | z]` as `size` rows of `size + 1`.
    pub fn augmented(&self) -> Vec<Vec<f64>> {
        (0..self.size)
            .map(|i| {
                let mut row = Vec::with_capacity(self.size + 1);
                row.extend_from_slice(&self.a[i * self.size..(i + 1) * self.size]);
                row.push(self.z[i]);
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitPayload;
    use proptest::prelude::*;

    fn assemble(payload: &CircuitPayload) -> MnaMatrix {
        MnaMatrix::assemble(&Circuit::from_payload(payload).unwrap())
    }

    #[test]
    fn test_series_loop_stamps() {
        let payload = CircuitPayload::new(2)
            .with_resistor(1, 0, 1000.0)
            .with_voltage_source(1, 0, 10.0);
        let m = assemble(&payload);

        assert_eq!(m.size, 2);
        assert!((m.get(0, 0) - 0.001).abs() < 1e-15);
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(1, 0), 1.0);
        assert_eq!(m.get(1, 1), 0.0);
        assert_eq!(m.z, vec![0.0, 10.0]);
    }

    #[test]
    fn test_floating_resistor_stamp() {
        let payload = CircuitPayload::new(3).with_resistor(1, 2, 4.0);
        let m = assemble(&payload);
        assert_eq!(m.get(0, 0), 0.25);
        assert_eq!(m.get(1, 1), 0.25);
        assert_eq!(m.get(0, 1), -0.25);
        assert_eq!(m.get(1, 0), -0.25);
    }

    #[test]
    fn test_source_on_negative_terminal() {
        // Source from ground (+) to node 1 (-)
        let payload = CircuitPayload::new(2).with_voltage_source(0, 1, 3.0);
        let m = assemble(&payload);
        assert_eq!(m.get(0, 1), -1.0);
        assert_eq!(m.get(1, 0), -1.0);
        assert_eq!(m.z[1], 3.0);
    }

    #[test]
    fn test_augmented_layout() {
        let payload = CircuitPayload::new(2)
            .with_resistor(1, 0, 2.0)
            .with_voltage_source(1, 0, 1.5);
        let aug = assemble(&payload).augmented();
        assert_eq!(aug, vec![vec![0.5, 1.0, 0.0], vec![1.0, 0.0, 1.5]]);
    }

    #[test]
    fn test_empty_system() {
        let m = assemble(&CircuitPayload::new(1));
        assert_eq!(m.size, 0);
        assert!(m.a.is_empty());
        assert!(m.augmented().is_empty());
    }

    fn arb_payload() -> impl Strategy<Value = CircuitPayload> {
        (1i64..8).prop_flat_map(|nodes| {
            let resistor = (0..nodes, 0..nodes, 1.0..1e6_f64);
            let source = (0..nodes, 0..nodes, -50.0..50.0_f64);
            (
                Just(nodes),
                prop::collection::vec(resistor, 0..12),
                prop::collection::vec(source, 0..4),
            )
                .prop_map(|(nodes, resistors, sources)| {
                    let mut payload = CircuitPayload::new(nodes);
                    for (n1, n2, value) in resistors {
                        payload = payload.with_resistor(n1, n2, value);
                    }
                    for (p, n, value) in sources {
                        payload = payload.with_voltage_source(p, n, value);
                    }
                    payload
                })
        })
    }

    proptest! {
        #[test]
        fn conductance_block_is_symmetric(payload in arb_payload()) {
            let circuit = Circuit::from_payload(&payload).unwrap();
            let m = MnaMatrix::assemble(&circuit);
            prop_assert!(m.is_symmetric_block(circuit.num_unknown_nodes()));
        }

        #[test]
        fn system_size_counts_nodes_and_sources(payload in arb_payload()) {
            let m = assemble(&payload);
            let expected = (payload.node_count - 1) as usize + payload.voltage_sources.len();
            prop_assert_eq!(m.size, expected);
            prop_assert_eq!(m.z.len(), expected);
        }
    }
}
