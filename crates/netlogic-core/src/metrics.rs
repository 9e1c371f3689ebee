//! # Circuit Metrics
//!
//! Structural statistics of a compiled circuit. Integer arithmetic only.

use crate::evaluator::{Circuit, Driver};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Size and shape of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CircuitMetrics {
    /// Total number of nodes.
    pub node_count: usize,
    /// Total number of connections.
    pub connection_count: usize,
    /// Number of dependency layers (longest gate chain).
    pub depth: usize,
    /// Widest layer: the most nodes that could be evaluated side by side.
    pub max_layer_width: usize,
    /// Largest number of sinks fed by a single source port.
    pub max_fan_out: usize,
    /// Node count per gate kind.
    pub kinds: BTreeMap<String, usize>,
}

impl CircuitMetrics {
    /// Compute metrics from a circuit.
    #[must_use]
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let layers = circuit.layers();

        let mut fan_out: BTreeMap<Driver, usize> = BTreeMap::new();
        for driver in circuit
            .node_inputs()
            .iter()
            .flatten()
            .chain(circuit.outputs())
        {
            *fan_out.entry(*driver).or_default() += 1;
        }

        let mut kinds = BTreeMap::new();
        for kind in circuit.kinds() {
            *kinds.entry(kind.clone()).or_default() += 1;
        }

        Self {
            node_count: circuit.node_count(),
            connection_count: circuit.connection_count(),
            depth: layers.len(),
            max_layer_width: layers.iter().map(Vec::len).max().unwrap_or(0),
            max_fan_out: fan_out.values().copied().max().unwrap_or(0),
            kinds,
        }
    }
}
