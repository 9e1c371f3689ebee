//! # Evaluator
//!
//! Topological evaluation of validated blueprints.
//!
//! A [`Circuit`] is the compiled, owned evaluation plan for one blueprint:
//! the truth function of every node, where each node input and each external
//! output takes its value from, and a topological order. Compiling runs the
//! validator, so a `Circuit` only exists for a well-formed blueprint.
//!
//! Evaluation is pure: no state survives between calls, and any topological
//! order gives the same outputs.

use crate::catalog::{GateCatalog, TruthFn};
use crate::graph;
use crate::validator::analyze;
use crate::{Blueprint, Defect, NetlogicError, PortOrigin, PortRef, Precondition};
use std::collections::BTreeSet;
use std::fmt;

/// Where a value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Driver {
    /// An external input slot.
    Input(usize),
    /// The output of a node.
    Node(usize),
}

impl Driver {
    fn from_source(source: PortRef) -> Self {
        match source.origin {
            PortOrigin::External => Driver::Input(source.index),
            PortOrigin::Internal(n) => Driver::Node(n),
        }
    }

    #[inline]
    fn resolve(self, inputs: &[bool], values: &[bool]) -> bool {
        match self {
            Driver::Input(i) => inputs[i],
            Driver::Node(n) => values[n],
        }
    }
}

// =============================================================================
// CIRCUIT
// =============================================================================

/// A compiled, evaluation-ready blueprint.
#[derive(Clone)]
pub struct Circuit {
    id: String,
    kinds: Vec<String>,
    gates: Vec<TruthFn>,
    node_inputs: Vec<Vec<Driver>>,
    outputs: Vec<Driver>,
    order: Vec<usize>,
    successors: Vec<BTreeSet<usize>>,
    connection_count: usize,
    num_inputs: usize,
    input_labels: Vec<String>,
    output_labels: Vec<String>,
}

impl Circuit {
    /// Validate and compile a blueprint.
    ///
    /// Fails with `PreconditionViolated(NotValidated(defects))` if the
    /// blueprint has any defect.
    pub fn compile(blueprint: &Blueprint, catalog: &GateCatalog) -> Result<Self, NetlogicError> {
        let analysis = analyze(blueprint, catalog);
        if !analysis.defects.is_empty() {
            return Err(Precondition::NotValidated(analysis.defects).into());
        }

        let driver_of = |sink: PortRef| -> Result<Driver, NetlogicError> {
            let idx = analysis
                .wiring
                .drivers(&sink)
                .first()
                .copied()
                .ok_or_else(|| {
                    Precondition::NotValidated(vec![Defect::UnconnectedInput { port: sink }])
                })?;
            Ok(Driver::from_source(blueprint.connections[idx].source))
        };

        let mut gates = Vec::with_capacity(blueprint.nodes.len());
        let mut node_inputs = Vec::with_capacity(blueprint.nodes.len());
        for (node, (kind, spec)) in blueprint
            .nodes
            .iter()
            .zip(analysis.specs.iter().copied())
            .enumerate()
        {
            let spec = spec.ok_or_else(|| NetlogicError::UnknownGateKind(kind.clone()))?;
            gates.push(spec.truth().clone());
            node_inputs.push(
                (0..spec.inputs())
                    .map(|port| driver_of(PortRef::node(node, port)))
                    .collect::<Result<Vec<_>, _>>()?,
            );
        }

        let outputs = (0..blueprint.num_outputs)
            .map(|port| driver_of(PortRef::external(port)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: blueprint.id.clone(),
            kinds: blueprint.nodes.clone(),
            gates,
            node_inputs,
            outputs,
            order: analysis.traversal.topological_order(),
            successors: analysis.wiring.successors().to_vec(),
            connection_count: blueprint.connections.len(),
            num_inputs: blueprint.num_inputs,
            input_labels: blueprint.input_labels.clone(),
            output_labels: blueprint.output_labels.clone(),
        })
    }

    /// Evaluate against an input vector of length `num_inputs()`.
    pub fn evaluate(&self, inputs: &[bool]) -> Result<Vec<bool>, NetlogicError> {
        self.check_inputs(inputs)?;
        Ok(self.run(inputs))
    }

    /// Evaluate using a caller-chosen node order.
    ///
    /// `order` must list every node exactly once, each after all nodes that
    /// drive it; otherwise `InvalidOrder`.
    pub fn evaluate_in_order(
        &self,
        order: &[usize],
        inputs: &[bool],
    ) -> Result<Vec<bool>, NetlogicError> {
        self.check_inputs(inputs)?;
        self.check_order(order)?;
        Ok(self.run_in(order, inputs))
    }

    /// Evaluate in the compiled order. Input length is already checked.
    fn run(&self, inputs: &[bool]) -> Vec<bool> {
        self.run_in(&self.order, inputs)
    }

    fn run_in(&self, order: &[usize], inputs: &[bool]) -> Vec<bool> {
        let mut values = vec![false; self.gates.len()];
        let mut scratch = Vec::new();

        for &node in order {
            scratch.clear();
            scratch.extend(
                self.node_inputs[node]
                    .iter()
                    .map(|d| d.resolve(inputs, &values)),
            );
            values[node] = (self.gates[node])(&scratch);
        }

        self.outputs
            .iter()
            .map(|d| d.resolve(inputs, &values))
            .collect()
    }

    fn check_inputs(&self, inputs: &[bool]) -> Result<(), NetlogicError> {
        if inputs.len() != self.num_inputs() {
            return Err(Precondition::InputLength {
                expected: self.num_inputs(),
                actual: inputs.len(),
            }
            .into());
        }
        Ok(())
    }

    fn check_order(&self, order: &[usize]) -> Result<(), NetlogicError> {
        let n = self.gates.len();
        if order.len() != n {
            return Err(Precondition::InvalidOrder(format!(
                "expected {} nodes, got {}",
                n,
                order.len()
            ))
            .into());
        }

        let mut seen = vec![false; n];
        for &node in order {
            if node >= n || seen[node] {
                return Err(Precondition::InvalidOrder(format!(
                    "node {} is out of range or repeated",
                    node
                ))
                .into());
            }
            for driver in &self.node_inputs[node] {
                if let Driver::Node(d) = *driver
                    && !seen[d]
                {
                    return Err(Precondition::InvalidOrder(format!(
                        "node {} comes before its driver {}",
                        node, d
                    ))
                    .into());
                }
            }
            seen[node] = true;
        }
        Ok(())
    }

    /// Blueprint identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of external inputs.
    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Number of external outputs.
    #[must_use]
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.gates.len()
    }

    /// Number of connections in the source blueprint.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connection_count
    }

    /// Gate kind of every node.
    #[must_use]
    pub fn kinds(&self) -> &[String] {
        &self.kinds
    }

    /// Input drivers of every node.
    #[must_use]
    pub fn node_inputs(&self) -> &[Vec<Driver>] {
        &self.node_inputs
    }

    /// Output drivers, one per external output.
    #[must_use]
    pub fn outputs(&self) -> &[Driver] {
        &self.outputs
    }

    /// The topological order used by [`Circuit::evaluate`].
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Node adjacency (node -> nodes it feeds).
    #[must_use]
    pub fn successors(&self) -> &[BTreeSet<usize>] {
        &self.successors
    }

    /// Dependency layers; nodes within a layer are mutually independent.
    #[must_use]
    pub fn layers(&self) -> Vec<Vec<usize>> {
        graph::layers(&self.successors)
    }

    /// Input labels.
    #[must_use]
    pub fn input_labels(&self) -> &[String] {
        &self.input_labels
    }

    /// Output labels.
    #[must_use]
    pub fn output_labels(&self) -> &[String] {
        &self.output_labels
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Circuit")
            .field("id", &self.id)
            .field("kinds", &self.kinds)
            .field("node_inputs", &self.node_inputs)
            .field("outputs", &self.outputs)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Validate, compile, and evaluate in one call.
pub fn evaluate(
    blueprint: &Blueprint,
    catalog: &GateCatalog,
    inputs: &[bool],
) -> Result<Vec<bool>, NetlogicError> {
    Circuit::compile(blueprint, catalog)?.evaluate(inputs)
}

// =============================================================================
// TESTS
// =============================================================================
