//! # Core Type Definitions
//!
//! This module contains all core types for the Netlogic blueprint engine:
//! - Port addressing (`PortOrigin`, `PortRef`, `Side`, `Boundary`)
//! - Wiring (`Connection`)
//! - The network description itself (`Blueprint`)
//! - Structural defects (`Defect`) and engine errors (`NetlogicError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer indices only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// PORT ADDRESSING
// =============================================================================

/// Where a port lives.
///
/// `External` is the blueprint's own boundary: on the source side of a
/// connection it names an input slot, on the sink side an output slot.
/// `Internal(n)` is the node at position `n` in the node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PortOrigin {
    /// The blueprint boundary.
    External,
    /// A node, by position in the node list.
    Internal(usize),
}

/// A port reference: an origin plus a zero-based port index local to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortRef {
    /// The owner of the port.
    pub origin: PortOrigin,
    /// Port index local to the origin.
    pub index: usize,
}

impl PortRef {
    /// A port on the blueprint boundary.
    #[must_use]
    pub const fn external(index: usize) -> Self {
        Self {
            origin: PortOrigin::External,
            index,
        }
    }

    /// A port on the node at position `node`.
    #[must_use]
    pub const fn node(node: usize, index: usize) -> Self {
        Self {
            origin: PortOrigin::Internal(node),
            index,
        }
    }

    /// Check whether this port is on the blueprint boundary.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self.origin, PortOrigin::External)
    }

    /// The node index, if this port belongs to a node.
    #[must_use]
    pub const fn node_index(&self) -> Option<usize> {
        match self.origin {
            PortOrigin::External => None,
            PortOrigin::Internal(n) => Some(n),
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin {
            PortOrigin::External => write!(f, "external port {}", self.index),
            PortOrigin::Internal(n) => write!(f, "node {} port {}", n, self.index),
        }
    }
}

/// Which end of a connection a port reference sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The driving end (node output or external input slot).
    Source,
    /// The driven end (node input or external output slot).
    Sink,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Sink => f.write_str("sink"),
        }
    }
}

/// One side of the blueprint boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Boundary {
    /// External input slots.
    Inputs,
    /// External output slots.
    Outputs,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Inputs => f.write_str("input"),
            Boundary::Outputs => f.write_str("output"),
        }
    }
}

// =============================================================================
// CONNECTION
// =============================================================================

/// A directed wire from one source port to one sink port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// The driving port.
    pub source: PortRef,
    /// The driven port.
    pub sink: PortRef,
}

impl Connection {
    /// Create a new connection.
    #[must_use]
    pub const fn new(source: PortRef, sink: PortRef) -> Self {
        Self { source, sink }
    }
}

// =============================================================================
// BLUEPRINT
// =============================================================================

/// A declarative description of a combinational logic network.
///
/// Nodes are identified by position in `nodes`; each entry is a gate kind
/// name resolved through a [`crate::GateCatalog`]. Validation and evaluation
/// only ever borrow a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Blueprint {
    /// Opaque identifier.
    pub id: String,
    /// Gate kind of each node.
    pub nodes: Vec<String>,
    /// Wires, in declaration order.
    pub connections: Vec<Connection>,
    /// Number of external input slots.
    pub num_inputs: usize,
    /// Number of external output slots.
    pub num_outputs: usize,
    /// One label per input slot.
    pub input_labels: Vec<String>,
    /// One label per output slot.
    pub output_labels: Vec<String>,
}

impl Blueprint {
    /// Create an empty blueprint with generated labels (`in0..`, `out0..`).
    #[must_use]
    pub fn new(id: impl Into<String>, num_inputs: usize, num_outputs: usize) -> Self {
        Self {
            id: id.into(),
            nodes: Vec::new(),
            connections: Vec::new(),
            num_inputs,
            num_outputs,
            input_labels: (0..num_inputs).map(|i| format!("in{}", i)).collect(),
            output_labels: (0..num_outputs).map(|i| format!("out{}", i)).collect(),
        }
    }

    /// Replace both label lists.
    #[must_use]
    pub fn with_labels<I, O, S, T>(mut self, inputs: I, outputs: O) -> Self
    where
        I: IntoIterator<Item = S>,
        O: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        self.input_labels = inputs.into_iter().map(Into::into).collect();
        self.output_labels = outputs.into_iter().map(Into::into).collect();
        self
    }

    /// Append a node of the given kind. Returns its index.
    pub fn add_node(&mut self, kind: impl Into<String>) -> usize {
        self.nodes.push(kind.into());
        self.nodes.len() - 1
    }

    /// Append a connection.
    pub fn connect(&mut self, source: PortRef, sink: PortRef) {
        self.connections.push(Connection::new(source, sink));
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

// =============================================================================
// DEFECTS
// =============================================================================

/// One way a blueprint fails to be well-formed.
///
/// Defects are data, not failures: the validator collects every one it
/// finds and hands the list back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Defect {
    /// A connection names a node index past the end of the node list.
    #[error("dangling {side} reference to {port}")]
    DanglingReference { port: PortRef, side: Side },

    /// A node's kind is not in the gate catalog.
    #[error("node {node_index} has unknown gate kind '{kind}'")]
    UnknownGateKind { node_index: usize, kind: String },

    /// A port index is past the arity of its owner.
    #[error("{side} {port} out of range (arity {arity})")]
    PortIndexOutOfRange {
        port: PortRef,
        side: Side,
        arity: usize,
    },

    /// A node input or external output has no driver.
    #[error("{port} is not driven by any connection")]
    UnconnectedInput { port: PortRef },

    /// A sink is driven by more than one connection.
    #[error("{port} is driven by {connection_count} connections")]
    MultipleDriversOnSink {
        port: PortRef,
        connection_count: usize,
    },

    /// The node graph contains a cycle through these nodes.
    #[error("cycle through nodes {node_indices:?}")]
    CycleDetected { node_indices: Vec<usize> },

    /// A label list does not match its declared slot count.
    #[error("{boundary} labels: expected {expected}, got {actual}")]
    LabelCountMismatch {
        boundary: Boundary,
        expected: usize,
        actual: usize,
    },
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// A broken caller contract, reported by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    /// The blueprint did not pass validation.
    NotValidated(Vec<Defect>),
    /// The input vector length differs from `num_inputs`.
    InputLength { expected: usize, actual: usize },
    /// A caller-supplied evaluation order is not a topological order.
    InvalidOrder(String),
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precondition::NotValidated(defects) => {
                write!(f, "blueprint not validated ({} defects)", defects.len())
            }
            Precondition::InputLength { expected, actual } => {
                write!(f, "expected {} inputs, got {}", expected, actual)
            }
            Precondition::InvalidOrder(reason) => write!(f, "invalid evaluation order: {}", reason),
        }
    }
}

/// Errors that can occur in the Netlogic engine.
///
/// - Structural defects are NOT errors; they come back from `validate`
/// - `PreconditionViolated` marks a caller bug
/// - The engine never panics; all errors are recoverable
#[derive(Debug, Error)]
pub enum NetlogicError {
    /// The caller broke an evaluation contract.
    #[error("Precondition violated: {0}")]
    PreconditionViolated(Precondition),

    /// The requested gate kind is not in the catalog.
    #[error("Unknown gate kind: {0}")]
    UnknownGateKind(String),

    /// A gate kind with this name is already registered.
    #[error("Gate kind already registered: {0}")]
    DuplicateGateKind(String),

    /// A blueprint registered as a gate must have exactly one output.
    #[error("Composite gate '{kind}' must have exactly one output, has {outputs}")]
    CompositeArity { kind: String, outputs: usize },

    /// A size or count limit was exceeded.
    #[error("{what} is {actual}, maximum is {max}")]
    LimitExceeded {
        what: &'static str,
        actual: usize,
        max: usize,
    },

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<Precondition> for NetlogicError {
    fn from(p: Precondition) -> Self {
        NetlogicError::PreconditionViolated(p)
    }
}

// =============================================================================
// TESTS
// =============================================================================
