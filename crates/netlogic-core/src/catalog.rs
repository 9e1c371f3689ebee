//! # Gate Catalog
//!
//! The mapping from a node's kind name to its arity and truth function.
//!
//! The catalog is data, not dispatch code: the validator and evaluator only
//! ever ask it for a [`GateSpec`], so new kinds (including whole blueprints
//! registered as composite gates) plug in without touching either of them.
//!
//! ## Standard Kinds
//!
//! | Kind | Inputs | Output |
//! |------|--------|--------|
//! | AND  | 2 | a ∧ b |
//! | OR   | 2 | a ∨ b |
//! | XOR  | 2 | a ⊕ b |
//! | NAND | 2 | ¬(a ∧ b) |
//! | NOR  | 2 | ¬(a ∨ b) |
//! | XNOR | 2 | ¬(a ⊕ b) |
//! | NOT  | 1 | ¬a |
//! | BUF  | 1 | a |

use crate::evaluator::Circuit;
use crate::{Blueprint, NetlogicError};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A boolean truth function over a node's ordered input values.
pub type TruthFn = Arc<dyn Fn(&[bool]) -> bool + Send + Sync>;

// =============================================================================
// GATE SPEC
// =============================================================================

/// Arity and behaviour of one gate kind.
///
/// Every gate has exactly one output port; only the input arity varies.
#[derive(Clone)]
pub struct GateSpec {
    inputs: usize,
    truth: TruthFn,
}

impl GateSpec {
    /// Create a spec from an input arity and a truth function.
    pub fn new<F>(inputs: usize, truth: F) -> Self
    where
        F: Fn(&[bool]) -> bool + Send + Sync + 'static,
    {
        Self {
            inputs,
            truth: Arc::new(truth),
        }
    }

    /// Number of input ports.
    #[must_use]
    pub fn inputs(&self) -> usize {
        self.inputs
    }

    /// The truth function, shareable across threads.
    #[must_use]
    pub fn truth(&self) -> &TruthFn {
        &self.truth
    }

    /// Apply the truth function. `values` must hold exactly `inputs()` entries.
    #[must_use]
    pub fn apply(&self, values: &[bool]) -> bool {
        (self.truth)(values)
    }
}

impl fmt::Debug for GateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateSpec")
            .field("inputs", &self.inputs)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// A closed-at-use, open-for-extension table of gate kinds.
///
/// Uses `BTreeMap` so `kinds()` is listed in a stable order.
#[derive(Debug, Clone, Default)]
pub struct GateCatalog {
    gates: BTreeMap<String, GateSpec>,
}

impl GateCatalog {
    /// Create a catalog with no kinds at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The process-wide standard catalog, built on first use and never mutated.
    pub fn standard() -> &'static GateCatalog {
        static STANDARD: OnceLock<GateCatalog> = OnceLock::new();
        STANDARD.get_or_init(Self::with_standard_gates)
    }

    /// An owned copy of the standard kinds, as a starting point for extension.
    #[must_use]
    pub fn with_standard_gates() -> Self {
        let mut gates = BTreeMap::new();
        let mut put = |kind: &str, spec: GateSpec| {
            gates.insert(kind.to_string(), spec);
        };

        put("AND", GateSpec::new(2, |v| v.iter().all(|&b| b)));
        put("OR", GateSpec::new(2, |v| v.iter().any(|&b| b)));
        put("XOR", GateSpec::new(2, |v| v.iter().fold(false, |acc, &b| acc ^ b)));
        put("NAND", GateSpec::new(2, |v| !v.iter().all(|&b| b)));
        put("NOR", GateSpec::new(2, |v| !v.iter().any(|&b| b)));
        put("XNOR", GateSpec::new(2, |v| !v.iter().fold(false, |acc, &b| acc ^ b)));
        put("NOT", GateSpec::new(1, |v| !v.iter().any(|&b| b)));
        put("BUF", GateSpec::new(1, |v| v.iter().any(|&b| b)));

        Self { gates }
    }

    /// Register a new kind. Existing kinds are never replaced.
    pub fn register(&mut self, kind: impl Into<String>, spec: GateSpec) -> Result<(), NetlogicError> {
        let kind = kind.into();
        if self.gates.contains_key(&kind) {
            return Err(NetlogicError::DuplicateGateKind(kind));
        }
        self.gates.insert(kind, spec);
        Ok(())
    }

    /// Builder form of [`GateCatalog::register`].
    pub fn with_gate<F>(
        mut self,
        kind: impl Into<String>,
        inputs: usize,
        truth: F,
    ) -> Result<Self, NetlogicError>
    where
        F: Fn(&[bool]) -> bool + Send + Sync + 'static,
    {
        self.register(kind, GateSpec::new(inputs, truth))?;
        Ok(self)
    }

    /// Register a single-output blueprint as a composite gate kind named by its id.
    ///
    /// The blueprint is validated and compiled against this catalog as it
    /// stands, so a composite can only reference kinds registered before it.
    pub fn register_blueprint(&mut self, blueprint: &Blueprint) -> Result<(), NetlogicError> {
        if blueprint.num_outputs != 1 {
            return Err(NetlogicError::CompositeArity {
                kind: blueprint.id.clone(),
                outputs: blueprint.num_outputs,
            });
        }
        if self.gates.contains_key(&blueprint.id) {
            return Err(NetlogicError::DuplicateGateKind(blueprint.id.clone()));
        }

        let circuit = Circuit::compile(blueprint, self)?;
        let inputs = circuit.num_inputs();
        // A wrong-length input vector reads as false, like the standard kinds.
        self.register(
            blueprint.id.clone(),
            GateSpec::new(inputs, move |values| {
                circuit
                    .evaluate(values)
                    .ok()
                    .and_then(|outputs| outputs.first().copied())
                    .unwrap_or(false)
            }),
        )
    }

    /// Look up a kind.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&GateSpec> {
        self.gates.get(kind)
    }

    /// Look up a kind, failing with `UnknownGateKind`.
    pub fn lookup(&self, kind: &str) -> Result<&GateSpec, NetlogicError> {
        self.get(kind)
            .ok_or_else(|| NetlogicError::UnknownGateKind(kind.to_string()))
    }

    /// Check whether a kind is registered.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.gates.contains_key(kind)
    }

    /// All registered kinds in sorted order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.gates.keys().map(String::as_str)
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check whether the catalog has no kinds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
