//! # Graph Utilities
//!
//! The connection graph behind a blueprint, shared by the validator and the
//! evaluator.
//!
//! - [`Wiring`] groups connections by the sink they drive and derives the
//!   node-to-node adjacency.
//! - [`Traversal`] is a single coloured depth-first walk that yields both a
//!   postorder (reversed: a topological order) and every cycle it closes.
//! - [`layers`] is Kahn's algorithm, grouping nodes by dependency depth.
//!
//! All collections are ordered (`BTreeMap`/`BTreeSet`) so walks are reproducible.

use crate::{Connection, PortRef};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// WIRING
// =============================================================================

/// Connections indexed by sink, plus node adjacency.
#[derive(Debug, Clone, Default)]
pub struct Wiring {
    /// sink port -> indices of the connections driving it
    drivers: BTreeMap<PortRef, Vec<usize>>,
    /// node -> nodes its output feeds
    successors: Vec<BTreeSet<usize>>,
}

impl Wiring {
    /// Build wiring for `node_count` nodes from `(connection index, connection)` pairs.
    ///
    /// Callers pass only connections whose endpoints are in range.
    pub fn build<'a, I>(node_count: usize, connections: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a Connection)>,
    {
        let mut drivers: BTreeMap<PortRef, Vec<usize>> = BTreeMap::new();
        let mut successors = vec![BTreeSet::new(); node_count];

        for (idx, conn) in connections {
            drivers.entry(conn.sink).or_default().push(idx);

            if let (Some(from), Some(to)) = (conn.source.node_index(), conn.sink.node_index())
                && let Some(targets) = successors.get_mut(from)
            {
                targets.insert(to);
            }
        }

        Self {
            drivers,
            successors,
        }
    }

    /// Connection indices driving `sink` (empty if undriven).
    #[must_use]
    pub fn drivers(&self, sink: &PortRef) -> &[usize] {
        self.drivers.get(sink).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every driven sink with its driver list, in port order.
    pub fn driven_sinks(&self) -> impl Iterator<Item = (&PortRef, &[usize])> {
        self.drivers.iter().map(|(port, idxs)| (port, idxs.as_slice()))
    }

    /// Node adjacency: `successors()[n]` is the set of nodes fed by node `n`.
    #[must_use]
    pub fn successors(&self) -> &[BTreeSet<usize>] {
        &self.successors
    }
}

// =============================================================================
// TRAVERSAL
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Result of one coloured depth-first walk over every node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    /// Nodes in the order they finished.
    pub postorder: Vec<usize>,
    /// One entry per back-edge: the gray path from its target to its source.
    pub cycles: Vec<Vec<usize>>,
}

impl Traversal {
    /// Walk `successors` from every unvisited node in index order.
    ///
    /// Iterative, so deep chains do not grow the call stack.
    #[must_use]
    pub fn run(successors: &[BTreeSet<usize>]) -> Self {
        let n = successors.len();
        let mut color = vec![Color::White; n];
        let mut postorder = Vec::with_capacity(n);
        let mut cycles = Vec::new();
        let mut stack: Vec<(usize, std::collections::btree_set::Iter<'_, usize>)> = Vec::new();

        for root in 0..n {
            if color[root] != Color::White {
                continue;
            }
            color[root] = Color::Gray;
            stack.push((root, successors[root].iter()));

            loop {
                let Some((node, iter)) = stack.last_mut() else {
                    break;
                };
                let node = *node;
                let next = iter.next().copied();

                match next {
                    Some(next) if next < n => match color[next] {
                        Color::White => {
                            color[next] = Color::Gray;
                            stack.push((next, successors[next].iter()));
                        }
                        Color::Gray => {
                            let start = stack.iter().position(|(p, _)| *p == next).unwrap_or(0);
                            cycles.push(stack[start..].iter().map(|(p, _)| *p).collect());
                        }
                        Color::Black => {}
                    },
                    Some(_) => {}
                    None => {
                        color[node] = Color::Black;
                        postorder.push(node);
                        stack.pop();
                    }
                }
            }
        }

        Self { postorder, cycles }
    }

    /// Check whether the walk closed no cycle.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Reverse postorder: every node after all nodes that feed it (when acyclic).
    #[must_use]
    pub fn topological_order(&self) -> Vec<usize> {
        self.postorder.iter().rev().copied().collect()
    }
}

// =============================================================================
// LAYERS
// =============================================================================

/// Group nodes into dependency layers with Kahn's algorithm.
///
/// Layer 0 holds nodes fed only from the boundary; layer `k` holds nodes
/// whose deepest driver sits in layer `k - 1`. Nodes within a layer are
/// mutually independent. Nodes on a cycle never become ready and are left out.
#[must_use]
pub fn layers(successors: &[BTreeSet<usize>]) -> Vec<Vec<usize>> {
    let n = successors.len();
    let mut in_degree = vec![0usize; n];
    for targets in successors {
        for &t in targets {
            if let Some(d) = in_degree.get_mut(t) {
                *d += 1;
            }
        }
    }

    let mut result = Vec::new();
    let mut frontier: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();

    while !frontier.is_empty() {
        let mut next = BTreeSet::new();
        for &node in &frontier {
            for &t in &successors[node] {
                if let Some(d) = in_degree.get_mut(t) {
                    *d -= 1;
                    if *d == 0 {
                        next.insert(t);
                    }
                }
            }
        }
        result.push(frontier);
        frontier = next.into_iter().collect();
    }

    result
}

// =============================================================================
// TESTS
// =============================================================================
