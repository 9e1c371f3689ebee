//! # Validator
//!
//! Structural checks for blueprints before evaluation.
//!
//! - Exhaustive: every defect found is reported, never just the first
//! - Non-fatal: defects are data returned to the caller
//! - Read-only: the blueprint is only borrowed
//!
//! Defects come back in a fixed order: node kinds, connection endpoints,
//! sink occupancy (node inputs by node and port, then external outputs),
//! cycles, labels.

use crate::catalog::{GateCatalog, GateSpec};
use crate::graph::{Traversal, Wiring};
use crate::primitives::NODE_OUTPUTS;
use crate::{Blueprint, Boundary, Defect, PortOrigin, PortRef, Side};

/// Everything learned about a blueprint in one validation pass.
///
/// The evaluator compiles from this directly so the graph is walked once.
#[derive(Debug)]
pub(crate) struct Analysis<'c> {
    pub defects: Vec<Defect>,
    pub specs: Vec<Option<&'c GateSpec>>,
    pub wiring: Wiring,
    pub traversal: Traversal,
}

/// Validate a blueprint against a gate catalog.
///
/// Returns `Ok(())` when the blueprint is safe to evaluate, otherwise every
/// defect found.
pub fn validate(blueprint: &Blueprint, catalog: &GateCatalog) -> Result<(), Vec<Defect>> {
    let analysis = analyze(blueprint, catalog);
    if analysis.defects.is_empty() {
        Ok(())
    } else {
        Err(analysis.defects)
    }
}

/// Run every structural check and keep the intermediate graph.
pub(crate) fn analyze<'c>(blueprint: &Blueprint, catalog: &'c GateCatalog) -> Analysis<'c> {
    let mut defects = Vec::new();

    // (a) node kinds
    let specs: Vec<Option<&GateSpec>> = blueprint
        .nodes
        .iter()
        .enumerate()
        .map(|(node_index, kind)| {
            let spec = catalog.get(kind);
            if spec.is_none() {
                defects.push(Defect::UnknownGateKind {
                    node_index,
                    kind: kind.clone(),
                });
            }
            spec
        })
        .collect();

    // (b) connection endpoints
    let mut in_range = Vec::with_capacity(blueprint.connections.len());
    for (idx, conn) in blueprint.connections.iter().enumerate() {
        let source_ok = check_endpoint(blueprint, &specs, conn.source, Side::Source, &mut defects);
        let sink_ok = check_endpoint(blueprint, &specs, conn.sink, Side::Sink, &mut defects);
        if source_ok && sink_ok {
            in_range.push((idx, conn));
        }
    }
    let wiring = Wiring::build(blueprint.nodes.len(), in_range);

    // (c) sink occupancy
    for (node, spec) in specs.iter().enumerate() {
        match spec {
            Some(spec) => {
                for port in 0..spec.inputs() {
                    check_sink(&wiring, PortRef::node(node, port), &mut defects);
                }
            }
            // Arity unknown: only double drives can be detected
            None => {
                for (port, drivers) in wiring.driven_sinks() {
                    if port.node_index() == Some(node) && drivers.len() > 1 {
                        defects.push(Defect::MultipleDriversOnSink {
                            port: *port,
                            connection_count: drivers.len(),
                        });
                    }
                }
            }
        }
    }
    for port in 0..blueprint.num_outputs {
        check_sink(&wiring, PortRef::external(port), &mut defects);
    }

    // (d) cycles
    let traversal = Traversal::run(wiring.successors());
    defects.extend(
        traversal
            .cycles
            .iter()
            .map(|cycle| Defect::CycleDetected {
                node_indices: cycle.clone(),
            }),
    );

    // (e) labels
    if blueprint.input_labels.len() != blueprint.num_inputs {
        defects.push(Defect::LabelCountMismatch {
            boundary: Boundary::Inputs,
            expected: blueprint.num_inputs,
            actual: blueprint.input_labels.len(),
        });
    }
    if blueprint.output_labels.len() != blueprint.num_outputs {
        defects.push(Defect::LabelCountMismatch {
            boundary: Boundary::Outputs,
            expected: blueprint.num_outputs,
            actual: blueprint.output_labels.len(),
        });
    }

    Analysis {
        defects,
        specs,
        wiring,
        traversal,
    }
}

/// Check one connection endpoint. Returns `true` if it is usable for wiring.
fn check_endpoint(
    blueprint: &Blueprint,
    specs: &[Option<&GateSpec>],
    port: PortRef,
    side: Side,
    defects: &mut Vec<Defect>,
) -> bool {
    let arity = match (port.origin, side) {
        (PortOrigin::External, Side::Source) => Some(blueprint.num_inputs),
        (PortOrigin::External, Side::Sink) => Some(blueprint.num_outputs),
        (PortOrigin::Internal(n), _) if n >= specs.len() => {
            defects.push(Defect::DanglingReference { port, side });
            return false;
        }
        (PortOrigin::Internal(_), Side::Source) => Some(NODE_OUTPUTS),
        (PortOrigin::Internal(n), Side::Sink) => specs[n].map(GateSpec::inputs),
    };

    match arity {
        Some(arity) if port.index >= arity => {
            defects.push(Defect::PortIndexOutOfRange { port, side, arity });
            false
        }
        _ => true,
    }
}

/// Flag an undriven or multiply-driven sink.
fn check_sink(wiring: &Wiring, port: PortRef, defects: &mut Vec<Defect>) {
    match wiring.drivers(&port).len() {
        0 => defects.push(Defect::UnconnectedInput { port }),
        1 => {}
        connection_count => defects.push(Defect::MultipleDriversOnSink {
            port,
            connection_count,
        }),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn defects(bp: &Blueprint) -> Vec<Defect> {
        validate(bp, GateCatalog::standard()).err().unwrap_or_default()
    }

    /// A single AND gate between two inputs and one output.
    fn and_gate() -> Blueprint {
        let mut bp = Blueprint::new("and", 2, 1);
        let g = bp.add_node("AND");
        bp.connect(PortRef::external(0), PortRef::node(g, 0));
        bp.connect(PortRef::external(1), PortRef::node(g, 1));
        bp.connect(PortRef::node(g, 0), PortRef::external(0));
        bp
    }

    #[test]
    fn well_formed_blueprint_passes() {
        assert!(validate(&and_gate(), GateCatalog::standard()).is_ok());
    }

    #[test]
    fn empty_blueprint_without_outputs_passes() {
        let bp = Blueprint::new("empty", 0, 0);
        assert!(validate(&bp, GateCatalog::standard()).is_ok());
    }

    #[test]
    fn unwired_outputs_reported() {
        let bp = Blueprint::new("open", 2, 2);
        assert_eq!(
            defects(&bp),
            vec![
                Defect::UnconnectedInput {
                    port: PortRef::external(0)
                },
                Defect::UnconnectedInput {
                    port: PortRef::external(1)
                },
            ]
        );
    }

    #[test]
    fn unknown_kind_reported_with_index() {
        let mut bp = and_gate();
        bp.nodes[0] = "MUX".to_string();
        assert_eq!(
            defects(&bp),
            vec![Defect::UnknownGateKind {
                node_index: 0,
                kind: "MUX".to_string()
            }]
        );
    }

    #[test]
    fn dangling_node_reference_reported() {
        let mut bp = Blueprint::new("dangling", 1, 1);
        for _ in 0..3 {
            bp.add_node("BUF");
        }
        bp.connect(PortRef::external(0), PortRef::node(0, 0));
        bp.connect(PortRef::node(0, 0), PortRef::node(1, 0));
        bp.connect(PortRef::node(1, 0), PortRef::node(2, 0));
        bp.connect(PortRef::node(5, 0), PortRef::external(0));

        assert_eq!(
            defects(&bp),
            vec![
                Defect::DanglingReference {
                    port: PortRef::node(5, 0),
                    side: Side::Source
                },
                Defect::UnconnectedInput {
                    port: PortRef::external(0)
                },
            ]
        );
    }

    #[test]
    fn out_of_range_ports_reported_per_side() {
        let mut bp = and_gate();
        bp.connect(PortRef::external(7), PortRef::node(0, 2));
        bp.connect(PortRef::node(0, 1), PortRef::external(3));

        let found = defects(&bp);
        assert_eq!(
            found,
            vec![
                Defect::PortIndexOutOfRange {
                    port: PortRef::external(7),
                    side: Side::Source,
                    arity: 2
                },
                Defect::PortIndexOutOfRange {
                    port: PortRef::node(0, 2),
                    side: Side::Sink,
                    arity: 2
                },
                Defect::PortIndexOutOfRange {
                    port: PortRef::node(0, 1),
                    side: Side::Source,
                    arity: 1
                },
                Defect::PortIndexOutOfRange {
                    port: PortRef::external(3),
                    side: Side::Sink,
                    arity: 1
                },
            ]
        );
    }

    #[test]
    fn double_drive_reported_with_count() {
        let mut bp = and_gate();
        bp.connect(PortRef::external(1), PortRef::node(0, 0));
        bp.connect(PortRef::external(0), PortRef::node(0, 0));

        assert_eq!(
            defects(&bp),
            vec![Defect::MultipleDriversOnSink {
                port: PortRef::node(0, 0),
                connection_count: 3
            }]
        );
    }

    #[test]
    fn unknown_kind_still_checked_for_double_drive() {
        let mut bp = Blueprint::new("mystery", 2, 0);
        bp.add_node("MYSTERY");
        bp.connect(PortRef::external(0), PortRef::node(0, 4));
        bp.connect(PortRef::external(1), PortRef::node(0, 4));

        let found = defects(&bp);
        assert!(found.contains(&Defect::MultipleDriversOnSink {
            port: PortRef::node(0, 4),
            connection_count: 2
        }));
    }

    #[test]
    fn unconnected_node_input_reported() {
        let mut bp = and_gate();
        bp.connections.remove(1);
        assert_eq!(
            defects(&bp),
            vec![Defect::UnconnectedInput {
                port: PortRef::node(0, 1)
            }]
        );
    }

    #[test]
    fn feedback_loop_reported() {
        let mut bp = Blueprint::new("loop", 1, 1);
        let a = bp.add_node("AND");
        let b = bp.add_node("BUF");
        bp.connect(PortRef::external(0), PortRef::node(a, 0));
        bp.connect(PortRef::node(b, 0), PortRef::node(a, 1));
        bp.connect(PortRef::node(a, 0), PortRef::node(b, 0));
        bp.connect(PortRef::node(a, 0), PortRef::external(0));

        assert_eq!(
            defects(&bp),
            vec![Defect::CycleDetected {
                node_indices: vec![0, 1]
            }]
        );
    }

    #[test]
    fn label_mismatch_reported_per_boundary() {
        let bp = and_gate().with_labels(["A"], ["X", "Y"]);
        assert_eq!(
            defects(&bp),
            vec![
                Defect::LabelCountMismatch {
                    boundary: Boundary::Inputs,
                    expected: 2,
                    actual: 1
                },
                Defect::LabelCountMismatch {
                    boundary: Boundary::Outputs,
                    expected: 1,
                    actual: 2
                },
            ]
        );
    }

    #[test]
    fn all_defects_collected_in_one_pass() {
        let mut bp = Blueprint::new("broken", 1, 1).with_labels(Vec::<String>::new(), ["X"]);
        bp.add_node("NOPE");
        bp.add_node("NOT");
        bp.connect(PortRef::node(9, 0), PortRef::node(1, 0));
        bp.connect(PortRef::external(0), PortRef::external(0));
        bp.connect(PortRef::external(0), PortRef::external(0));

        let found = defects(&bp);
        assert!(found.iter().any(|d| matches!(d, Defect::UnknownGateKind { .. })));
        assert!(found.iter().any(|d| matches!(d, Defect::DanglingReference { .. })));
        assert!(found.iter().any(|d| matches!(d, Defect::UnconnectedInput { .. })));
        assert!(found.iter().any(|d| matches!(d, Defect::MultipleDriversOnSink { .. })));
        assert!(found.iter().any(|d| matches!(d, Defect::LabelCountMismatch { .. })));
    }

    #[test]
    fn validation_does_not_mutate() {
        let bp = and_gate();
        let before = bp.clone();
        let _ = validate(&bp, GateCatalog::standard());
        assert_eq!(bp, before);
    }
}
