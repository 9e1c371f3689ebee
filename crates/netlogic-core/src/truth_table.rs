//! # Truth Tables
//!
//! Exhaustive enumeration of a circuit's behaviour.
//!
//! Rows are produced in counting order with input 0 as the most significant
//! column, so the first row is all-false and the last all-true.

use crate::evaluator::Circuit;
use crate::primitives::MAX_TRUTH_TABLE_INPUTS;
use crate::NetlogicError;
use serde::{Deserialize, Serialize};

/// One input combination and the outputs it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthRow {
    pub inputs: Vec<bool>,
    pub outputs: Vec<bool>,
}

/// A complete truth table with column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthTable {
    /// Input column names.
    pub inputs: Vec<String>,
    /// Output column names.
    pub outputs: Vec<String>,
    /// `2^inputs.len()` rows in counting order.
    pub rows: Vec<TruthRow>,
}

impl TruthTable {
    /// Enumerate every input combination of `circuit`.
    ///
    /// Fails with `LimitExceeded` above `MAX_TRUTH_TABLE_INPUTS` inputs.
    pub fn generate(circuit: &Circuit) -> Result<Self, NetlogicError> {
        Self::generate_bounded(circuit, MAX_TRUTH_TABLE_INPUTS)
    }

    /// Like [`TruthTable::generate`] with a caller-chosen input limit.
    ///
    /// The limit is clamped to `MAX_TRUTH_TABLE_INPUTS`.
    pub fn generate_bounded(circuit: &Circuit, max_inputs: usize) -> Result<Self, NetlogicError> {
        let n = circuit.num_inputs();
        let max = max_inputs.min(MAX_TRUTH_TABLE_INPUTS);
        if n > max {
            return Err(NetlogicError::LimitExceeded {
                what: "truth table input count",
                actual: n,
                max,
            });
        }

        let mut rows = Vec::with_capacity(1 << n);
        for combination in 0..(1usize << n) {
            let inputs: Vec<bool> = (0..n)
                .map(|j| (combination >> (n - 1 - j)) & 1 == 1)
                .collect();
            let outputs = circuit.evaluate(&inputs)?;
            rows.push(TruthRow { inputs, outputs });
        }

        Ok(Self {
            inputs: headers(circuit.input_labels(), input_letter),
            outputs: headers(circuit.output_labels(), output_letter),
            rows,
        })
    }

    /// Render as a boxed plain-text table of 0/1 cells.
    #[must_use]
    pub fn render(&self) -> String {
        let names: Vec<&str> = self
            .inputs
            .iter()
            .chain(&self.outputs)
            .map(String::as_str)
            .collect();
        let widths: Vec<usize> = names.iter().map(|n| n.chars().count().max(1)).collect();

        let rule = {
            let mut line = String::from("+");
            for w in &widths {
                line.push_str(&"-".repeat(w + 2));
                line.push('+');
            }
            line
        };
        let row_line = |cells: &[&str]| {
            let mut line = String::from("|");
            for (cell, w) in cells.iter().zip(&widths) {
                line.push_str(&format!(" {:^width$} |", cell, width = *w));
            }
            line
        };

        let mut out = String::new();
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&row_line(&names));
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<&str> = row
                .inputs
                .iter()
                .chain(&row.outputs)
                .map(|&b| if b { "1" } else { "0" })
                .collect();
            out.push_str(&row_line(&cells));
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');
        out
    }
}

/// Use labels as headers, substituting a generated name for blank ones.
fn headers(labels: &[String], fallback: fn(usize) -> String) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if label.trim().is_empty() {
                fallback(i)
            } else {
                label.clone()
            }
        })
        .collect()
}

/// A, B, ..., Z, A1, B1, ...
fn input_letter(i: usize) -> String {
    letter(i % 26, i / 26)
}

/// Z, Y, ..., A, Z1, Y1, ...
fn output_letter(i: usize) -> String {
    letter(25 - i % 26, i / 26)
}

fn letter(offset: usize, round: usize) -> String {
    let c = char::from(b'A' + offset as u8);
    if round == 0 {
        c.to_string()
    } else {
        format!("{}{}", c, round)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Blueprint, GateCatalog, PortRef};

    fn xor_circuit(labels: (&[&str], &[&str])) -> Circuit {
        let mut bp = Blueprint::new("xor", 2, 1).with_labels(
            labels.0.iter().copied(),
            labels.1.iter().copied(),
        );
        let g = bp.add_node("XOR");
        bp.connect(PortRef::external(0), PortRef::node(g, 0));
        bp.connect(PortRef::external(1), PortRef::node(g, 1));
        bp.connect(PortRef::node(g, 0), PortRef::external(0));
        Circuit::compile(&bp, GateCatalog::standard()).unwrap()
    }

    #[test]
    fn rows_in_counting_order() {
        let table = TruthTable::generate(&xor_circuit((&["A", "B"], &["R"]))).unwrap();
        let inputs: Vec<_> = table.rows.iter().map(|r| r.inputs.clone()).collect();
        assert_eq!(
            inputs,
            vec![
                vec![false, false],
                vec![false, true],
                vec![true, false],
                vec![true, true]
            ]
        );
        let outputs: Vec<_> = table.rows.iter().map(|r| r.outputs[0]).collect();
        assert_eq!(outputs, vec![false, true, true, false]);
    }

    #[test]
    fn blank_labels_fall_back_to_letters() {
        let table = TruthTable::generate(&xor_circuit((&["", " "], &[""]))).unwrap();
        assert_eq!(table.inputs, vec!["A", "B"]);
        assert_eq!(table.outputs, vec!["Z"]);
    }

    #[test]
    fn letters_wrap_with_suffix() {
        assert_eq!(input_letter(0), "A");
        assert_eq!(input_letter(27), "B1");
        assert_eq!(output_letter(1), "Y");
        assert_eq!(output_letter(26), "Z1");
    }

    #[test]
    fn render_draws_box() {
        let table = TruthTable::generate(&xor_circuit((&["A", "B"], &["R"]))).unwrap();
        let text = table.render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "+---+---+---+");
        assert_eq!(lines[1], "| A | B | R |");
        assert_eq!(lines[3], "| 0 | 0 | 0 |");
        assert_eq!(lines[6], "| 1 | 1 | 0 |");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn input_limit_enforced() {
        let circuit = xor_circuit((&["A", "B"], &["R"]));
        let result = TruthTable::generate_bounded(&circuit, 1);
        assert!(matches!(
            result,
            Err(NetlogicError::LimitExceeded { actual: 2, max: 1, .. })
        ));
    }
}
