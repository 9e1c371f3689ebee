//! # Reference Blueprints
//!
//! Small, well-known circuits built from standard catalog kinds. They double
//! as fixtures for tests and benchmarks and as starting points for users.
//!
//! Multi-bit blueprints are little-endian: bit 0 comes first.

use crate::{Blueprint, GateCatalog, PortRef};

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &[
    "nand-not",
    "nand-and",
    "xor",
    "half-adder",
    "full-adder",
    "ripple-adder",
    "adder-subtractor",
    "bitwise-and",
    "bitwise-or",
    "bitwise-xor",
    "bitwise-not",
    "shift-left",
    "shift-right",
    "decoder-2x4",
];

/// Build a reference blueprint by name. `bits` applies to multi-bit circuits.
///
/// `bitwise-<kind>` accepts any standard kind, not only those in [`NAMES`].
#[must_use]
pub fn by_name(name: &str, bits: usize) -> Option<Blueprint> {
    if let Some(kind) = name.strip_prefix("bitwise-") {
        return bitwise(&kind.to_ascii_uppercase(), bits);
    }
    match name {
        "nand-not" => Some(nand_not()),
        "nand-and" => Some(nand_and()),
        "xor" => Some(xor_from_basics()),
        "half-adder" => Some(half_adder()),
        "full-adder" => Some(full_adder()),
        "ripple-adder" => Some(ripple_carry_adder(bits)),
        "adder-subtractor" => Some(adder_subtractor(bits)),
        "shift-left" => Some(shift_left(bits)),
        "shift-right" => Some(shift_right(bits)),
        "decoder-2x4" => Some(decoder_2x4()),
        _ => None,
    }
}

/// NOT(a) = NAND(a, a).
#[must_use]
pub fn nand_not() -> Blueprint {
    let mut bp = Blueprint::new("NOT_NAND", 1, 1).with_labels(["A"], ["Y"]);
    let nand = bp.add_node("NAND");
    bp.connect(PortRef::external(0), PortRef::node(nand, 0));
    bp.connect(PortRef::external(0), PortRef::node(nand, 1));
    bp.connect(PortRef::node(nand, 0), PortRef::external(0));
    bp
}

/// AND(a, b) = NAND(NAND(a, b), NAND(a, b)).
#[must_use]
pub fn nand_and() -> Blueprint {
    let mut bp = Blueprint::new("AND_NAND", 2, 1).with_labels(["A", "B"], ["Y"]);
    let first = bp.add_node("NAND");
    let second = bp.add_node("NAND");
    bp.connect(PortRef::external(0), PortRef::node(first, 0));
    bp.connect(PortRef::external(1), PortRef::node(first, 1));
    bp.connect(PortRef::node(first, 0), PortRef::node(second, 0));
    bp.connect(PortRef::node(first, 0), PortRef::node(second, 1));
    bp.connect(PortRef::node(second, 0), PortRef::external(0));
    bp
}

/// XOR(a, b) = OR(AND(a, NOT(b)), AND(NOT(a), b)).
///
/// Nodes are declared out of dependency order on purpose.
#[must_use]
pub fn xor_from_basics() -> Blueprint {
    let mut bp = Blueprint::new("XOR_BASIC", 2, 1).with_labels(["A", "B"], ["R"]);
    for kind in ["NOT", "AND", "NOT", "AND", "OR"] {
        bp.add_node(kind);
    }
    bp.connect(PortRef::node(4, 0), PortRef::external(0));
    bp.connect(PortRef::node(3, 0), PortRef::node(4, 0));
    bp.connect(PortRef::node(1, 0), PortRef::node(4, 1));
    bp.connect(PortRef::external(0), PortRef::node(3, 0));
    bp.connect(PortRef::node(2, 0), PortRef::node(3, 1));
    bp.connect(PortRef::node(0, 0), PortRef::node(1, 0));
    bp.connect(PortRef::external(1), PortRef::node(1, 1));
    bp.connect(PortRef::external(1), PortRef::node(2, 0));
    bp.connect(PortRef::external(0), PortRef::node(0, 0));
    bp
}

/// (sum, carry) = (XOR(a, b), AND(a, b)).
#[must_use]
pub fn half_adder() -> Blueprint {
    let mut bp = Blueprint::new("HALF_ADDER", 2, 2).with_labels(["A", "B"], ["S", "C"]);
    let xor = bp.add_node("XOR");
    let and = bp.add_node("AND");
    for gate in [xor, and] {
        bp.connect(PortRef::external(0), PortRef::node(gate, 0));
        bp.connect(PortRef::external(1), PortRef::node(gate, 1));
    }
    bp.connect(PortRef::node(xor, 0), PortRef::external(0));
    bp.connect(PortRef::node(and, 0), PortRef::external(1));
    bp
}

/// One-bit full adder: inputs (a, b, carry-in), outputs (sum, carry-out).
#[must_use]
pub fn full_adder() -> Blueprint {
    let mut bp = Blueprint::new("FULL_ADDER", 3, 2).with_labels(["A", "B", "CIN"], ["S", "COUT"]);
    let (sum, carry) = add_bit(
        &mut bp,
        PortRef::external(0),
        PortRef::external(1),
        PortRef::external(2),
    );
    bp.connect(sum, PortRef::external(0));
    bp.connect(carry, PortRef::external(1));
    bp
}

/// N-bit ripple-carry adder.
///
/// Inputs: `a0..a(n-1), b0..b(n-1), cin`. Outputs: `s0..s(n-1), cout`.
#[must_use]
pub fn ripple_carry_adder(bits: usize) -> Blueprint {
    let inputs = (0..bits)
        .map(|i| format!("A{}", i))
        .chain((0..bits).map(|i| format!("B{}", i)))
        .chain(std::iter::once("CIN".to_string()));
    let outputs = (0..bits)
        .map(|i| format!("S{}", i))
        .chain(std::iter::once("COUT".to_string()));
    let mut bp =
        Blueprint::new(format!("{}BIT_ADDER", bits), 2 * bits + 1, bits + 1).with_labels(inputs, outputs);

    let mut carry = PortRef::external(2 * bits);
    for i in 0..bits {
        let (sum, next) = add_bit(
            &mut bp,
            PortRef::external(i),
            PortRef::external(bits + i),
            carry,
        );
        bp.connect(sum, PortRef::external(i));
        carry = next;
    }
    bp.connect(carry, PortRef::external(bits));
    bp
}

/// N-bit adder-subtractor: `SUB = 0` adds, `SUB = 1` adds the two's complement of `b`.
///
/// Inputs: `a0..a(n-1), b0..b(n-1), sub`. Outputs: `s0..s(n-1), cout`.
/// Each `b` bit is XORed with `sub`, and `sub` is also the initial carry.
#[must_use]
pub fn adder_subtractor(bits: usize) -> Blueprint {
    let inputs = (0..bits)
        .map(|i| format!("A{}", i))
        .chain((0..bits).map(|i| format!("B{}", i)))
        .chain(std::iter::once("SUB".to_string()));
    let outputs = (0..bits)
        .map(|i| format!("S{}", i))
        .chain(std::iter::once("COUT".to_string()));
    let mut bp = Blueprint::new(format!("{}BIT_ADDER_SUBTRACTOR", bits), 2 * bits + 1, bits + 1)
        .with_labels(inputs, outputs);

    let sub = PortRef::external(2 * bits);
    let mut carry = sub;
    for i in 0..bits {
        let flip = bp.add_node("XOR");
        bp.connect(PortRef::external(bits + i), PortRef::node(flip, 0));
        bp.connect(sub, PortRef::node(flip, 1));
        let (sum, next) = add_bit(&mut bp, PortRef::external(i), PortRef::node(flip, 0), carry);
        bp.connect(sum, PortRef::external(i));
        carry = next;
    }
    bp.connect(carry, PortRef::external(bits));
    bp
}

/// Apply one standard gate kind bit by bit across N-bit words.
///
/// A kind of arity `k` takes `k` words laid out one after another
/// (`A0..A(n-1), B0..B(n-1), ...`) and yields `Y0..Y(n-1)`.
/// Returns `None` for kinds outside the standard catalog.
#[must_use]
pub fn bitwise(kind: &str, bits: usize) -> Option<Blueprint> {
    let arity = GateCatalog::standard().get(kind)?.inputs();
    let inputs = ('A'..='Z')
        .take(arity)
        .flat_map(|letter| (0..bits).map(move |i| format!("{}{}", letter, i)));
    let outputs = (0..bits).map(|i| format!("Y{}", i));
    let mut bp = Blueprint::new(format!("{}BIT_{}", bits, kind), arity * bits, bits)
        .with_labels(inputs, outputs);

    for i in 0..bits {
        let gate = bp.add_node(kind);
        for word in 0..arity {
            bp.connect(PortRef::external(word * bits + i), PortRef::node(gate, word));
        }
        bp.connect(PortRef::node(gate, 0), PortRef::external(i));
    }
    Some(bp)
}

/// Shift left by one through a carry: pure wiring, no nodes.
///
/// Inputs: `x0..x(n-1), cin`. Outputs: `y0 = cin, y(i) = x(i-1), cout = x(n-1)`.
#[must_use]
pub fn shift_left(bits: usize) -> Blueprint {
    let inputs = (0..bits)
        .map(|i| format!("X{}", i))
        .chain(std::iter::once("CIN".to_string()));
    let outputs = (0..bits)
        .map(|i| format!("Y{}", i))
        .chain(std::iter::once("COUT".to_string()));
    let mut bp =
        Blueprint::new(format!("{}BIT_SHIFT_LEFT", bits), bits + 1, bits + 1).with_labels(inputs, outputs);

    bp.connect(PortRef::external(bits), PortRef::external(0));
    for i in 0..bits {
        bp.connect(PortRef::external(i), PortRef::external(i + 1));
    }
    bp
}

/// Shift right by one through a carry: pure wiring, no nodes.
///
/// Inputs: `x0..x(n-1), cin`. Outputs: `y(i) = x(i+1), y(n-1) = cin, cout = x0`.
#[must_use]
pub fn shift_right(bits: usize) -> Blueprint {
    let inputs = (0..bits)
        .map(|i| format!("X{}", i))
        .chain(std::iter::once("CIN".to_string()));
    let outputs = (0..bits)
        .map(|i| format!("Y{}", i))
        .chain(std::iter::once("COUT".to_string()));
    let mut bp =
        Blueprint::new(format!("{}BIT_SHIFT_RIGHT", bits), bits + 1, bits + 1).with_labels(inputs, outputs);

    // Input slot `bits` is the carry-in; output slot `bits` is the carry-out.
    for i in 0..bits {
        bp.connect(PortRef::external(i + 1), PortRef::external(i));
    }
    bp.connect(PortRef::external(0), PortRef::external(bits));
    bp
}

/// 2-to-4 decoder with enable: `Y(i)` is high iff `EN` and `X0 + 2*X1 == i`.
#[must_use]
pub fn decoder_2x4() -> Blueprint {
    let mut bp = Blueprint::new("2X4BIT_DECODER", 3, 4)
        .with_labels(["X0", "X1", "EN"], ["Y0", "Y1", "Y2", "Y3"]);
    let enable = PortRef::external(2);

    let mut literals = Vec::with_capacity(2);
    for bit in 0..2 {
        let not = bp.add_node("NOT");
        bp.connect(PortRef::external(bit), PortRef::node(not, 0));
        // (low, high) source for this select bit.
        literals.push((PortRef::node(not, 0), PortRef::external(bit)));
    }

    for i in 0..4 {
        let pick = |bit: usize| {
            let (low, high) = literals[bit];
            if (i >> bit) & 1 == 1 { high } else { low }
        };
        let minterm = bp.add_node("AND");
        bp.connect(pick(0), PortRef::node(minterm, 0));
        bp.connect(pick(1), PortRef::node(minterm, 1));
        let gated = bp.add_node("AND");
        bp.connect(PortRef::node(minterm, 0), PortRef::node(gated, 0));
        bp.connect(enable, PortRef::node(gated, 1));
        bp.connect(PortRef::node(gated, 0), PortRef::external(i));
    }
    bp
}

/// Append one full-adder stage. Returns the (sum, carry-out) source ports.
fn add_bit(bp: &mut Blueprint, a: PortRef, b: PortRef, carry: PortRef) -> (PortRef, PortRef) {
    let partial = bp.add_node("XOR");
    let sum = bp.add_node("XOR");
    let generate = bp.add_node("AND");
    let propagate = bp.add_node("AND");
    let carry_out = bp.add_node("OR");

    bp.connect(a, PortRef::node(partial, 0));
    bp.connect(b, PortRef::node(partial, 1));
    bp.connect(PortRef::node(partial, 0), PortRef::node(sum, 0));
    bp.connect(carry, PortRef::node(sum, 1));

    bp.connect(a, PortRef::node(generate, 0));
    bp.connect(b, PortRef::node(generate, 1));
    bp.connect(PortRef::node(partial, 0), PortRef::node(propagate, 0));
    bp.connect(carry, PortRef::node(propagate, 1));

    bp.connect(PortRef::node(generate, 0), PortRef::node(carry_out, 0));
    bp.connect(PortRef::node(propagate, 0), PortRef::node(carry_out, 1));

    (PortRef::node(sum, 0), PortRef::node(carry_out, 0))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Circuit, GateCatalog, validate};

    fn bits_of(value: usize, width: usize) -> Vec<bool> {
        (0..width).map(|i| (value >> i) & 1 == 1).collect()
    }

    #[test]
    fn every_named_blueprint_validates() {
        for name in NAMES {
            let bp = by_name(name, 3).unwrap();
            assert!(
                validate(&bp, GateCatalog::standard()).is_ok(),
                "{} should validate",
                name
            );
        }
        assert!(by_name("flux-capacitor", 1).is_none());
    }

    #[test]
    fn nand_constructions_match_primitives() {
        let not = Circuit::compile(&nand_not(), GateCatalog::standard()).unwrap();
        assert_eq!(not.evaluate(&[false]).unwrap(), vec![true]);
        assert_eq!(not.evaluate(&[true]).unwrap(), vec![false]);

        let and = Circuit::compile(&nand_and(), GateCatalog::standard()).unwrap();
        assert_eq!(and.evaluate(&[true, false]).unwrap(), vec![false]);
        assert_eq!(and.evaluate(&[true, true]).unwrap(), vec![true]);
    }

    #[test]
    fn xor_from_basics_matches_xor() {
        let xor = Circuit::compile(&xor_from_basics(), GateCatalog::standard()).unwrap();
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            assert_eq!(xor.evaluate(&[a, b]).unwrap(), vec![a ^ b]);
        }
    }

    #[test]
    fn full_adder_sums_three_bits() {
        let adder = Circuit::compile(&full_adder(), GateCatalog::standard()).unwrap();
        for v in 0..8 {
            let inputs = bits_of(v, 3);
            let total = inputs.iter().filter(|&&b| b).count();
            assert_eq!(
                adder.evaluate(&inputs).unwrap(),
                vec![total % 2 == 1, total >= 2]
            );
        }
    }

    #[test]
    fn four_bit_ripple_adder_is_exhaustively_correct() {
        let adder = Circuit::compile(&ripple_carry_adder(4), GateCatalog::standard()).unwrap();
        for a in 0..16 {
            for b in 0..16 {
                for c in 0..2 {
                    let mut inputs = bits_of(a, 4);
                    inputs.extend(bits_of(b, 4));
                    inputs.push(c == 1);
                    let sum = a + b + c;
                    assert_eq!(adder.evaluate(&inputs).unwrap(), bits_of(sum, 5));
                }
            }
        }
    }

    #[test]
    fn shift_left_rotates_through_carry() {
        let shift = Circuit::compile(&shift_left(2), GateCatalog::standard()).unwrap();
        // x0=1, x1=0, cin=1 -> y0=cin, y1=x0, cout=x1
        assert_eq!(
            shift.evaluate(&[true, false, true]).unwrap(),
            vec![true, true, false]
        );
    }

    #[test]
    fn four_bit_adder_subtractor_is_exhaustively_correct() {
        let unit = Circuit::compile(&adder_subtractor(4), GateCatalog::standard()).unwrap();
        for a in 0..16 {
            for b in 0..16 {
                for sub in 0..2 {
                    let mut inputs = bits_of(a, 4);
                    inputs.extend(bits_of(b, 4));
                    inputs.push(sub == 1);
                    // Subtraction is a + !b + 1; COUT is set iff a >= b.
                    let expected = if sub == 1 { a + (!b & 0xF) + 1 } else { a + b };
                    assert_eq!(unit.evaluate(&inputs).unwrap(), bits_of(expected, 5));
                }
            }
        }
    }

    #[test]
    fn adder_subtractor_difference_bits() {
        let unit = Circuit::compile(&adder_subtractor(4), GateCatalog::standard()).unwrap();
        let mut inputs = bits_of(5, 4);
        inputs.extend(bits_of(7, 4));
        inputs.push(true);
        // 5 - 7 = -2 = 0b1110, borrow shows as COUT = 0.
        assert_eq!(unit.evaluate(&inputs).unwrap(), bits_of(0b0_1110, 5));
    }

    #[test]
    fn bitwise_matches_gate_per_bit() {
        let catalog = GateCatalog::standard();
        for kind in ["AND", "OR", "XOR", "NAND", "NOR", "XNOR", "NOT", "BUF"] {
            let spec = catalog.get(kind).unwrap();
            let arity = spec.inputs();
            let bp = bitwise(kind, 3).unwrap();
            assert_eq!(bp.num_inputs, arity * 3);
            let circuit = Circuit::compile(&bp, catalog).unwrap();
            for v in 0..(1usize << (arity * 3)) {
                let inputs = bits_of(v, arity * 3);
                let expected: Vec<bool> = (0..3)
                    .map(|i| {
                        let column: Vec<bool> = (0..arity).map(|w| inputs[w * 3 + i]).collect();
                        spec.apply(&column)
                    })
                    .collect();
                assert_eq!(circuit.evaluate(&inputs).unwrap(), expected, "{} {}", kind, v);
            }
        }
    }

    #[test]
    fn bitwise_labels_and_lookup() {
        let and = by_name("bitwise-and", 2).unwrap();
        assert_eq!(and.id, "2BIT_AND");
        assert_eq!(and.input_labels, vec!["A0", "A1", "B0", "B1"]);
        assert_eq!(and.output_labels, vec!["Y0", "Y1"]);
        assert_eq!(by_name("bitwise-nor", 2).unwrap().id, "2BIT_NOR");
        assert!(by_name("bitwise-mux", 2).is_none());
        assert!(bitwise("and", 2).is_none());
    }

    #[test]
    fn shift_right_is_exhaustively_correct() {
        let shift = Circuit::compile(&shift_right(4), GateCatalog::standard()).unwrap();
        for v in 0..32 {
            let inputs = bits_of(v, 5);
            // The five slots rotate right by one: cin enters at the top, x0 leaves as cout.
            let value = v & 0xF;
            let cin = v >> 4;
            let expected = (value >> 1) | (cin << 3) | ((value & 1) << 4);
            assert_eq!(shift.evaluate(&inputs).unwrap(), bits_of(expected, 5));
        }
    }

    #[test]
    fn zero_width_shift_right_passes_carry() {
        let shift = Circuit::compile(&shift_right(0), GateCatalog::standard()).unwrap();
        assert_eq!(shift.evaluate(&[true]).unwrap(), vec![true]);
        assert_eq!(shift.evaluate(&[false]).unwrap(), vec![false]);
    }

    #[test]
    fn decoder_selects_one_line_when_enabled() {
        let decoder = Circuit::compile(&decoder_2x4(), GateCatalog::standard()).unwrap();
        for v in 0..8 {
            let inputs = bits_of(v, 3);
            let select = v & 0b11;
            let enabled = inputs[2];
            let expected: Vec<bool> = (0..4).map(|i| enabled && i == select).collect();
            assert_eq!(decoder.evaluate(&inputs).unwrap(), expected);
        }
    }
}
