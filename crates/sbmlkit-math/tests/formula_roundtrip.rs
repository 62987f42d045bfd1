//! Parser/printer inversion tests.
//!
//! For every tree the parser can produce, printing it and parsing the
//! output must yield a structurally equal tree, and the printed text
//! must be stable under a second round trip.

use sbmlkit_math::{parse_formula, to_formula, NodeType};

const FORMULAS: &[&str] = &[
    // Leaves
    "k1",
    "42",
    "2.5",
    "12.3e3",
    "1e-12",
    "true",
    "false",
    "pi",
    "exponentiale",
    "time",
    // Arithmetic
    "a+b*c",
    "(a+b)*c",
    "a-b-c",
    "a/b/c",
    "a-(b-c)",
    "a+b+c+d",
    "a*b*c",
    "a+b-c",
    "a-b+c",
    "a+(b-c)",
    "x*(y/z)",
    "a^b^c",
    "(a^b)^c",
    "-x",
    "-x^2",
    "2^-3",
    "-(a+b)",
    "a*-b",
    // Logical and relational
    "a and b and c",
    "and(a, b, c)",
    "a or b or c",
    "a xor b",
    "a or (b xor c)",
    "a and (b and c)",
    "a && b || c",
    "not(p)",
    "not(and(p, q))",
    "x >= 2",
    "x < 2 and y > 3",
    "a + b <= c * d",
    "eq(x, y)",
    "neq(x, y)",
    // Calls
    "abs(x)",
    "sin(2*pi*time)",
    "log(10, x)",
    "root(2, x)",
    "ln(x)",
    "delay(S1, 0.5)",
    "tanh(x/2)",
    "piecewise(0, lt(x, 0), x)",
    "lambda(x, y, x + y)",
    "michaelis(S, Km, Vmax)",
    // Kinetic-law shapes
    "k1*S1*compartment/(Km+S1)",
    "Vmax*S1/(Km+S1) - k2*P",
    "kf*A*B - kr*C",
];

#[test]
fn round_trip_preserves_structure() {
    for formula in FORMULAS {
        let tree = parse_formula(formula).unwrap_or_else(|e| panic!("{formula}: {e}"));
        let printed = to_formula(&tree);
        let reparsed =
            parse_formula(&printed).unwrap_or_else(|e| panic!("{formula} -> {printed}: {e}"));
        assert_eq!(reparsed, tree, "{formula} -> {printed}");
    }
}

#[test]
fn printed_text_is_stable() {
    for formula in FORMULAS {
        let printed = to_formula(&parse_formula(formula).unwrap());
        let again = to_formula(&parse_formula(&printed).unwrap());
        assert_eq!(again, printed, "{formula}");
    }
}

#[test]
fn canonical_spacing() {
    // Arithmetic unspaced, word operators spaced, relational spaced.
    assert_eq!(to_formula(&parse_formula("a + b").unwrap()), "a+b");
    assert_eq!(to_formula(&parse_formula("a  and  b").unwrap()), "a and b");
    assert_eq!(to_formula(&parse_formula("a<=b").unwrap()), "a <= b");
    assert_eq!(to_formula(&parse_formula("f( x,y )").unwrap()), "f(x, y)");
}

#[test]
fn symbolic_logical_forms_normalize_to_words() {
    assert_eq!(to_formula(&parse_formula("a && b").unwrap()), "a and b");
    assert_eq!(to_formula(&parse_formula("a || b").unwrap()), "a or b");
    assert_eq!(to_formula(&parse_formula("a = b").unwrap()), "a == b");
}

#[test]
fn scientific_notation_survives_the_round_trip() {
    let tree = parse_formula("1.5e-3").unwrap();
    assert_eq!(tree.node_type(), NodeType::RealExponent);
    assert_eq!(tree.mantissa().unwrap(), 1.5);
    assert_eq!(tree.exponent().unwrap(), -3);

    let reparsed = parse_formula(&to_formula(&tree)).unwrap();
    assert_eq!(reparsed.node_type(), NodeType::RealExponent);
    assert_eq!(reparsed, tree);
}

#[test]
fn redundant_parens_are_dropped() {
    assert_eq!(to_formula(&parse_formula("(a)").unwrap()), "a");
    // The leading chain flattens, so the group dissolves into it.
    assert_eq!(to_formula(&parse_formula("((a+b))+c").unwrap()), "a+b+c");
    assert_eq!(to_formula(&parse_formula("(a*b)*c").unwrap()), "a*b*c");
    assert_eq!(to_formula(&parse_formula("(sin(x))").unwrap()), "sin(x)");
}

#[test]
fn required_parens_are_kept() {
    assert_eq!(to_formula(&parse_formula("(a+b)*c").unwrap()), "(a+b)*c");
    assert_eq!(to_formula(&parse_formula("a-(b-c)").unwrap()), "a-(b-c)");
    assert_eq!(to_formula(&parse_formula("(a^b)^c").unwrap()), "(a^b)^c");
    assert_eq!(to_formula(&parse_formula("(a or b) and c").unwrap()), "(a or b) and c");
    // A trailing parenthesized group stays a nested node.
    assert_eq!(to_formula(&parse_formula("a and (b and c)").unwrap()), "a and (b and c)");
}
