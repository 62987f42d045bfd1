//! Infix formula printer.
//!
//! Walks a tree and renders canonical infix text, inserting
//! parentheses only where an operand's precedence requires them.
//! N-ary chains of the associative operators render flat
//! (`a and b and d`, never `a and (b and d)`), so printing inverts the
//! parser for every tree the parser can produce.

use std::fmt;
use std::fmt::Write;

use crate::ast::AstNode;
use crate::node_type::NodeType;

/// Render a tree as canonical infix text.
pub fn to_formula(node: &AstNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_formula(self))
    }
}

/// Binding strength used for the parenthesization decision. Mirrors
/// the parser's precedence ladder; leaves and calls never need parens.
fn precedence(node: &AstNode) -> u8 {
    match node.node_type() {
        NodeType::Or | NodeType::Xor => 1,
        NodeType::And => 2,
        NodeType::Eq
        | NodeType::Neq
        | NodeType::Lt
        | NodeType::Leq
        | NodeType::Gt
        | NodeType::Geq => 3,
        NodeType::Plus => 4,
        NodeType::Minus => {
            if node.is_unary_minus() {
                6
            } else {
                4
            }
        }
        NodeType::Times | NodeType::Divide => 5,
        NodeType::Power => 7,
        _ => 8,
    }
}

fn write_node(node: &AstNode, out: &mut String) {
    let ty = node.node_type();
    match ty {
        NodeType::Integer => {
            if let Ok(value) = node.integer() {
                let _ = write!(out, "{value}");
            }
        }
        NodeType::Real => {
            if let Ok(value) = node.real() {
                let _ = write!(out, "{value:?}");
            }
        }
        NodeType::RealExponent => {
            if let (Ok(mantissa), Ok(exponent)) = (node.mantissa(), node.exponent()) {
                let _ = write!(out, "{mantissa:?}e{exponent}");
            }
        }
        NodeType::Rational => {
            if let (Ok(numerator), Ok(denominator)) = (node.numerator(), node.denominator()) {
                write_rational_half(numerator, out);
                out.push('/');
                write_rational_half(denominator, out);
            }
        }
        NodeType::Name | NodeType::Function => {
            let name = effective_name(node).unwrap_or_else(|| "unknown".into());
            if ty == NodeType::Function {
                write_call(node, &name, out);
            } else {
                out.push_str(&name);
            }
        }
        NodeType::Time => {
            let name = effective_name(node).unwrap_or_else(|| "time".into());
            out.push_str(&name);
        }
        NodeType::ConstantE
        | NodeType::ConstantPi
        | NodeType::ConstantTrue
        | NodeType::ConstantFalse => {
            let name = effective_name(node).unwrap_or_default();
            out.push_str(&name);
        }
        NodeType::Plus => write_chain(node, "+", out),
        NodeType::Times => write_chain(node, "*", out),
        NodeType::And => write_chain(node, " and ", out),
        NodeType::Or => write_chain(node, " or ", out),
        NodeType::Xor => write_chain(node, " xor ", out),
        NodeType::Minus => {
            if node.is_unary_minus() {
                out.push('-');
                if let Ok(operand) = node.child(0) {
                    write_operand(&operand, 6, out);
                }
            } else {
                write_chain(node, "-", out);
            }
        }
        NodeType::Divide => write_chain(node, "/", out),
        NodeType::Power => write_power(node, out),
        NodeType::Eq => write_relational(node, " == ", out),
        NodeType::Neq => write_relational(node, " != ", out),
        NodeType::Lt => write_relational(node, " < ", out),
        NodeType::Leq => write_relational(node, " <= ", out),
        NodeType::Gt => write_relational(node, " > ", out),
        NodeType::Geq => write_relational(node, " >= ", out),
        NodeType::Unknown => out.push('?'),
        // Remaining kinds are the named calls: lambda, not, and the
        // builtin function catalogue.
        _ => {
            let name = effective_name(node).unwrap_or_default();
            write_call(node, &name, out);
        }
    }
}

/// The name the printer uses for a name-capable node: the explicit
/// override if set, else the canonical keyword.
fn effective_name(node: &AstNode) -> Option<String> {
    node.name().ok().flatten()
}

fn write_rational_half(value: i32, out: &mut String) {
    if value < 0 {
        let _ = write!(out, "({value})");
    } else {
        let _ = write!(out, "{value}");
    }
}

fn write_operand(child: &AstNode, min_precedence: u8, out: &mut String) {
    if precedence(child) < min_precedence {
        out.push('(');
        write_node(child, out);
        out.push(')');
    } else {
        write_node(child, out);
    }
}

/// Operator chain, rendered flat across the node's own children:
/// `a and b and d`, never `a and (b and d)`. The first operand may
/// share the operator's precedence (the parse nests left); every
/// later operand must bind strictly tighter. A nested node of equal
/// precedence can only come from an explicitly parenthesized subgroup
/// or manual tree building, and keeps its parens either way.
fn write_chain(node: &AstNode, separator: &str, out: &mut String) {
    let prec = precedence(node);
    for (i, child) in node.children().iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
            write_operand(child, prec + 1, out);
        } else {
            write_operand(child, prec, out);
        }
    }
}

/// Relational operands never contain a bare relational: comparisons do
/// not chain in the grammar, so both sides must bind tighter.
fn write_relational(node: &AstNode, separator: &str, out: &mut String) {
    let prec = precedence(node);
    for (i, child) in node.children().iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        write_operand(child, prec + 1, out);
    }
}

/// `^` is right-associative: the base must bind strictly tighter, the
/// exponent may be another power.
fn write_power(node: &AstNode, out: &mut String) {
    let prec = precedence(node);
    for (i, child) in node.children().iter().enumerate() {
        if i > 0 {
            out.push('^');
            write_operand(child, prec, out);
        } else {
            write_operand(child, prec + 1, out);
        }
    }
}

fn write_call(node: &AstNode, name: &str, out: &mut String) {
    out.push_str(name);
    out.push('(');
    for (i, child) in node.children().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_node(child, out);
    }
    out.push(')');
}
