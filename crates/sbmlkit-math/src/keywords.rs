//! Canonical keyword table for builtin node kinds.
//!
//! Maps each builtin [`NodeType`] to the text name used by both the
//! formula printer and the name accessor, and back. The table is pure
//! data: round-trip correctness of the parser/printer pair depends on
//! it, so it is tested on its own, independent of tree mutation.

use crate::node_type::NodeType;

/// The keyword associated with a builtin kind, if it has one.
///
/// `Name`, `Time` and generic `Function` nodes carry their own text
/// and return `None` here, as do operators, literals and `Unknown`.
pub fn canonical_name(ty: NodeType) -> Option<&'static str> {
    let keyword = match ty {
        NodeType::ConstantE => "exponentiale",
        NodeType::ConstantPi => "pi",
        NodeType::ConstantTrue => "true",
        NodeType::ConstantFalse => "false",

        NodeType::And => "and",
        NodeType::Or => "or",
        NodeType::Not => "not",
        NodeType::Xor => "xor",

        NodeType::Eq => "eq",
        NodeType::Geq => "geq",
        NodeType::Gt => "gt",
        NodeType::Leq => "leq",
        NodeType::Lt => "lt",
        NodeType::Neq => "neq",

        NodeType::Lambda => "lambda",

        NodeType::Abs => "abs",
        NodeType::ArcCos => "arccos",
        NodeType::ArcCosh => "arccosh",
        NodeType::ArcCot => "arccot",
        NodeType::ArcCoth => "arccoth",
        NodeType::ArcCsc => "arccsc",
        NodeType::ArcCsch => "arccsch",
        NodeType::ArcSec => "arcsec",
        NodeType::ArcSech => "arcsech",
        NodeType::ArcSin => "arcsin",
        NodeType::ArcSinh => "arcsinh",
        NodeType::ArcTan => "arctan",
        NodeType::ArcTanh => "arctanh",
        NodeType::Ceiling => "ceiling",
        NodeType::Cos => "cos",
        NodeType::Cosh => "cosh",
        NodeType::Cot => "cot",
        NodeType::Coth => "coth",
        NodeType::Csc => "csc",
        NodeType::Csch => "csch",
        NodeType::Delay => "delay",
        NodeType::Exp => "exp",
        NodeType::Factorial => "factorial",
        NodeType::Floor => "floor",
        NodeType::Ln => "ln",
        NodeType::Log => "log",
        NodeType::Piecewise => "piecewise",
        NodeType::Pow => "pow",
        NodeType::Root => "root",
        NodeType::Sec => "sec",
        NodeType::Sech => "sech",
        NodeType::Sin => "sin",
        NodeType::Sinh => "sinh",
        NodeType::Tan => "tan",
        NodeType::Tanh => "tanh",

        _ => return None,
    };
    Some(keyword)
}

/// Reverse lookup: the builtin kind denoted by a keyword.
///
/// Drives the parser's recognition of builtin calls and constants.
/// Identifiers outside the table are free names or generic functions.
pub fn keyword_type(keyword: &str) -> Option<NodeType> {
    let ty = match keyword {
        "exponentiale" => NodeType::ConstantE,
        "pi" => NodeType::ConstantPi,
        "true" => NodeType::ConstantTrue,
        "false" => NodeType::ConstantFalse,

        "and" => NodeType::And,
        "or" => NodeType::Or,
        "not" => NodeType::Not,
        "xor" => NodeType::Xor,

        "eq" => NodeType::Eq,
        "geq" => NodeType::Geq,
        "gt" => NodeType::Gt,
        "leq" => NodeType::Leq,
        "lt" => NodeType::Lt,
        "neq" => NodeType::Neq,

        "lambda" => NodeType::Lambda,

        "abs" => NodeType::Abs,
        "arccos" => NodeType::ArcCos,
        "arccosh" => NodeType::ArcCosh,
        "arccot" => NodeType::ArcCot,
        "arccoth" => NodeType::ArcCoth,
        "arccsc" => NodeType::ArcCsc,
        "arccsch" => NodeType::ArcCsch,
        "arcsec" => NodeType::ArcSec,
        "arcsech" => NodeType::ArcSech,
        "arcsin" => NodeType::ArcSin,
        "arcsinh" => NodeType::ArcSinh,
        "arctan" => NodeType::ArcTan,
        "arctanh" => NodeType::ArcTanh,
        "ceiling" => NodeType::Ceiling,
        "cos" => NodeType::Cos,
        "cosh" => NodeType::Cosh,
        "cot" => NodeType::Cot,
        "coth" => NodeType::Coth,
        "csc" => NodeType::Csc,
        "csch" => NodeType::Csch,
        "delay" => NodeType::Delay,
        "exp" => NodeType::Exp,
        "factorial" => NodeType::Factorial,
        "floor" => NodeType::Floor,
        "ln" => NodeType::Ln,
        "log" => NodeType::Log,
        "piecewise" => NodeType::Piecewise,
        "pow" => NodeType::Pow,
        "root" => NodeType::Root,
        "sec" => NodeType::Sec,
        "sech" => NodeType::Sech,
        "sin" => NodeType::Sin,
        "sinh" => NodeType::Sinh,
        "tan" => NodeType::Tan,
        "tanh" => NodeType::Tanh,

        _ => return None,
    };
    Some(ty)
}
