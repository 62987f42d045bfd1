//! The closed taxonomy of formula node kinds.

use std::fmt;

use crate::keywords;

/// Kind discriminant of a formula tree node.
///
/// Every computable quantity of the host format is a tree of nodes
/// tagged with one of these kinds. The set is closed: builtin
/// functions each get a dedicated variant so that the canonical-name
/// table and the parser's keyword recognition stay total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
    // Literals
    Integer,
    Real,
    /// Real value split into a mantissa and a base-10 exponent.
    RealExponent,
    /// Integer fraction: numerator over denominator.
    Rational,

    // References
    /// Free identifier, resolved against the host model.
    Name,
    /// The builtin "time" symbol.
    Time,

    // Constants
    ConstantE,
    ConstantPi,
    ConstantTrue,
    ConstantFalse,

    // Arithmetic operators
    Plus,
    Minus,
    Times,
    Divide,
    Power,

    // Logical operators
    And,
    Or,
    Not,
    Xor,

    // Relational operators
    Eq,
    Geq,
    Gt,
    Leq,
    Lt,
    Neq,

    // Functions
    /// Call of a user-defined function; the name is the override.
    Function,
    Lambda,
    Abs,
    ArcCos,
    ArcCosh,
    ArcCot,
    ArcCoth,
    ArcCsc,
    ArcCsch,
    ArcSec,
    ArcSech,
    ArcSin,
    ArcSinh,
    ArcTan,
    ArcTanh,
    Ceiling,
    Cos,
    Cosh,
    Cot,
    Coth,
    Csc,
    Csch,
    Delay,
    Exp,
    Factorial,
    Floor,
    Ln,
    Log,
    Piecewise,
    Pow,
    Root,
    Sec,
    Sech,
    Sin,
    Sinh,
    Tan,
    Tanh,

    #[default]
    Unknown,
}

impl NodeType {
    /// True for the five arithmetic operator kinds (`+ - * / ^`).
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            NodeType::Plus | NodeType::Minus | NodeType::Times | NodeType::Divide | NodeType::Power
        )
    }

    /// True for numeric literal kinds.
    pub fn is_number(self) -> bool {
        matches!(
            self,
            NodeType::Integer | NodeType::Real | NodeType::RealExponent | NodeType::Rational
        )
    }

    /// True for identifier-reference kinds.
    pub fn is_reference(self) -> bool {
        matches!(self, NodeType::Name | NodeType::Time)
    }

    /// True for the builtin constants.
    pub fn is_constant(self) -> bool {
        matches!(
            self,
            NodeType::ConstantE
                | NodeType::ConstantPi
                | NodeType::ConstantTrue
                | NodeType::ConstantFalse
        )
    }

    /// True for `and`, `or`, `not`, `xor`.
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            NodeType::And | NodeType::Or | NodeType::Not | NodeType::Xor
        )
    }

    /// True for the six relational kinds.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            NodeType::Eq | NodeType::Geq | NodeType::Gt | NodeType::Leq | NodeType::Lt | NodeType::Neq
        )
    }

    /// True for the fixed catalogue of builtin functions (not the
    /// generic [`NodeType::Function`] and not [`NodeType::Lambda`]).
    pub fn is_builtin_function(self) -> bool {
        matches!(
            self,
            NodeType::Abs
                | NodeType::ArcCos
                | NodeType::ArcCosh
                | NodeType::ArcCot
                | NodeType::ArcCoth
                | NodeType::ArcCsc
                | NodeType::ArcCsch
                | NodeType::ArcSec
                | NodeType::ArcSech
                | NodeType::ArcSin
                | NodeType::ArcSinh
                | NodeType::ArcTan
                | NodeType::ArcTanh
                | NodeType::Ceiling
                | NodeType::Cos
                | NodeType::Cosh
                | NodeType::Cot
                | NodeType::Coth
                | NodeType::Csc
                | NodeType::Csch
                | NodeType::Delay
                | NodeType::Exp
                | NodeType::Factorial
                | NodeType::Floor
                | NodeType::Ln
                | NodeType::Log
                | NodeType::Piecewise
                | NodeType::Pow
                | NodeType::Root
                | NodeType::Sec
                | NodeType::Sech
                | NodeType::Sin
                | NodeType::Sinh
                | NodeType::Tan
                | NodeType::Tanh
        )
    }

    /// True for builtin function kinds and generic function calls.
    pub fn is_function(self) -> bool {
        self == NodeType::Function || self.is_builtin_function()
    }

    /// True when a textual name is meaningful for this kind: everything
    /// except arithmetic operators and numeric literals.
    pub fn has_name(self) -> bool {
        !self.is_operator() && !self.is_number()
    }

    /// The single-character form of an arithmetic operator kind.
    pub fn operator_char(self) -> Option<char> {
        match self {
            NodeType::Plus => Some('+'),
            NodeType::Minus => Some('-'),
            NodeType::Times => Some('*'),
            NodeType::Divide => Some('/'),
            NodeType::Power => Some('^'),
            _ => None,
        }
    }

    /// The operator kind denoted by an ASCII operator character.
    pub fn from_operator_char(c: char) -> Option<NodeType> {
        match c {
            '+' => Some(NodeType::Plus),
            '-' => Some(NodeType::Minus),
            '*' => Some(NodeType::Times),
            '/' => Some(NodeType::Divide),
            '^' => Some(NodeType::Power),
            _ => None,
        }
    }

    /// Structural label used in diagnostics. Builtins display their
    /// canonical keyword; other kinds get a lowercase word.
    fn label(self) -> &'static str {
        if let Some(keyword) = keywords::canonical_name(self) {
            return keyword;
        }
        match self {
            NodeType::Integer => "integer",
            NodeType::Real => "real",
            NodeType::RealExponent => "e-notation",
            NodeType::Rational => "rational",
            NodeType::Name => "name",
            NodeType::Time => "time",
            NodeType::Function => "function",
            NodeType::Plus => "plus",
            NodeType::Minus => "minus",
            NodeType::Times => "times",
            NodeType::Divide => "divide",
            NodeType::Power => "power",
            _ => "unknown",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
