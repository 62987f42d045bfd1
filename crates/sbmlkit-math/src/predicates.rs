//! Shape and category predicates over formula trees.
//!
//! Category checks lift the pure [`NodeType`] predicates onto nodes;
//! the shape recognizers (`is_log10`, `is_sqrt`, `is_unary_minus`) are
//! the patterns downstream tooling keys on when deciding how to render
//! or simplify a subtree.

use crate::ast::AstNode;
use crate::node_type::NodeType;

impl AstNode {
    /// True for `+ - * / ^` nodes.
    pub fn is_operator(&self) -> bool {
        self.node_type().is_operator()
    }

    /// True for numeric literal nodes of any kind.
    pub fn is_number(&self) -> bool {
        self.node_type().is_number()
    }

    /// True for an `Integer` literal.
    pub fn is_integer(&self) -> bool {
        self.node_type() == NodeType::Integer
    }

    /// True for any real-valued literal (`Real`, `RealExponent`,
    /// `Rational`).
    pub fn is_real(&self) -> bool {
        matches!(
            self.node_type(),
            NodeType::Real | NodeType::RealExponent | NodeType::Rational
        )
    }

    /// True for a `Rational` literal.
    pub fn is_rational(&self) -> bool {
        self.node_type() == NodeType::Rational
    }

    /// True for identifier references (`Name` and the `time` symbol).
    pub fn is_name(&self) -> bool {
        self.node_type().is_reference()
    }

    /// True for the builtin constants.
    pub fn is_constant(&self) -> bool {
        self.node_type().is_constant()
    }

    /// True for `and`, `or`, `not`, `xor` nodes.
    pub fn is_logical(&self) -> bool {
        self.node_type().is_logical()
    }

    /// True for relational nodes.
    pub fn is_relational(&self) -> bool {
        self.node_type().is_relational()
    }

    /// True for builtin and generic function call nodes.
    pub fn is_function(&self) -> bool {
        self.node_type().is_function()
    }

    /// True for a `Lambda` node.
    pub fn is_lambda(&self) -> bool {
        self.node_type() == NodeType::Lambda
    }

    /// True for nodes whose value is boolean: logical and relational
    /// connectives and the two truth constants.
    pub fn is_boolean(&self) -> bool {
        let ty = self.node_type();
        ty.is_logical()
            || ty.is_relational()
            || ty == NodeType::ConstantTrue
            || ty == NodeType::ConstantFalse
    }

    /// True for the default/empty kind.
    pub fn is_unknown(&self) -> bool {
        self.node_type() == NodeType::Unknown
    }

    /// True for a node with exactly one child.
    pub fn is_unary(&self) -> bool {
        self.child_count() == 1
    }

    /// True for a `Minus` node with exactly one child.
    pub fn is_unary_minus(&self) -> bool {
        self.node_type() == NodeType::Minus && self.child_count() == 1
    }

    /// True for a `log` call whose explicit base argument is the
    /// integer literal 10 (i.e. `log(10, x)`).
    pub fn is_log10(&self) -> bool {
        self.node_type() == NodeType::Log
            && self.child_count() == 2
            && first_child_is_integer(self, 10)
    }

    /// True for a `root` call whose explicit degree argument is the
    /// integer literal 2 (i.e. `root(2, x)`).
    pub fn is_sqrt(&self) -> bool {
        self.node_type() == NodeType::Root
            && self.child_count() == 2
            && first_child_is_integer(self, 2)
    }

    /// The numeric value of a literal node, if it is one.
    fn literal_value(&self) -> Option<f64> {
        if self.is_integer() {
            return self.integer().ok().map(f64::from);
        }
        if self.is_real() {
            return self.real().ok();
        }
        None
    }

    /// True for a literal equal to zero.
    pub fn is_zero(&self) -> bool {
        self.literal_value() == Some(0.0)
    }

    /// True for a literal equal to one.
    pub fn is_one(&self) -> bool {
        self.literal_value() == Some(1.0)
    }

    /// True for a literal equal to minus one, or a unary minus wrapped
    /// around a literal one.
    pub fn is_minus_one(&self) -> bool {
        if self.is_unary_minus() {
            return self.child(0).map(|c| c.is_one()).unwrap_or(false);
        }
        self.literal_value() == Some(-1.0)
    }

    /// True if any reference node in this subtree carries the given
    /// identifier.
    pub fn refers_to(&self, id: &str) -> bool {
        let ty = self.node_type();
        if matches!(ty, NodeType::Name | NodeType::Time | NodeType::Function) {
            if let Ok(Some(name)) = self.name() {
                if name == id {
                    return true;
                }
            }
        }
        self.children().iter().any(|child| child.refers_to(id))
    }
}

fn first_child_is_integer(node: &AstNode, value: i32) -> bool {
    node.child(0)
        .map(|c| c.is_integer() && c.integer() == Ok(value))
        .unwrap_or(false)
}
