//! Formula expression trees for sbmlkit.
//!
//! Every computable quantity of the host model format — kinetic laws,
//! assignment and rate rules, event triggers, constraints, function
//! definitions — is a tree of typed [`AstNode`]s. This crate provides
//! the node model with its typed accessor contracts, an infix formula
//! parser and printer that invert each other, the canonical keyword
//! table shared by both, and the shape predicates downstream tooling
//! relies on.
//!
//! # Example
//!
//! ```
//! use sbmlkit_math::{parse_formula, to_formula, NodeType};
//!
//! let tree = parse_formula("k1 * S1 / (Km + S1)").unwrap();
//! assert_eq!(tree.node_type(), NodeType::Divide);
//! assert!(tree.refers_to("Km"));
//! assert_eq!(to_formula(&tree), "k1*S1/(Km+S1)");
//! ```

pub mod ast;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod node_type;
pub mod parser;
pub mod predicates;
pub mod printer;
pub mod resolve;

pub use ast::AstNode;
pub use error::{Error, Result};
pub use keywords::{canonical_name, keyword_type};
pub use node_type::NodeType;
pub use parser::parse_formula;
pub use printer::to_formula;
