//! # sbmlkit
//!
//! Formula expression trees for systems-biology model interchange.
//!
//! Every computable quantity in a model — kinetic laws, assignment and
//! rate rules, event triggers and delays, constraints, function
//! definitions — is a tree of typed [`AstNode`]s. sbmlkit provides:
//!
//! - the node model with typed accessor contracts (`sbmlkit-math`)
//! - an infix formula parser and printer that invert each other
//! - pattern predicates (`is_log10`, `is_sqrt`, `is_unary_minus`, ...)
//! - the host-document surface: identifier resolution and tree-update
//!   notification (`sbmlkit-core`)
//!
//! ## Quick start
//!
//! ```rust
//! use sbmlkit::prelude::*;
//!
//! let math = parse_formula("Vmax*S1/(Km+S1)").unwrap();
//! assert_eq!(math.node_type(), NodeType::Divide);
//! assert!(math.refers_to("Km"));
//!
//! // Printing re-inserts only the parentheses precedence requires.
//! assert_eq!(to_formula(&math), "Vmax*S1/(Km+S1)");
//! ```
//!
//! ## Resolving identifiers against a model
//!
//! ```rust
//! use sbmlkit::prelude::*;
//!
//! let mut model = ElementRegistry::new();
//! model.register(ModelElement::new("k1"));
//! model.register(ModelElement::new("S1"));
//!
//! let math = parse_formula("k1*S1").unwrap();
//! let referenced = math.find_referenced_elements(&model);
//! assert_eq!(referenced.len(), 2);
//! ```

// Re-export component crates
pub use sbmlkit_core as core;
pub use sbmlkit_math as math;

// ============================================================================
// Convenient re-exports from sbmlkit_core
// ============================================================================

pub use sbmlkit_core::{
    // Identifier resolution
    is_valid_id,
    ElementRegistry,
    ElementResolver,
    // Errors
    Error as CoreError,
    ModelElement,
    NamedElement,
    // Change notification
    TreeUpdate,
    TreeUpdateListener,
};

// ============================================================================
// Convenient re-exports from sbmlkit_math
// ============================================================================

pub use sbmlkit_math::{
    // Keyword table
    canonical_name,
    keyword_type,
    // Parser and printer
    parse_formula,
    to_formula,
    // The tree
    AstNode,
    // Errors
    Error as MathError,
    NodeType,
};

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module containing commonly used types and functions.
///
/// ```rust
/// use sbmlkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{parse_formula, to_formula, AstNode, NodeType};

    pub use crate::{ElementRegistry, ElementResolver, ModelElement, NamedElement};

    pub use crate::{TreeUpdate, TreeUpdateListener};
}
