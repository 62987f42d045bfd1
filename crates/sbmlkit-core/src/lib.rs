//! Host-document surface for sbmlkit.
//!
//! The formula subsystem in `sbmlkit-math` treats the enclosing model
//! document as a collaborator and needs exactly two things from it: a
//! way to resolve an identifier appearing in a formula to a named model
//! entity, and a hook through which tree mutations are reported to the
//! owning document. This crate defines that surface, plus a ready-made
//! [`ElementRegistry`] for hosts and tests.
//!
//! # Example
//!
//! ```
//! use sbmlkit_core::{ElementRegistry, ElementResolver, ModelElement};
//!
//! let mut registry = ElementRegistry::new();
//! registry.register(ModelElement::new("k1").with_name("rate constant"));
//! registry.register(ModelElement::new("S1"));
//!
//! assert!(registry.find_named_element("k1").is_some());
//! assert!(registry.find_named_element("S2").is_none());
//! ```

pub mod element;
pub mod error;
pub mod listener;

pub use element::{is_valid_id, ElementRegistry, ElementResolver, ModelElement, NamedElement};
pub use error::{Error, Result};
pub use listener::{TreeUpdate, TreeUpdateListener};
