//! Tree-update notification hook.
//!
//! A host document that wants to observe formula mutations installs a
//! [`TreeUpdateListener`] at the root of a tree. Mutating operations
//! report exactly one [`TreeUpdate`] each, synchronously after the
//! mutation has been applied. This crate only defines the hook; wiring
//! it to a wider event bus is the host's concern.

/// The kind of mutation that was applied to a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeUpdate {
    /// A child was appended or inserted.
    ChildAdded,
    /// A child was removed.
    ChildRemoved,
    /// A child was replaced in place.
    ChildReplaced,
    /// Two nodes exchanged their child sequences.
    ChildrenSwapped,
    /// The node's type discriminant changed.
    TypeChanged,
    /// The node's numeric value changed.
    ValueChanged,
    /// The node's name override changed.
    NameChanged,
}

/// Receiver for tree mutations.
pub trait TreeUpdateListener {
    /// Called once per externally observable mutation, after it commits.
    fn tree_updated(&self, update: TreeUpdate);
}
