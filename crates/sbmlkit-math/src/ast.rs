//! Formula tree nodes.
//!
//! An [`AstNode`] is a cheap handle over a reference-counted node
//! record; passing handles around does not copy the tree. Children are
//! exclusively owned by their parent node, the parent link is a weak
//! back-reference used only for upward navigation and never for
//! destruction. `Clone` performs a deep copy of the whole subtree and
//! the copy is detached from any parent or listener.
//!
//! Typed accessors follow a strict contract: an accessor invoked
//! against a node kind outside its valid set reports
//! [`Error::WrongNodeKind`] instead of falling back to a sentinel
//! value, and every child-index operation checks bounds.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use sbmlkit_core::{TreeUpdate, TreeUpdateListener};

use crate::error::{Error, Result};
use crate::keywords;
use crate::node_type::NodeType;

/// Numeric payload of a node, tagged per literal kind so that no field
/// of a previous kind stays reachable after a retype.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Value {
    None,
    Integer(i32),
    Real(f64),
    RealExponent { mantissa: f64, exponent: i32 },
    Rational { numerator: i32, denominator: i32 },
}

impl Value {
    /// The payload a freshly typed node starts with.
    fn fresh(ty: NodeType) -> Value {
        match ty {
            NodeType::Integer => Value::Integer(0),
            NodeType::Real => Value::Real(0.0),
            NodeType::RealExponent => Value::RealExponent {
                mantissa: 0.0,
                exponent: 0,
            },
            NodeType::Rational => Value::Rational {
                numerator: 0,
                denominator: 1,
            },
            _ => Value::None,
        }
    }
}

struct NodeData {
    node_type: NodeType,
    value: Value,
    /// Explicit name override; `None` means the canonical name applies.
    name: Option<String>,
    children: Vec<AstNode>,
    parent: Weak<RefCell<NodeData>>,
    listener: Option<Rc<dyn TreeUpdateListener>>,
}

/// A single typed node of a formula tree.
pub struct AstNode {
    data: Rc<RefCell<NodeData>>,
}

impl AstNode {
    /// Create a standalone node of the given kind with a fresh payload.
    pub fn new(node_type: NodeType) -> AstNode {
        AstNode {
            data: Rc::new(RefCell::new(NodeData {
                node_type,
                value: Value::fresh(node_type),
                name: None,
                children: Vec::new(),
                parent: Weak::new(),
                listener: None,
            })),
        }
    }

    /// Integer literal node.
    pub fn new_integer(value: i32) -> AstNode {
        let node = AstNode::new(NodeType::Integer);
        node.data.borrow_mut().value = Value::Integer(value);
        node
    }

    /// Real literal node.
    pub fn new_real(value: f64) -> AstNode {
        let node = AstNode::new(NodeType::Real);
        node.data.borrow_mut().value = Value::Real(value);
        node
    }

    /// Rational literal node (numerator over denominator).
    pub fn new_rational(numerator: i32, denominator: i32) -> AstNode {
        let node = AstNode::new(NodeType::Rational);
        node.data.borrow_mut().value = Value::Rational {
            numerator,
            denominator,
        };
        node
    }

    /// Literal in scientific notation, kept as mantissa and exponent.
    pub fn new_real_exponent(mantissa: f64, exponent: i32) -> AstNode {
        let node = AstNode::new(NodeType::RealExponent);
        node.data.borrow_mut().value = Value::RealExponent { mantissa, exponent };
        node
    }

    /// Free-identifier reference node.
    pub fn new_name(name: impl Into<String>) -> AstNode {
        let node = AstNode::new(NodeType::Name);
        node.data.borrow_mut().name = Some(name.into());
        node
    }

    /// Generic (user-named) function call node, initially without
    /// arguments.
    pub fn new_function(name: impl Into<String>) -> AstNode {
        let node = AstNode::new(NodeType::Function);
        node.data.borrow_mut().name = Some(name.into());
        node
    }

    /// Another handle to the same underlying node.
    pub(crate) fn share(&self) -> AstNode {
        AstNode {
            data: Rc::clone(&self.data),
        }
    }

    /// True if the two handles refer to the same underlying node.
    pub fn same_node(&self, other: &AstNode) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    // ------------------------------------------------------------------
    // Type
    // ------------------------------------------------------------------

    /// The node's kind discriminant.
    pub fn node_type(&self) -> NodeType {
        self.data.borrow().node_type
    }

    /// Retype the node.
    ///
    /// The numeric payload is reset to a fresh payload for the new
    /// kind. The name override survives only when both the old and the
    /// new kind can hold a name (e.g. `Function` to `Name`); every
    /// other transition clears it.
    pub fn set_type(&self, node_type: NodeType) {
        {
            let mut data = self.data.borrow_mut();
            if !(data.node_type.has_name() && node_type.has_name()) {
                data.name = None;
            }
            data.node_type = node_type;
            data.value = Value::fresh(node_type);
        }
        self.notify(TreeUpdate::TypeChanged);
    }

    // ------------------------------------------------------------------
    // Operator character
    // ------------------------------------------------------------------

    /// The ASCII character of an arithmetic operator node.
    pub fn character(&self) -> Result<char> {
        let data = self.data.borrow();
        data.node_type
            .operator_char()
            .ok_or(Error::WrongNodeKind {
                accessor: "character",
                actual: data.node_type,
            })
    }

    /// Retype the node from an operator character.
    ///
    /// `+ - * / ^` select the matching operator kind; any other
    /// character retypes the node to `Unknown`. A name override
    /// survives the transition, a numeric payload does not.
    pub fn set_character(&self, c: char) {
        {
            let mut data = self.data.borrow_mut();
            data.node_type = NodeType::from_operator_char(c).unwrap_or(NodeType::Unknown);
            data.value = Value::None;
        }
        self.notify(TreeUpdate::TypeChanged);
    }

    // ------------------------------------------------------------------
    // Name
    // ------------------------------------------------------------------

    /// The node's effective name: the explicit override if one is set,
    /// else the canonical keyword for builtin kinds, else `None` for
    /// free kinds (`Name`, `Time`, `Function`, `Unknown`).
    ///
    /// Fails with [`Error::WrongNodeKind`] for operator and numeric
    /// nodes, which cannot hold a name.
    pub fn name(&self) -> Result<Option<String>> {
        let data = self.data.borrow();
        if !data.node_type.has_name() {
            return Err(Error::WrongNodeKind {
                accessor: "name",
                actual: data.node_type,
            });
        }
        if let Some(ref name) = data.name {
            return Ok(Some(name.clone()));
        }
        Ok(keywords::canonical_name(data.node_type).map(str::to_string))
    }

    /// Set an explicit name override.
    ///
    /// A node whose current kind can hold a name keeps its kind and
    /// records the override (so a builtin like `sin` can be renamed
    /// without losing its identity). An `Unknown`, operator or numeric
    /// node is retyped: to `Name` if it has no children, to `Function`
    /// if it has.
    pub fn set_name(&self, name: impl Into<String>) {
        {
            let mut data = self.data.borrow_mut();
            if !data.node_type.has_name() || data.node_type == NodeType::Unknown {
                data.node_type = if data.children.is_empty() {
                    NodeType::Name
                } else {
                    NodeType::Function
                };
                data.value = Value::None;
            }
            data.name = Some(name.into());
        }
        self.notify(TreeUpdate::NameChanged);
    }

    /// Clear the name override. Builtin kinds revert to their
    /// canonical keyword, free kinds to no name at all.
    pub fn unset_name(&self) {
        self.data.borrow_mut().name = None;
        self.notify(TreeUpdate::NameChanged);
    }

    // ------------------------------------------------------------------
    // Numeric payload
    // ------------------------------------------------------------------

    /// The value of an `Integer` node.
    pub fn integer(&self) -> Result<i32> {
        let data = self.data.borrow();
        match data.value {
            Value::Integer(v) => Ok(v),
            _ => Err(Error::WrongNodeKind {
                accessor: "integer",
                actual: data.node_type,
            }),
        }
    }

    /// The real value of any real-valued literal: a `Real` directly,
    /// a `RealExponent` as mantissa times 10^exponent, a `Rational` as
    /// numerator over denominator.
    pub fn real(&self) -> Result<f64> {
        let data = self.data.borrow();
        match data.value {
            Value::Real(v) => Ok(v),
            Value::RealExponent { mantissa, exponent } => Ok(mantissa * 10f64.powi(exponent)),
            Value::Rational {
                numerator,
                denominator,
            } => Ok(f64::from(numerator) / f64::from(denominator)),
            _ => Err(Error::WrongNodeKind {
                accessor: "real",
                actual: data.node_type,
            }),
        }
    }

    /// The mantissa of a `RealExponent` node; for a plain `Real` or a
    /// `Rational` this is the node's real value.
    pub fn mantissa(&self) -> Result<f64> {
        let data = self.data.borrow();
        match data.value {
            Value::Real(v) => Ok(v),
            Value::RealExponent { mantissa, .. } => Ok(mantissa),
            Value::Rational {
                numerator,
                denominator,
            } => Ok(f64::from(numerator) / f64::from(denominator)),
            _ => Err(Error::WrongNodeKind {
                accessor: "mantissa",
                actual: data.node_type,
            }),
        }
    }

    /// The base-10 exponent of a `RealExponent` node. The other
    /// numeric kinds report 0; kinds without a numeric payload fail.
    pub fn exponent(&self) -> Result<i32> {
        let data = self.data.borrow();
        match data.value {
            Value::RealExponent { exponent, .. } => Ok(exponent),
            Value::Integer(_) | Value::Real(_) | Value::Rational { .. } => Ok(0),
            Value::None => Err(Error::WrongNodeKind {
                accessor: "exponent",
                actual: data.node_type,
            }),
        }
    }

    /// The numerator of a `Rational` node.
    pub fn numerator(&self) -> Result<i32> {
        let data = self.data.borrow();
        match data.value {
            Value::Rational { numerator, .. } => Ok(numerator),
            _ => Err(Error::WrongNodeKind {
                accessor: "numerator",
                actual: data.node_type,
            }),
        }
    }

    /// The denominator of a `Rational` node.
    pub fn denominator(&self) -> Result<i32> {
        let data = self.data.borrow();
        match data.value {
            Value::Rational { denominator, .. } => Ok(denominator),
            _ => Err(Error::WrongNodeKind {
                accessor: "denominator",
                actual: data.node_type,
            }),
        }
    }

    fn set_value(&self, node_type: NodeType, value: Value) {
        {
            let mut data = self.data.borrow_mut();
            data.node_type = node_type;
            data.value = value;
            data.name = None;
        }
        self.notify(TreeUpdate::ValueChanged);
    }

    /// Make this an `Integer` node holding `value`.
    pub fn set_integer(&self, value: i32) {
        self.set_value(NodeType::Integer, Value::Integer(value));
    }

    /// Make this a `Real` node holding `value`.
    pub fn set_real(&self, value: f64) {
        self.set_value(NodeType::Real, Value::Real(value));
    }

    /// Make this a `Rational` node holding `numerator/denominator`.
    pub fn set_rational(&self, numerator: i32, denominator: i32) {
        self.set_value(
            NodeType::Rational,
            Value::Rational {
                numerator,
                denominator,
            },
        );
    }

    /// Make this a `RealExponent` node holding mantissa·10^exponent.
    pub fn set_real_exponent(&self, mantissa: f64, exponent: i32) {
        self.set_value(
            NodeType::RealExponent,
            Value::RealExponent { mantissa, exponent },
        );
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.data.borrow().children.len()
    }

    /// True for a node without children.
    pub fn is_leaf(&self) -> bool {
        self.data.borrow().children.is_empty()
    }

    /// Handle to the `i`-th child.
    pub fn child(&self, index: usize) -> Result<AstNode> {
        let data = self.data.borrow();
        data.children
            .get(index)
            .map(AstNode::share)
            .ok_or(Error::IndexOutOfRange {
                index,
                length: data.children.len(),
            })
    }

    /// The first child. Fails on a leaf.
    pub fn left_child(&self) -> Result<AstNode> {
        self.child(0)
    }

    /// The last child; on a single-child node the same as the first.
    /// Fails on a leaf.
    pub fn right_child(&self) -> Result<AstNode> {
        let len = self.child_count();
        if len == 0 {
            return Err(Error::IndexOutOfRange {
                index: 0,
                length: 0,
            });
        }
        self.child(len - 1)
    }

    /// Handles to all direct children, in order.
    pub fn children(&self) -> Vec<AstNode> {
        self.data.borrow().children.iter().map(AstNode::share).collect()
    }

    /// Handle to the owning parent node, if attached.
    pub fn parent(&self) -> Option<AstNode> {
        self.data.borrow().parent.upgrade().map(|data| AstNode { data })
    }

    /// True for a node without a parent.
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Append a child.
    pub fn add_child(&self, child: AstNode) {
        child.data.borrow_mut().parent = Rc::downgrade(&self.data);
        self.data.borrow_mut().children.push(child);
        self.notify(TreeUpdate::ChildAdded);
    }

    /// Insert a child before position `index`; `index` may equal the
    /// current child count to append.
    pub fn insert_child(&self, index: usize, child: AstNode) -> Result<()> {
        let length = self.child_count();
        if index > length {
            return Err(Error::IndexOutOfRange { index, length });
        }
        child.data.borrow_mut().parent = Rc::downgrade(&self.data);
        self.data.borrow_mut().children.insert(index, child);
        self.notify(TreeUpdate::ChildAdded);
        Ok(())
    }

    /// Insert a child at the front.
    pub fn prepend_child(&self, child: AstNode) {
        child.data.borrow_mut().parent = Rc::downgrade(&self.data);
        self.data.borrow_mut().children.insert(0, child);
        self.notify(TreeUpdate::ChildAdded);
    }

    /// Remove and return the `i`-th child, detached from this node.
    pub fn remove_child(&self, index: usize) -> Result<AstNode> {
        let child = {
            let mut data = self.data.borrow_mut();
            if index >= data.children.len() {
                return Err(Error::IndexOutOfRange {
                    index,
                    length: data.children.len(),
                });
            }
            data.children.remove(index)
        };
        child.data.borrow_mut().parent = Weak::new();
        self.notify(TreeUpdate::ChildRemoved);
        Ok(child)
    }

    /// Replace the `i`-th child in place, returning the old child
    /// detached from this node.
    pub fn replace_child(&self, index: usize, child: AstNode) -> Result<AstNode> {
        let length = self.child_count();
        if index >= length {
            return Err(Error::IndexOutOfRange { index, length });
        }
        child.data.borrow_mut().parent = Rc::downgrade(&self.data);
        let old = std::mem::replace(&mut self.data.borrow_mut().children[index], child);
        old.data.borrow_mut().parent = Weak::new();
        self.notify(TreeUpdate::ChildReplaced);
        Ok(old)
    }

    /// Exchange the entire child sequences of two nodes, reparenting
    /// every moved child. Swapping a node with itself is a no-op.
    pub fn swap_children(&self, other: &AstNode) {
        if Rc::ptr_eq(&self.data, &other.data) {
            return;
        }
        let mine = std::mem::take(&mut self.data.borrow_mut().children);
        let theirs = std::mem::take(&mut other.data.borrow_mut().children);
        for child in &mine {
            child.data.borrow_mut().parent = Rc::downgrade(&other.data);
        }
        for child in &theirs {
            child.data.borrow_mut().parent = Rc::downgrade(&self.data);
        }
        self.data.borrow_mut().children = theirs;
        other.data.borrow_mut().children = mine;
        self.notify(TreeUpdate::ChildrenSwapped);
    }

    // ------------------------------------------------------------------
    // Change notification
    // ------------------------------------------------------------------

    /// Install the tree-update hook at this node. Mutations anywhere
    /// in the subtree rooted here report to it, one event each.
    pub fn set_update_listener(&self, listener: Rc<dyn TreeUpdateListener>) {
        self.data.borrow_mut().listener = Some(listener);
    }

    /// Remove the tree-update hook from this node.
    pub fn clear_update_listener(&self) {
        self.data.borrow_mut().listener = None;
    }

    /// Report one mutation to the listener at the root of the tree
    /// this node currently belongs to.
    fn notify(&self, update: TreeUpdate) {
        let mut node = self.share();
        loop {
            let parent = node.data.borrow().parent.upgrade();
            match parent {
                Some(data) => node = AstNode { data },
                None => break,
            }
        }
        let listener = node.data.borrow().listener.clone();
        if let Some(listener) = listener {
            listener.tree_updated(update);
        }
    }
}

impl Default for AstNode {
    fn default() -> Self {
        AstNode::new(NodeType::Unknown)
    }
}

/// Structural equality: same kind, same effective payload (resolved
/// name for name-capable kinds, numeric value per literal kind), and
/// children pairwise equal in order.
impl PartialEq for AstNode {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        let a = self.data.borrow();
        let b = other.data.borrow();
        if a.node_type != b.node_type || a.value != b.value {
            return false;
        }
        if a.node_type.has_name() {
            let resolved_a = a
                .name
                .as_deref()
                .or_else(|| keywords::canonical_name(a.node_type));
            let resolved_b = b
                .name
                .as_deref()
                .or_else(|| keywords::canonical_name(b.node_type));
            if resolved_a != resolved_b {
                return false;
            }
        }
        a.children == b.children
    }
}

/// Deep copy: the returned tree is structurally equal to the source
/// but shares no nodes with it, has no parent and no listener.
impl Clone for AstNode {
    fn clone(&self) -> Self {
        let data = self.data.borrow();
        let copy = AstNode::new(data.node_type);
        {
            let mut copy_data = copy.data.borrow_mut();
            copy_data.value = data.value;
            copy_data.name = data.name.clone();
        }
        for child in &data.children {
            let child_copy = child.clone();
            child_copy.data.borrow_mut().parent = Rc::downgrade(&copy.data);
            copy.data.borrow_mut().children.push(child_copy);
        }
        copy
    }
}

impl fmt::Debug for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        f.debug_struct("AstNode")
            .field("node_type", &data.node_type)
            .field("value", &data.value)
            .field("name", &data.name)
            .field("children", &data.children)
            .finish()
    }
}
