//! Resolution of formula identifiers against a host document.
//!
//! A formula tree never resolves identifiers itself; it hands each
//! reference name to an [`ElementResolver`] supplied by the enclosing
//! model and reports what came back.

use sbmlkit_core::{ElementResolver, NamedElement};

use crate::ast::AstNode;
use crate::error::{Error, Result};
use crate::node_type::NodeType;

impl AstNode {
    /// Look up the model entity this reference node points at.
    ///
    /// Valid for `Name`, `Time` and generic `Function` nodes; other
    /// kinds fail with [`Error::WrongNodeKind`]. A reference whose
    /// identifier is not known to the resolver yields `Ok(None)`.
    pub fn referenced_element<'a>(
        &self,
        resolver: &'a dyn ElementResolver,
    ) -> Result<Option<&'a dyn NamedElement>> {
        let ty = self.node_type();
        if !matches!(ty, NodeType::Name | NodeType::Time | NodeType::Function) {
            return Err(Error::WrongNodeKind {
                accessor: "referenced_element",
                actual: ty,
            });
        }
        match self.name()? {
            Some(id) => Ok(resolver.find_named_element(&id)),
            None => Ok(None),
        }
    }

    /// Collect every model entity referenced anywhere in this subtree,
    /// in depth-first order. Identifiers the resolver does not know
    /// are skipped with a warning.
    pub fn find_referenced_elements<'a>(
        &self,
        resolver: &'a dyn ElementResolver,
    ) -> Vec<&'a dyn NamedElement> {
        let mut found = Vec::new();
        self.collect_references(resolver, &mut found);
        found
    }

    fn collect_references<'a>(
        &self,
        resolver: &'a dyn ElementResolver,
        found: &mut Vec<&'a dyn NamedElement>,
    ) {
        let ty = self.node_type();
        if matches!(ty, NodeType::Name | NodeType::Time | NodeType::Function) {
            if let Ok(Some(id)) = self.name() {
                match resolver.find_named_element(&id) {
                    Some(element) => found.push(element),
                    None => log::warn!("formula references unknown identifier {id:?}"),
                }
            }
        }
        for child in self.children() {
            child.collect_references(resolver, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbmlkit_core::{ElementRegistry, ModelElement};

    fn registry(ids: &[&str]) -> ElementRegistry<ModelElement> {
        let mut registry = ElementRegistry::new();
        for id in ids {
            registry.register(ModelElement::new(*id));
        }
        registry
    }

    #[test]
    fn test_referenced_element() {
        let registry = registry(&["k1", "S1"]);
        let node = AstNode::new_name("k1");
        let element = node.referenced_element(&registry).unwrap().unwrap();
        assert_eq!(element.id(), "k1");

        let missing = AstNode::new_name("nope");
        assert!(missing.referenced_element(&registry).unwrap().is_none());
    }

    #[test]
    fn test_referenced_element_wrong_kind() {
        let registry = registry(&["k1"]);
        let node = AstNode::new_integer(3);
        let err = match node.referenced_element(&registry) {
            Ok(_) => panic!("expected WrongNodeKind error"),
            Err(e) => e,
        };
        assert!(matches!(err, Error::WrongNodeKind { .. }));
    }

    #[test]
    fn test_find_referenced_elements_depth_first() {
        let registry = registry(&["k1", "S1", "S2"]);
        let times = AstNode::new(NodeType::Times);
        times.add_child(AstNode::new_name("k1"));
        let plus = AstNode::new(NodeType::Plus);
        plus.add_child(AstNode::new_name("S1"));
        plus.add_child(AstNode::new_name("unknown"));
        plus.add_child(AstNode::new_name("S2"));
        times.add_child(plus);

        let found = times.find_referenced_elements(&registry);
        let ids: Vec<&str> = found.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["k1", "S1", "S2"]);
    }
}
