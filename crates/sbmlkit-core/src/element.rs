//! Named model entities and identifier resolution.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// An identifiable entity of the host model, the target of "get the
/// referenced object" lookups from formula trees.
pub trait NamedElement {
    /// The identifier referenced from formulas.
    fn id(&self) -> &str;

    /// Optional human-readable name.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// Maps an identifier appearing in a formula to the model entity it
/// references. Formula trees never resolve identifiers themselves.
pub trait ElementResolver {
    /// Look up an entity by id.
    fn find_named_element(&self, id: &str) -> Option<&dyn NamedElement>;
}

/// Check an identifier against the host format's id syntax:
/// a letter or underscore followed by letters, digits or underscores.
pub fn is_valid_id(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A minimal named entity, sufficient for hosts that only need id
/// resolution (and for tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelElement {
    id: String,
    name: Option<String>,
}

impl ModelElement {
    /// Create an element with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    /// Attach a human-readable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validate the element's id against the host id syntax.
    pub fn check_id(&self) -> Result<()> {
        if is_valid_id(&self.id) {
            Ok(())
        } else {
            Err(Error::InvalidIdentifier(self.id.clone()))
        }
    }
}

impl NamedElement for ModelElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Insertion-ordered id-to-entity registry implementing
/// [`ElementResolver`]. Iteration yields entities in document order.
#[derive(Debug, Default)]
pub struct ElementRegistry<E> {
    entries: IndexMap<String, E>,
}

impl<E: NamedElement> ElementRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Register an entity under its id. Re-registering an id replaces
    /// the previous entry and returns it.
    pub fn register(&mut self, element: E) -> Option<E> {
        let id = element.id().to_string();
        let previous = self.entries.insert(id, element);
        if let Some(ref old) = previous {
            log::warn!("replacing previously registered element {:?}", old.id());
        }
        previous
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.values()
    }
}

impl<E: NamedElement> ElementResolver for ElementRegistry<E> {
    fn find_named_element(&self, id: &str) -> Option<&dyn NamedElement> {
        self.entries.get(id).map(|e| e as &dyn NamedElement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert!(is_valid_id("k1"));
        assert!(is_valid_id("_x"));
        assert!(is_valid_id("S1_boundary"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("1k"));
        assert!(!is_valid_id("a-b"));
        assert!(!is_valid_id("a b"));
    }

    #[test]
    fn test_check_id() {
        assert!(ModelElement::new("k1").check_id().is_ok());
        let err = ModelElement::new("2fast").check_id().unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier(_)));
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = ElementRegistry::new();
        registry.register(ModelElement::new("k1"));
        registry.register(ModelElement::new("S1").with_name("substrate"));

        let found = registry.find_named_element("S1").unwrap();
        assert_eq!(found.id(), "S1");
        assert_eq!(found.name(), Some("substrate"));
        assert!(registry.find_named_element("missing").is_none());
    }

    #[test]
    fn test_registry_preserves_order() {
        let mut registry = ElementRegistry::new();
        for id in ["c", "a", "b"] {
            registry.register(ModelElement::new(id));
        }
        let ids: Vec<&str> = registry.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_registry_replace_returns_previous() {
        let mut registry = ElementRegistry::new();
        assert!(registry.register(ModelElement::new("k1")).is_none());
        let old = registry.register(ModelElement::new("k1").with_name("new"));
        assert_eq!(old.unwrap().name(), None);
        assert_eq!(registry.len(), 1);
    }
}
