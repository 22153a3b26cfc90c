//! Per-member annotation registries.
//!
//! Protocol metadata can attach to individual members, not just the entity
//! as a whole. Each structured value keeps two side maps of term-keyed
//! registries, one for properties and one for navigations, handed out on
//! first use and shared by reference afterwards.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Term-keyed annotation values attached to one declared member.
///
/// Cloning is cheap and preserves identity: mutations through any clone
/// are visible to every holder of the same registry.
#[derive(Debug, Clone, Default)]
pub struct MemberAnnotations {
    inner: Rc<RefCell<HashMap<String, Value>>>,
}

impl MemberAnnotations {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an annotation by namespace-qualified term.
    #[must_use]
    pub fn get(&self, term: &str) -> Option<Value> {
        self.inner.borrow().get(term).cloned()
    }

    /// Writes an annotation, overwriting any prior value for the term.
    pub fn set(&self, term: impl Into<String>, value: Value) {
        self.inner.borrow_mut().insert(term.into(), value);
    }

    /// Removes an annotation, returning the removed value.
    pub fn remove(&self, term: &str) -> Option<Value> {
        self.inner.borrow_mut().remove(term)
    }

    /// All terms present, sorted.
    #[must_use]
    pub fn terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = self.inner.borrow().keys().cloned().collect();
        terms.sort();
        terms
    }

    /// Whether the registry holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// The two side maps of one structured value: property-level and
/// navigation-level member registries.
#[derive(Debug, Default)]
pub(crate) struct MemberAnnotationMaps {
    properties: HashMap<String, MemberAnnotations>,
    navigations: HashMap<String, MemberAnnotations>,
}

impl MemberAnnotationMaps {
    pub(crate) fn property(&mut self, member: &str) -> MemberAnnotations {
        self.properties.entry(member.to_string()).or_default().clone()
    }

    pub(crate) fn navigation(&mut self, member: &str) -> MemberAnnotations {
        self.navigations.entry(member.to_string()).or_default().clone()
    }

    pub(crate) fn clear(&mut self) {
        self.properties.clear();
        self.navigations.clear();
    }
}
