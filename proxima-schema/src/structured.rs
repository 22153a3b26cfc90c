//! Structured type tables.

use crate::member::{
    Cardinality, KeyElement, Member, NavigationMember, ScalarMember, StreamMember, ValueType,
};
use proxima_types::TypeName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The member table of one structured type, built once and shared.
///
/// Built with the shorthand methods below, registered in a
/// [`SchemaRegistry`](crate::SchemaRegistry), and consulted by the proxy
/// dispatcher for every member access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredType {
    name: TypeName,
    has_stream: bool,
    members: BTreeMap<String, Member>,
    key: Vec<KeyElement>,
}

impl StructuredType {
    /// Starts an empty table for the given type.
    #[must_use]
    pub fn new(name: TypeName) -> Self {
        Self {
            name,
            has_stream: false,
            members: BTreeMap::new(),
            key: Vec::new(),
        }
    }

    /// Declares the type as a media entity (has a primary binary stream).
    #[must_use]
    pub fn with_stream(mut self) -> Self {
        self.has_stream = true;
        self
    }

    /// Declares a scalar property.
    #[must_use]
    pub fn scalar(mut self, name: &str, value_type: ValueType) -> Self {
        self.members.insert(
            name.to_string(),
            Member::Scalar(ScalarMember {
                name: name.to_string(),
                value_type,
                complex_type: None,
            }),
        );
        self
    }

    /// Declares a complex property of the given complex type.
    #[must_use]
    pub fn complex(mut self, name: &str, complex_type: TypeName) -> Self {
        self.members.insert(
            name.to_string(),
            Member::Scalar(ScalarMember {
                name: name.to_string(),
                value_type: ValueType::Complex,
                complex_type: Some(complex_type),
            }),
        );
        self
    }

    /// Declares a named binary stream property.
    #[must_use]
    pub fn stream(mut self, name: &str) -> Self {
        self.members.insert(
            name.to_string(),
            Member::Stream(StreamMember {
                name: name.to_string(),
            }),
        );
        self
    }

    /// Declares a navigation property.
    #[must_use]
    pub fn navigation(
        mut self,
        name: &str,
        cardinality: Cardinality,
        target_type: TypeName,
        target_set: &str,
    ) -> Self {
        self.members.insert(
            name.to_string(),
            Member::Navigation(NavigationMember {
                name: name.to_string(),
                cardinality,
                target_type,
                target_set: target_set.to_string(),
            }),
        );
        self
    }

    /// Declares one key component.
    #[must_use]
    pub fn key_element(mut self, name: &str, position: u32) -> Self {
        self.key.push(KeyElement {
            name: name.to_string(),
            position,
        });
        self
    }

    /// The type's namespace-qualified name.
    #[must_use]
    pub fn name(&self) -> &TypeName {
        &self.name
    }

    /// Whether the type is a media entity.
    #[must_use]
    pub fn has_stream(&self) -> bool {
        self.has_stream
    }

    /// Resolves a declared member by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// All declared members.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// All declared member names.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Key components sorted ascending by position. Equal positions are a
    /// caller error; name order breaks the tie deterministically.
    #[must_use]
    pub fn ordered_key(&self) -> Vec<&KeyElement> {
        let mut elements: Vec<&KeyElement> = self.key.iter().collect();
        elements.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)));
        elements
    }

    /// Whether the type declares any key component.
    #[must_use]
    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }
}
