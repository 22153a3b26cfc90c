//! In-memory wire payload representation.
//!
//! A [`WireEntity`] is what the transport hands back for a single entity:
//! typed properties, navigation links (with optional inline-expanded
//! content), protocol annotations, and media metadata. A property that is
//! present with a JSON `null` is distinct from a property that is absent;
//! the maps below preserve that distinction.

use proxima_types::{ResourceAddress, TypeName};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// The in-memory form of one entity as carried on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEntity {
    pub type_name: TypeName,
    /// The entity's own edit address, if the service provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<ResourceAddress>,
    /// Concurrency token carried with the payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    properties: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    links: Vec<WireLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<WireAnnotation>,
    /// Whether the entity is a media entity (has a primary stream).
    #[serde(default)]
    pub is_media_entity: bool,
    /// Where the primary stream content can be fetched from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_content_source: Option<ResourceAddress>,
    /// Content type of the primary stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_content_type: Option<String>,
    /// Edit addresses of named stream properties, keyed by member name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    stream_edit_links: HashMap<String, ResourceAddress>,
}

impl WireEntity {
    /// Creates an empty payload of the given type.
    #[must_use]
    pub fn new(type_name: TypeName) -> Self {
        Self {
            type_name,
            edit_link: None,
            etag: None,
            properties: BTreeMap::new(),
            links: Vec::new(),
            annotations: Vec::new(),
            is_media_entity: false,
            media_content_source: None,
            media_content_type: None,
            stream_edit_links: HashMap::new(),
        }
    }

    /// Looks up a property. `Some(Value::Null)` means present-with-null;
    /// `None` means absent.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Sets a property value.
    pub fn set_property(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }

    /// All property names present on the payload.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Looks up the navigation link for a member.
    #[must_use]
    pub fn navigation_link(&self, name: &str) -> Option<&WireLink> {
        self.links.iter().find(|l| l.name == name)
    }

    /// Adds a navigation link.
    pub fn add_link(&mut self, link: WireLink) {
        self.links.push(link);
    }

    /// Scans the annotation list for a namespace-qualified term.
    #[must_use]
    pub fn annotation(&self, term: &str) -> Option<&WireAnnotation> {
        self.annotations.iter().find(|a| a.term == term)
    }

    /// The edit address of a named stream property, if carried.
    #[must_use]
    pub fn stream_edit_link(&self, name: &str) -> Option<&ResourceAddress> {
        self.stream_edit_links.get(name)
    }

    /// Records the edit address of a named stream property.
    pub fn set_stream_edit_link(&mut self, name: impl Into<String>, address: ResourceAddress) {
        self.stream_edit_links.insert(name.into(), address);
    }
}

/// A navigation link carried on an entity payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireLink {
    /// The navigation member name.
    pub name: String,
    /// Address of the link target, when not inline expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ResourceAddress>,
    /// Inline-expanded content, when the payload carried it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<InlinePayload>,
}

impl WireLink {
    /// A deferred link: target address only, no inline content.
    #[must_use]
    pub fn deferred(name: impl Into<String>, target: ResourceAddress) -> Self {
        Self {
            name: name.into(),
            target: Some(target),
            inline: None,
        }
    }

    /// An inline-expanded single entity link.
    #[must_use]
    pub fn inline_entity(name: impl Into<String>, entity: WireEntity) -> Self {
        Self {
            name: name.into(),
            target: None,
            inline: Some(InlinePayload::Entity(Box::new(entity))),
        }
    }

    /// An inline-expanded collection link.
    #[must_use]
    pub fn inline_collection(name: impl Into<String>, entities: Vec<WireEntity>) -> Self {
        Self {
            name: name.into(),
            target: None,
            inline: Some(InlinePayload::Collection(entities)),
        }
    }
}

/// Inline-expanded navigation content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlinePayload {
    Entity(Box<WireEntity>),
    Collection(Vec<WireEntity>),
}

/// A protocol annotation attached to an entity: a namespace-qualified term
/// with a value. A `null` value is a present-with-null annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAnnotation {
    pub term: String,
    pub value: Value,
}

impl WireAnnotation {
    /// Creates an annotation.
    #[must_use]
    pub fn new(term: impl Into<String>, value: Value) -> Self {
        Self {
            term: term.into(),
            value,
        }
    }
}

/// The in-memory form of a nested complex value: a bag of typed properties
/// with no independent address.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireComplex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<TypeName>,
    properties: BTreeMap<String, Value>,
}

impl WireComplex {
    /// Creates an empty complex value of the given type.
    #[must_use]
    pub fn new(type_name: Option<TypeName>) -> Self {
        Self {
            type_name,
            properties: BTreeMap::new(),
        }
    }

    /// Builds a complex value from a JSON object. Non-object values yield
    /// an empty bag.
    #[must_use]
    pub fn from_value(type_name: Option<TypeName>, value: &Value) -> Self {
        let mut complex = Self::new(type_name);
        if let Value::Object(map) = value {
            for (name, v) in map {
                complex.properties.insert(name.clone(), v.clone());
            }
        }
        complex
    }

    /// Renders the bag back into a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.properties.clone().into_iter().collect())
    }

    /// Looks up a property; same present/absent semantics as `WireEntity`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Sets a property value.
    pub fn set_property(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }

    /// All property names present on the bag.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }
}
