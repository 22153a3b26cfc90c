//! Member descriptors.

use proxima_types::TypeName;
use serde::{Deserialize, Serialize};

/// A declared member of a structured type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    /// A scalar or complex property.
    Scalar(ScalarMember),
    /// A binary stream property, fetched/replaced independently.
    Stream(StreamMember),
    /// A relationship to one or more other entities.
    Navigation(NavigationMember),
}

impl Member {
    /// The declared member name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(m) => &m.name,
            Self::Stream(m) => &m.name,
            Self::Navigation(m) => &m.name,
        }
    }
}

/// A scalar or complex property descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarMember {
    pub name: String,
    pub value_type: ValueType,
    /// The declared complex type. Only meaningful when `value_type` is Complex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex_type: Option<TypeName>,
}

/// A binary stream property descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamMember {
    pub name: String,
}

/// A navigation property descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationMember {
    pub name: String,
    pub cardinality: Cardinality,
    pub target_type: TypeName,
    /// Name of the entity set the target belongs to; the target entity-set
    /// address is derived by joining this onto the service root.
    pub target_set: String,
}

/// The declared value type of a scalar property.
///
/// The complex type name is stored on `ScalarMember` rather than inside
/// this enum so the JSON representation stays flat:
/// `{"value_type": "complex", "complex_type": "NS.Address"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Text,
    Number,
    Bool,
    DateTime,
    Decimal,
    Duration,
    Json,
    Complex,
}

/// Target cardinality of a navigation property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Points at a single entity.
    Single,
    /// Points at a collection of entities.
    Collection,
    /// Points at a whole named entity set.
    EntitySet,
}

/// One component of an entity's key.
///
/// `position` orders components inside a compound key segment; the order
/// of declaration is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyElement {
    pub name: String,
    pub position: u32,
}
