//! Member values exchanged through the dispatcher.

use crate::collection::{DeferredSet, EntityCollection};
use crate::complex::ComplexHandle;
use crate::entity::EntityHandle;
use proxima_wire::MediaStream;
use serde_json::Value;
use std::hash::Hasher;

/// The value of a scalar or complex property.
///
/// A `Json(Value::Null)` is the null marker: an overlaid null still shadows
/// whatever the payload carries.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// A plain JSON scalar, array, or object.
    Json(Value),
    /// A nested complex value proxy.
    Complex(ComplexHandle),
    /// A collection that may mix scalars and complex proxies.
    Collection(Vec<PropertyValue>),
}

impl PropertyValue {
    /// The null marker.
    #[must_use]
    pub fn null() -> Self {
        Self::Json(Value::Null)
    }

    /// Whether this is the null marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Json(Value::Null))
    }

    /// Borrows the plain JSON value, if this is one.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the complex proxy, if this is one.
    #[must_use]
    pub fn as_complex(&self) -> Option<&ComplexHandle> {
        match self {
            Self::Complex(handle) => Some(handle),
            _ => None,
        }
    }

    /// Renders the value back into plain JSON, serializing complex proxies
    /// through their current state.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Complex(handle) => handle.to_value(),
            Self::Collection(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }

    /// Feeds a deterministic fingerprint of this value into a hasher.
    /// Complex proxies hash by instance identity, not content.
    pub(crate) fn write_fingerprint(&self, state: &mut impl Hasher) {
        match self {
            Self::Json(value) => {
                state.write_u8(0);
                state.write(value.to_string().as_bytes());
            }
            Self::Complex(handle) => {
                state.write_u8(1);
                state.write(handle.instance_id().as_uuid().as_bytes());
            }
            Self::Collection(items) => {
                state.write_u8(2);
                state.write_usize(items.len());
                for item in items {
                    item.write_fingerprint(state);
                }
            }
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Complex(a), Self::Complex(b)) => a.same_instance(b),
            (Self::Collection(a), Self::Collection(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// The result of resolving a navigation property.
#[derive(Debug, Clone)]
pub enum NavigationValue {
    /// A single target entity.
    Entity(EntityHandle),
    /// A (possibly deferred) collection of target entities.
    Collection(EntityCollection),
    /// A whole named entity set, always deferred.
    EntitySet(DeferredSet),
    /// No target: unset link, or a tombstoned target.
    Null,
}

impl NavigationValue {
    /// Whether this is the absent-target marker.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrows the single target entity, if this is one.
    #[must_use]
    pub fn as_entity(&self) -> Option<&EntityHandle> {
        match self {
            Self::Entity(handle) => Some(handle),
            _ => None,
        }
    }

    /// Borrows the target collection, if this is one.
    #[must_use]
    pub fn as_collection(&self) -> Option<&EntityCollection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Feeds a deterministic fingerprint into a hasher; proxies hash by
    /// instance identity.
    pub(crate) fn write_fingerprint(&self, state: &mut impl Hasher) {
        match self {
            Self::Entity(handle) => {
                state.write_u8(0);
                state.write(handle.instance_id().as_uuid().as_bytes());
            }
            Self::Collection(collection) => {
                state.write_u8(1);
                state.write(collection.instance_id().as_uuid().as_bytes());
            }
            Self::EntitySet(set) => {
                state.write_u8(2);
                state.write(set.instance_id().as_uuid().as_bytes());
            }
            Self::Null => state.write_u8(3),
        }
    }
}

impl PartialEq for NavigationValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Entity(a), Self::Entity(b)) => a.same_instance(b),
            (Self::Collection(a), Self::Collection(b)) => a.same_instance(b),
            (Self::EntitySet(a), Self::EntitySet(b)) => a.same_instance(b),
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

/// What a member read produced, tagged by member kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberValue {
    /// A scalar or complex property value; null marker when unset.
    Property(PropertyValue),
    /// A binary stream property; `None` when no content is available.
    Stream(Option<MediaStream>),
    /// A navigation result.
    Navigation(NavigationValue),
}

impl MemberValue {
    /// Borrows the property value, if this member was a property.
    #[must_use]
    pub fn as_property(&self) -> Option<&PropertyValue> {
        match self {
            Self::Property(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the navigation result, if this member was a navigation.
    #[must_use]
    pub fn as_navigation(&self) -> Option<&NavigationValue> {
        match self {
            Self::Navigation(value) => Some(value),
            _ => None,
        }
    }

    /// Takes the stream, if this member was a stream property.
    #[must_use]
    pub fn into_stream(self) -> Option<MediaStream> {
        match self {
            Self::Stream(stream) => stream,
            _ => None,
        }
    }
}

/// What a member write carries, tagged by member kind. Writing a kind that
/// does not match the declared member fails with `InvalidArgument`.
#[derive(Debug, Clone)]
pub enum MemberWrite {
    /// A scalar or complex property value.
    Property(PropertyValue),
    /// A replacement binary stream.
    Stream(MediaStream),
    /// An explicit relink of a navigation property.
    Link(NavigationValue),
}

impl From<Value> for MemberWrite {
    fn from(value: Value) -> Self {
        Self::Property(PropertyValue::Json(value))
    }
}
