//! Entity identity.

use crate::{Error, KeyValue, ResourceAddress, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A namespace-qualified structured type name, e.g. `Northwind.Order`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    namespace: String,
    name: String,
}

impl TypeName {
    /// Creates a type name from its namespace and local name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// The namespace part.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The local name part.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

impl FromStr for TypeName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.rsplit_once('.') {
            Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => {
                Ok(Self::new(namespace, name))
            }
            _ => Err(Error::InvalidTypeName(s.to_string())),
        }
    }
}

/// The logical identity of an entity within a session.
///
/// The tuple (entity-set address, declared type, key) is the identity-map
/// key: two identities are equal iff all three components are equal. The
/// key may be absent for entities that have not been assigned an address
/// yet (brand-new, unsaved), and the entity-set address may be absent for
/// entities created outside any set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityUuid {
    entity_set: Option<ResourceAddress>,
    type_name: TypeName,
    key: Option<KeyValue>,
}

impl EntityUuid {
    /// Creates an identity from its three components.
    #[must_use]
    pub fn new(
        entity_set: Option<ResourceAddress>,
        type_name: TypeName,
        key: Option<KeyValue>,
    ) -> Self {
        Self {
            entity_set,
            type_name,
            key,
        }
    }

    /// The entity-set address this entity belongs to, if known.
    #[must_use]
    pub fn entity_set(&self) -> Option<&ResourceAddress> {
        self.entity_set.as_ref()
    }

    /// The declared type of the entity.
    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// The key value, if the entity is addressable.
    #[must_use]
    pub fn key(&self) -> Option<&KeyValue> {
        self.key.as_ref()
    }
}

impl fmt::Display for EntityUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        if let Some(key) = &self.key {
            write!(f, "{key}")?;
        }
        write!(f, ")")?;
        if let Some(set) = &self.entity_set {
            write!(f, "@{set}")?;
        }
        Ok(())
    }
}
