//! Resource addresses.
//!
//! An address names a remote resource: a service root, an entity set, a
//! single entity, or one of its media streams. Addresses are plain strings
//! on the wire; this type owns the small amount of construction grammar the
//! proxy runtime needs (segment joining, key segments, expand/select query
//! options). Anything fancier belongs to the URI builder of the transport
//! layer.

use crate::{KeyValue, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The address of a remote resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceAddress(String);

impl ResourceAddress {
    /// Creates an address from a string, trimming any trailing slash.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        let mut s = address.into();
        while s.ends_with('/') {
            s.pop();
        }
        Self(s)
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends a path segment, e.g. `.../Orders` + `Items` -> `.../Orders/Items`.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        Self(format!("{}/{}", self.0, segment.trim_matches('/')))
    }

    /// Appends a key segment, e.g. `.../Orders` + `10` -> `.../Orders(10)`.
    pub fn with_key(&self, key: &KeyValue) -> Result<Self> {
        Ok(Self(format!("{}({})", self.0, key.to_segment()?)))
    }

    /// Appends `$expand`/`$select` query options. Empty lists are omitted;
    /// with both empty the address is returned unchanged.
    #[must_use]
    pub fn with_query_options(&self, expand: &[String], select: &[String]) -> Self {
        if expand.is_empty() && select.is_empty() {
            return self.clone();
        }

        let mut options = Vec::new();
        if !expand.is_empty() {
            options.push(format!("$expand={}", expand.join(",")));
        }
        if !select.is_empty() {
            options.push(format!("$select={}", select.join(",")));
        }

        let separator = if self.0.contains('?') { '&' } else { '?' };
        Self(format!("{}{}{}", self.0, separator, options.join("&")))
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ResourceAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
