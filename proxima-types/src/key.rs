//! Entity key values.
//!
//! A key is either a single scalar or an ordered list of named components
//! (compound key). Component order matters: the wire protocol's compound-key
//! syntax is order-of-declaration sensitive, so the compound variant preserves
//! the order it was built with.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A key value identifying an entity within its entity set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    /// A single scalar key, e.g. `(10)` or `('ALFKI')`.
    Single(Value),
    /// An ordered compound key, e.g. `(OrderId=10,ProductId=7)`.
    Compound(Vec<(String, Value)>),
}

impl KeyValue {
    /// Builds a single-component key from any JSON scalar.
    #[must_use]
    pub fn single(value: impl Into<Value>) -> Self {
        Self::Single(value.into())
    }

    /// Builds a compound key from ordered name/value pairs.
    #[must_use]
    pub fn compound(components: Vec<(String, Value)>) -> Self {
        Self::Compound(components)
    }

    /// Renders this key as a wire key segment, without the surrounding
    /// parentheses. Strings are single-quoted with embedded quotes doubled;
    /// numbers and booleans are rendered literally.
    pub fn to_segment(&self) -> Result<String> {
        match self {
            Self::Single(value) => encode_literal(value),
            Self::Compound(components) => {
                if components.is_empty() {
                    return Err(Error::EmptyCompoundKey);
                }
                let parts = components
                    .iter()
                    .map(|(name, value)| Ok(format!("{}={}", name, encode_literal(value)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(parts.join(","))
            }
        }
    }
}

fn encode_literal(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(format!("'{}'", s.replace('\'', "''"))),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::InvalidKeyLiteral(other.to_string())),
    }
}

impl Hash for KeyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // serde_json::Value has no Hash impl; its canonical rendering is
        // deterministic and equality-consistent for key-safe values.
        match self {
            Self::Single(value) => {
                0u8.hash(state);
                value.to_string().hash(state);
            }
            Self::Compound(components) => {
                1u8.hash(state);
                for (name, value) in components {
                    name.hash(state);
                    value.to_string().hash(state);
                }
            }
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Logs still need something printable for values that cannot
        // appear in an address segment.
        match self.to_segment() {
            Ok(segment) => f.write_str(&segment),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}
