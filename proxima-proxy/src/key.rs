//! Compound key assembly.
//!
//! A compound key is built from a key-carrying object that exposes named,
//! positioned component accessors. Components are assembled in ascending
//! position order — the wire protocol's compound-key syntax is sensitive to
//! that order, so an arbitrary map would not do. An accessor failure is
//! logged and the component skipped; the resulting key may be incomplete.

use proxima_types::KeyValue;
use serde_json::Value;
use tracing::warn;

/// One declared component of a compound key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyComponent {
    pub name: String,
    /// Orders the component within the key segment.
    pub position: u32,
}

impl KeyComponent {
    /// Creates a component declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, position: u32) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// A key-carrying object: declares its components and produces each
/// component's value on demand.
pub trait CompoundKeySource {
    /// The declared components, in any order.
    fn components(&self) -> Vec<KeyComponent>;

    /// Produces the value of one component. `Err` skips the component.
    fn component_value(&self, name: &str) -> Result<Value, String>;
}

/// Assembles an ordered compound key from a key source.
///
/// Components sort ascending by position; equal positions fall back to
/// name order. Accessor failures are logged at warning level and skipped,
/// so the returned key is not guaranteed complete.
pub fn build_compound_key(source: &dyn CompoundKeySource) -> KeyValue {
    let mut components = source.components();
    components.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)));

    let mut ordered = Vec::with_capacity(components.len());
    for component in components {
        match source.component_value(&component.name) {
            Ok(value) => ordered.push((component.name, value)),
            Err(reason) => {
                warn!(
                    component = %component.name,
                    %reason,
                    "skipping compound key component"
                );
            }
        }
    }

    KeyValue::Compound(ordered)
}
