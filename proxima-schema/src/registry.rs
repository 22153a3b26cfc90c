//! Type registry.

use crate::{Error, Result, StructuredType};
use proxima_types::TypeName;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of structured types known to a session.
///
/// Each registered table is wrapped in an `Arc` so every proxy instance of
/// the type shares the same descriptor data.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: HashMap<TypeName, Arc<StructuredType>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type table, returning the shared handle. Re-registering
    /// a name replaces the previous table.
    pub fn register(&mut self, structured: StructuredType) -> Arc<StructuredType> {
        let shared = Arc::new(structured);
        self.types.insert(shared.name().clone(), Arc::clone(&shared));
        shared
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn get(&self, name: &TypeName) -> Option<Arc<StructuredType>> {
        self.types.get(name).cloned()
    }

    /// Looks up a type by name, failing if it is not registered.
    pub fn require(&self, name: &TypeName) -> Result<Arc<StructuredType>> {
        self.get(name).ok_or_else(|| Error::UnknownType(name.clone()))
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
