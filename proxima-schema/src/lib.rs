//! Structured type descriptors for Proxima.
//!
//! Every structured type (entity or complex) is described by a
//! [`StructuredType`] table built once at registration time and shared
//! across all proxy instances of that type. A table maps each declared
//! member name to a [`Member`] descriptor: a scalar/complex property, a
//! binary stream property, or a navigation property. Concrete entity
//! "kinds" are schema data, not distinct source types.

mod member;
mod registry;
mod structured;

pub use member::{
    Cardinality, KeyElement, Member, NavigationMember, ScalarMember, StreamMember, ValueType,
};
pub use registry::SchemaRegistry;
pub use structured::StructuredType;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur resolving schema descriptors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown structured type: {0}")]
    UnknownType(proxima_types::TypeName),
}
