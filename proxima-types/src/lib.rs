//! Core type definitions for Proxima.
//!
//! This crate defines the fundamental, service-agnostic types used throughout
//! the proxy runtime:
//! - Resource addresses and key segments
//! - Entity identity (entity set + type + key)
//! - Attach lifecycle status and protocol versions
//! - Handler instance identifiers (UUID v7)
//!
//! Schema descriptors, wire payloads, and the proxy handlers themselves
//! belong in their respective crates, not here.

mod address;
mod identity;
mod ids;
mod key;
mod status;

pub use address::ResourceAddress;
pub use identity::{EntityUuid, TypeName};
pub use ids::InstanceId;
pub use key::KeyValue;
pub use status::{AttachStatus, ProtocolVersion};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid type name: {0}")]
    InvalidTypeName(String),

    #[error("value cannot be used as a key literal: {0}")]
    InvalidKeyLiteral(String),

    #[error("compound key has no components")]
    EmptyCompoundKey,
}
