//! Wire payload representation and client boundary for Proxima.
//!
//! This crate owns the in-memory form of what the wire protocol carries —
//! entities with their properties, navigation links (possibly inline
//! expanded), protocol annotations, and media metadata — plus the
//! [`WireClient`] trait the proxy runtime calls to reach the service.
//!
//! Parsing and serializing actual request/response bodies, HTTP transport,
//! and retry policy all live behind the `WireClient` implementation; this
//! crate only defines the boundary.

mod client;
mod media;
mod payload;

pub use client::{mock, RetrievePrefs, RetrievedEntity, WireClient};
pub use media::MediaStream;
pub use payload::{InlinePayload, WireAnnotation, WireComplex, WireEntity, WireLink};

/// Result type for wire operations.
pub type WireResult<T> = std::result::Result<T, WireError>;

/// Errors that can occur at the wire boundary.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Transport-level failure (connection, HTTP status, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// Payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The address does not name a retrievable resource.
    #[error("no resource at address: {0}")]
    NoResource(String),
}
