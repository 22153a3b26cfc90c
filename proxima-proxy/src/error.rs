//! Error types for the proxy runtime.

use thiserror::Error;

/// Result type for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Errors surfaced by proxy operations.
///
/// Every error is fatal to the single call that produced it; the runtime
/// never retries. Retry policy, if any, belongs to the transport.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The member name matches neither a property nor a navigation
    /// descriptor of the declared type.
    #[error("unsupported member '{member}' on {type_name}")]
    UnsupportedOperation { type_name: String, member: String },

    /// A structurally valid member was used wrongly: kind-mismatched
    /// write, reload target not found, reload key mismatch, malformed key.
    #[error("invalid argument for {type_name}({key}): {reason}")]
    InvalidArgument {
        type_name: String,
        key: String,
        reason: String,
    },

    /// A required type table is missing from the registry.
    #[error(transparent)]
    Schema(#[from] proxima_schema::Error),

    /// A wire failure surfaced outside the reload path (which wraps its
    /// failures into `InvalidArgument` instead).
    #[error("wire error: {0}")]
    Wire(#[from] proxima_wire::WireError),

    /// A key value that cannot be rendered into an address segment.
    #[error(transparent)]
    Key(#[from] proxima_types::Error),
}

impl ProxyError {
    /// Shorthand for an unknown-member failure.
    pub fn unsupported(type_name: impl ToString, member: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            type_name: type_name.to_string(),
            member: member.into(),
        }
    }

    /// Shorthand for an invalid-argument failure carrying the entity's
    /// type and key.
    pub fn invalid(
        type_name: impl ToString,
        key: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            type_name: type_name.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
