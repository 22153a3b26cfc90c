//! Attach lifecycle status and protocol versions.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an entity within a session.
///
/// Owned by the session's entity context; the proxy runtime requests
/// transitions (every mutating operation requests `Changed`) but never
/// stores status itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachStatus {
    /// Created locally, never persisted.
    New,
    /// Hydrated from the service, unmodified.
    Attached,
    /// Has pending local modifications.
    Changed,
    /// Marked for deletion.
    Deleted,
    /// Attached only as the target of a relationship change.
    Linked,
}

/// Negotiated wire protocol version.
///
/// Protocol-level annotations can only be requested from V4 services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolVersion {
    V3,
    V4,
}

impl ProtocolVersion {
    /// Whether the service understands the include-annotations preference.
    #[must_use]
    pub fn supports_annotations(&self) -> bool {
        *self > Self::V3
    }
}
