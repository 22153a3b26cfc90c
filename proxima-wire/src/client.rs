//! Wire client boundary.
//!
//! The proxy runtime reaches the service exclusively through [`WireClient`].
//! Every call is synchronous and blocking: it returns or fails before
//! control comes back to the caller. Retry, timeout, and cancellation
//! policy belong to the implementation, never to the callers.

use crate::{MediaStream, WireEntity, WireResult};
use proxima_types::{ProtocolVersion, ResourceAddress};

/// Preferences attached to an entity retrieval.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetrievePrefs {
    /// Ask the service to include protocol annotations in the payload.
    /// Only honored by services that support them.
    pub include_annotations: bool,
}

/// Result of a single entity retrieval.
#[derive(Debug, Clone)]
pub struct RetrievedEntity {
    /// The retrieved payload; `None` when the service answered with an
    /// empty body (no entity at the address).
    pub payload: Option<WireEntity>,
    /// Concurrency token returned with the response.
    pub etag: Option<String>,
}

/// Synchronous access to the remote service.
pub trait WireClient {
    /// The service root address; entity-set addresses are derived from it.
    fn service_root(&self) -> ResourceAddress;

    /// The negotiated protocol version.
    fn protocol_version(&self) -> ProtocolVersion;

    /// Retrieves a single entity.
    fn retrieve(
        &self,
        address: &ResourceAddress,
        prefs: &RetrievePrefs,
    ) -> WireResult<RetrievedEntity>;

    /// Fetches binary media content, optionally hinting the expected
    /// content type.
    fn fetch_media(
        &self,
        address: &ResourceAddress,
        content_type: Option<&str>,
    ) -> WireResult<MediaStream>;
}

/// A mock wire client for testing.
pub mod mock {
    use super::*;
    use crate::WireError;
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, HashSet};

    /// In-memory `WireClient` that serves staged responses and counts calls.
    #[derive(Debug)]
    pub struct MockClient {
        root: ResourceAddress,
        version: ProtocolVersion,
        entities: RefCell<HashMap<String, RetrievedEntity>>,
        media: RefCell<HashMap<String, MediaStream>>,
        failing: RefCell<HashSet<String>>,
        retrieve_calls: Cell<usize>,
        media_calls: Cell<usize>,
    }

    impl MockClient {
        /// Creates a mock serving from the given service root.
        pub fn new(root: impl Into<ResourceAddress>) -> Self {
            Self {
                root: root.into(),
                version: ProtocolVersion::V4,
                entities: RefCell::new(HashMap::new()),
                media: RefCell::new(HashMap::new()),
                failing: RefCell::new(HashSet::new()),
                retrieve_calls: Cell::new(0),
                media_calls: Cell::new(0),
            }
        }

        /// Overrides the negotiated protocol version.
        pub fn with_version(mut self, version: ProtocolVersion) -> Self {
            self.version = version;
            self
        }

        /// Stages an entity payload at an address.
        pub fn stage_entity(
            &self,
            address: &ResourceAddress,
            payload: WireEntity,
            etag: Option<&str>,
        ) {
            self.entities.borrow_mut().insert(
                address.as_str().to_string(),
                RetrievedEntity {
                    payload: Some(payload),
                    etag: etag.map(str::to_string),
                },
            );
        }

        /// Stages an empty-body response at an address.
        pub fn stage_missing(&self, address: &ResourceAddress) {
            self.entities.borrow_mut().insert(
                address.as_str().to_string(),
                RetrievedEntity {
                    payload: None,
                    etag: None,
                },
            );
        }

        /// Stages media content at an address.
        pub fn stage_media(&self, address: &ResourceAddress, stream: MediaStream) {
            self.media
                .borrow_mut()
                .insert(address.as_str().to_string(), stream);
        }

        /// Makes any request to an address fail at the transport level.
        pub fn stage_failure(&self, address: &ResourceAddress) {
            self.failing
                .borrow_mut()
                .insert(address.as_str().to_string());
        }

        /// Number of `retrieve` calls made so far.
        pub fn retrieve_calls(&self) -> usize {
            self.retrieve_calls.get()
        }

        /// Number of `fetch_media` calls made so far.
        pub fn media_calls(&self) -> usize {
            self.media_calls.get()
        }
    }

    impl WireClient for MockClient {
        fn service_root(&self) -> ResourceAddress {
            self.root.clone()
        }

        fn protocol_version(&self) -> ProtocolVersion {
            self.version
        }

        fn retrieve(
            &self,
            address: &ResourceAddress,
            _prefs: &RetrievePrefs,
        ) -> WireResult<RetrievedEntity> {
            self.retrieve_calls.set(self.retrieve_calls.get() + 1);

            if self.failing.borrow().contains(address.as_str()) {
                return Err(WireError::Transport(format!("staged failure: {address}")));
            }
            self.entities
                .borrow()
                .get(address.as_str())
                .cloned()
                .ok_or_else(|| WireError::NoResource(address.as_str().to_string()))
        }

        fn fetch_media(
            &self,
            address: &ResourceAddress,
            _content_type: Option<&str>,
        ) -> WireResult<MediaStream> {
            self.media_calls.set(self.media_calls.get() + 1);

            if self.failing.borrow().contains(address.as_str()) {
                return Err(WireError::Transport(format!("staged failure: {address}")));
            }
            self.media
                .borrow()
                .get(address.as_str())
                .cloned()
                .ok_or_else(|| WireError::NoResource(address.as_str().to_string()))
        }
    }
}
