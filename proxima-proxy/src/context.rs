//! Entity context boundary.
//!
//! The session-level identity map and attach-status ledger live outside
//! this runtime; handlers reach them through [`EntityContext`]. The
//! runtime reads the map to deduplicate navigation targets and to detect
//! tombstoned targets, and requests status transitions on every mutation —
//! it never removes entries. Removal on confirmed deletion is the
//! context's responsibility.

use crate::entity::EntityHandle;
use proxima_types::{AttachStatus, EntityUuid, InstanceId};
use std::cell::RefCell;
use std::collections::HashMap;

/// The session's identity map and attach-status ledger.
pub trait EntityContext {
    /// Whether this handler instance is attached to the session.
    fn is_attached(&self, instance: InstanceId) -> bool;

    /// Attaches a handler with an initial status. Attaching an already
    /// attached instance is a no-op; use `set_status` to overwrite.
    fn attach(&self, handle: &EntityHandle, status: AttachStatus);

    /// Overwrites the status of an attached handler.
    fn set_status(&self, handle: &EntityHandle, status: AttachStatus);

    /// Looks up an attached handler by logical identity.
    fn entity(&self, uuid: &EntityUuid) -> Option<EntityHandle>;

    /// The current status of a handler instance, if attached.
    fn status_of(&self, instance: InstanceId) -> Option<AttachStatus>;
}

#[derive(Debug, Default)]
struct ContextState {
    /// Identity map. Key-less identities are indexed too (a to-one
    /// navigation looks its target up by a key-less identity); among
    /// equal identities the latest attach wins.
    by_identity: HashMap<EntityUuid, EntityHandle>,
    /// Status ledger, keyed by instance so key-less NEW entities coexist.
    status: HashMap<InstanceId, AttachStatus>,
}

/// In-memory [`EntityContext`] scoped to one session.
#[derive(Debug, Default)]
pub struct MemoryContext {
    state: RefCell<ContextState>,
}

impl MemoryContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached handler instances.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.state.borrow().status.len()
    }

    /// Removes an identity from the map and its instance from the ledger.
    /// Called by session bookkeeping once a deletion is confirmed.
    pub fn detach(&self, handle: &EntityHandle) {
        let mut state = self.state.borrow_mut();
        state.status.remove(&handle.instance_id());
        state.by_identity.remove(&handle.uuid());
    }

    fn index(state: &mut ContextState, handle: &EntityHandle) {
        state.by_identity.insert(handle.uuid(), handle.clone());
    }
}

impl EntityContext for MemoryContext {
    fn is_attached(&self, instance: InstanceId) -> bool {
        self.state.borrow().status.contains_key(&instance)
    }

    fn attach(&self, handle: &EntityHandle, status: AttachStatus) {
        let instance = handle.instance_id();
        let mut state = self.state.borrow_mut();
        if state.status.contains_key(&instance) {
            return;
        }
        state.status.insert(instance, status);
        Self::index(&mut state, handle);
    }

    fn set_status(&self, handle: &EntityHandle, status: AttachStatus) {
        let instance = handle.instance_id();
        let mut state = self.state.borrow_mut();
        if state.status.contains_key(&instance) {
            state.status.insert(instance, status);
            // The identity may have gained a key since attach.
            Self::index(&mut state, handle);
        }
    }

    fn entity(&self, uuid: &EntityUuid) -> Option<EntityHandle> {
        self.state.borrow().by_identity.get(uuid).cloned()
    }

    fn status_of(&self, instance: InstanceId) -> Option<AttachStatus> {
        self.state.borrow().status.get(&instance).copied()
    }
}
