//! Session wiring.

use crate::context::{EntityContext, MemoryContext};
use proxima_schema::SchemaRegistry;
use proxima_wire::WireClient;
use std::rc::Rc;

/// The collaborators a handler needs: wire client, entity context, and the
/// schema registry. Injected into every handler at construction; nothing
/// here is ambient state.
///
/// A session (and every handler created within it) is single-threaded by
/// design; independent sessions are independent.
pub struct Session {
    client: Rc<dyn WireClient>,
    context: Rc<dyn EntityContext>,
    schemas: SchemaRegistry,
}

impl Session {
    /// Creates a session from explicit collaborators.
    pub fn new(
        client: Rc<dyn WireClient>,
        schemas: SchemaRegistry,
        context: Rc<dyn EntityContext>,
    ) -> Rc<Self> {
        Rc::new(Self {
            client,
            context,
            schemas,
        })
    }

    /// Creates a session with a fresh in-memory entity context.
    pub fn with_memory_context(client: Rc<dyn WireClient>, schemas: SchemaRegistry) -> Rc<Self> {
        Self::new(client, schemas, Rc::new(MemoryContext::new()))
    }

    /// The wire client.
    #[must_use]
    pub fn client(&self) -> &dyn WireClient {
        &*self.client
    }

    /// The entity context.
    #[must_use]
    pub fn context(&self) -> &dyn EntityContext {
        &*self.context
    }

    /// The schema registry.
    #[must_use]
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("service_root", &self.client.service_root())
            .field("types", &self.schemas.len())
            .finish()
    }
}
