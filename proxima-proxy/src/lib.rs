//! Entity proxy dispatch and change tracking for Proxima.
//!
//! This crate is the client-side runtime that lets typed application code
//! read and mutate remote, schema-described entities while tracking which
//! parts changed since they were loaded or created, so a later save sends
//! only the delta.
//!
//! # Architecture
//!
//! - **Dispatch**: [`StructuredValue`] routes named member operations
//!   through the type's descriptor table — property read/write, stream
//!   read/write, navigation read/relink.
//! - **Entities**: [`EntityHandle`] owns one entity's identity, attach
//!   lifecycle, change overlays, and media state; [`ComplexHandle`] is the
//!   nested, address-less variant with a weak back-link to its owner.
//! - **Overlays**: [`ChangeOverlay`] and [`LinkOverlay`] shadow the
//!   backing payload; dirtiness compares content hashes against tags
//!   recorded at the last checkpoint.
//! - **Collaborators**: the wire client and the session's identity map
//!   ([`EntityContext`]) are injected through [`Session`]; nothing is
//!   ambient.
//!
//! # Example
//!
//! ```
//! use proxima_proxy::{EntityHandle, Session, StructuredValue};
//! use proxima_schema::{SchemaRegistry, StructuredType, ValueType};
//! use proxima_types::TypeName;
//! use proxima_wire::mock::MockClient;
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! let mut schemas = SchemaRegistry::new();
//! let order = schemas.register(
//!     StructuredType::new(TypeName::new("Demo", "Order"))
//!         .scalar("Total", ValueType::Number)
//!         .key_element("Id", 0)
//!         .scalar("Id", ValueType::Number),
//! );
//!
//! let client = Rc::new(MockClient::new("https://demo.test/svc"));
//! let session = Session::with_memory_context(client, schemas);
//!
//! let entity = EntityHandle::create(order, session);
//! entity.set("Total", json!(42.5).into()).unwrap();
//! assert!(entity.is_changed());
//! ```

mod annotations;
mod collection;
mod complex;
mod context;
mod entity;
mod error;
mod key;
mod overlay;
mod session;
mod structured;
mod value;

pub use annotations::MemberAnnotations;
pub use collection::{DeferredSet, EntityCollection};
pub use complex::ComplexHandle;
pub use context::{EntityContext, MemoryContext};
pub use entity::{AnnotationsView, EntityHandle, OperationBinding};
pub use error::{ProxyError, ProxyResult};
pub use key::{build_compound_key, CompoundKeySource, KeyComponent};
pub use overlay::{ChangeOverlay, LinkOverlay};
pub use session::Session;
pub use structured::StructuredValue;
pub use value::{MemberValue, MemberWrite, NavigationValue, PropertyValue};
