//! Complex value handler.
//!
//! A complex value is a nested structured value with no independent
//! address. It may later learn which entity owns it; the back-link is a
//! weak reference set at most once — a relation for lookups, never an
//! ownership edge. Writes have no overlay of their own: they mutate the
//! backing bag directly and request a CHANGED transition on the owning
//! entity, if there is one.

use crate::annotations::{MemberAnnotationMaps, MemberAnnotations};
use crate::entity::{EntityHandle, EntityInner};
use crate::error::{ProxyError, ProxyResult};
use crate::session::Session;
use crate::structured::{bind_unowned, materialize_property, resolve_navigation, StructuredValue};
use crate::value::{NavigationValue, PropertyValue};
use proxima_schema::{NavigationMember, ScalarMember, StreamMember, StructuredType};
use proxima_types::{InstanceId, TypeName};
use proxima_wire::{MediaStream, WireComplex};
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

pub(crate) struct ComplexInner {
    schema: Arc<StructuredType>,
    session: Rc<Session>,
    payload: WireComplex,
    owner: Option<Weak<RefCell<EntityInner>>>,
    member_annotations: MemberAnnotationMaps,
    instance: InstanceId,
}

/// Handle on one complex value. Cloning is cheap and preserves identity.
#[derive(Clone)]
pub struct ComplexHandle {
    inner: Rc<RefCell<ComplexInner>>,
}

impl ComplexHandle {
    /// Creates an empty complex value with no owner.
    #[must_use]
    pub fn create(schema: Arc<StructuredType>, session: Rc<Session>) -> Self {
        let payload = WireComplex::new(Some(schema.name().clone()));
        Self::build(schema, session, payload, None)
    }

    /// Builds a complex value from plain JSON, with no owner.
    #[must_use]
    pub fn from_json(schema: Arc<StructuredType>, value: &Value, session: Rc<Session>) -> Self {
        Self::from_value(schema, value, None, session)
    }

    pub(crate) fn from_value(
        schema: Arc<StructuredType>,
        value: &Value,
        owner: Option<&EntityHandle>,
        session: Rc<Session>,
    ) -> Self {
        let payload = WireComplex::from_value(Some(schema.name().clone()), value);
        Self::build(schema, session, payload, owner.map(EntityHandle::downgrade))
    }

    fn build(
        schema: Arc<StructuredType>,
        session: Rc<Session>,
        payload: WireComplex,
        owner: Option<Weak<RefCell<EntityInner>>>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ComplexInner {
                schema,
                session,
                payload,
                owner,
                member_annotations: MemberAnnotationMaps::default(),
                instance: InstanceId::new(),
            })),
        }
    }

    /// The declared type name.
    #[must_use]
    pub fn type_name(&self) -> TypeName {
        self.inner.borrow().schema.name().clone()
    }

    /// The owning entity, if one is bound and still alive.
    #[must_use]
    pub fn owner(&self) -> Option<EntityHandle> {
        self.inner
            .borrow()
            .owner
            .as_ref()
            .and_then(Weak::upgrade)
            .map(EntityHandle::from_inner)
    }

    /// Binds the owning entity. Set at most once; a later bind is a no-op.
    pub(crate) fn bind_owner(&self, entity: &EntityHandle) {
        let mut inner = self.inner.borrow_mut();
        if inner.owner.is_none() {
            inner.owner = Some(entity.downgrade());
        }
    }

    /// The annotation registry attached to one declared property, created
    /// on first use and shared afterwards.
    #[must_use]
    pub fn property_annotations(&self, member: &str) -> MemberAnnotations {
        self.inner.borrow_mut().member_annotations.property(member)
    }

    /// The annotation registry attached to one navigation property,
    /// created on first use and shared afterwards.
    #[must_use]
    pub fn navigation_annotations(&self, member: &str) -> MemberAnnotations {
        self.inner.borrow_mut().member_annotations.navigation(member)
    }

    /// Renders the current state back into a JSON object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.inner.borrow().payload.to_value()
    }

    /// Whether two handles are the same proxy instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn instance_id(&self) -> InstanceId {
        self.inner.borrow().instance
    }
}

impl StructuredValue for ComplexHandle {
    fn schema(&self) -> Arc<StructuredType> {
        Arc::clone(&self.inner.borrow().schema)
    }

    fn session(&self) -> Rc<Session> {
        Rc::clone(&self.inner.borrow().session)
    }

    fn owning_entity(&self) -> Option<EntityHandle> {
        self.owner()
    }

    fn read_property(&self, member: &ScalarMember) -> ProxyResult<PropertyValue> {
        let raw = self.inner.borrow().payload.property(&member.name).cloned();
        let Some(raw) = raw else {
            return Ok(PropertyValue::null());
        };
        if raw.is_null() {
            return Ok(PropertyValue::null());
        }
        let session = self.session();
        materialize_property(member, &raw, self.owner().as_ref(), &session)
    }

    fn write_property(&self, member: &ScalarMember, value: PropertyValue) -> ProxyResult<()> {
        if let Some(owner) = self.owner() {
            bind_unowned(&value, &owner);
        }
        self.inner
            .borrow_mut()
            .payload
            .set_property(member.name.clone(), value.to_json());
        if let Some(owner) = self.owner() {
            owner.request_changed();
        }
        Ok(())
    }

    fn read_stream_property(&self, member: &StreamMember) -> ProxyResult<Option<MediaStream>> {
        Err(ProxyError::unsupported(
            self.schema().name(),
            member.name.clone(),
        ))
    }

    fn write_stream_property(&self, member: &StreamMember, _stream: MediaStream) -> ProxyResult<()> {
        Err(ProxyError::unsupported(
            self.schema().name(),
            member.name.clone(),
        ))
    }

    fn read_navigation(&self, member: &NavigationMember) -> ProxyResult<NavigationValue> {
        // Complex payloads carry no links; resolution is owner-relative.
        let owner = self.owner();
        let session = self.session();
        resolve_navigation(None, member, owner.as_ref(), &session)
    }

    fn write_navigation(
        &self,
        member: &NavigationMember,
        value: NavigationValue,
    ) -> ProxyResult<()> {
        let Some(owner) = self.owner() else {
            let (type_name, key) = self.error_identity();
            return Err(ProxyError::invalid(
                type_name,
                key,
                format!(
                    "cannot relink '{}' on a complex value with no owning entity",
                    member.name
                ),
            ));
        };
        owner.write_navigation(member, value)
    }
}

impl PartialEq for ComplexHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl fmt::Debug for ComplexHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => write!(f, "ComplexHandle({})", inner.schema.name()),
            Err(_) => f.write_str("ComplexHandle(<borrowed>)"),
        }
    }
}
