//! Structured value dispatch.
//!
//! [`StructuredValue`] is the request router shared by entities and nested
//! complex values: it classifies a named member operation against the
//! type's descriptor table and routes it to the kind-specific primitive.
//! Entities add identity, overlays, and streams on top
//! ([`EntityHandle`](crate::EntityHandle)); complex values route through
//! their owning entity where identity is needed.

use crate::collection::{DeferredSet, EntityCollection};
use crate::complex::ComplexHandle;
use crate::entity::EntityHandle;
use crate::error::{ProxyError, ProxyResult};
use crate::session::Session;
use crate::value::{MemberValue, MemberWrite, NavigationValue, PropertyValue};
use proxima_schema::{Cardinality, Member, NavigationMember, ScalarMember, StreamMember};
use proxima_schema::{StructuredType, ValueType};
use proxima_types::{AttachStatus, EntityUuid};
use proxima_wire::{InlinePayload, MediaStream, WireEntity, WireLink};
use serde_json::Value;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// A typed structured value: an entity or a nested complex value.
///
/// The provided [`get`](Self::get)/[`set`](Self::set) methods are the
/// dispatcher: they resolve the member name through the type table and
/// fail with `UnsupportedOperation` for names matching neither the
/// property nor the navigation member sets, or with `InvalidArgument`
/// when a write's value kind does not match the declared member.
pub trait StructuredValue {
    /// The declared type table.
    fn schema(&self) -> Arc<StructuredType>;

    /// The session this value lives in.
    fn session(&self) -> Rc<Session>;

    /// The entity that owns this value: the value itself for entities,
    /// the back-linked owner (if any) for complex values.
    fn owning_entity(&self) -> Option<EntityHandle>;

    /// Reads a scalar/complex property.
    fn read_property(&self, member: &ScalarMember) -> ProxyResult<PropertyValue>;

    /// Writes a scalar/complex property.
    fn write_property(&self, member: &ScalarMember, value: PropertyValue) -> ProxyResult<()>;

    /// Reads a named binary stream property.
    fn read_stream_property(&self, member: &StreamMember) -> ProxyResult<Option<MediaStream>>;

    /// Stages a replacement for a named binary stream property.
    fn write_stream_property(&self, member: &StreamMember, stream: MediaStream) -> ProxyResult<()>;

    /// Resolves a navigation property.
    fn read_navigation(&self, member: &NavigationMember) -> ProxyResult<NavigationValue>;

    /// Records an explicit relink of a navigation property.
    fn write_navigation(&self, member: &NavigationMember, value: NavigationValue)
        -> ProxyResult<()>;

    /// Type and key labels for error messages.
    fn error_identity(&self) -> (String, String) {
        (self.schema().name().to_string(), String::new())
    }

    /// Reads a member by declared name.
    fn get(&self, name: &str) -> ProxyResult<MemberValue> {
        let schema = self.schema();
        match schema.member(name) {
            None => Err(ProxyError::unsupported(schema.name(), name)),
            Some(Member::Scalar(m)) => Ok(MemberValue::Property(self.read_property(m)?)),
            Some(Member::Stream(m)) => Ok(MemberValue::Stream(self.read_stream_property(m)?)),
            Some(Member::Navigation(m)) => Ok(MemberValue::Navigation(self.read_navigation(m)?)),
        }
    }

    /// Writes a member by declared name.
    fn set(&self, name: &str, value: MemberWrite) -> ProxyResult<()> {
        let schema = self.schema();
        let member = schema
            .member(name)
            .ok_or_else(|| ProxyError::unsupported(schema.name(), name))?;
        match (member, value) {
            (Member::Scalar(m), MemberWrite::Property(v)) => self.write_property(m, v),
            (Member::Stream(m), MemberWrite::Stream(s)) => self.write_stream_property(m, s),
            (Member::Navigation(m), MemberWrite::Link(l)) => self.write_navigation(m, l),
            (member, _) => {
                let (type_name, key) = self.error_identity();
                Err(ProxyError::invalid(
                    type_name,
                    key,
                    format!("value kind does not match member '{}'", member.name()),
                ))
            }
        }
    }
}

/// Materializes a raw payload property value: complex-typed members wrap
/// into complex proxies back-linked to the owning entity, everything else
/// passes through as JSON.
pub(crate) fn materialize_property(
    member: &ScalarMember,
    raw: &Value,
    owner: Option<&EntityHandle>,
    session: &Rc<Session>,
) -> ProxyResult<PropertyValue> {
    if member.value_type != ValueType::Complex {
        return Ok(PropertyValue::Json(raw.clone()));
    }
    let Some(complex_type) = &member.complex_type else {
        // Declared complex without a type table: surface the raw JSON.
        return Ok(PropertyValue::Json(raw.clone()));
    };
    let schema = session.schemas().require(complex_type)?;

    match raw {
        Value::Array(items) => {
            let wrapped = items
                .iter()
                .map(|item| {
                    PropertyValue::Complex(ComplexHandle::from_value(
                        Arc::clone(&schema),
                        item,
                        owner,
                        Rc::clone(session),
                    ))
                })
                .collect();
            Ok(PropertyValue::Collection(wrapped))
        }
        _ => Ok(PropertyValue::Complex(ComplexHandle::from_value(
            schema,
            raw,
            owner,
            Rc::clone(session),
        ))),
    }
}

/// Back-links any complex proxies inside `value` that do not have an
/// owning entity yet. The link is informational only, never an ownership
/// transfer, and a proxy already owned keeps its owner.
pub(crate) fn bind_unowned(value: &PropertyValue, owner: &EntityHandle) {
    match value {
        PropertyValue::Complex(handle) => handle.bind_owner(owner),
        PropertyValue::Collection(items) => {
            for item in items {
                bind_unowned(item, owner);
            }
        }
        PropertyValue::Json(_) => {}
    }
}

/// Resolves a navigation member from payload data.
///
/// Inline-expanded content wraps without any remote call. Otherwise a
/// target address is derived from the owning entity's address and the
/// member name: to-many yields a deferred collection, set-valued yields a
/// deferred set proxy, and to-one consults the identity map — fabricating
/// an empty target when absent, and resolving to null when the known
/// target is tombstoned as deleted.
pub(crate) fn resolve_navigation(
    link: Option<&WireLink>,
    member: &NavigationMember,
    owner: Option<&EntityHandle>,
    session: &Rc<Session>,
) -> ProxyResult<NavigationValue> {
    let target_schema = session.schemas().require(&member.target_type)?;
    let target_set = session.client().service_root().join(&member.target_set);

    if let Some(inline) = link.and_then(|l| l.inline.as_ref()) {
        return match inline {
            InlinePayload::Entity(entity) => {
                let handle = EntityHandle::from_payload(
                    (**entity).clone(),
                    target_set,
                    target_schema,
                    Rc::clone(session),
                )?;
                Ok(NavigationValue::Entity(handle))
            }
            InlinePayload::Collection(entities) => {
                let items = entities
                    .iter()
                    .map(|entity| {
                        EntityHandle::from_payload(
                            entity.clone(),
                            target_set.clone(),
                            Arc::clone(&target_schema),
                            Rc::clone(session),
                        )
                    })
                    .collect::<ProxyResult<Vec<_>>>()?;
                Ok(NavigationValue::Collection(EntityCollection::loaded(
                    items,
                    Some(target_set),
                )))
            }
        };
    }

    // No inline data: navigate from the owning entity's address.
    let Some(owner_address) = owner.and_then(EntityHandle::entity_address) else {
        debug!(
            member = %member.name,
            "no inline data and no owning address; navigation resolves to null"
        );
        return Ok(NavigationValue::Null);
    };
    let target_address = owner_address.join(&member.name);

    match member.cardinality {
        Cardinality::Collection => Ok(NavigationValue::Collection(EntityCollection::deferred(
            target_address,
        ))),
        Cardinality::EntitySet => Ok(NavigationValue::EntitySet(DeferredSet::new(target_address))),
        Cardinality::Single => {
            let uuid = EntityUuid::new(
                Some(target_set.clone()),
                member.target_type.clone(),
                None,
            );
            debug!(target = %uuid, "resolving to-one navigation");

            match session.context().entity(&uuid) {
                Some(handle) => {
                    if session.context().status_of(handle.instance_id())
                        == Some(AttachStatus::Deleted)
                    {
                        debug!(target = %uuid, "navigation target deleted; resolving to null");
                        Ok(NavigationValue::Null)
                    } else {
                        Ok(NavigationValue::Entity(handle))
                    }
                }
                None => {
                    let payload = WireEntity::new(member.target_type.clone());
                    let handle = EntityHandle::fabricated(
                        payload,
                        target_address,
                        target_set,
                        target_schema,
                        Rc::clone(session),
                    );
                    Ok(NavigationValue::Entity(handle))
                }
            }
        }
    }
}
