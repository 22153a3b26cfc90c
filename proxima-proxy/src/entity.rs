//! Entity handler.
//!
//! One handle owns one entity's identity, attach lifecycle, pending
//! changes, and media state. Reads consult the change overlay first, then
//! the backing payload, fetching remotely only where the payload has
//! nothing inline. Every mutation requests a CHANGED transition from the
//! session context. Reload replaces the backing payload and resets every
//! overlay to a clean checkpoint.

use crate::annotations::{MemberAnnotationMaps, MemberAnnotations};
use crate::error::{ProxyError, ProxyResult};
use crate::overlay::{ChangeOverlay, LinkOverlay};
use crate::session::Session;
use crate::structured::{bind_unowned, materialize_property, resolve_navigation, StructuredValue};
use crate::value::{NavigationValue, PropertyValue};
use proxima_schema::{NavigationMember, ScalarMember, StreamMember, StructuredType};
use proxima_types::{
    AttachStatus, EntityUuid, InstanceId, KeyValue, ResourceAddress, TypeName,
};
use proxima_wire::{MediaStream, RetrievePrefs, WireEntity};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tracing::{debug, warn};

pub(crate) struct EntityInner {
    schema: Arc<StructuredType>,
    session: Rc<Session>,
    payload: WireEntity,
    uuid: EntityUuid,
    base_address: Option<ResourceAddress>,
    expand: Vec<String>,
    select: Vec<String>,
    props: ChangeOverlay,
    links: LinkOverlay,
    stream: Option<MediaStream>,
    streamed_props: HashMap<String, MediaStream>,
    annotations: HashMap<String, Value>,
    member_annotations: MemberAnnotationMaps,
    instance: InstanceId,
}

/// Handle on one entity. Cloning is cheap and preserves identity; at most
/// one thread reads or mutates a given handle at a time.
#[derive(Clone)]
pub struct EntityHandle {
    inner: Rc<RefCell<EntityInner>>,
}

impl EntityHandle {
    /// Creates a brand-new entity of the declared type, with no backing
    /// payload and no address yet.
    #[must_use]
    pub fn create(schema: Arc<StructuredType>, session: Rc<Session>) -> Self {
        let mut payload = WireEntity::new(schema.name().clone());
        payload.is_media_entity = schema.has_stream();
        let uuid = EntityUuid::new(None, schema.name().clone(), None);
        Self::build(schema, session, payload, uuid, None)
    }

    /// Wraps a retrieved payload belonging to the given entity set,
    /// deriving the key (and from it the address) from the payload.
    pub fn from_payload(
        payload: WireEntity,
        entity_set: ResourceAddress,
        schema: Arc<StructuredType>,
        session: Rc<Session>,
    ) -> ProxyResult<Self> {
        let key = derive_key(&schema, &payload);
        Self::hydrate(payload, entity_set, key, schema, session)
    }

    /// Wraps a retrieved payload whose key is already known, e.g. from a
    /// parent collection.
    pub fn with_key(
        key: KeyValue,
        payload: WireEntity,
        entity_set: ResourceAddress,
        schema: Arc<StructuredType>,
        session: Rc<Session>,
    ) -> ProxyResult<Self> {
        Self::hydrate(payload, entity_set, Some(key), schema, session)
    }

    fn hydrate(
        mut payload: WireEntity,
        entity_set: ResourceAddress,
        key: Option<KeyValue>,
        schema: Arc<StructuredType>,
        session: Rc<Session>,
    ) -> ProxyResult<Self> {
        payload.is_media_entity = schema.has_stream();

        let base = if let Some(edit) = payload.edit_link.clone() {
            Some(edit)
        } else if let Some(key) = &key {
            debug!(%key, "appending key segment");
            let address = entity_set.with_key(key)?;
            payload.edit_link = Some(address.clone());
            Some(address)
        } else {
            None
        };

        let uuid = EntityUuid::new(Some(entity_set), schema.name().clone(), key);
        Ok(Self::build(schema, session, payload, uuid, base))
    }

    /// Wraps an empty target entity fabricated during navigation, bound
    /// to a constructed address.
    pub(crate) fn fabricated(
        mut payload: WireEntity,
        entity_address: ResourceAddress,
        entity_set: ResourceAddress,
        schema: Arc<StructuredType>,
        session: Rc<Session>,
    ) -> Self {
        payload.is_media_entity = schema.has_stream();
        let uuid = EntityUuid::new(Some(entity_set), schema.name().clone(), None);
        Self::build(schema, session, payload, uuid, Some(entity_address))
    }

    fn build(
        schema: Arc<StructuredType>,
        session: Rc<Session>,
        payload: WireEntity,
        uuid: EntityUuid,
        base_address: Option<ResourceAddress>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(EntityInner {
                schema,
                session,
                payload,
                uuid,
                base_address,
                expand: Vec::new(),
                select: Vec::new(),
                props: ChangeOverlay::new(),
                links: LinkOverlay::new(),
                stream: None,
                streamed_props: HashMap::new(),
                annotations: HashMap::new(),
                member_annotations: MemberAnnotationMaps::default(),
                instance: InstanceId::new(),
            })),
        }
    }

    pub(crate) fn from_inner(inner: Rc<RefCell<EntityInner>>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<EntityInner>> {
        Rc::downgrade(&self.inner)
    }

    /// The logical identity of this entity.
    #[must_use]
    pub fn uuid(&self) -> EntityUuid {
        self.inner.borrow().uuid.clone()
    }

    /// Replaces the identity, e.g. after the context reconciles a freshly
    /// created entity with its server-assigned key.
    pub fn update_uuid(&self, entity_set: Option<ResourceAddress>, key: Option<KeyValue>) -> EntityUuid {
        let mut inner = self.inner.borrow_mut();
        let type_name = inner.uuid.type_name().clone();
        inner.uuid = EntityUuid::new(entity_set, type_name, key);
        inner.uuid.clone()
    }

    /// This handler instance's session-unique id.
    #[must_use]
    pub fn instance_id(&self) -> InstanceId {
        self.inner.borrow().instance
    }

    /// The declared type name.
    #[must_use]
    pub fn type_name(&self) -> TypeName {
        self.inner.borrow().uuid.type_name().clone()
    }

    /// The entity-set address, if known.
    #[must_use]
    pub fn entity_set_address(&self) -> Option<ResourceAddress> {
        self.inner.borrow().uuid.entity_set().cloned()
    }

    /// The entity's own address, if it is addressable yet.
    #[must_use]
    pub fn entity_address(&self) -> Option<ResourceAddress> {
        self.inner.borrow().base_address.clone()
    }

    /// A snapshot of the backing payload.
    #[must_use]
    pub fn payload(&self) -> WireEntity {
        self.inner.borrow().payload.clone()
    }

    /// The concurrency token carried by the backing payload.
    #[must_use]
    pub fn etag(&self) -> Option<String> {
        self.inner.borrow().payload.etag.clone()
    }

    /// Overrides the concurrency token on the backing payload.
    pub fn set_etag(&self, etag: impl Into<String>) {
        self.inner.borrow_mut().payload.etag = Some(etag.into());
    }

    /// Registers this entity with the session context as ATTACHED, without
    /// overriding an existing status.
    pub fn attach(&self) {
        self.attach_as(AttachStatus::Attached, false);
    }

    pub(crate) fn request_changed(&self) {
        self.attach_as(AttachStatus::Changed, true);
    }

    fn attach_as(&self, status: AttachStatus, override_status: bool) {
        let session = self.session();
        let context = session.context();
        if context.is_attached(self.instance_id()) {
            if override_status {
                context.set_status(self, status);
            }
        } else {
            context.attach(self, status);
        }
    }

    /// Whether any modification is pending: a property overlay diverging
    /// from its tag, a link overlay diverging from its tag, a buffered
    /// primary stream, or any named-stream replacement.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        let inner = self.inner.borrow();
        inner.props.is_dirty()
            || inner.links.is_dirty()
            || inner.stream.is_some()
            || !inner.streamed_props.is_empty()
    }

    /// Re-checkpoints both overlay tags at their current content, making
    /// the handler read as unchanged. Called after a successful flush.
    pub fn checkpoint(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.props.checkpoint();
        inner.links.checkpoint();
    }

    /// Adds members to the pending `$expand` restriction. No remote
    /// effect until the next reload. Returns the handle for chaining.
    pub fn expand(&self, names: &[&str]) -> Self {
        self.inner
            .borrow_mut()
            .expand
            .extend(names.iter().map(|s| (*s).to_string()));
        self.clone()
    }

    /// Adds members to the pending `$select` restriction. No remote
    /// effect until the next reload. Returns the handle for chaining.
    pub fn select(&self, names: &[&str]) -> Self {
        self.inner
            .borrow_mut()
            .select
            .extend(names.iter().map(|s| (*s).to_string()));
        self.clone()
    }

    /// Drops any pending expand/select restriction.
    pub fn clear_query_options(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.expand.clear();
        inner.select.clear();
    }

    /// Re-binds this handler to a new backing payload: the key is
    /// re-derived, the address adopted if none was known, and all
    /// overlays, named streams, annotations, and dirty tags reset to a
    /// clean checkpoint. The buffered primary stream is left alone; reload
    /// discards it separately on success.
    pub fn rebind(&self, mut payload: WireEntity) {
        let mut inner = self.inner.borrow_mut();
        payload.is_media_entity = inner.schema.has_stream();

        let key = derive_key(&inner.schema, &payload);
        inner.uuid = EntityUuid::new(
            inner.uuid.entity_set().cloned(),
            inner.uuid.type_name().clone(),
            key,
        );
        if inner.base_address.is_none() {
            inner.base_address = payload.edit_link.clone();
        }

        inner.payload = payload;
        inner.props.clear();
        inner.links.clear();
        inner.streamed_props.clear();
        inner.annotations.clear();
        inner.member_annotations.clear();
    }

    /// Reloads the entity from the service.
    ///
    /// Requires an address. The retrieval honors any pending expand/select
    /// restriction and asks for protocol annotations when the negotiated
    /// version supports them. An empty body, a transport failure, or a
    /// reloaded key that no longer matches the identity all surface as
    /// `InvalidArgument`; on key mismatch the payload has already been
    /// replaced and the overlays reset — the handler is re-hydrated but
    /// its identity is suspect, and no rollback is attempted.
    pub fn load(&self) -> ProxyResult<()> {
        let (uuid, base, expand, select, session) = {
            let inner = self.inner.borrow();
            (
                inner.uuid.clone(),
                inner.base_address.clone(),
                inner.expand.clone(),
                inner.select.clone(),
                Rc::clone(&inner.session),
            )
        };
        let type_name = uuid.type_name().clone();
        let key = uuid.key().cloned();
        let key_label = key.as_ref().map(ToString::to_string).unwrap_or_default();

        let Some(base) = base else {
            return Err(ProxyError::invalid(
                &type_name,
                &key_label,
                "entity has no address to reload from",
            ));
        };
        let address = base.with_query_options(&expand, &select);

        let prefs = RetrievePrefs {
            include_annotations: session.client().protocol_version().supports_annotations(),
        };
        let retrieved = match session.client().retrieve(&address, &prefs) {
            Ok(retrieved) => retrieved,
            Err(error) => {
                warn!(entity = %uuid, %error, "error retrieving entity");
                return Err(ProxyError::invalid(
                    &type_name,
                    &key_label,
                    format!("error retrieving {address}: {error}"),
                ));
            }
        };
        let Some(payload) = retrieved.payload else {
            warn!(entity = %uuid, "entity not found");
            return Err(ProxyError::invalid(
                &type_name,
                &key_label,
                format!("no entity at {address}"),
            ));
        };

        self.rebind(payload);
        if let Some(etag) = retrieved.etag {
            self.set_etag(etag);
        }

        if let Some(original) = &key {
            let derived = self.inner.borrow().uuid.key().cloned();
            if derived.as_ref() != Some(original) {
                warn!(entity = %uuid, "reloaded payload derives a different key");
                return Err(ProxyError::invalid(
                    &type_name,
                    &key_label,
                    "reloaded entity key does not match identity",
                ));
            }
        }

        self.inner.borrow_mut().stream = None;
        Ok(())
    }

    /// Stages a replacement for the primary media stream. Ignored for
    /// types that declare no stream; any previously buffered stream is
    /// released.
    pub fn set_stream(&self, stream: MediaStream) {
        if !self.inner.borrow().schema.has_stream() {
            return;
        }
        self.inner.borrow_mut().stream = Some(stream);
        self.request_changed();
    }

    /// The primary media stream: a buffered replacement if one is staged,
    /// else a one-time fetch from the payload's content source, cached as
    /// if staged so a second read does not fetch again.
    pub fn stream(&self) -> ProxyResult<Option<MediaStream>> {
        if let Some(stream) = self.inner.borrow().stream.clone() {
            return Ok(Some(stream));
        }

        let (has_stream, source, hint, session) = {
            let inner = self.inner.borrow();
            (
                inner.schema.has_stream(),
                inner.payload.media_content_source.clone(),
                inner.payload.media_content_type.clone(),
                Rc::clone(&inner.session),
            )
        };
        let Some(source) = source else {
            return Ok(None);
        };
        if !has_stream {
            return Ok(None);
        }

        let fetched = session.client().fetch_media(&source, hint.as_deref())?;
        self.inner.borrow_mut().stream = Some(fetched.clone());
        Ok(Some(fetched))
    }

    /// The buffered primary-stream replacement, if any. Exposed for the
    /// persistence layer.
    #[must_use]
    pub fn stream_change(&self) -> Option<MediaStream> {
        self.inner.borrow().stream.clone()
    }

    /// Pending named-stream replacements. Exposed for the persistence
    /// layer.
    #[must_use]
    pub fn pending_stream_properties(&self) -> Vec<(String, MediaStream)> {
        self.inner
            .borrow()
            .streamed_props
            .iter()
            .map(|(name, stream)| (name.clone(), stream.clone()))
            .collect()
    }

    /// Pending (and cached) property overlay entries. Exposed for the
    /// persistence layer.
    #[must_use]
    pub fn pending_properties(&self) -> Vec<(String, PropertyValue)> {
        let inner = self.inner.borrow();
        inner
            .props
            .names()
            .map(|name| {
                let value = inner.props.get(name).cloned();
                (name.to_string(), value.unwrap_or_else(PropertyValue::null))
            })
            .collect()
    }

    /// Pending navigation relinks. Exposed for the persistence layer.
    #[must_use]
    pub fn pending_links(&self) -> Vec<(String, NavigationValue)> {
        let inner = self.inner.borrow();
        inner
            .links
            .changed_names()
            .map(|name| {
                let value = inner.links.change(name).cloned();
                (name.to_string(), value.unwrap_or(NavigationValue::Null))
            })
            .collect()
    }

    /// Whether a resolved navigation result is cached for this member.
    #[must_use]
    pub fn is_link_cached(&self, name: &str) -> bool {
        self.inner.borrow().links.is_cached(name)
    }

    /// Reads a protocol annotation by namespace-qualified term: the
    /// in-memory annotation map first, then the payload's annotation
    /// list, caching a non-null hit.
    #[must_use]
    pub fn annotation(&self, term: &str) -> Option<Value> {
        if let Some(value) = self.inner.borrow().annotations.get(term) {
            return Some(value.clone());
        }
        let raw = self
            .inner
            .borrow()
            .payload
            .annotation(term)
            .map(|a| a.value.clone());
        match raw {
            None | Some(Value::Null) => None,
            Some(value) => {
                self.inner
                    .borrow_mut()
                    .annotations
                    .insert(term.to_string(), value.clone());
                Some(value)
            }
        }
    }

    /// Writes a protocol annotation and requests a CHANGED transition.
    pub fn set_annotation(&self, term: impl Into<String>, value: Value) {
        self.inner.borrow_mut().annotations.insert(term.into(), value);
        self.request_changed();
    }

    /// Removes a protocol annotation and requests a CHANGED transition.
    pub fn remove_annotation(&self, term: &str) {
        self.inner.borrow_mut().annotations.remove(term);
        self.request_changed();
    }

    /// Terms of all annotations present on the backing payload.
    #[must_use]
    pub fn annotation_terms(&self) -> Vec<String> {
        self.inner
            .borrow()
            .payload
            .annotations
            .iter()
            .map(|a| a.term.clone())
            .collect()
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

    /// The annotation capability view scoped to this entity.
    #[must_use]
    pub fn annotations(&self) -> AnnotationsView {
        AnnotationsView {
            entity: self.clone(),
        }
    }

    /// The operation binding scoped to this entity's identity; service
    /// operation dispatch hangs off this address externally.
    #[must_use]
    pub fn operations(&self) -> OperationBinding {
        OperationBinding {
            type_name: self.type_name(),
            target: self.entity_address(),
        }
    }

    /// Records a property outside the declared schema and requests a
    /// CHANGED transition.
    pub fn add_additional_property(&self, name: impl Into<String>, value: Value) {
        self.inner
            .borrow_mut()
            .props
            .insert(name.into(), PropertyValue::Json(value));
        self.request_changed();
    }

    /// Removes a pending additional property and requests a CHANGED
    /// transition.
    pub fn remove_additional_property(&self, name: &str) {
        self.inner.borrow_mut().props.remove(name);
        self.request_changed();
    }

    /// Reads a property outside the declared schema: overlay first, then
    /// the payload; absent and present-with-null both read as null.
    #[must_use]
    pub fn additional_property(&self, name: &str) -> PropertyValue {
        if let Some(value) = self.inner.borrow().props.get(name) {
            return value.clone();
        }
        match self.inner.borrow().payload.property(name) {
            None => PropertyValue::null(),
            Some(value) => PropertyValue::Json(value.clone()),
        }
    }

    /// Names of properties outside the declared schema: overlay entries
    /// and payload properties, minus every declared member.
    #[must_use]
    pub fn additional_property_names(&self) -> Vec<String> {
        let inner = self.inner.borrow();
        let declared: BTreeSet<&str> = inner.schema.member_names().collect();

        let mut names: BTreeSet<String> = inner
            .props
            .names()
            .filter(|name| !declared.contains(name))
            .map(str::to_string)
            .collect();
        names.extend(
            inner
                .payload
                .property_names()
                .filter(|name| !declared.contains(name))
                .map(str::to_string),
        );
        names.into_iter().collect()
    }

    /// Whether two handles are the same underlying instance, as opposed
    /// to `==`, which compares logical identity.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

fn derive_key(schema: &StructuredType, payload: &WireEntity) -> Option<KeyValue> {
    let elements = schema.ordered_key();
    if elements.is_empty() {
        return None;
    }

    let mut components = Vec::with_capacity(elements.len());
    for element in elements {
        match payload.property(&element.name) {
            Some(value) if !value.is_null() => {
                components.push((element.name.clone(), value.clone()));
            }
            _ => return None,
        }
    }

    if components.len() == 1 {
        let (_, value) = components.pop()?;
        Some(KeyValue::Single(value))
    } else {
        Some(KeyValue::Compound(components))
    }
}

impl StructuredValue for EntityHandle {
    fn schema(&self) -> Arc<StructuredType> {
        Arc::clone(&self.inner.borrow().schema)
    }

    fn session(&self) -> Rc<Session> {
        Rc::clone(&self.inner.borrow().session)
    }

    fn owning_entity(&self) -> Option<EntityHandle> {
        Some(self.clone())
    }

    fn error_identity(&self) -> (String, String) {
        let inner = self.inner.borrow();
        (
            inner.uuid.type_name().to_string(),
            inner.uuid.key().map(ToString::to_string).unwrap_or_default(),
        )
    }

    fn read_property(&self, member: &ScalarMember) -> ProxyResult<PropertyValue> {
        if let Some(value) = self.inner.borrow().props.get(&member.name) {
            return Ok(value.clone());
        }

        let raw = self.inner.borrow().payload.property(&member.name).cloned();
        let Some(raw) = raw else {
            return Ok(PropertyValue::null());
        };
        if raw.is_null() {
            return Ok(PropertyValue::null());
        }

        let session = self.session();
        let value = materialize_property(member, &raw, Some(self), &session)?;
        self.inner
            .borrow_mut()
            .props
            .cache(member.name.clone(), value.clone());
        Ok(value)
    }

    fn write_property(&self, member: &ScalarMember, value: PropertyValue) -> ProxyResult<()> {
        bind_unowned(&value, self);
        self.inner
            .borrow_mut()
            .props
            .insert(member.name.clone(), value);
        self.request_changed();
        Ok(())
    }

    fn read_stream_property(&self, member: &StreamMember) -> ProxyResult<Option<MediaStream>> {
        if let Some(stream) = self.inner.borrow().streamed_props.get(&member.name) {
            return Ok(Some(stream.clone()));
        }

        let link = self
            .inner
            .borrow()
            .payload
            .stream_edit_link(&member.name)
            .cloned();
        let Some(link) = link else {
            return Ok(None);
        };

        let session = self.session();
        match session.client().fetch_media(&link, None) {
            Ok(stream) => Ok(Some(stream)),
            Err(error) => {
                // A missing secondary stream must not abort use of the
                // entity; absent is the contract here.
                debug!(member = %member.name, %error, "named stream fetch failed; treating as absent");
                Ok(None)
            }
        }
    }

    fn write_stream_property(&self, member: &StreamMember, stream: MediaStream) -> ProxyResult<()> {
        // Insertion drops any previously staged stream for this name.
        self.inner
            .borrow_mut()
            .streamed_props
            .insert(member.name.clone(), stream);
        self.request_changed();
        Ok(())
    }

    fn read_navigation(&self, member: &NavigationMember) -> ProxyResult<NavigationValue> {
        {
            let inner = self.inner.borrow();
            if let Some(value) = inner.links.change(&member.name) {
                return Ok(value.clone());
            }
            if let Some(value) = inner.links.cached(&member.name) {
                return Ok(value.clone());
            }
        }

        let link = self
            .inner
            .borrow()
            .payload
            .navigation_link(&member.name)
            .cloned();
        let session = self.session();
        let resolved = resolve_navigation(link.as_ref(), member, Some(self), &session)?;

        if !resolved.is_null() {
            self.inner
                .borrow_mut()
                .links
                .cache_resolved(member.name.clone(), resolved.clone());
        }
        Ok(resolved)
    }

    fn write_navigation(
        &self,
        member: &NavigationMember,
        value: NavigationValue,
    ) -> ProxyResult<()> {
        // A navigation write always dirties the source entity.
        self.request_changed();
        self.inner
            .borrow_mut()
            .links
            .record_change(member.name.clone(), value);
        Ok(())
    }
}

impl PartialEq for EntityHandle {
    fn eq(&self, other: &Self) -> bool {
        if self.same_instance(other) {
            return true;
        }
        self.uuid() == other.uuid()
    }
}

impl Eq for EntityHandle {}

impl Hash for EntityHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid().hash(state);
    }
}

impl fmt::Debug for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => write!(f, "EntityHandle({})", inner.uuid),
            Err(_) => f.write_str("EntityHandle(<borrowed>)"),
        }
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.borrow().uuid)
    }
}

/// Annotation capability view scoped to one entity.
#[derive(Debug, Clone)]
pub struct AnnotationsView {
    entity: EntityHandle,
}

impl AnnotationsView {
    /// Reads an annotation by term.
    #[must_use]
    pub fn get(&self, term: &str) -> Option<Value> {
        self.entity.annotation(term)
    }

    /// Writes an annotation.
    pub fn set(&self, term: impl Into<String>, value: Value) {
        self.entity.set_annotation(term, value);
    }

    /// Removes an annotation.
    pub fn remove(&self, term: &str) {
        self.entity.remove_annotation(term);
    }

    /// Terms present on the backing payload.
    #[must_use]
    pub fn terms(&self) -> Vec<String> {
        self.entity.annotation_terms()
    }
}

/// Where service operations bound to an entity would be addressed;
/// operation dispatch itself lives outside this runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationBinding {
    type_name: TypeName,
    target: Option<ResourceAddress>,
}

impl OperationBinding {
    /// The bound entity's declared type.
    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// The bound entity's address, if it is addressable.
    #[must_use]
    pub fn target(&self) -> Option<&ResourceAddress> {
        self.target.as_ref()
    }
}
