//! Collection proxies.
//!
//! A navigation to many entities resolves to an [`EntityCollection`]:
//! either loaded (inline-expanded payload, elements already wrapped) or
//! deferred (bound to a target address; materialization belongs to the
//! request layer, not this runtime). A navigation to a whole named entity
//! set resolves to a [`DeferredSet`].

use crate::entity::EntityHandle;
use proxima_types::{InstanceId, ResourceAddress};
use std::rc::Rc;

#[derive(Debug)]
struct CollectionInner {
    address: Option<ResourceAddress>,
    items: Vec<EntityHandle>,
    deferred: bool,
    instance: InstanceId,
}

/// A collection of target entities, loaded or deferred.
///
/// Cloning is cheap and preserves identity: the clone is the same proxy.
#[derive(Debug, Clone)]
pub struct EntityCollection {
    inner: Rc<CollectionInner>,
}

impl EntityCollection {
    /// Wraps inline-expanded elements.
    #[must_use]
    pub fn loaded(items: Vec<EntityHandle>, address: Option<ResourceAddress>) -> Self {
        Self {
            inner: Rc::new(CollectionInner {
                address,
                items,
                deferred: false,
                instance: InstanceId::new(),
            }),
        }
    }

    /// Binds a deferred collection to its target address.
    #[must_use]
    pub fn deferred(address: ResourceAddress) -> Self {
        Self {
            inner: Rc::new(CollectionInner {
                address: Some(address),
                items: Vec::new(),
                deferred: true,
                instance: InstanceId::new(),
            }),
        }
    }

    /// The loaded elements. Empty for a deferred collection.
    #[must_use]
    pub fn items(&self) -> &[EntityHandle] {
        &self.inner.items
    }

    /// Iterates over the loaded elements.
    pub fn iter(&self) -> impl Iterator<Item = &EntityHandle> {
        self.inner.items.iter()
    }

    /// The address the collection is bound to, if any.
    #[must_use]
    pub fn address(&self) -> Option<&ResourceAddress> {
        self.inner.address.as_ref()
    }

    /// Whether materialization is still pending.
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        self.inner.deferred
    }

    /// Number of loaded elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    /// Whether no elements are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.items.is_empty()
    }

    /// Whether two handles are the same proxy instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn instance_id(&self) -> InstanceId {
        self.inner.instance
    }
}

#[derive(Debug)]
struct SetInner {
    address: ResourceAddress,
    instance: InstanceId,
}

/// A whole named entity set reached through a navigation; always deferred.
#[derive(Debug, Clone)]
pub struct DeferredSet {
    inner: Rc<SetInner>,
}

impl DeferredSet {
    /// Binds a set proxy to its target address.
    #[must_use]
    pub fn new(address: ResourceAddress) -> Self {
        Self {
            inner: Rc::new(SetInner {
                address,
                instance: InstanceId::new(),
            }),
        }
    }

    /// The address the set is bound to.
    #[must_use]
    pub fn address(&self) -> &ResourceAddress {
        &self.inner.address
    }

    /// Whether two handles are the same proxy instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn instance_id(&self) -> InstanceId {
        self.inner.instance
    }
}
