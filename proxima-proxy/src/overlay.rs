//! Change overlays and dirty-detection tags.
//!
//! An overlay shadows the backing payload: a member present in the overlay
//! is authoritative for reads, whatever the payload carries. Dirtiness is
//! detected by comparing a content hash of the overlay against a "tag"
//! recorded at the last checkpoint (creation, reload, or flush). The hash
//! comparison is an approximation: a colliding change-back cannot be told
//! apart from no change.

use crate::value::{NavigationValue, PropertyValue};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hasher;

/// Pending property changes plus the dirty-detection tag.
#[derive(Debug)]
pub struct ChangeOverlay {
    changes: BTreeMap<String, PropertyValue>,
    tag: u64,
}

impl ChangeOverlay {
    /// Creates an empty, clean overlay.
    #[must_use]
    pub fn new() -> Self {
        let mut overlay = Self {
            changes: BTreeMap::new(),
            tag: 0,
        };
        overlay.tag = overlay.content_hash();
        overlay
    }

    /// Hash of the current overlay content.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for (name, value) in &self.changes {
            hasher.write(name.as_bytes());
            value.write_fingerprint(&mut hasher);
        }
        hasher.finish()
    }

    /// Records a pending change, overwriting any prior pending value.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.changes.insert(name.into(), value);
    }

    /// Removes a pending change.
    pub fn remove(&mut self, name: &str) {
        self.changes.remove(name);
    }

    /// Caches a payload-derived value without flipping the dirty flag:
    /// the tag is advanced together with the insertion, but only if the
    /// overlay was clean at its tag — an already-dirty overlay stays dirty.
    pub fn cache(&mut self, name: impl Into<String>, value: PropertyValue) {
        let checkpoint = self.content_hash();
        self.changes.insert(name.into(), value);
        if checkpoint == self.tag {
            self.tag = self.content_hash();
        }
    }

    /// Looks up a pending (or cached) value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.changes.get(name)
    }

    /// Whether the overlay holds a value for this member.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.changes.contains_key(name)
    }

    /// All member names present in the overlay.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.changes.keys().map(String::as_str)
    }

    /// Whether the content differs from the last checkpoint.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.content_hash() != self.tag
    }

    /// Re-checkpoints the tag at the current content (successful flush).
    pub fn checkpoint(&mut self) {
        self.tag = self.content_hash();
    }

    /// Drops all content and re-checkpoints clean (reload).
    pub fn clear(&mut self) {
        self.changes.clear();
        self.tag = self.content_hash();
    }

    /// Number of overlaid members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether the overlay holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Pending relinks and resolved navigation cache.
///
/// Invariant: a member present in `changes` is authoritative and never
/// simultaneously present in `cache` — recording a relink evicts the
/// cache entry for the same member.
#[derive(Debug)]
pub struct LinkOverlay {
    changes: BTreeMap<String, NavigationValue>,
    cache: HashMap<String, NavigationValue>,
    tag: u64,
}

impl LinkOverlay {
    /// Creates an empty, clean overlay.
    #[must_use]
    pub fn new() -> Self {
        let mut overlay = Self {
            changes: BTreeMap::new(),
            cache: HashMap::new(),
            tag: 0,
        };
        overlay.tag = overlay.content_hash();
        overlay
    }

    /// Hash of the pending relinks (the cache never participates).
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for (name, value) in &self.changes {
            hasher.write(name.as_bytes());
            value.write_fingerprint(&mut hasher);
        }
        hasher.finish()
    }

    /// Records an explicit relink, evicting any cached resolution for the
    /// same member.
    pub fn record_change(&mut self, name: impl Into<String>, value: NavigationValue) {
        let name = name.into();
        self.cache.remove(&name);
        self.changes.insert(name, value);
    }

    /// Stores a payload-resolved result for reuse by later reads.
    pub fn cache_resolved(&mut self, name: impl Into<String>, value: NavigationValue) {
        self.cache.insert(name.into(), value);
    }

    /// Looks up a pending relink.
    #[must_use]
    pub fn change(&self, name: &str) -> Option<&NavigationValue> {
        self.changes.get(name)
    }

    /// Looks up a cached resolution.
    #[must_use]
    pub fn cached(&self, name: &str) -> Option<&NavigationValue> {
        self.cache.get(name)
    }

    /// All members with pending relinks.
    pub fn changed_names(&self) -> impl Iterator<Item = &str> {
        self.changes.keys().map(String::as_str)
    }

    /// Whether the pending relinks differ from the last checkpoint.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.content_hash() != self.tag
    }

    /// Re-checkpoints the tag at the current content (successful flush).
    pub fn checkpoint(&mut self) {
        self.tag = self.content_hash();
    }

    /// Drops relinks and cache and re-checkpoints clean (reload).
    pub fn clear(&mut self) {
        self.changes.clear();
        self.cache.clear();
        self.tag = self.content_hash();
    }

    /// Number of pending relinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether there are no pending relinks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Whether the cache holds an entry for this member. Exposed for the
    /// eviction invariant; reads should go through `change`/`cached`.
    #[must_use]
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }
}
