//! Shared persistent map implementation.
//!
//! Printing, hashing, equality, sequencing, lookup and metadata are written
//! once over [`MapBacking`]; the array and hash variants only supply storage.

use std::sync::Arc;

use super::sequence::{Entries, PersistentMapSequence};
use crate::behavior::{
    AssociativelyReadable, AssociativelyWritable, Countable, Metadatable, Objectable, Seqable,
    validate_meta,
};
use crate::error::Result;
use crate::hash::hash_ordered;
use crate::object::{Object, nil};

/// Storage behind a persistent map.
pub trait MapBacking: Clone + Send + Sync + Sized + 'static {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find(&self, key: &Object) -> Option<&Object>;

    /// Entries in this backing's canonical order. The order is stable for a
    /// given instance.
    fn entries(&self) -> impl Iterator<Item = (&Object, &Object)>;

    /// The entries, in `entries` order, as a store a cursor can index.
    fn sequence_source(&self) -> Entries;

    fn wrap(map: Arc<BasePersistentMap<Self>>) -> Object;

    /// The map with `key` bound to `value`. May change backing kind.
    fn assoc(map: &BasePersistentMap<Self>, key: Object, value: Object) -> Object;
}

#[derive(Debug, Clone)]
pub struct BasePersistentMap<B> {
    pub(crate) data: B,
    pub(crate) meta: Option<Object>,
}

impl<B: MapBacking> BasePersistentMap<B> {
    pub fn new(data: B) -> Self {
        BasePersistentMap { data, meta: None }
    }

    pub(crate) fn with_data(data: B, meta: Option<Object>) -> Self {
        BasePersistentMap { data, meta }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains_key(&self, key: &Object) -> bool {
        self.data.find(key).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Object, &Object)> {
        self.data.entries()
    }

    /// Every entry of `self` is present in `other` with an equal value.
    fn entries_match<O: MapBacking>(&self, other: &BasePersistentMap<O>) -> bool {
        self.len() == other.len()
            && self
                .entries()
                .all(|(k, v)| other.data.find(k).is_some_and(|theirs| theirs.equal(v)))
    }
}

impl<B: MapBacking> Objectable for BasePersistentMap<B> {
    fn render(&self, buff: &mut String) {
        buff.push('{');
        for (i, (key, value)) in self.entries().enumerate() {
            if i > 0 {
                buff.push_str(", ");
            }
            key.render(buff);
            buff.push(' ');
            value.render(buff);
        }
        buff.push('}');
    }

    // TODO: cache once maps carry a lazily initialized hash slot.
    fn to_hash(&self) -> u64 {
        hash_ordered(
            self.len(),
            self.entries()
                .flat_map(|(key, value)| [key.to_hash(), value.to_hash()]),
        )
    }

    fn equal(&self, other: &Object) -> bool {
        if !other.is_map() || crate::seq::count(other).ok() != Some(self.len()) {
            return false;
        }
        if self.to_hash() != other.to_hash() {
            return false;
        }
        if cfg!(feature = "hash-only-map-equality") {
            return true;
        }
        match other {
            Object::PersistentArrayMap(m) => self.entries_match(m),
            Object::PersistentHashMap(m) => self.entries_match(m),
            _ => false,
        }
    }
}

impl<B: MapBacking> Seqable for BasePersistentMap<B> {
    fn seq(self: &Arc<Self>) -> Object {
        self.fresh_seq()
    }

    fn fresh_seq(self: &Arc<Self>) -> Object {
        if self.is_empty() {
            nil()
        } else {
            PersistentMapSequence::start(self.data.sequence_source())
        }
    }
}

impl<B: MapBacking> Countable for BasePersistentMap<B> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<B: MapBacking> AssociativelyReadable for BasePersistentMap<B> {
    fn get(&self, key: &Object) -> Object {
        self.data.find(key).cloned().unwrap_or_else(nil)
    }

    fn get_or(&self, key: &Object, fallback: &Object) -> Object {
        self.data
            .find(key)
            .cloned()
            .unwrap_or_else(|| fallback.clone())
    }
}

impl<B: MapBacking> AssociativelyWritable for BasePersistentMap<B> {
    fn assoc(&self, key: Object, value: Object) -> Object {
        B::assoc(self, key, value)
    }
}

impl<B: MapBacking> Metadatable for BasePersistentMap<B> {
    fn meta(&self) -> Option<&Object> {
        self.meta.as_ref()
    }

    fn with_meta(&self, meta: &Object) -> Result<Object> {
        let meta = validate_meta(meta)?;
        Ok(B::wrap(Arc::new(BasePersistentMap::with_data(
            self.data.clone(),
            meta,
        ))))
    }
}
