//! Index cursors over immutable backing stores.
//!
//! A cursor shares its store with the collection it came from and owns only
//! a position. `next` allocates a new cursor; `next_in_place` moves this one.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use im::Vector;

use super::cons::Cons;
use super::hash_map::HashMapData;
use super::map::MapBacking;
use super::sequential::{equal_elements, hash_elements, render_elements};
use crate::behavior::{Consable, Countable, Objectable, Seqable, Sequenceable};
use crate::object::{Object, nil};

/// A store a cursor can walk by index.
pub trait SequenceSource: Clone + Send + Sync + Sized + 'static {
    fn len(&self) -> usize;
    fn element(&self, index: usize) -> Object;
    fn wrap(sequence: Arc<BaseSequence<Self>>) -> Object;
}

/// A cursor positioned on one element of `source`. The position is always in
/// bounds: an exhausted cursor is represented by `nil`, never by a cursor.
#[derive(Debug)]
pub struct BaseSequence<S> {
    source: S,
    index: AtomicUsize,
}

impl<S: SequenceSource> BaseSequence<S> {
    /// A cursor on the first element, or `nil` when `source` is empty.
    pub(crate) fn start(source: S) -> Object {
        Self::at(source, 0)
    }

    fn at(source: S, index: usize) -> Object {
        if index < source.len() {
            S::wrap(Arc::new(BaseSequence {
                source,
                index: AtomicUsize::new(index),
            }))
        } else {
            nil()
        }
    }

    pub fn position(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    fn remaining(&self) -> impl Iterator<Item = Object> + '_ {
        (self.position()..self.source.len()).map(|i| self.source.element(i))
    }
}

impl<S: SequenceSource> Objectable for BaseSequence<S> {
    fn render(&self, buff: &mut String) {
        render_elements(buff, '(', ')', self.remaining());
    }

    fn to_hash(&self) -> u64 {
        hash_elements(self.remaining())
    }

    fn equal(&self, other: &Object) -> bool {
        equal_elements(self.remaining(), other)
    }
}

impl<S: SequenceSource> Seqable for BaseSequence<S> {
    fn seq(self: &Arc<Self>) -> Object {
        S::wrap(Arc::clone(self))
    }

    fn fresh_seq(self: &Arc<Self>) -> Object {
        Self::at(self.source.clone(), self.position())
    }
}

impl<S: SequenceSource> Sequenceable for BaseSequence<S> {
    fn first(&self) -> Object {
        self.source.element(self.position())
    }

    fn next(&self) -> Object {
        Self::at(self.source.clone(), self.position() + 1)
    }

    fn next_in_place(self: &Arc<Self>) -> Object {
        #[cfg(test)]
        crate::seq::traversal::record();
        let next = self.position() + 1;
        if next < self.source.len() {
            self.index.store(next, Ordering::Relaxed);
            S::wrap(Arc::clone(self))
        } else {
            nil()
        }
    }
}

impl<S: SequenceSource> Countable for BaseSequence<S> {
    fn count(&self) -> usize {
        self.source.len() - self.position()
    }
}

impl<S: SequenceSource> Consable for BaseSequence<S> {
    fn cons(self: &Arc<Self>, head: Object) -> Object {
        Cons::with_tail(head, self.fresh_seq())
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Elements of a vector or list.
#[derive(Debug, Clone)]
pub struct Elements(pub(crate) Vector<Object>);

impl SequenceSource for Elements {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn element(&self, index: usize) -> Object {
        self.0.get(index).cloned().unwrap_or_else(nil)
    }

    fn wrap(sequence: Arc<BaseSequence<Self>>) -> Object {
        Object::PersistentVectorSequence(sequence)
    }
}

/// A map's entries in iteration order.
#[derive(Debug, Clone)]
pub enum Entries {
    /// An array map's own entry vector.
    Ordered(Vector<(Object, Object)>),
    /// A hash map; its entry vector is only built once a cursor moves past
    /// the first entry.
    Hashed(HashMapData),
}

impl SequenceSource for Entries {
    fn len(&self) -> usize {
        match self {
            Entries::Ordered(entries) => entries.len(),
            Entries::Hashed(data) => data.len(),
        }
    }

    /// Each entry is yielded as a two-element vector `[k v]`.
    fn element(&self, index: usize) -> Object {
        let entry = match self {
            Entries::Ordered(entries) => entries.get(index).map(|(k, v)| (k, v)),
            Entries::Hashed(data) if index == 0 => data.first_entry(),
            Entries::Hashed(data) => data.snapshot().get(index).map(|(k, v)| (k, v)),
        };
        match entry {
            Some((key, value)) => super::vector([key.clone(), value.clone()]),
            None => nil(),
        }
    }

    fn wrap(sequence: Arc<BaseSequence<Self>>) -> Object {
        Object::PersistentMapSequence(sequence)
    }
}

pub type PersistentVectorSequence = BaseSequence<Elements>;
pub type PersistentMapSequence = BaseSequence<Entries>;

crate::object_behavior!(PersistentVectorSequence => PersistentVectorSequence [
    Seqable, Sequenceable, Countable, Consable,
]);
crate::object_behavior!(PersistentMapSequence => PersistentMapSequence [
    Seqable, Sequenceable, Countable, Consable,
]);
