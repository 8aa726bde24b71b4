//! Concrete object kinds and their constructors.

mod array_map;
mod cons;
mod hash_map;
mod keyword;
mod list;
mod map;
mod scalar;
mod sequence;
mod sequential;
mod vector;

use std::sync::Arc;

pub use array_map::{ARRAY_MAP_MAX_SIZE, ArrayMapData, PersistentArrayMap};
pub use cons::Cons;
pub use hash_map::{HashMapData, PersistentHashMap};
pub use keyword::{Keyword, Symbol};
pub use list::PersistentList;
pub use map::{BasePersistentMap, MapBacking};
pub use scalar::{Boolean, Integer, Nil, PersistentString, Real};
pub use sequence::{
    BaseSequence, Elements, Entries, PersistentMapSequence, PersistentVectorSequence,
    SequenceSource,
};
pub use vector::PersistentVector;

pub use crate::object::nil;

use crate::behavior::ObjectBehavior;
use crate::object::Object;

pub fn boolean(value: bool) -> Object {
    Arc::new(Boolean::new(value)).into_object()
}

pub fn integer(value: i64) -> Object {
    Arc::new(Integer::new(value)).into_object()
}

pub fn real(value: f64) -> Object {
    Arc::new(Real::new(value)).into_object()
}

pub fn string(data: impl Into<String>) -> Object {
    Arc::new(PersistentString::new(data)).into_object()
}

pub fn keyword(name: &str) -> Object {
    Arc::new(Keyword::new(name)).into_object()
}

pub fn symbol(name: &str) -> Object {
    Arc::new(Symbol::new(name)).into_object()
}

pub fn vector(elements: impl IntoIterator<Item = Object>) -> Object {
    Arc::new(PersistentVector::new(elements.into_iter().collect())).into_object()
}

/// A list of `elements` in the given order.
pub fn list(elements: impl IntoIterator<Item = Object>) -> Object {
    Arc::new(PersistentList::new(elements.into_iter().collect())).into_object()
}

/// An insertion-ordered map of any size. Only `assoc` promotes past
/// [`ARRAY_MAP_MAX_SIZE`].
pub fn array_map(entries: impl IntoIterator<Item = (Object, Object)>) -> Object {
    Arc::new(PersistentArrayMap::new(ArrayMapData::from_entries(entries))).into_object()
}

pub fn hash_map(entries: impl IntoIterator<Item = (Object, Object)>) -> Object {
    Arc::new(PersistentHashMap::new(HashMapData::from_entries(entries))).into_object()
}

pub fn empty_map() -> Object {
    array_map([])
}
