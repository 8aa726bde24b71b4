//! Capability traits.
//!
//! A concrete kind opts into capabilities by implementing the matching traits
//! and registering them with [`object_behavior!`](crate::object_behavior). The
//! registration fills in [`ObjectBehavior`], whose `try_*` queries default to
//! "capability absent". Read-style associative access is the exception: its
//! defaults degrade to `nil`/fallback instead of reporting absence.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::object::{Object, ObjectType, nil};

// ============================================================================
// Capability Set
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Capability {
    Seqable = 1 << 0,
    Sequenceable = 1 << 1,
    Countable = 1 << 2,
    Consable = 1 << 3,
    AssociativelyReadable = 1 << 4,
    AssociativelyWritable = 1 << 5,
    Metadatable = 1 << 6,
}

impl Capability {
    pub const ALL: [Capability; 7] = [
        Capability::Seqable,
        Capability::Sequenceable,
        Capability::Countable,
        Capability::Consable,
        Capability::AssociativelyReadable,
        Capability::AssociativelyWritable,
        Capability::Metadatable,
    ];
}

/// The capabilities one kind implements, fixed when the kind is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u16);

impl Capabilities {
    pub const EMPTY: Capabilities = Capabilities(0);

    pub const fn with(self, capability: Capability) -> Self {
        Capabilities(self.0 | capability as u16)
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability as u16 != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL
            .into_iter()
            .filter(move |capability| self.contains(*capability))
    }
}

// ============================================================================
// Capability Traits
// ============================================================================

/// Printing, hashing and structural equality. Every kind implements this.
pub trait Objectable {
    fn render(&self, buff: &mut String);
    fn to_hash(&self) -> u64;
    /// Must agree with `to_hash`: equal objects hash equal.
    fn equal(&self, other: &Object) -> bool;
}

/// Can produce a sequence view. Both methods return `nil` when empty.
pub trait Seqable {
    fn seq(self: &Arc<Self>) -> Object;
    /// Like `seq`, but the result is never shared with a previous caller, so
    /// it may be advanced with `next_in_place`.
    fn fresh_seq(self: &Arc<Self>) -> Object;
}

/// A realized, non-empty sequence cursor.
pub trait Sequenceable: Seqable {
    fn first(&self) -> Object;
    /// A new cursor one step on, or `nil`.
    fn next(&self) -> Object;
    /// Advances this cursor's own position and returns it, or `nil` when
    /// exhausted. Only valid on a cursor nobody else holds.
    fn next_in_place(self: &Arc<Self>) -> Object;
}

/// Knows its element count without traversal.
pub trait Countable {
    fn count(&self) -> usize;
}

pub trait Consable {
    fn cons(self: &Arc<Self>, head: Object) -> Object;
}

pub trait AssociativelyReadable {
    fn get(&self, key: &Object) -> Object;
    fn get_or(&self, key: &Object, fallback: &Object) -> Object;
}

pub trait AssociativelyWritable {
    /// Returns a new collection; the receiver is never modified.
    fn assoc(&self, key: Object, value: Object) -> Object;
}

pub trait Metadatable {
    fn meta(&self) -> Option<&Object>;
    /// Returns a new object sharing the receiver's data with `meta` attached.
    fn with_meta(&self, meta: &Object) -> Result<Object>;
}

/// Normalizes a candidate metadata value: `nil` clears, maps attach, anything
/// else is rejected.
pub fn validate_meta(meta: &Object) -> Result<Option<Object>> {
    if meta.is_nil() {
        Ok(None)
    } else if meta.is_map() {
        Ok(Some(meta.clone()))
    } else {
        Err(Error::invalid_metadata(meta))
    }
}

// ============================================================================
// Per-Kind Behavior
// ============================================================================

/// The capability set of one concrete kind.
///
/// Implemented through [`object_behavior!`](crate::object_behavior), never by
/// hand. Each `try_*` query returns `None` unless the kind registered the
/// capability; after monomorphization the query is a constant per kind.
pub trait ObjectBehavior: Objectable + Send + Sync + Sized + 'static {
    const TYPE: ObjectType;
    const CAPABILITIES: Capabilities;

    fn into_object(self: Arc<Self>) -> Object;

    fn try_seq(self: &Arc<Self>) -> Option<Object> {
        None
    }

    fn try_fresh_seq(self: &Arc<Self>) -> Option<Object> {
        None
    }

    fn try_first(&self) -> Option<Object> {
        None
    }

    fn try_next(&self) -> Option<Object> {
        None
    }

    fn try_next_in_place(self: &Arc<Self>) -> Option<Object> {
        None
    }

    fn try_count(&self) -> Option<usize> {
        None
    }

    fn try_cons(self: &Arc<Self>, _head: &Object) -> Option<Object> {
        None
    }

    fn try_assoc(&self, _key: Object, _value: Object) -> Option<Object> {
        None
    }

    /// Associative read; kinds without the capability answer `nil`.
    fn lookup(&self, _key: &Object) -> Object {
        tracing::trace!(kind = %Self::TYPE, "get on non-associative object");
        nil()
    }

    /// Associative read with fallback; kinds without the capability answer
    /// the fallback.
    fn lookup_or(&self, _key: &Object, fallback: &Object) -> Object {
        tracing::trace!(kind = %Self::TYPE, "get on non-associative object");
        fallback.clone()
    }

    fn metadata(&self) -> Option<Object> {
        None
    }

    fn try_with_meta(&self, _meta: &Object) -> Option<Result<Object>> {
        None
    }
}

/// Registers a kind's tag and capability set.
///
/// ```ignore
/// object_behavior!(PersistentList => PersistentList [Seqable, Countable, Consable, Metadatable]);
/// ```
///
/// The tag names both the `ObjectType` and the `Object` variant. Every listed
/// capability must be backed by the matching trait impl.
#[macro_export]
macro_rules! object_behavior {
    (@forward Seqable) => {
        fn try_seq(self: &::std::sync::Arc<Self>) -> Option<$crate::object::Object> {
            Some(<Self as $crate::behavior::Seqable>::seq(self))
        }

        fn try_fresh_seq(self: &::std::sync::Arc<Self>) -> Option<$crate::object::Object> {
            Some(<Self as $crate::behavior::Seqable>::fresh_seq(self))
        }
    };
    (@forward Sequenceable) => {
        fn try_first(&self) -> Option<$crate::object::Object> {
            Some(<Self as $crate::behavior::Sequenceable>::first(self))
        }

        fn try_next(&self) -> Option<$crate::object::Object> {
            Some(<Self as $crate::behavior::Sequenceable>::next(self))
        }

        fn try_next_in_place(self: &::std::sync::Arc<Self>) -> Option<$crate::object::Object> {
            Some(<Self as $crate::behavior::Sequenceable>::next_in_place(self))
        }
    };
    (@forward Countable) => {
        fn try_count(&self) -> Option<usize> {
            Some(<Self as $crate::behavior::Countable>::count(self))
        }
    };
    (@forward Consable) => {
        fn try_cons(
            self: &::std::sync::Arc<Self>,
            head: &$crate::object::Object,
        ) -> Option<$crate::object::Object> {
            Some(<Self as $crate::behavior::Consable>::cons(self, head.clone()))
        }
    };
    (@forward AssociativelyReadable) => {
        fn lookup(&self, key: &$crate::object::Object) -> $crate::object::Object {
            <Self as $crate::behavior::AssociativelyReadable>::get(self, key)
        }

        fn lookup_or(
            &self,
            key: &$crate::object::Object,
            fallback: &$crate::object::Object,
        ) -> $crate::object::Object {
            <Self as $crate::behavior::AssociativelyReadable>::get_or(self, key, fallback)
        }
    };
    (@forward AssociativelyWritable) => {
        fn try_assoc(
            &self,
            key: $crate::object::Object,
            value: $crate::object::Object,
        ) -> Option<$crate::object::Object> {
            Some(<Self as $crate::behavior::AssociativelyWritable>::assoc(self, key, value))
        }
    };
    (@forward Metadatable) => {
        fn metadata(&self) -> Option<$crate::object::Object> {
            <Self as $crate::behavior::Metadatable>::meta(self).cloned()
        }

        fn try_with_meta(
            &self,
            meta: &$crate::object::Object,
        ) -> Option<$crate::error::Result<$crate::object::Object>> {
            Some(<Self as $crate::behavior::Metadatable>::with_meta(self, meta))
        }
    };
    ($kind:ty => $tag:ident [$($capability:ident),* $(,)?]) => {
        impl $crate::behavior::ObjectBehavior for $kind {
            const TYPE: $crate::object::ObjectType = $crate::object::ObjectType::$tag;
            const CAPABILITIES: $crate::behavior::Capabilities =
                $crate::behavior::Capabilities::EMPTY
                    $(.with($crate::behavior::Capability::$capability))*;

            fn into_object(self: ::std::sync::Arc<Self>) -> $crate::object::Object {
                $crate::object::Object::$tag(self)
            }

            $($crate::object_behavior!(@forward $capability);)*
        }
    };
}
