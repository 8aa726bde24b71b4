//! Object handles, kind tags and the dispatch engine.
//!
//! Every runtime value is an [`Object`]: a tagged, reference-counted handle to
//! one concrete kind from [`crate::obj`]. The tag is the enum variant, fixed at
//! construction. [`dispatch!`](crate::dispatch) resolves a handle to its
//! concrete kind and evaluates one body per kind, so every capability query
//! inside the body is a statically resolved call.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::behavior::{Capabilities, Capability, ObjectBehavior, Objectable};
use crate::obj::{
    Boolean, Cons, Integer, Keyword, Nil, PersistentArrayMap, PersistentHashMap,
    PersistentList, PersistentMapSequence, PersistentString, PersistentVector,
    PersistentVectorSequence, Real, Symbol,
};

// ============================================================================
// Tag Registry
// ============================================================================

/// Discriminant identifying the concrete kind behind a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Nil,
    Boolean,
    Integer,
    Real,
    PersistentString,
    Keyword,
    Symbol,
    PersistentArrayMap,
    PersistentHashMap,
    PersistentMapSequence,
    PersistentVector,
    PersistentVectorSequence,
    PersistentList,
    Cons,
}

impl ObjectType {
    pub const fn name(self) -> &'static str {
        match self {
            ObjectType::Nil => "nil",
            ObjectType::Boolean => "boolean",
            ObjectType::Integer => "integer",
            ObjectType::Real => "real",
            ObjectType::PersistentString => "persistent_string",
            ObjectType::Keyword => "keyword",
            ObjectType::Symbol => "symbol",
            ObjectType::PersistentArrayMap => "persistent_array_map",
            ObjectType::PersistentHashMap => "persistent_hash_map",
            ObjectType::PersistentMapSequence => "persistent_map_sequence",
            ObjectType::PersistentVector => "persistent_vector",
            ObjectType::PersistentVectorSequence => "persistent_vector_sequence",
            ObjectType::PersistentList => "persistent_list",
            ObjectType::Cons => "cons",
        }
    }

    pub const fn is_map(self) -> bool {
        matches!(
            self,
            ObjectType::PersistentArrayMap | ObjectType::PersistentHashMap
        )
    }

    /// Kinds that compare and hash as ordered element sequences.
    pub const fn is_sequential(self) -> bool {
        matches!(
            self,
            ObjectType::PersistentVector
                | ObjectType::PersistentVectorSequence
                | ObjectType::PersistentList
                | ObjectType::PersistentMapSequence
                | ObjectType::Cons
        )
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Object Handle
// ============================================================================

/// Handle to a heap-allocated runtime value. Cloning shares the referent.
#[derive(Clone)]
pub enum Object {
    Nil(Arc<Nil>),
    Boolean(Arc<Boolean>),
    Integer(Arc<Integer>),
    Real(Arc<Real>),
    PersistentString(Arc<PersistentString>),
    Keyword(Arc<Keyword>),
    Symbol(Arc<Symbol>),
    PersistentArrayMap(Arc<PersistentArrayMap>),
    PersistentHashMap(Arc<PersistentHashMap>),
    PersistentMapSequence(Arc<PersistentMapSequence>),
    PersistentVector(Arc<PersistentVector>),
    PersistentVectorSequence(Arc<PersistentVectorSequence>),
    PersistentList(Arc<PersistentList>),
    Cons(Arc<Cons>),
}

/// Resolves `$object` (an `&Object`) to its concrete kind and evaluates
/// `$body` with `$typed` bound to the `&Arc<Kind>`.
///
/// The body is expanded once per kind, so trait calls on `$typed` are
/// resolved statically for each kind. New kinds only need a variant here and
/// an `object_behavior!` registration; protocol functions stay untouched.
#[macro_export]
macro_rules! dispatch {
    ($object:expr, $typed:ident => $body:expr) => {
        match $object {
            $crate::object::Object::Nil($typed) => $body,
            $crate::object::Object::Boolean($typed) => $body,
            $crate::object::Object::Integer($typed) => $body,
            $crate::object::Object::Real($typed) => $body,
            $crate::object::Object::PersistentString($typed) => $body,
            $crate::object::Object::Keyword($typed) => $body,
            $crate::object::Object::Symbol($typed) => $body,
            $crate::object::Object::PersistentArrayMap($typed) => $body,
            $crate::object::Object::PersistentHashMap($typed) => $body,
            $crate::object::Object::PersistentMapSequence($typed) => $body,
            $crate::object::Object::PersistentVector($typed) => $body,
            $crate::object::Object::PersistentVectorSequence($typed) => $body,
            $crate::object::Object::PersistentList($typed) => $body,
            $crate::object::Object::Cons($typed) => $body,
        }
    };
}

/// A generic algorithm over every concrete kind.
///
/// `visit` is monomorphized per kind, so `T::TYPE`, `T::CAPABILITIES` and the
/// `try_*` queries are all compile-time resolved inside it.
pub trait Visitor {
    type Output;

    fn visit<T: ObjectBehavior>(self, typed: &Arc<T>) -> Self::Output;
}

pub fn visit_object<V: Visitor>(object: &Object, visitor: V) -> V::Output {
    crate::dispatch!(object, typed => visitor.visit(typed))
}

fn type_of<T: ObjectBehavior>(_: &Arc<T>) -> ObjectType {
    T::TYPE
}

fn capabilities_of<T: ObjectBehavior>(_: &Arc<T>) -> Capabilities {
    T::CAPABILITIES
}

static NIL: Lazy<Object> = Lazy::new(|| Object::Nil(Arc::new(Nil::new())));

/// The process-wide `nil` singleton.
pub fn nil() -> Object {
    NIL.clone()
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        crate::dispatch!(self, typed => type_of(typed))
    }

    pub fn capabilities(&self) -> Capabilities {
        crate::dispatch!(self, typed => capabilities_of(typed))
    }

    /// Whether this handle's kind implements `capability`.
    pub fn implements(&self, capability: Capability) -> bool {
        self.capabilities().contains(capability)
    }

    /// Identity test against the `nil` singleton.
    pub fn is_nil(&self) -> bool {
        self.identical(&NIL)
    }

    pub fn is_some(&self) -> bool {
        !self.is_nil()
    }

    pub fn is_map(&self) -> bool {
        self.object_type().is_map()
    }

    pub fn is_sequential(&self) -> bool {
        self.object_type().is_sequential()
    }

    /// Reference identity: both handles point at the same heap object.
    pub fn identical(&self, other: &Object) -> bool {
        std::ptr::eq(self.address(), other.address())
    }

    fn address(&self) -> *const () {
        crate::dispatch!(self, typed => Arc::as_ptr(typed) as *const ())
    }

    /// Appends the printed form of this value to `buff`.
    pub fn render(&self, buff: &mut String) {
        crate::dispatch!(self, typed => typed.render(buff))
    }

    pub fn to_hash(&self) -> u64 {
        crate::dispatch!(self, typed => typed.to_hash())
    }

    pub fn equal(&self, other: &Object) -> bool {
        crate::dispatch!(self, typed => typed.equal(other))
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buff = String::new();
        self.render(&mut buff);
        f.write_str(&buff)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<{} {}>", self.object_type(), self)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.to_hash());
    }
}
