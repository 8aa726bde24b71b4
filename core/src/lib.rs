//! Object model and sequence protocol for the Strata runtime
//!
//! Every runtime value is an [`Object`] handle tagged with its concrete kind.
//! Kinds declare capabilities (Seqable, Countable, AssociativelyReadable, ...)
//! and the generic operations in [`seq`] dispatch on those capabilities
//! without dynamic calls.

#![recursion_limit = "512"]

pub mod behavior;
pub mod error;
pub mod hash;
pub mod interner;
pub mod obj;
pub mod object;
pub mod seq;

// Re-export commonly used items for convenience
pub use behavior::{Capabilities, Capability, ObjectBehavior};
pub use error::{Error, Result};
pub use interner::InternedName;
pub use obj::{
    ARRAY_MAP_MAX_SIZE, array_map, boolean, empty_map, hash_map, integer, keyword, list, real,
    string, symbol, vector,
};
pub use object::{Object, ObjectType, Visitor, nil, visit_object};
pub use seq::{
    SeqIter, assoc, conj, count, first, fresh_seq, get, get_in, get_in_or, get_or, iter, meta,
    next, next_in_place, sequence_length, sequence_length_max, with_meta,
};
