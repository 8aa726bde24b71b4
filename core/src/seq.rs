//! The generic sequence/collection protocol.
//!
//! Each function resolves its receiver with [`dispatch!`](crate::dispatch)
//! and queries the kind's capabilities. Traversal on a value that cannot be
//! traversed fails with [`Error::NotSeqable`]; associative reads on a value
//! that is not associative quietly answer `nil` or the supplied default.

use crate::behavior::ObjectBehavior;
use crate::dispatch;
use crate::error::{Error, Result};
use crate::obj::Cons;
use crate::object::{Object, nil};

// ============================================================================
// Sequences
// ============================================================================

/// A sequence view of `s`, or `nil` when `s` is empty.
pub fn seq(s: &Object) -> Result<Object> {
    dispatch!(s, typed => typed.try_seq()).ok_or_else(|| Error::not_seqable("seq", s))
}

/// Like [`seq`], but the result is never shared, so it may be advanced with
/// [`next_in_place`].
pub fn fresh_seq(s: &Object) -> Result<Object> {
    fresh_seq_for("fresh_seq", s)
}

pub(crate) fn fresh_seq_for(operation: &'static str, s: &Object) -> Result<Object> {
    dispatch!(s, typed => typed.try_fresh_seq()).ok_or_else(|| Error::not_seqable(operation, s))
}

pub fn first(s: &Object) -> Result<Object> {
    dispatch!(s, typed => {
        if let Some(head) = typed.try_first() {
            return Ok(head);
        }
        match typed.try_seq() {
            Some(realized) => Ok(first_of(&realized)),
            None => Err(Error::not_seqable("first", s)),
        }
    })
}

/// The rest of `s` after its first element, or `nil`.
pub fn next(s: &Object) -> Result<Object> {
    dispatch!(s, typed => {
        if let Some(rest) = typed.try_next() {
            return Ok(rest);
        }
        match typed.try_seq() {
            Some(realized) => Ok(next_of(&realized)),
            None => Err(Error::not_seqable("next", s)),
        }
    })
}

/// Advances `s` itself when it is a cursor; otherwise realizes a fresh
/// sequence and advances that.
pub fn next_in_place(s: &Object) -> Result<Object> {
    dispatch!(s, typed => {
        if let Some(rest) = typed.try_next_in_place() {
            return Ok(rest);
        }
        match typed.try_fresh_seq() {
            Some(realized) => Ok(advance(&realized)),
            None => Err(Error::not_seqable("next_in_place", s)),
        }
    })
}

// Helpers below take a realized sequence: `nil` or a Sequenceable cursor.

fn first_of(realized: &Object) -> Object {
    dispatch!(realized, typed => typed.try_first()).unwrap_or_else(nil)
}

fn next_of(realized: &Object) -> Object {
    dispatch!(realized, typed => typed.try_next()).unwrap_or_else(nil)
}

fn advance(realized: &Object) -> Object {
    dispatch!(realized, typed => typed.try_next_in_place()).unwrap_or_else(nil)
}

/// Adds `x` to `s` the way `s` grows: lists and sequences at the front,
/// vectors at the back. Seqable-only values become a [`Cons`] over their
/// sequence. `conj` onto `nil` answers `nil`.
pub fn conj(s: &Object, x: Object) -> Result<Object> {
    if s.is_nil() {
        return Ok(nil());
    }
    dispatch!(s, typed => {
        if let Some(grown) = typed.try_cons(&x) {
            return Ok(grown);
        }
        match typed.try_fresh_seq() {
            Some(tail) => Ok(Cons::with_tail(x, tail)),
            None => Err(Error::not_seqable("conj", s)),
        }
    })
}

/// Walks any seqable value. Iteration runs over a fresh sequence, so it
/// never disturbs other holders of `s`.
pub fn iter(s: &Object) -> Result<SeqIter> {
    iter_for("iter", s)
}

pub struct SeqIter {
    current: Object,
}

impl Iterator for SeqIter {
    type Item = Object;

    fn next(&mut self) -> Option<Object> {
        if self.current.is_nil() {
            return None;
        }
        let item = first_of(&self.current);
        self.current = advance(&self.current);
        Some(item)
    }
}

// ============================================================================
// Counting
// ============================================================================

/// Number of elements in `s`. Countable kinds answer directly; others are
/// walked.
pub fn sequence_length(s: &Object) -> Result<usize> {
    sequence_length_max(s, usize::MAX)
}

/// Like [`sequence_length`], but a walk stops after `max` elements. Countable
/// kinds answer their full count regardless of `max`.
pub fn sequence_length_max(s: &Object, max: usize) -> Result<usize> {
    if let Some(count) = dispatch!(s, typed => typed.try_count()) {
        return Ok(count);
    }
    let mut cursor = fresh_seq_for("sequence_length", s)?;
    let mut length = 0;
    while cursor.is_some() && length < max {
        length += 1;
        cursor = advance(&cursor);
    }
    Ok(length)
}

pub fn count(s: &Object) -> Result<usize> {
    sequence_length(s)
}

// ============================================================================
// Associative Access
// ============================================================================

pub fn assoc(m: &Object, key: Object, value: Object) -> Result<Object> {
    dispatch!(m, typed => typed.try_assoc(key, value))
        .ok_or_else(|| Error::not_associatively_writable("assoc", m))
}

/// The value under `key`, or `nil`. Never fails.
pub fn get(m: &Object, key: &Object) -> Object {
    dispatch!(m, typed => typed.lookup(key))
}

/// The value under `key`, or `fallback`. Never fails.
pub fn get_or(m: &Object, key: &Object, fallback: &Object) -> Object {
    dispatch!(m, typed => typed.lookup_or(key, fallback))
}

/// Folds [`get`] over `keys`. Only a non-seqable `keys` is an error.
pub fn get_in(m: &Object, keys: &Object) -> Result<Object> {
    let keys = iter_for("get_in", keys)?;
    Ok(keys.fold(m.clone(), |current, key| get(&current, &key)))
}

/// [`get_in`], answering `fallback` when the result is `nil`.
pub fn get_in_or(m: &Object, keys: &Object, fallback: &Object) -> Result<Object> {
    let found = get_in(m, keys)?;
    Ok(if found.is_nil() {
        fallback.clone()
    } else {
        found
    })
}

fn iter_for(operation: &'static str, s: &Object) -> Result<SeqIter> {
    Ok(SeqIter {
        current: fresh_seq_for(operation, s)?,
    })
}

// ============================================================================
// Metadata
// ============================================================================

/// Attached metadata, or `nil`.
pub fn meta(o: &Object) -> Object {
    dispatch!(o, typed => typed.metadata()).unwrap_or_else(nil)
}

pub fn with_meta(o: &Object, meta: &Object) -> Result<Object> {
    dispatch!(o, typed => typed.try_with_meta(meta))
        .unwrap_or_else(|| Err(Error::not_metadatable("with_meta", o)))
}

// ============================================================================
// Objectable
// ============================================================================

pub fn equal(a: &Object, b: &Object) -> bool {
    a.equal(b)
}

pub fn to_hash(o: &Object) -> u64 {
    o.to_hash()
}

pub fn to_string(o: &Object, buff: &mut String) {
    o.render(buff);
}

pub fn is_nil(o: &Object) -> bool {
    o.is_nil()
}

pub fn is_some(o: &Object) -> bool {
    o.is_some()
}
