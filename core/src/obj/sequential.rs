//! Printing, hashing and equality shared by every ordered kind.
//!
//! Vectors, lists, cursors and cons cells all compare element-wise against
//! one another, so `[1 2]` equals `(1 2)` and both hash alike.

use std::borrow::Borrow;

use crate::hash::hash_sequence;
use crate::object::Object;

pub(crate) fn render_elements<T: Borrow<Object>>(
    buff: &mut String,
    open: char,
    close: char,
    elements: impl IntoIterator<Item = T>,
) {
    buff.push(open);
    for (i, element) in elements.into_iter().enumerate() {
        if i > 0 {
            buff.push(' ');
        }
        element.borrow().render(buff);
    }
    buff.push(close);
}

pub(crate) fn hash_elements<T: Borrow<Object>>(elements: impl IntoIterator<Item = T>) -> u64 {
    hash_sequence(elements.into_iter().map(|e| e.borrow().to_hash()))
}

pub(crate) fn equal_elements<T: Borrow<Object>>(
    elements: impl IntoIterator<Item = T>,
    other: &Object,
) -> bool {
    if !other.is_sequential() {
        return false;
    }
    let Ok(mut theirs) = crate::seq::iter(other) else {
        return false;
    };
    for mine in elements {
        match theirs.next() {
            Some(their) if mine.borrow().equal(&their) => {}
            _ => return false,
        }
    }
    theirs.next().is_none()
}
