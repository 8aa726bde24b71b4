use std::sync::Arc;

use super::sequential::{equal_elements, hash_elements, render_elements};
use crate::behavior::{
    Consable, Metadatable, ObjectBehavior, Objectable, Seqable, Sequenceable, validate_meta,
};
use crate::error::Result;
use crate::object::{Object, nil};

/// A head element in front of an arbitrary sequence.
///
/// The tail is `nil` or a cursor no other handle can reach, so advancing
/// someone else's cursor in place never changes this cell. Counting a cons
/// means walking it: there is no cached length.
#[derive(Debug)]
pub struct Cons {
    head: Object,
    tail: Object,
    meta: Option<Object>,
}

impl Cons {
    /// Prepends `head` to `tail`, which must be Seqable. The tail is copied
    /// with `fresh_seq`.
    pub fn new(head: Object, tail: Object) -> Result<Object> {
        let tail = crate::seq::fresh_seq_for("cons", &tail)?;
        Ok(Self::with_tail(head, tail))
    }

    /// `tail` must already be `nil` or an unshared cursor.
    pub(crate) fn with_tail(head: Object, tail: Object) -> Object {
        Arc::new(Cons {
            head,
            tail,
            meta: None,
        })
        .into_object()
    }

    fn fresh_tail(&self) -> Object {
        crate::dispatch!(&self.tail, typed => typed.try_fresh_seq()).unwrap_or_else(nil)
    }

    fn elements(&self) -> impl Iterator<Item = Object> + '_ {
        std::iter::once(self.head.clone()).chain(crate::seq::iter(&self.tail).into_iter().flatten())
    }
}

impl Objectable for Cons {
    fn render(&self, buff: &mut String) {
        render_elements(buff, '(', ')', self.elements());
    }

    fn to_hash(&self) -> u64 {
        hash_elements(self.elements())
    }

    fn equal(&self, other: &Object) -> bool {
        equal_elements(self.elements(), other)
    }
}

impl Seqable for Cons {
    fn seq(self: &Arc<Self>) -> Object {
        Arc::clone(self).into_object()
    }

    /// A cons is never advanced in place, so the cell itself is fresh.
    fn fresh_seq(self: &Arc<Self>) -> Object {
        Arc::clone(self).into_object()
    }
}

impl Sequenceable for Cons {
    fn first(&self) -> Object {
        self.head.clone()
    }

    fn next(&self) -> Object {
        self.fresh_tail()
    }

    fn next_in_place(self: &Arc<Self>) -> Object {
        #[cfg(test)]
        crate::seq::traversal::record();
        self.fresh_tail()
    }
}

impl Consable for Cons {
    fn cons(self: &Arc<Self>, head: Object) -> Object {
        Cons::with_tail(head, Arc::clone(self).into_object())
    }
}

impl Metadatable for Cons {
    fn meta(&self) -> Option<&Object> {
        self.meta.as_ref()
    }

    fn with_meta(&self, meta: &Object) -> Result<Object> {
        Ok(Arc::new(Cons {
            head: self.head.clone(),
            tail: self.fresh_tail(),
            meta: validate_meta(meta)?,
        })
        .into_object())
    }
}

crate::object_behavior!(Cons => Cons [Seqable, Sequenceable, Consable, Metadatable]);

/// Unlinks uniquely owned tail cells one at a time, so dropping a long chain
/// never recurses.
impl Drop for Cons {
    fn drop(&mut self) {
        let mut tail = std::mem::replace(&mut self.tail, nil());
        while let Object::Cons(cell) = tail {
            let Some(mut cell) = Arc::into_inner(cell) else {
                break;
            };
            tail = std::mem::replace(&mut cell.tail, nil());
        }
    }
}
