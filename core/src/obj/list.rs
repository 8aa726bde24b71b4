use std::sync::Arc;

use im::Vector;

use super::sequence::{Elements, PersistentVectorSequence};
use super::sequential::{equal_elements, hash_elements, render_elements};
use crate::behavior::{
    Consable, Countable, Metadatable, ObjectBehavior, Objectable, Seqable, validate_meta,
};
use crate::error::Result;
use crate::object::Object;

/// Persistent list. `conj` prepends; traversal uses the vector cursor.
#[derive(Debug, Clone)]
pub struct PersistentList {
    data: Vector<Object>,
    meta: Option<Object>,
}

impl PersistentList {
    pub fn new(data: Vector<Object>) -> Self {
        PersistentList { data, meta: None }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Objectable for PersistentList {
    fn render(&self, buff: &mut String) {
        render_elements(buff, '(', ')', &self.data);
    }

    fn to_hash(&self) -> u64 {
        hash_elements(&self.data)
    }

    fn equal(&self, other: &Object) -> bool {
        equal_elements(&self.data, other)
    }
}

impl Seqable for PersistentList {
    fn seq(self: &Arc<Self>) -> Object {
        self.fresh_seq()
    }

    fn fresh_seq(self: &Arc<Self>) -> Object {
        PersistentVectorSequence::start(Elements(self.data.clone()))
    }
}

impl Countable for PersistentList {
    fn count(&self) -> usize {
        self.len()
    }
}

impl Consable for PersistentList {
    fn cons(self: &Arc<Self>, head: Object) -> Object {
        let mut data = self.data.clone();
        data.push_front(head);
        Arc::new(PersistentList {
            data,
            meta: self.meta.clone(),
        })
        .into_object()
    }
}

impl Metadatable for PersistentList {
    fn meta(&self) -> Option<&Object> {
        self.meta.as_ref()
    }

    fn with_meta(&self, meta: &Object) -> Result<Object> {
        Ok(Arc::new(PersistentList {
            data: self.data.clone(),
            meta: validate_meta(meta)?,
        })
        .into_object())
    }
}

crate::object_behavior!(PersistentList => PersistentList [
    Seqable, Countable, Consable, Metadatable,
]);
