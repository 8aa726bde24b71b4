use std::sync::Arc;

use im::Vector;

use super::sequence::{Elements, PersistentVectorSequence};
use super::sequential::{equal_elements, hash_elements, render_elements};
use crate::behavior::{
    AssociativelyReadable, Consable, Countable, Metadatable, ObjectBehavior, Objectable, Seqable,
    validate_meta,
};
use crate::error::Result;
use crate::object::{Object, nil};

/// Indexed persistent vector. `conj` appends.
#[derive(Debug, Clone)]
pub struct PersistentVector {
    data: Vector<Object>,
    meta: Option<Object>,
}

impl PersistentVector {
    pub fn new(data: Vector<Object>) -> Self {
        PersistentVector { data, meta: None }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn nth(&self, index: usize) -> Option<&Object> {
        self.data.get(index)
    }

    fn index_of(&self, key: &Object) -> Option<&Object> {
        match key {
            Object::Integer(i) => usize::try_from(i.value())
                .ok()
                .and_then(|index| self.data.get(index)),
            _ => None,
        }
    }
}

impl Objectable for PersistentVector {
    fn render(&self, buff: &mut String) {
        render_elements(buff, '[', ']', &self.data);
    }

    fn to_hash(&self) -> u64 {
        hash_elements(&self.data)
    }

    fn equal(&self, other: &Object) -> bool {
        equal_elements(&self.data, other)
    }
}

impl Seqable for PersistentVector {
    fn seq(self: &Arc<Self>) -> Object {
        self.fresh_seq()
    }

    fn fresh_seq(self: &Arc<Self>) -> Object {
        PersistentVectorSequence::start(Elements(self.data.clone()))
    }
}

impl Countable for PersistentVector {
    fn count(&self) -> usize {
        self.len()
    }
}

impl Consable for PersistentVector {
    fn cons(self: &Arc<Self>, head: Object) -> Object {
        let mut data = self.data.clone();
        data.push_back(head);
        Arc::new(PersistentVector {
            data,
            meta: self.meta.clone(),
        })
        .into_object()
    }
}

impl AssociativelyReadable for PersistentVector {
    fn get(&self, key: &Object) -> Object {
        self.index_of(key).cloned().unwrap_or_else(nil)
    }

    fn get_or(&self, key: &Object, fallback: &Object) -> Object {
        self.index_of(key)
            .cloned()
            .unwrap_or_else(|| fallback.clone())
    }
}

impl Metadatable for PersistentVector {
    fn meta(&self) -> Option<&Object> {
        self.meta.as_ref()
    }

    fn with_meta(&self, meta: &Object) -> Result<Object> {
        Ok(Arc::new(PersistentVector {
            data: self.data.clone(),
            meta: validate_meta(meta)?,
        })
        .into_object())
    }
}

crate::object_behavior!(PersistentVector => PersistentVector [
    Seqable, Countable, Consable, AssociativelyReadable, Metadatable,
]);

#[cfg(test)]
mod tests {
    use crate::obj::{integer, keyword, list, vector};
    use crate::object::{ObjectType, nil};
    use crate::seq;

    #[test]
    fn test_render() {
        assert_eq!(vector([]).to_string(), "[]");
        assert_eq!(vector([integer(1), keyword("a")]).to_string(), "[1 :a]");
    }

    #[test]
    fn test_conj_appends() {
        let v = vector([integer(1)]);
        let v2 = seq::conj(&v, integer(2)).unwrap();
        assert_eq!(v2.object_type(), ObjectType::PersistentVector);
        assert_eq!(v2.to_string(), "[1 2]");
        assert_eq!(v.to_string(), "[1]");
    }

    #[test]
    fn test_index_lookup() {
        let v = vector([integer(10), integer(20)]);
        assert_eq!(seq::get(&v, &integer(1)), integer(20));
        assert!(seq::get(&v, &integer(2)).is_nil());
        assert!(seq::get(&v, &integer(-1)).is_nil());
        assert_eq!(seq::get_or(&v, &keyword("x"), &integer(0)), integer(0));
    }

    #[test]
    fn test_empty_vector_seq_is_nil() {
        assert!(seq::seq(&vector([])).unwrap().is_nil());
        assert_eq!(seq::first(&vector([])).unwrap(), nil());
    }

    #[test]
    fn test_vector_equals_list() {
        let v = vector([integer(1), integer(2)]);
        let l = list([integer(1), integer(2)]);
        assert_eq!(v, l);
        assert_eq!(v.to_hash(), l.to_hash());
        assert_ne!(v, vector([integer(1)]));
    }
}
