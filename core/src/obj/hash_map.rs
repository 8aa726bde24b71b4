use std::sync::Arc;

use im::{HashMap, Vector};
use once_cell::sync::OnceCell;
use rustc_hash::FxBuildHasher;

use super::map::{BasePersistentMap, MapBacking};
use super::sequence::Entries;
use crate::object::Object;

/// Hash-trie entries. Uses a fixed-state hasher so iteration order depends
/// only on contents, never on the process.
///
/// Cursors index into `snapshot`, which is built on first need and shared by
/// every clone of the same entries.
#[derive(Debug, Clone, Default)]
pub struct HashMapData {
    entries: HashMap<Object, Object, FxBuildHasher>,
    snapshot: Arc<OnceCell<Vector<(Object, Object)>>>,
}

impl HashMapData {
    /// Builds from `entries`; a repeated key keeps its last value.
    pub fn from_entries(entries: impl IntoIterator<Item = (Object, Object)>) -> Self {
        Self::with_entries(entries.into_iter().collect())
    }

    fn with_entries(entries: HashMap<Object, Object, FxBuildHasher>) -> Self {
        HashMapData {
            entries,
            snapshot: Arc::default(),
        }
    }

    pub(crate) fn first_entry(&self) -> Option<(&Object, &Object)> {
        self.entries.iter().next()
    }

    pub(crate) fn snapshot(&self) -> &Vector<(Object, Object)> {
        self.snapshot.get_or_init(|| {
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
    }
}

impl MapBacking for HashMapData {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn find(&self, key: &Object) -> Option<&Object> {
        self.entries.get(key)
    }

    fn entries(&self) -> impl Iterator<Item = (&Object, &Object)> {
        self.entries.iter()
    }

    fn sequence_source(&self) -> Entries {
        Entries::Hashed(self.clone())
    }

    fn wrap(map: Arc<BasePersistentMap<Self>>) -> Object {
        Object::PersistentHashMap(map)
    }

    fn assoc(map: &BasePersistentMap<Self>, key: Object, value: Object) -> Object {
        let entries = map.data.entries.update(key, value);
        Self::wrap(Arc::new(BasePersistentMap::with_data(
            HashMapData::with_entries(entries),
            map.meta.clone(),
        )))
    }
}

pub type PersistentHashMap = BasePersistentMap<HashMapData>;

crate::object_behavior!(PersistentHashMap => PersistentHashMap [
    Seqable, Countable, AssociativelyReadable, AssociativelyWritable, Metadatable,
]);

#[cfg(test)]
mod tests {
    use crate::obj::{hash_map, integer, keyword, string, vector};
    use crate::object::{Object, ObjectType};
    use crate::seq;

    #[test]
    fn test_assoc_stays_hash_map() {
        let m = hash_map([(keyword("a"), integer(1))]);
        let m2 = seq::assoc(&m, keyword("b"), integer(2)).unwrap();
        assert_eq!(m2.object_type(), ObjectType::PersistentHashMap);
        assert_eq!(seq::count(&m2).unwrap(), 2);
        assert_eq!(seq::count(&m).unwrap(), 1);
    }

    #[test]
    fn test_keys_of_mixed_kinds() {
        let m = hash_map([
            (keyword("k"), integer(1)),
            (string("k"), integer(2)),
            (integer(7), integer(3)),
        ]);
        assert_eq!(seq::get(&m, &keyword("k")), integer(1));
        assert_eq!(seq::get(&m, &string("k")), integer(2));
        assert_eq!(seq::get(&m, &integer(7)), integer(3));
    }

    #[test]
    fn test_iteration_order_is_stable() {
        let m = hash_map((0..20).map(|i| (integer(i), integer(i))));
        assert_eq!(m.to_string(), m.to_string());
        let s1 = seq::seq(&m).unwrap();
        let s2 = seq::seq(&m).unwrap();
        assert_eq!(s1, s2);
    }

    fn snapshot_built(m: &Object) -> bool {
        match m {
            Object::PersistentHashMap(map) => map.data.snapshot.get().is_some(),
            _ => false,
        }
    }

    #[test]
    fn test_first_does_not_copy_entries() {
        let m = hash_map((0..1000).map(|i| (integer(i), integer(i))));
        let first = seq::first(&m).unwrap();
        assert_eq!(seq::count(&first).unwrap(), 2);
        assert!(!snapshot_built(&m));
    }

    #[test]
    fn test_walk_builds_snapshot_once_and_shares_it() {
        let m = hash_map((0..50).map(|i| (integer(i), integer(i * 2))));
        let first = seq::first(&m).unwrap();
        let walked: Vec<Object> = seq::iter(&m).unwrap().collect();
        assert_eq!(walked.len(), 50);
        assert_eq!(walked[0], first);
        assert!(snapshot_built(&m));
        for entry in &walked {
            let key = seq::first(entry).unwrap();
            let value = seq::first(&seq::next(entry).unwrap()).unwrap();
            assert_eq!(seq::get(&m, &key), value);
        }
        let again: Vec<Object> = seq::iter(&m).unwrap().collect();
        assert_eq!(vector(walked), vector(again));
    }

    #[test]
    fn test_assoc_starts_a_new_snapshot() {
        let m = hash_map((0..20).map(|i| (integer(i), integer(i))));
        seq::iter(&m).unwrap().for_each(drop);
        let m2 = seq::assoc(&m, keyword("extra"), integer(1)).unwrap();
        assert!(!snapshot_built(&m2));
        assert_eq!(seq::iter(&m2).unwrap().count(), 21);
    }
}
