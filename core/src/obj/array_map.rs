use std::sync::Arc;

use im::Vector;

use super::hash_map::HashMapData;
use super::map::{BasePersistentMap, MapBacking};
use super::sequence::Entries;
use crate::object::Object;

/// Largest entry count an array map holds before `assoc` of a new key
/// promotes it to a hash map.
pub const ARRAY_MAP_MAX_SIZE: usize = 8;

/// Insertion-ordered entries, searched linearly.
#[derive(Debug, Clone, Default)]
pub struct ArrayMapData {
    entries: Vector<(Object, Object)>,
}

impl ArrayMapData {
    /// Builds from `entries`; a repeated key keeps its first position and
    /// its last value.
    pub fn from_entries(entries: impl IntoIterator<Item = (Object, Object)>) -> Self {
        entries
            .into_iter()
            .fold(ArrayMapData::default(), |data, (key, value)| {
                data.inserted(key, value)
            })
    }

    fn position(&self, key: &Object) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k.equal(key))
    }

    fn inserted(&self, key: Object, value: Object) -> Self {
        let mut entries = self.entries.clone();
        match self.position(&key) {
            Some(index) => {
                let existing = entries[index].0.clone();
                entries.set(index, (existing, value));
            }
            None => entries.push_back((key, value)),
        }
        ArrayMapData { entries }
    }
}

impl MapBacking for ArrayMapData {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn find(&self, key: &Object) -> Option<&Object> {
        self.entries
            .iter()
            .find(|(k, _)| k.equal(key))
            .map(|(_, v)| v)
    }

    fn entries(&self) -> impl Iterator<Item = (&Object, &Object)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    fn sequence_source(&self) -> Entries {
        Entries::Ordered(self.entries.clone())
    }

    fn wrap(map: Arc<BasePersistentMap<Self>>) -> Object {
        Object::PersistentArrayMap(map)
    }

    fn assoc(map: &BasePersistentMap<Self>, key: Object, value: Object) -> Object {
        let data = &map.data;
        if data.position(&key).is_none() && data.len() >= ARRAY_MAP_MAX_SIZE {
            tracing::debug!(count = data.len() + 1, "promoting array map to hash map");
            let promoted = HashMapData::from_entries(
                data.entries
                    .iter()
                    .cloned()
                    .chain(std::iter::once((key, value))),
            );
            return HashMapData::wrap(Arc::new(BasePersistentMap::with_data(
                promoted,
                map.meta.clone(),
            )));
        }
        Self::wrap(Arc::new(BasePersistentMap::with_data(
            data.inserted(key, value),
            map.meta.clone(),
        )))
    }
}

pub type PersistentArrayMap = BasePersistentMap<ArrayMapData>;

crate::object_behavior!(PersistentArrayMap => PersistentArrayMap [
    Seqable, Countable, AssociativelyReadable, AssociativelyWritable, Metadatable,
]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::{array_map, integer, keyword};
    use crate::object::ObjectType;
    use crate::seq;
    use tracing_test::traced_test;

    fn full_map() -> Object {
        array_map((0..ARRAY_MAP_MAX_SIZE as i64).map(|i| (integer(i), integer(i * 10))))
    }

    #[test]
    fn test_duplicate_keys_keep_first_position() {
        let m = array_map([
            (keyword("a"), integer(1)),
            (keyword("b"), integer(2)),
            (keyword("a"), integer(3)),
        ]);
        assert_eq!(m.to_string(), "{:a 3, :b 2}");
    }

    #[test]
    fn test_assoc_replacing_keeps_position() {
        let m = array_map([(keyword("a"), integer(1)), (keyword("b"), integer(2))]);
        let m2 = seq::assoc(&m, keyword("a"), integer(9)).unwrap();
        assert_eq!(m2.to_string(), "{:a 9, :b 2}");
        assert_eq!(m.to_string(), "{:a 1, :b 2}");
    }

    #[test]
    fn test_full_map_replace_stays_array_map() {
        let m = seq::assoc(&full_map(), integer(0), integer(-1)).unwrap();
        assert_eq!(m.object_type(), ObjectType::PersistentArrayMap);
        assert_eq!(seq::count(&m).unwrap(), ARRAY_MAP_MAX_SIZE);
    }

    #[test]
    #[traced_test]
    fn test_promotion_to_hash_map() {
        let m = seq::assoc(&full_map(), integer(100), integer(1000)).unwrap();
        assert_eq!(m.object_type(), ObjectType::PersistentHashMap);
        assert_eq!(seq::count(&m).unwrap(), ARRAY_MAP_MAX_SIZE + 1);
        assert_eq!(seq::get(&m, &integer(3)), integer(30));
        assert_eq!(seq::get(&m, &integer(100)), integer(1000));
        assert!(logs_contain("promoting array map to hash map"));
    }

    #[test]
    fn test_promotion_keeps_metadata() {
        let meta = array_map([(keyword("tag"), integer(1))]);
        let m = seq::with_meta(&full_map(), &meta).unwrap();
        let promoted = seq::assoc(&m, integer(100), integer(1)).unwrap();
        assert_eq!(seq::meta(&promoted), meta);
    }
}
