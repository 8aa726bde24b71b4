use proptest::prelude::*;
use strata::obj::Cons;
use strata::seq;
use strata::{
    ARRAY_MAP_MAX_SIZE, Object, ObjectType, array_map, hash_map, integer, keyword, list, nil,
    string, vector,
};

// ============================================================================
// Strategies
// ============================================================================

fn scalar() -> impl Strategy<Value = Object> {
    prop_oneof![
        (-1_000i64..1_000).prop_map(integer),
        "[a-z]{1,6}".prop_map(|s| keyword(&s)),
        "[a-z ]{0,8}".prop_map(|s| string(s)),
    ]
}

fn entries(max: usize) -> impl Strategy<Value = Vec<(Object, Object)>> {
    prop::collection::vec((scalar(), scalar()), 0..max)
}

fn elements() -> impl Strategy<Value = Vec<Object>> {
    prop::collection::vec(scalar(), 0..20)
}

/// A cons chain over `values`; always walked, never counted.
fn cons_chain(values: &[Object]) -> Object {
    values.iter().rev().fold(nil(), |tail, head| {
        Cons::new(head.clone(), tail).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // ========================================================================
    // Hash / Equality Consistency
    // ========================================================================

    #[test]
    fn equal_maps_hash_equal(es in entries(12)) {
        let m1 = array_map(es.clone());
        let m2 = array_map(es);
        prop_assert!(m1.equal(&m2));
        prop_assert_eq!(m1.to_hash(), m2.to_hash());
    }

    #[test]
    fn map_equals_itself(es in entries(20)) {
        let m = hash_map(es);
        prop_assert!(m.equal(&m));
    }

    #[test]
    fn equality_implies_hash_equality(a in elements(), b in elements()) {
        let va = vector(a.clone());
        let lb = list(b);
        if va.equal(&lb) {
            prop_assert_eq!(va.to_hash(), lb.to_hash());
        }
        prop_assert_eq!(va.to_hash(), list(a).to_hash());
    }

    // ========================================================================
    // Immutability
    // ========================================================================

    #[test]
    fn assoc_never_mutates(es in entries(12), k in scalar(), v in scalar()) {
        let m = array_map(es);
        let before = m.to_string();
        let count = seq::count(&m).unwrap();
        let m2 = seq::assoc(&m, k.clone(), v.clone()).unwrap();
        prop_assert_eq!(m.to_string(), before);
        prop_assert_eq!(seq::count(&m).unwrap(), count);
        prop_assert_eq!(seq::get(&m2, &k), v);
    }

    // ========================================================================
    // Length
    // ========================================================================

    #[test]
    fn sequence_length_matches_elements(xs in elements()) {
        let n = xs.len();
        prop_assert_eq!(seq::sequence_length(&vector(xs.clone())).unwrap(), n);
        prop_assert_eq!(seq::sequence_length(&cons_chain(&xs)).unwrap(), n);
        prop_assert_eq!(seq::iter(&list(xs)).unwrap().count(), n);
    }

    #[test]
    fn capped_length_is_min(xs in elements(), max in 0usize..30) {
        let c = cons_chain(&xs);
        prop_assert_eq!(seq::sequence_length_max(&c, max).unwrap(), xs.len().min(max));
    }

    // ========================================================================
    // Promotion
    // ========================================================================

    #[test]
    fn array_map_promotes_only_past_threshold(n in 0i64..20) {
        let mut m = array_map([]);
        for i in 0..n {
            m = seq::assoc(&m, integer(i), integer(i)).unwrap();
        }
        let expected = if n as usize > ARRAY_MAP_MAX_SIZE {
            ObjectType::PersistentHashMap
        } else {
            ObjectType::PersistentArrayMap
        };
        prop_assert_eq!(m.object_type(), expected);
        prop_assert_eq!(seq::count(&m).unwrap(), n as usize);
        for i in 0..n {
            prop_assert_eq!(seq::get(&m, &integer(i)), integer(i));
        }
    }
}
