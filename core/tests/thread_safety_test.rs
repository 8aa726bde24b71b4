#![recursion_limit = "512"]

use std::thread;

use strata::seq;
use strata::{Object, array_map, integer, keyword, nil, vector};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_object_is_send_sync() {
    assert_send_sync::<Object>();
}

#[test]
fn test_map_shared_across_threads() {
    let m = array_map((0..8).map(|i| (integer(i), integer(i * i))));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let m = m.clone();
            thread::spawn(move || {
                let extended = seq::assoc(&m, keyword("thread"), integer(t)).unwrap();
                (seq::get(&m, &integer(3)), seq::count(&extended).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (found, count) = handle.join().unwrap();
        assert_eq!(found, integer(9));
        assert_eq!(count, 9);
    }
    assert_eq!(seq::count(&m).unwrap(), 8);
}

#[test]
fn test_each_thread_walks_its_own_cursor() {
    let v = vector((0..100).map(integer));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let v = v.clone();
            thread::spawn(move || seq::iter(&v).unwrap().count())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 100);
    }
}

#[test]
fn test_nil_singleton_shared_across_threads() {
    let here = nil();
    let there = thread::spawn(nil).join().unwrap();
    assert!(here.identical(&there));
}
