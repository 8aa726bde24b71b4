use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use strata::obj::Cons;
use strata::seq;
use strata::{Object, array_map, empty_map, hash_map, integer, keyword, nil, vector};

fn cons_chain(n: i64) -> Object {
    (0..n)
        .rev()
        .fold(nil(), |tail, i| Cons::new(integer(i), tail).unwrap())
}

// ============================================================================
// Sequence Length Benchmarks
// ============================================================================

fn bench_sequence_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_length");
    for size in [10i64, 100, 1000] {
        let counted = vector((0..size).map(integer));
        let walked = cons_chain(size);
        group.bench_with_input(BenchmarkId::new("countable", size), &counted, |b, v| {
            b.iter(|| black_box(seq::sequence_length(v).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("walked", size), &walked, |b, s| {
            b.iter(|| black_box(seq::sequence_length(s).unwrap()))
        });
    }
    group.finish();
}

// ============================================================================
// Associative Benchmarks
// ============================================================================

fn bench_assoc(c: &mut Criterion) {
    c.bench_function("assoc array map (8 entries)", |b| {
        b.iter(|| {
            let mut m = empty_map();
            for i in 0..8 {
                m = seq::assoc(&m, integer(i), integer(i)).unwrap();
            }
            black_box(m)
        })
    });

    let big = hash_map((0..1000).map(|i| (integer(i), integer(i))));
    c.bench_function("assoc hash map (1000 entries)", |b| {
        b.iter(|| black_box(seq::assoc(&big, keyword("k"), integer(1)).unwrap()))
    });
}

fn bench_get(c: &mut Criterion) {
    let small = array_map((0..8).map(|i| (integer(i), integer(i))));
    let big = hash_map((0..1000).map(|i| (integer(i), integer(i))));
    let probe = integer(7);

    c.bench_function("get array map", |b| {
        b.iter(|| black_box(seq::get(&small, &probe)))
    });
    c.bench_function("get hash map", |b| {
        b.iter(|| black_box(seq::get(&big, &probe)))
    });
    c.bench_function("get non-associative", |b| {
        b.iter(|| black_box(seq::get(&probe, &probe)))
    });
}

criterion_group!(benches, bench_sequence_length, bench_assoc, bench_get);
criterion_main!(benches);
