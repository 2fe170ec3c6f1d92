//! B-tree benchmarks over the in-memory device.
//!
//! Measures the two hot operations: sequential insert (including splits)
//! and point lookup on a populated tree.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use burrow::{BTreeIndex, MemoryCache};

fn key(i: usize) -> Vec<u8> {
    format!("key{:05}", i).into_bytes()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_insert");

    for count in [100usize, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("sequential", count), &count, |b, &count| {
            b.iter_with_setup(
                || MemoryCache::new(256, 2048),
                |mut cache| {
                    let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
                    tree.attach(0, true).unwrap();
                    for i in 0..count {
                        tree.insert(black_box(&key(i)), b"00000000").unwrap();
                    }
                },
            );
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut cache = MemoryCache::new(256, 2048);
    let mut tree = BTreeIndex::new(8, 8, &mut cache, false);
    tree.attach(0, true).unwrap();
    for i in 0..1000 {
        tree.insert(&key(i), b"00000000").unwrap();
    }

    c.bench_function("tree_lookup", |b| {
        let mut i = 0usize;
        b.iter(|| {
            i = (i + 379) % 1000;
            black_box(tree.lookup(&key(i)).unwrap());
        });
    });
}

criterion_group!(benches, bench_insert, bench_lookup);
criterion_main!(benches);
