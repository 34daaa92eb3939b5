//! Benchmark for the set combinators.
//!
//! Compares union, intersection and unique against equivalent code over
//! `std::collections::HashSet`, and the buffer hashers selected by features.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use seqflow::Sequence;
use seqflow::set::{intersection, union, unique, unique_by_hash};
use seqflow::source::array;
use std::collections::HashSet;
use std::hint::black_box;

fn values(size: usize, modulus: usize) -> Vec<usize> {
    (0..size).map(|index| (index * 7919) % modulus).collect()
}

// =============================================================================
// unique Benchmark
// =============================================================================

fn benchmark_unique(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("unique");

    for size in [1_000, 10_000, 100_000] {
        let data = values(size, size / 4);

        group.bench_with_input(BenchmarkId::new("unique", size), &data, |bencher, data| {
            bencher.iter(|| black_box(unique(array(data.clone())).values().count()));
        });

        group.bench_with_input(
            BenchmarkId::new("unique_by_hash", size),
            &data,
            |bencher, data| {
                bencher.iter(|| {
                    black_box(
                        unique_by_hash(array(data.clone()), |value: &usize| value % 1_000)
                            .values()
                            .count(),
                    )
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("HashSet", size), &data, |bencher, data| {
            bencher.iter(|| {
                let mut seen = HashSet::new();
                black_box(data.iter().filter(|value| seen.insert(**value)).count())
            });
        });
    }

    group.finish();
}

// =============================================================================
// union / intersection Benchmark
// =============================================================================

fn benchmark_union_intersection(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("union_intersection");

    for size in [1_000, 10_000] {
        let left = values(size, size);
        let right = values(size, size / 2);

        group.bench_with_input(BenchmarkId::new("union", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sequence = union([array(left.clone()), array(right.clone())]);
                black_box(sequence.map(|sequence| sequence.values().count()))
            });
        });

        group.bench_with_input(BenchmarkId::new("intersection", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sequence = intersection([array(left.clone()), array(right.clone())]);
                black_box(sequence.map(|sequence| sequence.values().count()))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_unique, benchmark_union_intersection);
criterion_main!(benches);
