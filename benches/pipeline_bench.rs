//! Benchmark for chained combinators.
//!
//! Compares nested calls, the typed flow, the `pipeline!` macro and a runtime
//! pipeline of boxed stages against a plain iterator chain.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use seqflow::compose::{PipelineBuilder, flow};
use seqflow::source::array;
use seqflow::stateless::{filter, head, map};
use seqflow::terminal::last;
use seqflow::{pipeline, thunk};
use std::hint::black_box;

fn benchmark_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("filter_map_head");

    for size in [1_000, 100_000] {
        let data: Vec<u64> = (0..size).collect();
        let limit = usize::try_from(size / 2).unwrap_or(usize::MAX);

        group.bench_with_input(BenchmarkId::new("nested", size), &data, |bencher, data| {
            bencher.iter(|| {
                let odd = filter(array(data.clone()), |value: &u64, _| value % 2 == 1);
                black_box(last(head(map(odd, |value, _| value * 3), limit)))
            });
        });

        group.bench_with_input(BenchmarkId::new("flow", size), &data, |bencher, data| {
            bencher.iter(|| {
                black_box(
                    flow(array(data.clone()))
                        .filter(|value, _| value % 2 == 1)
                        .map(|value, _| value * 3)
                        .head(limit)
                        .last(),
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("pipeline!", size), &data, |bencher, data| {
            let composed = pipeline!(
                thunk!(filter, |value: &u64, _: usize| value % 2 == 1),
                thunk!(map, |value: u64, _: usize| value * 3),
                thunk!(head, limit),
                last,
            );
            bencher.iter(|| black_box(composed(array(data.clone()))));
        });

        group.bench_with_input(BenchmarkId::new("Pipeline", size), &data, |bencher, data| {
            let built = PipelineBuilder::new()
                .stage(|sequence| filter(sequence, |value: &u64, _| value % 2 == 1))
                .stage(|sequence| map(sequence, |value: u64, _| value * 3))
                .stage(move |sequence| head(sequence, limit))
                .build_with(last);
            bencher.iter(|| black_box(built.apply(array(data.clone()))));
        });

        group.bench_with_input(BenchmarkId::new("Iterator", size), &data, |bencher, data| {
            bencher.iter(|| {
                black_box(
                    data.iter()
                        .filter(|value| *value % 2 == 1)
                        .map(|value| value * 3)
                        .take(limit)
                        .last(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_chain);
criterion_main!(benches);
