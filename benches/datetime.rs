//! Clock benchmarks - two reads and a difference per iteration

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rtbench::fixtures::ClockSource;

fn bench_clocks(c: &mut Criterion) {
    rtbench::setup();
    let mut group = c.benchmark_group("clock");

    for source in ClockSource::ALL {
        group.bench_function(source.name(), |b| {
            b.iter(|| black_box(black_box(source).sample_pair()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clocks);
criterion_main!(benches);
