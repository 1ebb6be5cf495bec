//! Lock benchmarks - non-contended acquire/release
//!
//! TODO: add a contended case with several threads hammering one lock.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rtbench::fixtures::{LockFlavor, LockSet};

fn bench_uncontended(c: &mut Criterion) {
    rtbench::setup();
    let locks = LockSet::new();
    let mut group = c.benchmark_group("lock");

    for flavor in LockFlavor::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(flavor.name()), &flavor, |b, &flavor| {
            b.iter(|| locks.cycle(flavor));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_uncontended);
criterion_main!(benches);
