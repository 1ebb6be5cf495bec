//! Directory listing benchmarks
//!
//! Compare the strategies with each other only; absolute numbers depend on
//! how many entries the directory has and what it lives on.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rtbench::fixtures::{scan, ListingStrategy};

fn bench_listing(c: &mut Criterion) {
    let config = rtbench::setup();
    let Some(root) = config.resolved_dir_root() else {
        tracing::warn!(target: "rtbench::dir", "no directory to list, skipping");
        return;
    };
    tracing::info!(target: "rtbench::dir", root = %root.display(), "listing");

    let mut group = c.benchmark_group("dir");
    for strategy in ListingStrategy::ALL {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| black_box(scan(black_box(&root), strategy).ok()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_listing);
criterion_main!(benches);
