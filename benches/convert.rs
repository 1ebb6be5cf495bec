//! UTF-16 to UTF-8 conversion benchmarks
//!
//! The bounded converters reuse one 64-byte buffer; the std baselines
//! allocate a fresh `String` per call.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rtbench::encoding::{BoundedUtf16ToUtf8, DEFAULT_CAPACITY};
use rtbench::{LibraryCodec, ManualCodec, StdCodec, Transcoder};

fn inputs() -> Vec<(&'static str, Vec<u16>)> {
    vec![
        ("short", "foobar".encode_utf16().collect()),
        ("digits", "123456789012345678901234567890".encode_utf16().collect()),
        ("mixed", "Grüße, 世界, καλημέρα 😀".encode_utf16().collect()),
        // Far beyond the buffer, measures the truncation path
        ("long", "abcdefgh".repeat(64).encode_utf16().collect()),
    ]
}

fn bench_codec<C: Transcoder + Default>(c: &mut Criterion) {
    rtbench::setup();
    let mut group = c.benchmark_group(format!("convert/{}", C::NAME));
    let mut converter: BoundedUtf16ToUtf8<C, DEFAULT_CAPACITY> = BoundedUtf16ToUtf8::new();

    for (name, units) in inputs() {
        group.throughput(Throughput::Elements(units.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &units, |b, units| {
            b.iter(|| black_box(converter.convert(black_box(units)).as_ptr()));
        });
    }

    group.finish();
}

fn bench_std_baselines(c: &mut Criterion) {
    rtbench::setup();
    let mut group = c.benchmark_group("convert/std_alloc");

    for (name, units) in inputs() {
        group.throughput(Throughput::Elements(units.len() as u64));
        group.bench_with_input(BenchmarkId::new("from_utf16_lossy", name), &units, |b, units| {
            b.iter(|| black_box(String::from_utf16_lossy(black_box(units))));
        });
        group.bench_with_input(BenchmarkId::new("from_utf16", name), &units, |b, units| {
            b.iter(|| black_box(String::from_utf16(black_box(units)).ok()));
        });
    }

    group.finish();
}

fn bench_std_codec(c: &mut Criterion) {
    bench_codec::<StdCodec>(c);
}

fn bench_library_codec(c: &mut Criterion) {
    bench_codec::<LibraryCodec>(c);
}

fn bench_manual_codec(c: &mut Criterion) {
    bench_codec::<ManualCodec>(c);
}

criterion_group!(
    benches,
    bench_std_codec,
    bench_library_codec,
    bench_manual_codec,
    bench_std_baselines
);
criterion_main!(benches);
