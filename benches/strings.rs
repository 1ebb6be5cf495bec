//! String benchmarks - comparison, concatenation, templating, substrings

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rtbench::fixtures::strings::{arg, args, eq_decoded, eq_latin1, eq_utf8, mid, mid_owned};

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn bench_compare(c: &mut Criterion) {
    rtbench::setup();
    let foo = utf16("foo");
    let literal = utf16("foo");
    let mut group = c.benchmark_group("compare");

    group.bench_function("decoded", |b| {
        b.iter(|| black_box(eq_decoded(black_box(&foo), "foo")));
    });

    group.bench_function("latin1", |b| {
        b.iter(|| black_box(eq_latin1(black_box(&foo), b"foo")));
    });

    group.bench_function("utf8_lazy", |b| {
        b.iter(|| black_box(eq_utf8(black_box(&foo), "foo")));
    });

    group.bench_function("utf16_literal", |b| {
        b.iter(|| black_box(black_box(&foo) == &literal));
    });

    group.finish();
}

fn bench_concat(c: &mut Criterion) {
    rtbench::setup();
    let foo = String::from("foo");
    let bar = String::from("foo");
    let asdf = String::from("asdf");
    let mut group = c.benchmark_group("concat");

    // Grows as it goes
    group.bench_function("push_str", |b| {
        b.iter(|| {
            let mut concat = foo.clone();
            concat.push_str(&bar);
            concat.push_str(&asdf);
            black_box(concat)
        });
    });

    // Sizes once, then copies
    group.bench_function("slice_concat", |b| {
        b.iter(|| black_box([foo.as_str(), bar.as_str(), asdf.as_str()].concat()));
    });

    group.bench_function("format", |b| {
        b.iter(|| black_box(format!("{foo}{bar}{asdf}")));
    });

    group.finish();
}

fn bench_template(c: &mut Criterion) {
    rtbench::setup();
    let tpl = "foo: %1, bar: %2, asdf: %3";
    let mut group = c.benchmark_group("template");

    group.bench_function("arg_chain", |b| {
        b.iter(|| black_box(arg(&arg(&arg(black_box(tpl), "foo"), "bar"), "asdf")));
    });

    group.bench_function("args_single_pass", |b| {
        b.iter(|| black_box(args(black_box(tpl), &["foo", "bar", "asdf"])));
    });

    group.bench_function("format", |b| {
        b.iter(|| black_box(format!("foo: {}, bar: {}, asdf: {}", "foo", "bar", "asdf")));
    });

    group.finish();
}

fn bench_mid(c: &mut Criterion) {
    rtbench::setup();
    let needle = "foo";
    let haystack = needle.repeat(10);
    let mut group = c.benchmark_group("mid");

    group.bench_function("owned", |b| {
        b.iter(|| black_box(mid_owned(black_box(&haystack), needle.len(), needle.len()) == needle));
    });

    group.bench_function("borrowed", |b| {
        b.iter(|| black_box(mid(black_box(&haystack), needle.len(), needle.len()) == needle));
    });

    group.finish();
}

criterion_group!(benches, bench_compare, bench_concat, bench_template, bench_mid);
criterion_main!(benches);
