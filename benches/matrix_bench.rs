use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use fuzzmatrix::core::matrix::{expand, BenchmarkType};
use fuzzmatrix::core::trigger::PathFilter;

fn bench_matrix_expansion(c: &mut Criterion) {
    let fuzzers: Vec<String> = (0..60).map(|i| format!("fuzzer_{i}")).collect();
    let types = BenchmarkType::ALL.to_vec();

    c.bench_function("expand_60x3", |b| {
        b.iter(|| expand(black_box(&fuzzers), black_box(&types)))
    });
}

fn bench_trigger_filter(c: &mut Criterion) {
    let filter = PathFilter::new(&[
        "docker/**",
        "fuzzers/**",
        "benchmarks/**",
        "src_analysis/**",
        ".github/**",
        "requirements.txt",
    ])
    .unwrap();

    let changed: Vec<String> = (0..1000)
        .map(|i| format!("docs/section_{}/page_{}.md", i % 20, i))
        .collect();

    c.bench_function("trigger_1000_unrelated_paths", |b| {
        b.iter(|| filter.should_trigger(black_box(&changed)))
    });
}

criterion_group!(benches, bench_matrix_expansion, bench_trigger_filter);
criterion_main!(benches);
