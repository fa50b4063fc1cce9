//! Benchmarks for markup parsing.
//!
//! Run with: cargo bench -p typist-markup

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use typist_core::TypingConfig;
use typist_effects::EffectRegistry;
use typist_markup::{MarkupParser, parse_tokens};

fn plain_text(len: usize) -> String {
    "The quick brown fox jumps over the lazy dog. "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn annotated_text(repeats: usize) -> String {
    "{WAVE}[*]Hello[*]{ENDWAVE} {WAIT=0.2}{COLOR=red}world{CLEARCOLOR}{FAST} and {VAR=who}. "
        .repeat(repeats)
}

fn bench_plain(c: &mut Criterion) {
    let config = TypingConfig::default();
    let registry = EffectRegistry::with_defaults();
    let mut group = c.benchmark_group("parse/plain");
    for len in [64, 1024, 16384] {
        let text = plain_text(len);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| black_box(parse_tokens(black_box(text), &config, &registry)))
        });
    }
    group.finish();
}

fn bench_annotated(c: &mut Criterion) {
    let config = TypingConfig::default().with_global_variable("who", "you");
    let registry = EffectRegistry::with_defaults();
    let mut group = c.benchmark_group("parse/annotated");
    for repeats in [1, 16, 128] {
        let text = annotated_text(repeats);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &text, |b, text| {
            b.iter(|| black_box(parse_tokens(black_box(text), &config, &registry)))
        });
    }
    group.finish();
}

fn bench_replacements(c: &mut Criterion) {
    let config = TypingConfig::default();
    let registry = EffectRegistry::with_defaults();
    let parser = MarkupParser::new(&config, &registry);
    let text = "{RESET}x".repeat(32);
    c.bench_function("parse/reset_expansion", |b| {
        b.iter(|| black_box(parser.expand_replacements(black_box(&text))))
    });
}

criterion_group!(benches, bench_plain, bench_annotated, bench_replacements);
criterion_main!(benches);
