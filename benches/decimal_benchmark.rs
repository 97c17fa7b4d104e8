// ============================================================================
// Decimal Engine Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Parse/Format - text in and out
// 2. Arithmetic - fast path vs big-integer fallback
// 3. Powers - integer powers and square root
// 4. Codecs - binary encode/decode
// 5. Comparison - same operations on rust_decimal
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use decimal_engine::prelude::*;
use std::hint::black_box;

const P19: DecimalConfig = DecimalConfig::new();

/// Inputs on the 128-bit fast path and past it.
const OPERANDS: [(&str, &str, &str); 2] = [
    ("fast", "123456789.123456789", "987.654321"),
    (
        "big",
        "123456789012345678901234567890123456789012.5",
        "98765432109876543210.25",
    ),
];

fn pairs() -> Vec<(&'static str, Decimal, Decimal)> {
    OPERANDS
        .iter()
        .map(|(name, a, b)| (*name, P19.parse(a).unwrap(), P19.parse(b).unwrap()))
        .collect()
}

// ============================================================================
// Parse/Format Benchmarks
// ============================================================================

fn benchmark_parse_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_format");

    for (name, text, _) in OPERANDS.iter() {
        group.bench_with_input(BenchmarkId::new("parse", name), text, |b, text| {
            b.iter(|| black_box(Decimal::parse_with(black_box(text), &P19)));
        });

        let value = P19.parse(text).unwrap();
        group.bench_with_input(BenchmarkId::new("to_string", name), &value, |b, value| {
            b.iter(|| black_box(value.to_string()));
        });
    }

    group.finish();
}

// ============================================================================
// Arithmetic Benchmarks
// ============================================================================

fn benchmark_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    for (name, a, b) in pairs() {
        group.bench_with_input(BenchmarkId::new("add", name), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(*a + *b));
        });
        group.bench_with_input(BenchmarkId::new("mul", name), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.mul_with(b, &P19)));
        });
        group.bench_with_input(BenchmarkId::new("div", name), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.div_with(b, &P19)));
        });
        group.bench_with_input(BenchmarkId::new("quo_rem", name), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.quo_rem(b)));
        });
        group.bench_with_input(BenchmarkId::new("round_bank", name), &a, |bench, a| {
            bench.iter(|| black_box(a.round_bank(2)));
        });
    }

    group.finish();
}

// ============================================================================
// Power Benchmarks
// ============================================================================

fn benchmark_powers(c: &mut Criterion) {
    let mut group = c.benchmark_group("powers");
    let base = P19.parse("1.0001").unwrap();

    for e in [2, 10, 100, -10] {
        group.bench_with_input(BenchmarkId::new("pow_i32", e), &e, |b, &e| {
            b.iter(|| black_box(base.pow_i32_with(e, &P19)));
        });
    }

    for (name, a, _) in pairs() {
        group.bench_with_input(BenchmarkId::new("sqrt", name), &a, |b, a| {
            b.iter(|| black_box(a.sqrt_with(&P19)));
        });
    }

    group.finish();
}

// ============================================================================
// Codec Benchmarks
// ============================================================================

fn benchmark_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("codecs");

    for (name, a, _) in pairs() {
        let bytes = a.to_bytes().unwrap();
        group.bench_with_input(BenchmarkId::new("to_bytes", name), &a, |b, a| {
            b.iter(|| black_box(a.to_bytes()));
        });
        group.bench_with_input(BenchmarkId::new("from_bytes", name), &bytes, |b, bytes| {
            b.iter(|| black_box(Decimal::from_bytes(bytes)));
        });
    }

    group.finish();
}

// ============================================================================
// rust_decimal Comparison
// Same fast-path operations on the 96-bit rust_decimal type
// ============================================================================

fn benchmark_rust_decimal(c: &mut Criterion) {
    let mut group = c.benchmark_group("rust_decimal");
    let (_, a, b) = OPERANDS[0];
    let (ra, rb): (rust_decimal::Decimal, rust_decimal::Decimal) =
        (a.parse().unwrap(), b.parse().unwrap());

    group.bench_function("parse", |bench| {
        bench.iter(|| black_box(black_box(a).parse::<rust_decimal::Decimal>()));
    });
    group.bench_function("add", |bench| bench.iter(|| black_box(ra + rb)));
    group.bench_function("mul", |bench| bench.iter(|| black_box(ra * rb)));
    group.bench_function("div", |bench| bench.iter(|| black_box(ra / rb)));

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_format,
    benchmark_arithmetic,
    benchmark_powers,
    benchmark_codecs,
    benchmark_rust_decimal,
);
criterion_main!(benches);
