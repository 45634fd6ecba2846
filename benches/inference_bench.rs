//! Benchmarks for delimiter detection and column type inference
//!
//! Run with: cargo bench --bench inference_bench

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use files_to_tables::inference::{InferenceConfig, Row, SchemaInferrer, StrategyKind, classify};
use files_to_tables::ingest::{Delimiter, ParsedTable, detect_delimiter};

/// Generate delimited sample lines, header first
fn generate_lines(count: usize, delimiter: char) -> Vec<String> {
    let mut lines = Vec::with_capacity(count + 1);
    lines.push(
        ["id", "name", "balance", "joined", "note"]
            .join(&delimiter.to_string()),
    );
    for i in 0..count {
        lines.push(format!(
            "{id}{d}User {id}{d}{balance:.2}{d}2024-{month:02}-{day:02}{d}{note}",
            d = delimiter,
            id = i,
            balance = 1000.0 + (i as f64 * 10.5),
            month = (i % 12) + 1,
            day = (i % 28) + 1,
            note = if i % 3 == 0 { "" } else { "ok" },
        ));
    }
    lines
}

/// Benchmark value classification for various token shapes
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let test_cases = vec![
        ("integer", "123456"),
        ("negative", "-42"),
        ("real", "10.50"),
        ("date", "2024-01-15"),
        ("text", "hello world"),
    ];

    for (name, value) in test_cases {
        group.bench_with_input(BenchmarkId::new("classify", name), &value, |b, value| {
            b.iter(|| black_box(classify(value)));
        });
    }

    group.finish();
}

/// Benchmark delimiter detection; pipe is the last candidate tried
fn bench_detect_delimiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_delimiter");

    for (name, delimiter) in [("comma", ','), ("pipe", '|')] {
        let lines = generate_lines(500, delimiter);
        group.bench_with_input(BenchmarkId::new("detect", name), &lines, |b, lines| {
            b.iter(|| black_box(detect_delimiter(lines)));
        });
    }

    group.finish();
}

/// Benchmark type inference per strategy with varying row counts
fn bench_infer(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer");

    for count in [10, 100, 1000].iter() {
        let parsed = ParsedTable::parse(&generate_lines(*count, ','), Delimiter::Comma);
        let rows: Vec<Row> = parsed.rows;
        group.throughput(Throughput::Elements(*count as u64));

        for strategy in [
            StrategyKind::FirstMatch,
            StrategyKind::MajorityVote,
            StrategyKind::StrictAllMatch,
        ] {
            let inferrer = SchemaInferrer::with_config(
                InferenceConfig::builder()
                    .strategy(strategy)
                    .sample_size(*count)
                    .build(),
            );
            group.bench_with_input(
                BenchmarkId::new(inferrer.strategy_name(), count),
                &rows,
                |b, rows| {
                    b.iter(|| black_box(inferrer.infer(&parsed.header, rows)));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_detect_delimiter, bench_infer);
criterion_main!(benches);
