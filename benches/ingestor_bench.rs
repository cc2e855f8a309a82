//! Scan throughput benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `parse_lines` | Lines/s through the per-file line loop, no I/O |
//! | `ingest` | A whole scan over a temp tree of rotated cron files |
//! | `aggregate` | Sorting records that arrive as interleaved batches |
//! | `export` | Writing the resulting table as CSV and JSONL |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench ingestor_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::path::Path;
use varlog::{export, Aggregator, Dialect, ExportFormat, ParseOptions, Router};

/// `n` cron lines, one minute apart, starting on `first_day` of February.
fn cron_text(n: usize, first_day: usize) -> String {
    let mut text = String::with_capacity(n * 80);
    for i in 0..n {
        let day = first_day + i / 1440;
        let (hour, minute) = ((i / 60) % 24, i % 60);
        text.push_str(&format!(
            "Feb {day:>2} {hour:02}:{minute:02}:00 hnet crond[{}]: (root) CMD (job {i})\n",
            1000 + i % 500
        ));
    }
    text
}

fn parse_lines_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_lines");
    let options = ParseOptions::new(2006);

    for n in [1_000usize, 10_000] {
        let text = cron_text(n, 1);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("cron", n), &text, |b, text| {
            b.iter(|| {
                varlog::parse_lines(black_box(text), Dialect::Syslog, Path::new("cron"), &options)
            })
        });
    }
    group.finish();
}

fn ingest_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest");
    group.sample_size(20);
    let options = ParseOptions::new(2006);
    let router = Router::default();

    for files in [1usize, 8] {
        let dir = tempfile::tempdir().unwrap();
        for idx in 0..files {
            let name = if idx == 0 { "cron".to_string() } else { format!("cron.{idx}") };
            std::fs::write(dir.path().join(name), cron_text(2_000, 1 + idx)).unwrap();
        }
        group.throughput(Throughput::Elements((files * 2_000) as u64));
        group.bench_with_input(BenchmarkId::new("files", files), dir.path(), |b, root| {
            b.iter(|| varlog::ingest(root, &router, &options).unwrap().records.len())
        });
    }
    group.finish();
}

fn aggregate_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let options = ParseOptions::new(2006);

    // Eight files whose time ranges interleave, pushed newest first.
    let batches: Vec<_> = (0..8)
        .rev()
        .map(|idx| {
            let text = cron_text(1_000, 1 + idx);
            varlog::parse_lines(&text, Dialect::Syslog, Path::new("cron"), &options).records
        })
        .collect();
    group.throughput(Throughput::Elements(8_000));
    group.bench_function("interleaved_8x1000", |b| {
        b.iter_batched(
            || batches.clone(),
            |batches| {
                let mut aggregator = Aggregator::new();
                for batch in batches {
                    aggregator.extend(batch);
                }
                aggregator.finish()
            },
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn export_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let options = ParseOptions::new(2006);
    let text = cron_text(5_000, 1);
    let records = varlog::parse_lines(&text, Dialect::Syslog, Path::new("cron"), &options).records;
    let table = varlog::Table::from_records(&records);
    group.throughput(Throughput::Elements(table.len() as u64));

    for format in [ExportFormat::Csv, ExportFormat::Jsonl] {
        group.bench_with_input(BenchmarkId::new("write", format), &table, |b, table| {
            b.iter(|| {
                let mut buf = Vec::with_capacity(1 << 20);
                export::write_table(table, format, &mut buf).unwrap();
                buf.len()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, parse_lines_bench, ingest_bench, aggregate_bench, export_bench);
criterion_main!(benches);
