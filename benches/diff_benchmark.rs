//! Benchmarks for extraction, the diff engine and report rendering.
//!
//! Run with: cargo bench --bench diff_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sbom_delta::config::DiffOptions;
use sbom_delta::model::ComponentIndex;
use sbom_delta::parsers::parse_cyclonedx_str;
use sbom_delta::reports::{create_reporter, ReportConfig, ReportFormat};
use sbom_delta::DiffEngine;
use std::hint::black_box;

/// Generate a CycloneDX JSON document with `count` components.
///
/// Every tenth component gets a bumped version and every twentieth a
/// different license when `revision` is non-zero.
fn generate_document(count: usize, revision: usize) -> String {
    let components: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            let patch = if revision > 0 && i % 10 == 0 { i % 100 + revision } else { i % 100 };
            let license = if revision > 0 && i % 20 == 0 { "Apache-2.0" } else { "MIT" };
            serde_json::json!({
                "type": "library",
                "name": format!("component-{i}"),
                "version": format!("1.{}.{patch}", i % 10),
                "licenses": [{ "license": { "id": license } }],
                "purl": format!("pkg:generic/component-{i}@1.{}.{patch}", i % 10),
            })
        })
        .collect();

    serde_json::json!({
        "bomFormat": "CycloneDX",
        "specVersion": "1.5",
        "components": components,
    })
    .to_string()
}

fn index(json: &str, options: &DiffOptions) -> ComponentIndex {
    let doc = parse_cyclonedx_str(json).expect("generated document parses");
    doc.extract_all(options).records.into_iter().collect()
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let options = DiffOptions::default();
    for size in [100, 1_000, 10_000] {
        let json = generate_document(size, 0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| black_box(index(black_box(json), &options)));
        });
    }
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    let options = DiffOptions::default();
    let engine = DiffEngine::new(&options);
    for size in [100, 1_000, 10_000] {
        let old = index(&generate_document(size, 0), &options);
        let new = index(&generate_document(size, 1), &options);
        group.bench_with_input(BenchmarkId::from_parameter(size), &(old, new), |b, (old, new)| {
            b.iter(|| black_box(engine.diff(black_box(old), black_box(new))));
        });
    }
    group.finish();
}

fn bench_render_markdown(c: &mut Criterion) {
    let options = DiffOptions::default();
    let old = index(&generate_document(1_000, 0), &options);
    let new = index(&generate_document(1_000, 1), &options);
    let result = DiffEngine::new(&options).diff(&old, &new);
    let reporter = create_reporter(ReportFormat::Markdown);
    let config = ReportConfig::new(options);

    c.bench_function("render_markdown_1000", |b| {
        b.iter(|| black_box(reporter.generate_diff_report(black_box(&result), &config)));
    });
}

criterion_group!(benches, bench_extract, bench_diff, bench_render_markdown);
criterion_main!(benches);
