//! Performance benchmarks for NDJSON stream parsing
//!
//! Tests parse throughput for different network chunk sizes and for bodies
//! heavy in multi-byte text.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use bidscope::ndjson::StreamEventParser;
use bidscope::session::SearchSessionState;

/// Generate a search response with `logs` progress lines and `results` records
fn generate_body(logs: usize, results: usize) -> String {
    let mut body = String::new();
    for i in 0..logs {
        body.push_str(&format!(
            "{{\"type\":\"log\",\"message\":\"キーワード {} を検索中 (source {})\"}}\n",
            i,
            i % 3
        ));
    }

    let records: Vec<String> = (0..results)
        .map(|i| {
            format!(
                "{{\"id\":\"{i}\",\"title\":\"令和7年度 道路補修工事 第{i}号\",\"organization\":\"東京都建設局\",\
                 \"deadline\":\"2025-0{}-15\",\"category\":\"工事\",\"source\":\"Tokyo Metro\",\
                 \"url\":\"https://example.jp/bids/{i}\"}}",
                i % 9 + 1
            )
        })
        .collect();
    body.push_str(&format!(
        "{{\"type\":\"result\",\"data\":[{}]}}\n",
        records.join(",")
    ));
    body
}

fn parse_chunked(body: &[u8], chunk_size: usize) -> usize {
    let mut parser = StreamEventParser::new();
    let mut session = SearchSessionState::new();
    for chunk in body.chunks(chunk_size) {
        session.apply_events(parser.feed(chunk));
    }
    session.apply_events(parser.finish());
    session.results().len()
}

/// Benchmark parsing one response split at different chunk sizes
fn bench_parse_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("ndjson_chunk_sizes");
    let body = generate_body(50, 200);
    group.throughput(Throughput::Bytes(body.len() as u64));

    for size in [1, 7, 64, 1024, 16 * 1024].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_bytes", size)),
            size,
            |b, &size| {
                b.iter(|| black_box(parse_chunked(black_box(body.as_bytes()), size)));
            },
        );
    }

    group.finish();
}

/// Benchmark growing result sets at a typical chunk size
fn bench_parse_result_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("ndjson_result_counts");

    for results in [0, 10, 100, 1000].iter() {
        let body = generate_body(10, *results);
        group.throughput(Throughput::Bytes(body.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_results", results)),
            &body,
            |b, body| {
                b.iter(|| black_box(parse_chunked(black_box(body.as_bytes()), 4096)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse_chunk_sizes, bench_parse_result_counts);

criterion_main!(benches);
