use std::fs;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eph::jpl_response::parse;

/// Repeat the data block of a canned response to get `rows` ephemeris lines.
fn with_rows(source: &str, rows: usize) -> String {
    let (head, rest) = source.split_once("$$SOE\n").unwrap();
    let (data, tail) = rest.split_once("$$EOE").unwrap();
    let lines: Vec<&str> = data.lines().collect();
    let body: String = lines
        .iter()
        .cycle()
        .take(rows)
        .map(|l| format!("{l}\n"))
        .collect();
    format!("{head}$$SOE\n{body}$$EOE{tail}")
}

fn bench_parse_vectors(c: &mut Criterion) {
    let source = fs::read_to_string("tests/data/vectors_csv.txt").unwrap();

    let mut group = c.benchmark_group("parse_vectors");
    for rows in [3, 100, 1_000, 10_000] {
        let response = with_rows(&source, rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &response, |b, response| {
            b.iter(|| parse(black_box(response)).unwrap())
        });
    }
    group.finish();
}

fn bench_parse_elements(c: &mut Criterion) {
    let source = fs::read_to_string("tests/data/elements_csv.txt").unwrap();
    c.bench_function("parse_elements", |b| {
        b.iter(|| parse(black_box(&source)).unwrap())
    });
}

criterion_group!(benches, bench_parse_vectors, bench_parse_elements);
criterion_main!(benches);
