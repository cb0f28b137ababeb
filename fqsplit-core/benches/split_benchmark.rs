//! Benchmarks for round-robin and sequential splitting throughput

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fqsplit_core::{split_round_robin, split_sequential, SplitConfig};
use std::hint::black_box;
use std::io::{self, Cursor};

/// Generate FASTQ input of roughly `size_mb` megabytes
fn generate_fastq(size_mb: usize) -> Vec<u8> {
    let target = size_mb * 1024 * 1024;
    let mut data = Vec::with_capacity(target + 512);
    let mut id = 0;
    while data.len() < target {
        let len = 100 + id % 51;
        let bases: String = "ACGTTGCA".chars().cycle().skip(id % 8).take(len).collect();
        data.extend_from_slice(format!("@read{id}/1\n{bases}\n+\n{}\n", "F".repeat(len)).as_bytes());
        id += 1;
    }
    data
}

fn benchmark_round_robin(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_robin");
    let input = generate_fastq(16);
    group.throughput(Throughput::Bytes(input.len() as u64));

    for outputs in [1, 4, 16] {
        group.bench_with_input(BenchmarkId::new("outputs", outputs), &outputs, |b, &k| {
            b.iter(|| {
                let mut sinks: Vec<io::Sink> = (0..k).map(|_| io::sink()).collect();
                split_round_robin(
                    &mut Cursor::new(black_box(&input)),
                    &mut sinks,
                    SplitConfig::default(),
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_buffer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_size");
    group.sample_size(20);
    let input = generate_fastq(16);
    group.throughput(Throughput::Bytes(input.len() as u64));

    for kb in [4, 64, 1024] {
        let config = SplitConfig::builder().buffer_size(kb * 1024).build().unwrap();
        group.bench_with_input(BenchmarkId::new("kb", kb), &config, |b, config| {
            b.iter(|| {
                let mut sinks: Vec<io::Sink> = (0..4).map(|_| io::sink()).collect();
                split_round_robin(&mut Cursor::new(black_box(&input)), &mut sinks, config.clone())
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential");
    let input = generate_fastq(16);
    group.throughput(Throughput::Bytes(input.len() as u64));

    let config = SplitConfig::builder()
        .max_size(1024 * 1024)
        .build()
        .unwrap();
    group.bench_function("1MB_outputs", |b| {
        b.iter(|| {
            let mut factory = |_sequence: usize| -> io::Result<io::Sink> { Ok(io::sink()) };
            split_sequential(&mut Cursor::new(black_box(&input)), &mut factory, config.clone())
                .unwrap()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_round_robin,
    benchmark_buffer_sizes,
    benchmark_sequential
);
criterion_main!(benches);
