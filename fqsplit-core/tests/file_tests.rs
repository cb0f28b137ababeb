//! Splitting real files on disk

mod common;

use common::{fastq_input, is_aligned};
use fqsplit_core::{split_round_robin, split_sequential, SplitConfig};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use tempfile::TempDir;

#[test]
fn test_round_robin_into_files() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("reads.fastq");
    let input = fastq_input(500);
    fs::write(&input_path, &input).unwrap();

    let paths: Vec<_> = (0..3)
        .map(|i| dir.path().join(format!("reads.{i}.fastq")))
        .collect();
    let mut sinks: Vec<BufWriter<File>> = paths
        .iter()
        .map(|path| BufWriter::new(File::create(path).unwrap()))
        .collect();

    let mut source = BufReader::new(File::open(&input_path).unwrap());
    let report = split_round_robin(&mut source, &mut sinks, SplitConfig::default()).unwrap();
    drop(sinks);

    let mut total = 0;
    for (path, stats) in paths.iter().zip(&report.sinks) {
        let written = fs::read(path).unwrap();
        assert_eq!(written.len() as u64, stats.bytes);
        assert!(is_aligned(&written, 4));
        total += written.len();
    }
    assert_eq!(total, input.len());
}

#[test]
fn test_sequential_into_files() {
    let dir = TempDir::new().unwrap();
    let input = fastq_input(2000);
    let config = SplitConfig::builder()
        .buffer_size(4096)
        .max_size(32 * 1024)
        .build()
        .unwrap();

    let out_dir = dir.path().to_path_buf();
    let mut factory = |sequence: usize| -> io::Result<BufWriter<File>> {
        File::create(out_dir.join(format!("part.{sequence}.fastq"))).map(BufWriter::new)
    };
    let report = split_sequential(&mut io::Cursor::new(&input), &mut factory, config).unwrap();

    let mut joined = Vec::new();
    for sequence in 0..report.sinks.len() {
        joined.extend(fs::read(dir.path().join(format!("part.{sequence}.fastq"))).unwrap());
    }
    assert_eq!(joined, input);
    assert!(!dir
        .path()
        .join(format!("part.{}.fastq", report.sinks.len()))
        .exists());
}
