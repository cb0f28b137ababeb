//! Shared helpers for fqsplit-core integration tests

#![allow(dead_code)]

use fqsplit_core::OutputSink;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// One FASTQ record with a sequence of `len` bases
pub fn fastq_record(id: usize, len: usize) -> String {
    let bases: String = "ACGT".chars().cycle().skip(id % 4).take(len).collect();
    format!("@read{id}/1\n{bases}\n+\n{}\n", "I".repeat(len))
}

/// `count` records with sequence lengths cycling through 20..=120
pub fn fastq_input(count: usize) -> Vec<u8> {
    (0..count)
        .map(|id| fastq_record(id, 20 + (id * 37) % 101))
        .collect::<String>()
        .into_bytes()
}

/// Split `data` into records of `lines_per_record` lines
pub fn records(data: &[u8], lines_per_record: usize) -> Vec<Vec<u8>> {
    let mut records = Vec::new();
    let mut current = Vec::new();
    let mut lines = 0;
    for &byte in data {
        current.push(byte);
        if byte == b'\n' {
            lines += 1;
            if lines == lines_per_record {
                records.push(std::mem::take(&mut current));
                lines = 0;
            }
        }
    }
    if !current.is_empty() {
        records.push(current);
    }
    records
}

/// Whether `data` holds only whole records
pub fn is_aligned(data: &[u8], lines_per_record: usize) -> bool {
    let newlines = data.iter().filter(|&&b| b == b'\n').count();
    newlines % lines_per_record == 0 && data.last().map_or(true, |&b| b == b'\n')
}

/// Sink writing into a buffer the test keeps a handle to
#[derive(Clone, Default)]
pub struct SharedSink {
    data: Rc<RefCell<Vec<u8>>>,
    closed: Rc<RefCell<bool>>,
}

impl SharedSink {
    pub fn contents(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        assert!(!self.is_closed(), "write after close");
        self.data.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl OutputSink for SharedSink {
    fn close(&mut self) -> io::Result<()> {
        *self.closed.borrow_mut() = true;
        Ok(())
    }
}

/// Factory that records every sink it hands out
#[derive(Default)]
pub struct RecordingFactory {
    pub created: Vec<SharedSink>,
}

impl RecordingFactory {
    pub fn factory(&mut self) -> impl FnMut(usize) -> io::Result<SharedSink> + '_ {
        move |sequence| {
            assert_eq!(sequence, self.created.len(), "sinks created out of order");
            let sink = SharedSink::default();
            self.created.push(sink.clone());
            Ok(sink)
        }
    }

    pub fn outputs(&self) -> Vec<Vec<u8>> {
        self.created.iter().map(SharedSink::contents).collect()
    }
}
