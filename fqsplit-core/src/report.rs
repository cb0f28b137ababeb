//! Statistics collected during a split

use crate::boundary::count_lines;

/// What one output received
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SinkStats {
    /// Bytes written
    pub bytes: u64,
    /// Newline-terminated lines written
    pub lines: u64,
    /// Chunks written (aligned chunks in round-robin mode, buffer reads in
    /// sequential mode)
    pub chunks: u64,
}

impl SinkStats {
    /// Account for a chunk written to the output
    pub fn record_chunk(&mut self, bytes: &[u8]) {
        self.chunks += 1;
        self.extend(bytes);
    }

    /// Account for bytes appended to the current chunk
    pub fn extend(&mut self, bytes: &[u8]) {
        self.bytes += bytes.len() as u64;
        self.lines += count_lines(bytes) as u64;
    }

    /// Whole records written
    pub fn records(&self, lines_per_record: usize) -> u64 {
        self.lines / lines_per_record as u64
    }
}

/// Outcome of a split
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SplitReport {
    /// One entry per output, in rotation or creation order
    pub sinks: Vec<SinkStats>,
    /// Bytes consumed from the input
    pub bytes_read: u64,
    /// Size of an incomplete final record that was passed through
    pub truncated_tail: Option<usize>,
}

impl SplitReport {
    /// Report with `sinks` empty entries
    pub fn with_sinks(sinks: usize) -> Self {
        Self {
            sinks: vec![SinkStats::default(); sinks],
            ..Self::default()
        }
    }

    /// Bytes written across all outputs
    pub fn bytes_written(&self) -> u64 {
        self.sinks.iter().map(|s| s.bytes).sum()
    }

    /// Chunks written across all outputs
    pub fn chunks_written(&self) -> u64 {
        self.sinks.iter().map(|s| s.chunks).sum()
    }
}
