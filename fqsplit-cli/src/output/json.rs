//! JSON run report

use super::ReportFormatter;
use anyhow::Result;
use fqsplit_core::{SinkStats, SplitReport};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes a JSON summary of the split
pub struct JsonFormatter<W: Write> {
    writer: W,
    lines_per_record: usize,
}

/// Top-level JSON document
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    files: Vec<FileEntry<'a>>,
    bytes_read: u64,
    bytes_written: u64,
    truncated_tail: Option<usize>,
}

/// One produced file, in creation order
#[derive(Debug, Serialize)]
struct FileEntry<'a> {
    path: &'a Path,
    records: u64,
    #[serde(flatten)]
    stats: &'a SinkStats,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, lines_per_record: usize) -> Self {
        Self {
            writer,
            lines_per_record,
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportFormatter for JsonFormatter<W> {
    fn format_report(&mut self, files: &[PathBuf], report: &SplitReport) -> Result<()> {
        let document = JsonReport {
            files: files
                .iter()
                .zip(&report.sinks)
                .map(|(path, stats)| FileEntry {
                    path,
                    records: stats.records(self.lines_per_record),
                    stats,
                })
                .collect(),
            bytes_read: report.bytes_read,
            bytes_written: report.bytes_written(),
            truncated_tail: report.truncated_tail,
        };
        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
