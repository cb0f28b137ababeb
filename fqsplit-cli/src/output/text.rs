//! Plain list of produced files

use super::ReportFormatter;
use anyhow::Result;
use fqsplit_core::SplitReport;
use std::io::Write;
use std::path::PathBuf;

/// Writes one output path per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportFormatter for TextFormatter<W> {
    fn format_report(&mut self, files: &[PathBuf], _report: &SplitReport) -> Result<()> {
        for file in files {
            writeln!(self.writer, "{}", file.display())?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
