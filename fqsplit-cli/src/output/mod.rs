//! Output files and run reports

use anyhow::Result;
use fqsplit_core::SplitReport;
use std::path::PathBuf;

pub mod compression;
pub mod json;
pub mod naming;
pub mod sink;
pub mod text;

pub use compression::Codec;
pub use json::JsonFormatter;
pub use sink::FileSink;
pub use text::TextFormatter;

/// Trait for report formatters
pub trait ReportFormatter {
    /// Report the outputs of a finished split
    fn format_report(&mut self, files: &[PathBuf], report: &SplitReport) -> Result<()>;
}
