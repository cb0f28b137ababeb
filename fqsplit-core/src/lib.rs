//! Record-boundary-aware splitting of line-record streams
//!
//! This crate splits a stream of fixed-line-count records (FASTQ: four lines
//! per read) over several outputs without ever cutting a record in half and
//! without holding more than one buffer plus one record in memory.
//!
//! Two splitters share one boundary scanner:
//! - [`RoundRobinSplitter`] rotates aligned chunks over a fixed set of sinks
//! - [`SequentialChunker`] fills size-bounded sinks one after another
//!
//! Compression, file naming and argument parsing live in `fqsplit-cli`; this
//! crate only needs a [`BufRead`](std::io::BufRead) input and [`OutputSink`]
//! outputs.
//!
//! # Example
//!
//! ```rust
//! use fqsplit_core::{split_round_robin, SplitConfig};
//! use std::io::Cursor;
//!
//! let fastq = b"@r1\nACGT\n+\nIIII\n@r2\nTTGA\n+\nIIII\n";
//! let mut outputs = vec![Vec::new(), Vec::new()];
//!
//! let report = split_round_robin(
//!     &mut Cursor::new(&fastq[..]),
//!     &mut outputs,
//!     SplitConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(outputs.concat(), fastq);
//! assert_eq!(report.bytes_written(), fastq.len() as u64);
//! ```

#![warn(missing_docs)]

pub mod boundary;
pub mod buffer;
pub mod config;
pub mod error;
pub mod report;
pub mod round_robin;
pub mod sequential;
pub mod sink;
pub mod state;

// Re-export key types
pub use boundary::{Alignment, BoundaryScanner, Completion, RecordPhase};
pub use config::{
    SplitConfig, SplitConfigBuilder, TailPolicy, DEFAULT_BUFFER_SIZE, DEFAULT_LINES_PER_RECORD,
    DEFAULT_MIN_BUFFER_SIZE,
};
pub use error::{Result, SplitError};
pub use report::{SinkStats, SplitReport};
pub use round_robin::RoundRobinSplitter;
pub use sequential::SequentialChunker;
pub use sink::{OutputSink, SinkFactory};
pub use state::SplitState;

use std::io::BufRead;

/// Distribute `source` over `sinks` in round-robin order
pub fn split_round_robin<R, S>(
    source: &mut R,
    sinks: &mut [S],
    config: SplitConfig,
) -> Result<SplitReport>
where
    R: BufRead + ?Sized,
    S: OutputSink,
{
    RoundRobinSplitter::new(config)?.split(source, sinks)
}

/// Split `source` into size-bounded outputs created by `factory`
pub fn split_sequential<R, F>(
    source: &mut R,
    factory: &mut F,
    config: SplitConfig,
) -> Result<SplitReport>
where
    R: BufRead + ?Sized,
    F: SinkFactory + ?Sized,
{
    SequentialChunker::new(config)?.split(source, factory)
}
