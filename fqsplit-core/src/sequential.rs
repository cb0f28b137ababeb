//! Sequential chunking into size-bounded outputs

use crate::{
    boundary::{BoundaryScanner, RecordPhase},
    buffer::{has_remaining, ChunkBuffer},
    config::SplitConfig,
    error::Result,
    report::{SinkStats, SplitReport},
    sink::{OutputSink, SinkFactory},
    state::SplitState,
};
use std::io::{BufRead, Write};

/// Writes the input into a growing sequence of outputs.
///
/// Buffers go straight to the current output until it holds at least
/// `max_size - buffer_size` bytes. The record in progress is then completed
/// line by line, the output is closed and the next one is requested from the
/// factory. Every output except the last therefore ends on a record boundary
/// and stays within `max_size` plus one record.
#[derive(Debug)]
pub struct SequentialChunker {
    config: SplitConfig,
    max_size: u64,
    scanner: BoundaryScanner,
    state: SplitState,
}

impl SequentialChunker {
    /// Create a chunker, validating the configuration.
    ///
    /// `config.max_size` must be set and larger than `config.buffer_size`.
    pub fn new(config: SplitConfig) -> Result<Self> {
        let max_size = config.validate_sequential()?;
        let scanner = BoundaryScanner::new(config.lines_per_record)?;
        Ok(Self {
            config,
            max_size,
            scanner,
            state: SplitState::default(),
        })
    }

    /// The configuration in use
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Current state of the run
    pub fn state(&self) -> SplitState {
        self.state
    }

    /// Split `source` into outputs created by `factory`.
    ///
    /// Output 0 is always created, so empty input yields one empty output.
    /// Further outputs are only created while input remains. The report holds
    /// one entry per created output, in creation order.
    pub fn split<R, F>(&mut self, source: &mut R, factory: &mut F) -> Result<SplitReport>
    where
        R: BufRead + ?Sized,
        F: SinkFactory + ?Sized,
    {
        let result = self.run(source, factory);
        self.state = if result.is_ok() {
            SplitState::Done
        } else {
            SplitState::Failed
        };
        result
    }

    fn run<R, F>(&mut self, source: &mut R, factory: &mut F) -> Result<SplitReport>
    where
        R: BufRead + ?Sized,
        F: SinkFactory + ?Sized,
    {
        let threshold = self.max_size - self.config.buffer_size as u64;
        let mut report = SplitReport::default();
        let mut buffer = ChunkBuffer::new(self.config.buffer_size);

        let mut sequence = 0;
        let mut sink = factory.create(sequence)?;
        report.sinks.push(SinkStats::default());

        let mut written: u64 = 0;
        let mut phase = RecordPhase::BOUNDARY;
        // Bytes written since the last record boundary.
        let mut open_bytes: usize = 0;

        loop {
            self.state = SplitState::Reading;
            buffer.clear();
            let read = buffer.fill(source)?;
            if read == 0 {
                break;
            }
            report.bytes_read += read as u64;

            self.state = SplitState::Writing;
            let chunk = buffer.as_slice();
            sink.write_all(chunk)?;
            report.sinks[sequence].record_chunk(chunk);
            open_bytes = self.open_bytes_after(open_bytes, phase, chunk);
            phase = self.scanner.advance(phase, chunk);
            written += read as u64;

            if written < threshold {
                continue;
            }

            self.state = SplitState::Aligning;
            buffer.clear();
            let completion = self
                .scanner
                .complete_record(source, phase, buffer.data_mut())?;
            report.bytes_read += completion.bytes as u64;

            self.state = SplitState::Writing;
            let tail = buffer.as_slice();
            sink.write_all(tail)?;
            report.sinks[sequence].extend(tail);
            open_bytes = self.open_bytes_after(open_bytes, phase, tail);
            phase = completion.phase;
            if completion.reached_eof {
                break;
            }

            self.state = SplitState::SwitchingSink;
            sink.close()?;
            log::debug!(
                "closed output {sequence} at {} bytes",
                report.sinks[sequence].bytes
            );
            if !has_remaining(source)? {
                return Ok(report);
            }

            sequence += 1;
            sink = factory.create(sequence)?;
            report.sinks.push(SinkStats::default());
            written = 0;
            open_bytes = 0;
        }

        if !phase.is_complete_at_eof(self.scanner.lines_per_record()) {
            self.config.tail_policy.settle(open_bytes, &mut report)?;
        }
        sink.close()?;
        log::debug!(
            "closed output {sequence} at {} bytes",
            report.sinks[sequence].bytes
        );
        Ok(report)
    }

    /// Bytes since the last record boundary once `bytes` follow a stream in
    /// `phase` that already had `open_bytes` past its boundary
    fn open_bytes_after(&self, open_bytes: usize, phase: RecordPhase, bytes: &[u8]) -> usize {
        match self.scanner.last_boundary(bytes, phase) {
            Some(end) => bytes.len() - end,
            None => open_bytes + bytes.len(),
        }
    }
}
