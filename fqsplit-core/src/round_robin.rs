//! Round-robin distribution of records over a fixed set of outputs

use crate::{
    boundary::{BoundaryScanner, RecordPhase},
    buffer::ChunkBuffer,
    config::SplitConfig,
    error::{Result, SplitError},
    report::SplitReport,
    sink::OutputSink,
    state::SplitState,
};
use std::io::{BufRead, Write};

/// Distributes aligned chunks over `k` outputs in strict rotation.
///
/// Each iteration reads one buffer (prefixed with the leftover of the
/// previous one), trims it back to the last record boundary and writes the
/// aligned prefix to the next output. Outputs therefore receive equal chunk
/// counts to within one; byte counts only even out statistically.
#[derive(Debug)]
pub struct RoundRobinSplitter {
    config: SplitConfig,
    scanner: BoundaryScanner,
    state: SplitState,
}

impl RoundRobinSplitter {
    /// Create a splitter, validating the configuration
    pub fn new(config: SplitConfig) -> Result<Self> {
        config.validate()?;
        let scanner = BoundaryScanner::new(config.lines_per_record)?;
        Ok(Self {
            config,
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

    /// Split `source` over `sinks`.
    ///
    /// Every sink is closed once the input is exhausted. On error the sinks
    /// are left to the caller, who releases them by dropping.
    pub fn split<R, S>(&mut self, source: &mut R, sinks: &mut [S]) -> Result<SplitReport>
    where
        R: BufRead + ?Sized,
        S: OutputSink,
    {
        if sinks.is_empty() {
            return Err(SplitError::NoOutputs);
        }

        let result = self.run(source, sinks);
        self.state = if result.is_ok() {
            SplitState::Done
        } else {
            SplitState::Failed
        };
        result
    }

    fn run<R, S>(&mut self, source: &mut R, sinks: &mut [S]) -> Result<SplitReport>
    where
        R: BufRead + ?Sized,
        S: OutputSink,
    {
        let mut report = SplitReport::with_sinks(sinks.len());
        let mut buffer = ChunkBuffer::new(self.config.buffer_size);
        let mut current = 0;

        loop {
            self.state = SplitState::Reading;
            let read = buffer.fill(source)?;
            report.bytes_read += read as u64;

            if read == 0 {
                if !buffer.is_empty() {
                    // Leftover never holds a whole record at this point.
                    self.state = SplitState::Writing;
                    self.settle_tail(buffer.as_slice(), &mut report)?;
                    sinks[current].write_all(buffer.as_slice())?;
                    report.sinks[current].record_chunk(buffer.as_slice());
                }
                break;
            }

            self.state = SplitState::Aligning;
            let alignment = self
                .scanner
                .align(buffer.data_mut(), RecordPhase::BOUNDARY, source)?;
            report.bytes_read += alignment.pulled as u64;

            self.state = SplitState::Writing;
            let chunk = &buffer.as_slice()[..alignment.aligned_len];
            if alignment.reached_eof {
                self.settle_tail(chunk, &mut report)?;
            }
            sinks[current].write_all(chunk)?;
            report.sinks[current].record_chunk(chunk);
            log::trace!(
                "wrote {} bytes to output {current}, carrying {} bytes",
                chunk.len(),
                buffer.len() - alignment.aligned_len
            );
            buffer.consume(alignment.aligned_len);

            self.state = SplitState::SwitchingSink;
            current = (current + 1) % sinks.len();
        }

        // Every sink gets closed; the first failure is reported.
        let mut first_error = None;
        for (index, sink) in sinks.iter_mut().enumerate() {
            if let Err(err) = sink.close() {
                log::debug!("closing output {index} failed: {err}");
                first_error.get_or_insert(err);
            }
        }
        if let Some(err) = first_error {
            return Err(err.into());
        }

        log::debug!(
            "distributed {} bytes over {} outputs in {} chunks",
            report.bytes_written(),
            sinks.len(),
            report.chunks_written()
        );
        Ok(report)
    }

    /// Apply the tail policy to a final piece starting on a record boundary
    fn settle_tail(&self, tail: &[u8], report: &mut SplitReport) -> Result<()> {
        let phase = self.scanner.advance(RecordPhase::BOUNDARY, tail);
        if phase.is_complete_at_eof(self.scanner.lines_per_record()) {
            return Ok(());
        }
        self.config.tail_policy.settle(tail.len(), report)
    }
}
