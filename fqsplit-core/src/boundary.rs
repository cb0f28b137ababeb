//! Record boundary detection
//!
//! A record is a fixed number of newline-terminated lines. The scanner never
//! looks inside a record; it only counts newlines. Two strategies share the
//! same bookkeeping ([`RecordPhase`]):
//!
//! - **trim-back** ([`BoundaryScanner::last_boundary`]): walk backward from the
//!   end of a buffer to the last newline that closes a record. Whatever follows
//!   is carried over to the next read.
//! - **complete-forward** ([`BoundaryScanner::complete_record`]): keep pulling
//!   whole lines from the source until the current record is closed.
//!
//! [`BoundaryScanner::align`] combines them: trim back when the buffer holds a
//! boundary, complete forward when it does not (a record longer than the
//! buffer). Both leave the stream byte-identical; only the place where a
//! chunk ends differs.

use crate::error::{Result, SplitError};
use std::io::{self, BufRead};

/// Count newline bytes in `buf`
pub fn count_lines(buf: &[u8]) -> usize {
    buf.iter().filter(|&&b| b == b'\n').count()
}

/// Position of a byte stream relative to the last record boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordPhase {
    /// Complete lines since the last boundary, modulo lines per record
    lines: usize,
    /// The last byte seen was not a newline
    mid_line: bool,
}

impl RecordPhase {
    /// Phase of a stream sitting exactly on a record boundary
    pub const BOUNDARY: RecordPhase = RecordPhase {
        lines: 0,
        mid_line: false,
    };

    /// Complete lines since the last boundary
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Whether a line has been started but not terminated
    pub fn is_mid_line(&self) -> bool {
        self.mid_line
    }

    /// Whether the stream sits exactly on a record boundary
    pub fn at_boundary(&self) -> bool {
        self.lines == 0 && !self.mid_line
    }

    /// Whether the stream would hold only whole records if it ended here.
    ///
    /// An unterminated final line still counts as a line.
    pub fn is_complete_at_eof(&self, lines_per_record: usize) -> bool {
        if self.mid_line {
            (self.lines + 1) % lines_per_record == 0
        } else {
            self.lines == 0
        }
    }
}

/// Result of aligning a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    /// Length of the prefix ending on a record boundary
    pub aligned_len: usize,
    /// Bytes appended to the chunk by forward completion
    pub pulled: usize,
    /// Forward completion ran into the end of the input
    pub reached_eof: bool,
}

impl Alignment {
    /// The part of `chunk` after the aligned prefix
    pub fn remainder<'a>(&self, chunk: &'a [u8]) -> &'a [u8] {
        &chunk[self.aligned_len..]
    }
}

/// Result of completing a record forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Bytes appended to the output buffer
    pub bytes: usize,
    /// The input ended before the record was closed
    pub reached_eof: bool,
    /// Phase after the appended bytes
    pub phase: RecordPhase,
}

/// Finds record boundaries in byte buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryScanner {
    lines_per_record: usize,
}

impl BoundaryScanner {
    /// Create a scanner for records of `lines_per_record` lines
    pub fn new(lines_per_record: usize) -> Result<Self> {
        if lines_per_record < 1 {
            return Err(SplitError::InvalidLinesPerRecord);
        }
        Ok(Self { lines_per_record })
    }

    /// Lines per record
    pub fn lines_per_record(&self) -> usize {
        self.lines_per_record
    }

    /// Phase after `bytes` have been appended to a stream in `phase`
    pub fn advance(&self, phase: RecordPhase, bytes: &[u8]) -> RecordPhase {
        let Some(&last) = bytes.last() else {
            return phase;
        };
        RecordPhase {
            lines: (phase.lines + count_lines(bytes)) % self.lines_per_record,
            mid_line: last != b'\n',
        }
    }

    /// Trim-back search for the last record boundary in `buf`.
    ///
    /// `phase` describes the stream just before `buf[0]`. Returns the length
    /// of the longest prefix of `buf` that ends on a boundary, or `None` when
    /// no position in `buf` (including the very start) is a boundary.
    pub fn last_boundary(&self, buf: &[u8], phase: RecordPhase) -> Option<usize> {
        let newlines = count_lines(buf);
        // Newlines past the last boundary.
        let overshoot = (phase.lines + newlines) % self.lines_per_record;

        if overshoot >= newlines {
            // Only the start of the buffer can still be a boundary.
            return (overshoot == newlines && phase.at_boundary()).then_some(0);
        }

        let mut skip = overshoot;
        for (idx, &byte) in buf.iter().enumerate().rev() {
            if byte == b'\n' {
                if skip == 0 {
                    return Some(idx + 1);
                }
                skip -= 1;
            }
        }
        None
    }

    /// Align `chunk` to a record boundary.
    ///
    /// `phase` describes the stream just before `chunk[0]`. If the chunk
    /// holds a boundary after its start, the aligned prefix ends at the last
    /// one and the remainder is left in place for the caller to carry over.
    /// Otherwise lines are pulled from `source` and appended to `chunk` until
    /// the record closes or the input ends, and the whole chunk is aligned.
    pub fn align<R: BufRead + ?Sized>(
        &self,
        chunk: &mut Vec<u8>,
        phase: RecordPhase,
        source: &mut R,
    ) -> io::Result<Alignment> {
        if chunk.is_empty() {
            return Ok(Alignment {
                aligned_len: 0,
                pulled: 0,
                reached_eof: false,
            });
        }

        match self.last_boundary(chunk, phase) {
            Some(end) if end > 0 => Ok(Alignment {
                aligned_len: end,
                pulled: 0,
                reached_eof: false,
            }),
            _ => {
                let phase = self.advance(phase, chunk);
                let completion = self.complete_record(source, phase, chunk)?;
                Ok(Alignment {
                    aligned_len: chunk.len(),
                    pulled: completion.bytes,
                    reached_eof: completion.reached_eof,
                })
            }
        }
    }

    /// Complete-forward: append whole lines from `source` to `out` until the
    /// stream described by `phase` reaches a record boundary or the input
    /// ends.
    pub fn complete_record<R: BufRead + ?Sized>(
        &self,
        source: &mut R,
        phase: RecordPhase,
        out: &mut Vec<u8>,
    ) -> io::Result<Completion> {
        let start = out.len();
        let mut phase = phase;
        let mut reached_eof = false;

        while !phase.at_boundary() {
            let read = source.read_until(b'\n', out)?;
            if read == 0 {
                reached_eof = true;
                break;
            }
            phase = self.advance(phase, &out[out.len() - read..]);
        }

        Ok(Completion {
            bytes: out.len() - start,
            reached_eof,
            phase,
        })
    }
}
