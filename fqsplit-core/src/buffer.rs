//! Chunk buffer with carried-over leftover bytes

use std::io::{self, BufRead, Read};

/// Read buffer for chunked splitting.
///
/// Each fill appends up to `buffer_size` fresh bytes after whatever the
/// previous iteration left behind, so the unaligned tail of one chunk becomes
/// the head of the next without being read twice.
#[derive(Debug)]
pub struct ChunkBuffer {
    data: Vec<u8>,
    buffer_size: usize,
}

impl ChunkBuffer {
    /// Create a buffer reading `buffer_size` bytes at a time
    pub fn new(buffer_size: usize) -> Self {
        Self {
            data: Vec::with_capacity(buffer_size),
            buffer_size,
        }
    }

    /// Append up to `buffer_size` bytes from `reader`.
    ///
    /// Keeps reading until the quota is met or the input ends, so short reads
    /// from pipes and decoders do not shrink chunks. Returns the number of new
    /// bytes; 0 means end of input.
    pub fn fill<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
        let before = self.data.len();
        Read::take(&mut *reader, self.buffer_size as u64).read_to_end(&mut self.data)?;
        Ok(self.data.len() - before)
    }

    /// Buffered bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access for forward completion
    pub fn data_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Drop the first `len` bytes, keeping the rest as leftover
    pub fn consume(&mut self, len: usize) {
        self.data.drain(..len);
    }

    /// Discard everything
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Whether `source` has at least one more byte
pub fn has_remaining<R: BufRead + ?Sized>(source: &mut R) -> io::Result<bool> {
    Ok(!source.fill_buf()?.is_empty())
}
