//! Compressed output files

use super::compression::{BufEncoder, Codec};
use fqsplit_core::OutputSink;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output file, compressed according to its extension.
///
/// The encoder trailer is written in [`OutputSink::close`]; a sink dropped
/// without closing leaves a truncated file behind.
pub struct FileSink {
    path: PathBuf,
    codec: Codec,
    encoder: Option<BufEncoder<File>>,
}

impl FileSink {
    /// Create (or truncate) `path`
    pub fn create(path: impl Into<PathBuf>, compression_level: u32) -> io::Result<Self> {
        let path = path.into();
        let codec = Codec::for_output(&path);
        let file = File::create(&path).map_err(|e| {
            io::Error::new(e.kind(), format!("cannot create {}: {e}", path.display()))
        })?;
        let encoder = codec.encoder(BufWriter::new(file), compression_level)?;
        log::debug!("created {} ({})", path.display(), codec.name());
        Ok(Self {
            path,
            codec,
            encoder: Some(encoder),
        })
    }

    /// Path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compression applied to the file
    pub fn codec(&self) -> Codec {
        self.codec
    }

    fn encoder(&mut self) -> io::Result<&mut BufEncoder<File>> {
        let path = &self.path;
        self.encoder
            .as_mut()
            .ok_or_else(|| io::Error::other(format!("{} is already closed", path.display())))
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.encoder()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.encoder()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.encoder()?.flush()
    }
}

impl OutputSink for FileSink {
    fn close(&mut self) -> io::Result<()> {
        if let Some(encoder) = self.encoder.take() {
            let mut file = encoder.finish()?;
            file.flush()?;
        }
        Ok(())
    }
}
