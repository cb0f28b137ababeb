//! Input opening with transparent decompression

use crate::output::Codec;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// An opened, decompressed input stream
pub struct Input {
    reader: Box<dyn BufRead>,
    path: Option<PathBuf>,
    size: Option<u64>,
    codec: Codec,
}

impl Input {
    /// Open `path`, or standard input for `None` and `-`
    pub fn open(path: Option<&Path>, progress: &mut ProgressReporter) -> Result<Self> {
        match path {
            Some(path) if path != Path::new("-") => Self::open_file(path, progress),
            _ => Self::from_reader(io::stdin().lock(), None, None),
        }
    }

    fn open_file(path: &Path, progress: &mut ProgressReporter) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open input: {}", path.display()))?;
        let size = file
            .metadata()
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?
            .len();
        progress.init_bytes(Some(size));
        let raw = progress.wrap_read(file);
        Self::from_reader(raw, Some(path), Some(size))
            .with_context(|| format!("Failed to read input: {}", path.display()))
    }

    /// Wrap an arbitrary reader, detecting compression from the name or the
    /// first bytes
    pub fn from_reader<R: Read + 'static>(
        reader: R,
        path: Option<&Path>,
        size: Option<u64>,
    ) -> Result<Self> {
        let mut buffered = BufReader::new(reader);
        let codec = match path.and_then(Codec::from_extension) {
            Some(codec) => codec,
            None => Codec::from_magic(buffered.fill_buf()?).unwrap_or(Codec::Plain),
        };
        log::debug!(
            "reading {} as {}",
            path.map_or_else(|| "stdin".into(), |p| p.display().to_string()),
            codec.name()
        );

        let reader: Box<dyn BufRead> = match codec {
            Codec::Plain => Box::new(buffered),
            codec => Box::new(BufReader::new(codec.decoder(Box::new(buffered))?)),
        };
        Ok(Self {
            reader,
            path: path.map(Path::to_path_buf),
            size,
            codec,
        })
    }

    /// The decompressed stream
    pub fn reader(&mut self) -> &mut dyn BufRead {
        &mut *self.reader
    }

    /// Input file, `None` for standard input
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// On-disk size, `None` for standard input
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Detected compression
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Whether the input is standard input
    pub fn is_stdin(&self) -> bool {
        self.path.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;

    const FASTQ: &[u8] = b"@r1\nACGT\n+\nIIII\n";

    #[test]
    fn test_plain_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reads.fastq");
        fs::write(&path, FASTQ).unwrap();

        let mut input = Input::open(Some(&path), &mut ProgressReporter::new(true)).unwrap();
        assert_eq!(input.codec(), Codec::Plain);
        assert_eq!(input.size(), Some(FASTQ.len() as u64));
        assert!(!input.is_stdin());

        let mut data = Vec::new();
        input.reader().read_to_end(&mut data).unwrap();
        assert_eq!(data, FASTQ);
    }

    #[test]
    fn test_gzip_detected_by_magic() {
        let mut encoder = Codec::Gzip.encoder(Vec::new(), 1).unwrap();
        encoder.write_all(FASTQ).unwrap();
        let compressed = encoder.finish().unwrap();

        let mut input =
            Input::from_reader(Cursor::new(compressed), Some(Path::new("reads.dat")), None)
                .unwrap();
        assert_eq!(input.codec(), Codec::Gzip);
        let mut data = Vec::new();
        input.reader().read_to_end(&mut data).unwrap();
        assert_eq!(data, FASTQ);
    }

    #[test]
    fn test_missing_file() {
        let err = Input::open(
            Some(Path::new("/nonexistent/reads.fq")),
            &mut ProgressReporter::new(true),
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("Failed to open input"));
    }
}
