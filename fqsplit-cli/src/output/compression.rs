//! Compression codecs chosen by file extension or magic bytes

use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Supported compression formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// No compression
    Plain,
    /// gzip, multi-member aware on input
    Gzip,
    /// bzip2
    Bzip2,
    /// xz
    Xz,
    /// Zstandard
    Zstd,
}

impl Codec {
    const DETECTABLE: [Codec; 4] = [Codec::Gzip, Codec::Zstd, Codec::Bzip2, Codec::Xz];

    /// Short name for messages
    pub fn name(self) -> &'static str {
        match self {
            Codec::Plain => "plain",
            Codec::Gzip => "gzip",
            Codec::Bzip2 => "bzip2",
            Codec::Xz => "xz",
            Codec::Zstd => "zstd",
        }
    }

    fn extensions(self) -> &'static [&'static str] {
        match self {
            Codec::Plain => &[],
            Codec::Gzip => &[".gz", ".gzip"],
            Codec::Bzip2 => &[".bz2", ".bzip2"],
            Codec::Xz => &[".xz"],
            Codec::Zstd => &[".zst", ".zstd"],
        }
    }

    fn magic_bytes(self) -> &'static [u8] {
        match self {
            Codec::Plain => &[],
            Codec::Gzip => &[0x1f, 0x8b],
            Codec::Bzip2 => b"BZh",
            Codec::Xz => &[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00],
            Codec::Zstd => &[0x28, 0xb5, 0x2f, 0xfd],
        }
    }

    /// Codec named by the extension of `path`, if any
    pub fn from_extension(path: impl AsRef<Path>) -> Option<Codec> {
        let name = path.as_ref().to_string_lossy().to_lowercase();
        Self::DETECTABLE
            .into_iter()
            .find(|codec| codec.extensions().iter().any(|ext| name.ends_with(ext)))
    }

    /// Codec whose magic bytes start `head`, if any
    pub fn from_magic(head: &[u8]) -> Option<Codec> {
        Self::DETECTABLE
            .into_iter()
            .find(|codec| head.starts_with(codec.magic_bytes()))
    }

    /// Codec for an output path; unknown extensions are written plain
    pub fn for_output(path: impl AsRef<Path>) -> Codec {
        Self::from_extension(path).unwrap_or(Codec::Plain)
    }

    /// Clamp `level` into the range the codec accepts
    pub fn clamp_level(self, level: u32) -> u32 {
        match self {
            Codec::Plain => 0,
            Codec::Gzip | Codec::Xz => level.min(9),
            Codec::Bzip2 => level.clamp(1, 9),
            Codec::Zstd => level.clamp(1, 22),
        }
    }

    /// Wrap `reader` in a decoder
    pub fn decoder<'a>(self, reader: Box<dyn Read + 'a>) -> io::Result<Box<dyn Read + 'a>> {
        Ok(match self {
            Codec::Plain => reader,
            Codec::Gzip => Box::new(flate2::read::MultiGzDecoder::new(reader)),
            Codec::Bzip2 => Box::new(bzip2::read::MultiBzDecoder::new(reader)),
            Codec::Xz => Box::new(xz2::read::XzDecoder::new_multi_decoder(reader)),
            Codec::Zstd => Box::new(zstd::stream::read::Decoder::new(reader)?),
        })
    }

    /// Wrap `writer` in an encoder at `level`
    pub fn encoder<W: Write>(self, writer: W, level: u32) -> io::Result<Encoder<W>> {
        let level = self.clamp_level(level);
        Ok(match self {
            Codec::Plain => Encoder::Plain(writer),
            Codec::Gzip => Encoder::Gzip(flate2::write::GzEncoder::new(
                writer,
                flate2::Compression::new(level),
            )),
            Codec::Bzip2 => Encoder::Bzip2(bzip2::write::BzEncoder::new(
                writer,
                bzip2::Compression::new(level),
            )),
            Codec::Xz => Encoder::Xz(xz2::write::XzEncoder::new(writer, level)),
            Codec::Zstd => Encoder::Zstd(zstd::stream::write::Encoder::new(writer, level as i32)?),
        })
    }
}

/// Streaming encoder over `W` that must be finished explicitly
pub enum Encoder<W: Write> {
    /// Pass-through
    Plain(W),
    /// gzip
    Gzip(flate2::write::GzEncoder<W>),
    /// bzip2
    Bzip2(bzip2::write::BzEncoder<W>),
    /// xz
    Xz(xz2::write::XzEncoder<W>),
    /// Zstandard
    Zstd(zstd::stream::write::Encoder<'static, W>),
}

impl<W: Write> Encoder<W> {
    /// Write the trailer and hand back the inner writer
    pub fn finish(self) -> io::Result<W> {
        match self {
            Encoder::Plain(writer) => Ok(writer),
            Encoder::Gzip(encoder) => encoder.finish(),
            Encoder::Bzip2(encoder) => encoder.finish(),
            Encoder::Xz(encoder) => encoder.finish(),
            Encoder::Zstd(encoder) => encoder.finish(),
        }
    }

    fn inner(&mut self) -> &mut dyn Write {
        match self {
            Encoder::Plain(writer) => writer,
            Encoder::Gzip(encoder) => encoder,
            Encoder::Bzip2(encoder) => encoder,
            Encoder::Xz(encoder) => encoder,
            Encoder::Zstd(encoder) => encoder,
        }
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner().flush()
    }
}

/// Buffered encoder over any writer
pub type BufEncoder<W> = Encoder<BufWriter<W>>;
