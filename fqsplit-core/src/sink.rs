//! Output sinks and sink factories

use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Append-only byte sink that can be closed deterministically.
///
/// `close` is where buffered or encoded data must reach its destination;
/// errors raised there are reported instead of being lost on drop. The
/// splitters call it exactly once per sink and never write afterwards.
pub trait OutputSink: Write {
    /// Flush everything and release the sink
    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

impl OutputSink for Vec<u8> {}

impl OutputSink for File {}

impl OutputSink for io::Sink {}

impl<W: Write> OutputSink for BufWriter<W> {}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Creates the sinks of a sequential split on demand
pub trait SinkFactory {
    /// Sink type produced by this factory
    type Sink: OutputSink;

    /// Create the sink with the given zero-based sequence number
    fn create(&mut self, sequence: usize) -> io::Result<Self::Sink>;
}

impl<S, F> SinkFactory for F
where
    S: OutputSink,
    F: FnMut(usize) -> io::Result<S>,
{
    type Sink = S;

    fn create(&mut self, sequence: usize) -> io::Result<S> {
        self(sequence)
    }
}
