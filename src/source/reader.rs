//! Adapter from any `io::Read` to a payload source.

use std::io;

use crate::source::PayloadSource;

/// Payload source wrapping an arbitrary reader (file, pipe, decoder output).
///
/// Tracks position itself since plain readers expose none; errors from the
/// inner reader pass through unchanged.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    pos: u64,
}

impl<R: io::Read + Send> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Give back the inner reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read + Send> PayloadSource for ReaderSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }

    fn position(&self) -> u64 {
        self.pos
    }
}
