//! Shared stand-ins and helpers for framing integration tests.

use std::io::{self, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use streamed_response::{FramedStream, PayloadSource, ResponseMetadata, SENTINEL_LEN};

/// Payload source that counts how many times it was released.
pub struct ReleaseProbe {
    data: Vec<u8>,
    pos: usize,
    releases: Arc<AtomicUsize>,
}

impl ReleaseProbe {
    pub fn new(data: &[u8]) -> (Self, Arc<AtomicUsize>) {
        let releases = Arc::new(AtomicUsize::new(0));
        (
            Self {
                data: data.to_vec(),
                pos: 0,
                releases: releases.clone(),
            },
            releases,
        )
    }
}

impl PayloadSource for ReleaseProbe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = (self.data.len() - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }

    fn release(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Payload source that hands out at most `max_per_read` bytes per call,
/// exercising short reads from the backing.
pub struct ChunkedSource {
    data: Vec<u8>,
    pos: usize,
    max_per_read: usize,
}

impl ChunkedSource {
    pub fn new(data: &[u8], max_per_read: usize) -> Self {
        assert!(max_per_read >= 1);
        Self {
            data: data.to_vec(),
            pos: 0,
            max_per_read,
        }
    }
}

impl PayloadSource for ChunkedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = (self.data.len() - self.pos)
            .min(buf.len())
            .min(self.max_per_read);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }
}

/// Payload source that always fails with the given error.
pub struct FailingSource {
    kind: io::ErrorKind,
    message: &'static str,
}

impl FailingSource {
    pub fn new(kind: io::ErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }
}

impl PayloadSource for FailingSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(self.kind, self.message))
    }

    fn position(&self) -> u64 {
        0
    }
}

/// Payload source that fails the first read with the given error, then
/// serves its data normally. Models a transient backend fault.
pub struct ErrorOnceSource {
    data: Vec<u8>,
    pos: usize,
    error: Option<io::Error>,
}

impl ErrorOnceSource {
    pub fn new(kind: io::ErrorKind, message: &'static str, data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            error: Some(io::Error::new(kind, message)),
        }
    }
}

impl PayloadSource for ErrorOnceSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        let n = (self.data.len() - self.pos).min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }
}

/// Read the stream to end-of-data with a fixed caller buffer size.
pub fn drain(stream: &mut FramedStream, buf_size: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; buf_size];
    loop {
        let n = stream.read(&mut buf).expect("framed read failed");
        if n == 0 {
            return out;
        }
        out.extend_from_slice(&buf[..n]);
    }
}

/// The byte-exact envelope the platform expects for this metadata + payload.
pub fn expected_envelope(metadata: &ResponseMetadata, payload: &[u8]) -> Vec<u8> {
    let mut out = metadata.to_prelude().expect("prelude encoding").to_vec();
    out.extend_from_slice(&[0u8; SENTINEL_LEN]);
    out.extend_from_slice(payload);
    out
}
