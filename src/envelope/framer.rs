//! The response-streaming framer.
//!
//! # Responsibilities
//! - Present prelude, sentinel and payload as one sequential byte stream
//! - Cross segment boundaries inside a single read call
//! - Mirror the payload source's read capability; reject seek/write/length
//! - Release the wrapped payload source exactly once
//!
//! # Design Decisions
//! - Segment offsets are carried inside the phase enum so a boundary falling
//!   mid-buffer cannot desynchronize a flag from a counter
//! - Phase transitions are one-directional; `StreamingBody` is terminal
//! - No internal locking: exactly one consumer pumps reads at a time

use std::io;

use bytes::Bytes;

use crate::envelope::metadata::ResponseMetadata;
use crate::envelope::types::{FrameError, FrameResult};
use crate::source::PayloadSource;

/// Length of the all-zero delimiter between prelude and payload.
pub const SENTINEL_LEN: usize = 8;

/// Segment currently being emitted.
///
/// Invariant: `Header.emitted` < prelude length and `Sentinel.emitted` <
/// [`SENTINEL_LEN`]; a fully drained segment transitions before the call
/// returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Emitting the JSON prelude; `emitted` bytes of it are already out.
    Header { emitted: usize },
    /// Emitting the zero sentinel; `emitted` bytes of it are already out.
    Sentinel { emitted: usize },
    /// All framing emitted; reads delegate to the payload source. Terminal.
    Body,
}

/// Forward-only stream producing `prelude ++ sentinel ++ payload`.
///
/// Construct one per invocation response and drain it with
/// [`std::io::Read`]. A call may span segments: after finishing the prelude
/// and/or sentinel it falls through to the payload source in the same call,
/// so small caller buffers never cost an extra round-trip per segment.
///
/// End-of-data contract: a call that emits framing bytes never returns 0;
/// `Ok(0)` is only ever reported by a call that reached the payload source
/// and got 0 from it. An empty payload therefore still takes a final extra
/// call returning 0 after the framing is drained.
pub struct FramedStream {
    /// Serialized prelude, computed exactly once at construction.
    prelude: Bytes,
    phase: Phase,
    /// Source error held back because framing bytes were already in the
    /// caller's buffer when it occurred; returned by the next read.
    pending_error: Option<io::Error>,
    /// Wrapped payload source; `None` once released.
    source: Option<Box<dyn PayloadSource>>,
}

impl FramedStream {
    /// Wrap `source` in the wire envelope described by `metadata`.
    ///
    /// The metadata is serialized here, once; later mutation of the caller's
    /// value does not affect this stream.
    pub fn new(
        metadata: &ResponseMetadata,
        source: impl PayloadSource + 'static,
    ) -> FrameResult<Self> {
        let prelude = metadata.to_prelude()?;
        tracing::debug!(
            prelude_len = prelude.len(),
            status_code = metadata.status_code,
            "framed stream created"
        );
        Ok(Self {
            prelude,
            phase: Phase::Header { emitted: 0 },
            pending_error: None,
            source: Some(Box::new(source)),
        })
    }

    /// Wrap `source` with default metadata (status 200, `application/json`).
    pub fn with_defaults(source: impl PayloadSource + 'static) -> FrameResult<Self> {
        Self::new(&ResponseMetadata::new(), source)
    }

    /// Framing bytes (prelude + sentinel) emitted so far.
    fn framing_emitted(&self) -> u64 {
        match self.phase {
            Phase::Header { emitted } => emitted as u64,
            Phase::Sentinel { emitted } => (self.prelude.len() + emitted) as u64,
            Phase::Body => (self.prelude.len() + SENTINEL_LEN) as u64,
        }
    }

    /// Whether reads can make progress. Mirrors the payload source; false
    /// once released.
    pub fn can_read(&self) -> bool {
        self.source.as_ref().map(|s| s.can_read()).unwrap_or(false)
    }

    /// Always false: the stream is generated, never written to.
    pub fn can_write(&self) -> bool {
        false
    }

    /// Always false: emitted bytes cannot be revisited.
    pub fn can_seek(&self) -> bool {
        false
    }

    /// Payload-source position plus framing bytes emitted. Diagnostics only;
    /// the stream cannot seek.
    pub fn position(&self) -> u64 {
        self.framing_emitted() + self.source.as_ref().map(|s| s.position()).unwrap_or(0)
    }

    /// Rejected: forward-only stream.
    pub fn seek(&mut self, _offset: u64) -> FrameResult<u64> {
        Err(FrameError::Unsupported("seek"))
    }

    /// Rejected: read-only stream.
    pub fn write(&mut self, _buf: &[u8]) -> FrameResult<usize> {
        Err(FrameError::Unsupported("write"))
    }

    /// Rejected: total length is unknown until the payload source ends.
    pub fn length(&self) -> FrameResult<u64> {
        Err(FrameError::Unsupported("length"))
    }

    /// Release the wrapped payload source. Idempotent: the source is
    /// released exactly once, further calls are no-ops.
    pub fn release(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
            tracing::debug!(framing_emitted = self.framing_emitted(), "payload source released");
        }
    }
}

impl io::Read for FramedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(source) = self.source.as_mut() else {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "framed stream already released",
            ));
        };
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }

        let mut filled = 0;

        if let Phase::Header { emitted } = self.phase {
            let n = (self.prelude.len() - emitted).min(buf.len());
            buf[..n].copy_from_slice(&self.prelude[emitted..emitted + n]);
            filled = n;
            self.phase = if emitted + n == self.prelude.len() {
                tracing::trace!("prelude drained, emitting sentinel");
                Phase::Sentinel { emitted: 0 }
            } else {
                Phase::Header { emitted: emitted + n }
            };
        }

        if let Phase::Sentinel { emitted } = self.phase {
            let n = (SENTINEL_LEN - emitted).min(buf.len() - filled);
            buf[filled..filled + n].fill(0);
            filled += n;
            self.phase = if emitted + n == SENTINEL_LEN {
                tracing::trace!("sentinel drained, streaming body");
                Phase::Body
            } else {
                Phase::Sentinel { emitted: emitted + n }
            };
        }

        if self.phase == Phase::Body && filled < buf.len() {
            match source.read(&mut buf[filled..]) {
                Ok(n) => filled += n,
                Err(err) if filled == 0 => return Err(err),
                // Framing bytes are already in the caller's buffer and cannot
                // be re-emitted; hand them out and return the error, held
                // intact, from the next read.
                Err(err) => {
                    tracing::trace!(error = %err, emitted = filled, "source error held past framing bytes");
                    self.pending_error = Some(err);
                }
            }
        }

        Ok(filled)
    }
}

impl Drop for FramedStream {
    fn drop(&mut self) {
        self.release();
    }
}
