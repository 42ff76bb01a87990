//! Channel-fed payload source for incrementally produced bodies.
//!
//! # Responsibilities
//! - Let handler code produce body chunks while the transport drains them
//! - Bound in-flight chunks so a fast producer cannot outrun the wire
//! - Carry partially consumed chunks across reads without copying
//!
//! # Design Decisions
//! - `std::sync::mpsc::sync_channel`: the framer's read side is synchronous,
//!   and a bounded channel gives structural backpressure
//! - Dropping the sender is the end-of-data signal; no in-band terminator

use std::io;
use std::sync::mpsc::{self, Receiver, SyncSender};

use bytes::Bytes;

use crate::source::PayloadSource;

/// Producer half: handler code sends body chunks through this.
#[derive(Debug, Clone)]
pub struct PayloadSender {
    tx: SyncSender<Bytes>,
}

impl PayloadSender {
    /// Queue a chunk, blocking while the channel is full.
    ///
    /// Fails with `BrokenPipe` once the consuming stream is gone.
    pub fn send(&self, chunk: impl Into<Bytes>) -> io::Result<()> {
        self.tx.send(chunk.into()).map_err(|_| {
            io::Error::new(io::ErrorKind::BrokenPipe, "payload consumer dropped")
        })
    }
}

/// Consumer half: a [`PayloadSource`] that reads what the sender queued.
#[derive(Debug)]
pub struct ChannelSource {
    rx: Receiver<Bytes>,
    /// Unconsumed tail of the chunk currently being drained.
    pending: Bytes,
    pos: u64,
    done: bool,
}

impl ChannelSource {
    /// Create a connected sender/source pair holding at most `capacity`
    /// queued chunks.
    pub fn bounded(capacity: usize) -> (PayloadSender, ChannelSource) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        (
            PayloadSender { tx },
            ChannelSource {
                rx,
                pending: Bytes::new(),
                pos: 0,
                done: false,
            },
        )
    }
}

impl PayloadSource for ChannelSource {
    /// Blocks until the producer queues a chunk or hangs up. Empty chunks
    /// are skipped, never reported as end-of-data.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pending.is_empty() {
            if self.done {
                return Ok(0);
            }
            match self.rx.recv() {
                Ok(chunk) => self.pending = chunk,
                Err(_) => {
                    self.done = true;
                    return Ok(0);
                }
            }
        }
        let n = self.pending.len().min(buf.len());
        let chunk = self.pending.split_to(n);
        buf[..n].copy_from_slice(&chunk);
        self.pos += n as u64;
        Ok(n)
    }

    fn position(&self) -> u64 {
        self.pos
    }

    fn can_read(&self) -> bool {
        !self.done || !self.pending.is_empty()
    }

    fn release(&mut self) {
        self.done = true;
        self.pending = Bytes::new();
    }
}
