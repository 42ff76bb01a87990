//! Payload source subsystem.
//!
//! # Data Flow
//! ```text
//! Handler output bytes
//!     → buffer.rs  (fixed in-memory body)
//!     → reader.rs  (any io::Read producer)
//!     → channel.rs (incremental feed from a producer thread)
//!     → FramedStream delegates body reads here
//! ```
//!
//! # Design Decisions
//! - The framer depends on this trait, never on a concrete backing, so tests
//!   substitute stand-ins freely
//! - Sources are `Send`: one thread may feed while the transport drains
//! - Source I/O errors pass through the framer untranslated

pub mod buffer;
pub mod channel;
pub mod reader;

pub use buffer::BufferSource;
pub use channel::{ChannelSource, PayloadSender};
pub use reader::ReaderSource;

use std::io;

/// The narrow capability the framer needs from a body producer: a
/// sequentially readable byte source with release.
pub trait PayloadSource: Send {
    /// Fill `buf` with up to `buf.len()` bytes. `Ok(0)` signals end-of-data.
    ///
    /// May block with whatever semantics the backing exhibits; the framer is
    /// demand-driven and adds no timeout or cancellation of its own.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Bytes handed out so far. Diagnostics only.
    fn position(&self) -> u64;

    /// Whether the source can still produce bytes.
    fn can_read(&self) -> bool {
        true
    }

    /// Release any resources the source holds. Called at most once by the
    /// owning stream.
    fn release(&mut self) {}
}
