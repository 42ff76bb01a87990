//! Wire envelope subsystem.
//!
//! # Data Flow
//! ```text
//! Handler produces body + ResponseMetadata
//!     → metadata.rs (serialize prelude JSON, exactly once)
//!     → framer.rs (prelude → sentinel → payload state machine)
//!     → Transport drains via read() and uploads the bytes verbatim
//! ```
//!
//! # Design Decisions
//! - Prelude bytes are snapshotted at construction; metadata mutations after
//!   that point never reach the wire
//! - Segment offsets live inside the phase enum, not in loose counters
//! - The stream is forward-only; seek/write/length are rejected

pub mod framer;
pub mod metadata;
pub mod types;

pub use framer::{FramedStream, SENTINEL_LEN};
pub use metadata::ResponseMetadata;
pub use types::{FrameError, FrameResult};
