//! Response-streaming framer for a function runtime client.
//!
//! Turns a caller-supplied payload source plus response metadata into the
//! exact wire envelope the platform's invocation-response channel expects,
//! exposed as one forward-only byte stream:
//!
//! ```text
//!             ┌─────────────────────────────────────────────────┐
//!             │                 FramedStream                    │
//!             │                                                 │
//!   read() ───┼─▶ ┌──────────────┐ ┌──────────┐ ┌───────────┐  │
//!             │   │ JSON prelude │▶│ sentinel │▶│  payload  │◀─┼── user code
//!             │   │  (metadata)  │ │ 8 × 0x00 │ │  source   │  │
//!             │   └──────────────┘ └──────────┘ └───────────┘  │
//!             └─────────────────────────────────────────────────┘
//! ```
//!
//! The prelude is serialized once at construction; the sentinel and payload
//! follow with no intermediate buffering, so memory use is independent of
//! payload size. The transport layer drives `read` until the payload source
//! reports end-of-data and uploads the concatenation as the response body.

// Wire envelope
pub mod envelope;

// Payload producers
pub mod source;

pub use envelope::framer::{FramedStream, SENTINEL_LEN};
pub use envelope::metadata::ResponseMetadata;
pub use envelope::types::{FrameError, FrameResult};
pub use source::{BufferSource, ChannelSource, PayloadSender, PayloadSource, ReaderSource};
