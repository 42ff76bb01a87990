//! Envelope error definitions.

use thiserror::Error;

/// Errors raised by the framing layer itself.
///
/// Payload-source I/O errors are deliberately absent: the framer relays them
/// as `std::io::Error` unchanged, adding no failure semantics of its own.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The stream is forward-only; random access and mutation are rejected.
    #[error("unsupported operation on forward-only response stream: {0}")]
    Unsupported(&'static str),

    /// Serializing the JSON prelude failed.
    #[error("failed to encode response prelude: {0}")]
    Prelude(#[from] serde_json::Error),
}

/// Result type for framing operations.
pub type FrameResult<T> = Result<T, FrameError>;
