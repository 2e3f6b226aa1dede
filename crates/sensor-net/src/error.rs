//! Errors local to a single connection. The connection manager never
//! propagates these to the core buffer — a malformed or dropped connection
//! is logged and closed without affecting any other connection.

use thiserror::Error;

/// Failure reading or decoding one sensor connection.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The underlying TCP stream errored (reset, timed out, etc.).
    #[error("connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the stream partway through a record, and the
    /// adaptive backoff gave up waiting for the remaining bytes.
    #[error("partial record: got {got} of {expected} bytes before giving up")]
    PartialRecord { got: usize, expected: usize },
}
