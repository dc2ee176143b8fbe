use thiserror::Error;

/// Errors surfaced by the unified event stream
///
/// Malformed or out-of-order provider events never produce an error; they
/// are dropped by the parsers. Only failures of the byte stream underneath
/// reach the consumer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StreamError {
    /// The underlying byte stream failed
    #[error("transport error: {0}")]
    Transport(String),

    /// Server-sent event framing could not be parsed
    #[error("framing error: {0}")]
    Framing(String),
}

impl StreamError {
    /// Whether the failure came from the transport rather than the framing
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
