/// Errors that can occur in client session operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level error (connect failure or socket shutdown).
    #[error("transport error: {0}")]
    Transport(#[from] gsdep_transport::TransportError),

    /// Framing, I/O, or payload decoding error.
    #[error("frame error: {0}")]
    Frame(#[from] gsdep_frame::FrameError),

    /// A bounded retry policy ran out before the server accepted the
    /// handshake.
    #[error("handshake not accepted after {0} attempts")]
    HandshakeExhausted(u32),

    /// An operation that needs an established connection was called on a
    /// session that has none.
    #[error("session is not connected")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, ClientError>;
