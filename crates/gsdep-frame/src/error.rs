use gsdep_wire::WireError;

/// Errors that can occur while framing messages over a stream.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload exceeds what the 32-bit length field can describe.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Fewer than the fixed 8 header bytes were supplied.
    #[error("short header ({len} bytes, need 8)")]
    ShortHeader { len: usize },

    /// An I/O error occurred while reading or writing a frame.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the connection before a complete frame arrived.
    /// A legitimate outcome on disconnect, distinct from other I/O errors.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,

    /// Tag or payload decoding failed.
    #[error(transparent)]
    Wire(#[from] WireError),
}

pub type Result<T> = std::result::Result<T, FrameError>;
