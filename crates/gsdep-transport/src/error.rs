/// Errors that can occur in transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to resolve or connect to the peer address. Fatal; the
    /// session layer does not retry the initial connect.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    /// An I/O error occurred on the established stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Closing the socket failed.
    #[error("failed to shut down transport: {0}")]
    Shutdown(std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
