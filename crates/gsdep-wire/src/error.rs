/// Errors that can occur while encoding or decoding wire-level data.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The header carried a data-type code outside the closed enumeration.
    #[error("unknown data type code {0}")]
    UnknownDataType(u16),

    /// The header carried a channel code outside the closed enumeration.
    #[error("unknown channel code {0}")]
    UnknownChannel(u16),

    /// Payload text does not match the grammar for its declared type.
    #[error("malformed {data_type} payload: {detail}")]
    Format {
        data_type: &'static str,
        detail: String,
    },

    /// Payload bytes are not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Mapping payload is not a valid JSON document.
    #[error("malformed HASH_MAP payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WireError>;
