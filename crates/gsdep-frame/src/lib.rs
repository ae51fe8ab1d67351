//! Message framing over a byte stream for GSDEP.
//!
//! Every message is framed with a fixed 8-byte big-endian header:
//! - 4-byte payload length
//! - 2-byte data-type tag
//! - 2-byte channel tag
//!
//! The reader and writer resolve partial reads and writes internally, so a
//! caller either gets a complete, fully decoded message or an explicit
//! failure. No partial frames, no buffer management in user code.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_header, encode_header, encode_message, Message, RawHeader, HEADER_SIZE};
pub use error::{FrameError, Result};
pub use reader::{read_exact_bytes, MessageReader, READ_CHUNK_SIZE};
pub use writer::MessageWriter;
