use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};
use gsdep_wire::{Channel, DataType, TypedValue};
use tracing::trace;

use crate::codec::{decode_header, Message, HEADER_SIZE};
use crate::error::{FrameError, Result};

/// Upper bound on a single `read` call. Frames larger than this are
/// accumulated across multiple reads; the bound only caps how much one
/// receive call asks the transport for at a time.
pub const READ_CHUNK_SIZE: usize = 4096;

/// Read exactly `n` bytes from the stream, issuing repeated bounded-size
/// reads until the full count is collected.
///
/// Returns [`FrameError::ConnectionClosed`] if the stream reaches
/// end-of-stream first.
pub fn read_exact_bytes<R: Read>(stream: &mut R, n: usize) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(n.min(READ_CHUNK_SIZE));
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    while buf.len() < n {
        let want = (n - buf.len()).min(READ_CHUNK_SIZE);
        let read = match stream.read(&mut chunk[..want]) {
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(FrameError::Io(err)),
        };

        if read == 0 {
            return Err(FrameError::ConnectionClosed);
        }

        buf.extend_from_slice(&chunk[..read]);
    }

    Ok(buf.freeze())
}

/// Reads complete messages from any `Read` stream.
///
/// Handles partial reads internally — callers always get a complete,
/// fully decoded message or an explicit failure.
#[derive(Debug)]
pub struct MessageReader<T> {
    inner: T,
}

impl<T: Read> MessageReader<T> {
    /// Create a new message reader.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Read the next complete message (blocking).
    ///
    /// The payload is always drained from the stream before the header
    /// tags are validated, so a malformed or unknown tag surfaces as an
    /// error while the stream stays aligned on the next frame.
    pub fn read_message(&mut self) -> Result<Message> {
        let header_bytes = read_exact_bytes(&mut self.inner, HEADER_SIZE)?;
        let header = decode_header(&header_bytes)?;

        trace!(
            payload_len = header.payload_len,
            data_type = header.data_type,
            channel = header.channel,
            "frame header received"
        );

        let payload = read_exact_bytes(&mut self.inner, header.payload_len as usize)?;

        let data_type = DataType::from_wire(header.data_type)?;
        let channel = Channel::from_wire(header.channel)?;
        let value = TypedValue::from_payload(data_type, &payload)?;

        Ok(Message { channel, value })
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
