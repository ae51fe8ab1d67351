use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use gsdep_wire::{Channel, TypedValue};
use tracing::trace;

use crate::codec::encode_message;
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 4096;

/// Writes complete messages to any `Write` stream.
///
/// Header and payload are assembled into one buffer, then flushed with a
/// write loop that keeps issuing partial writes with the remaining bytes
/// until the whole frame is on the wire.
#[derive(Debug)]
pub struct MessageWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> MessageWriter<T> {
    /// Create a new message writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Encode and write one complete message (blocking).
    pub fn write_message(&mut self, channel: Channel, value: &TypedValue) -> Result<()> {
        self.buf.clear();
        encode_message(channel, value, &mut self.buf)?;

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        trace!(
            channel = channel.name(),
            data_type = value.data_type().name(),
            wire_len = self.buf.len(),
            "frame written"
        );

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
