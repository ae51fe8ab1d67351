use bytes::{BufMut, BytesMut};
use gsdep_wire::{Channel, DataType, TypedValue};

use crate::error::{FrameError, Result};

/// Frame header: payload length (4) + data type (2) + channel (2) = 8 bytes.
/// All fields big-endian. No variable-length header fields.
pub const HEADER_SIZE: usize = 8;

/// One logical protocol message.
///
/// Constructed on send from a caller-supplied value, or on receive by
/// decoding header + payload. The data-type tag is fully determined by the
/// value variant, so it is exposed as an accessor rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Routing label for this message.
    pub channel: Channel,
    /// The decoded payload value.
    pub value: TypedValue,
}

impl Message {
    /// Create a new message.
    pub fn new(channel: Channel, value: TypedValue) -> Self {
        Self { channel, value }
    }

    /// The wire tag of the carried value.
    pub fn data_type(&self) -> DataType {
        self.value.data_type()
    }
}

/// Raw header fields as they appear on the wire, before tag validation.
///
/// Tags are validated only after the payload has been drained from the
/// stream, so the fields here are plain integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeader {
    pub payload_len: u32,
    pub data_type: u16,
    pub channel: u16,
}

/// Encode the fixed 8-byte header.
///
/// Fails if `payload_len` exceeds the 32-bit length field. Tag values are
/// taken from the closed enumerations and always fit their fields.
pub fn encode_header(
    payload_len: usize,
    data_type: DataType,
    channel: Channel,
    dst: &mut BytesMut,
) -> Result<()> {
    if payload_len > u32::MAX as usize {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: u32::MAX as usize,
        });
    }
    dst.reserve(HEADER_SIZE);
    dst.put_u32(payload_len as u32);
    dst.put_u16(data_type.wire());
    dst.put_u16(channel.wire());
    Ok(())
}

/// Decode the fixed 8-byte header.
///
/// Fails with [`FrameError::ShortHeader`] if fewer than 8 bytes are
/// supplied; cannot happen when fed by the exact-read transport layer.
pub fn decode_header(src: &[u8]) -> Result<RawHeader> {
    if src.len() < HEADER_SIZE {
        return Err(FrameError::ShortHeader { len: src.len() });
    }
    Ok(RawHeader {
        payload_len: u32::from_be_bytes(src[0..4].try_into().unwrap()),
        data_type: u16::from_be_bytes(src[4..6].try_into().unwrap()),
        channel: u16::from_be_bytes(src[6..8].try_into().unwrap()),
    })
}

/// Encode a complete frame (header + textual payload) into `dst`.
pub fn encode_message(channel: Channel, value: &TypedValue, dst: &mut BytesMut) -> Result<()> {
    let payload = value.to_payload()?;
    encode_header(payload.len(), value.data_type(), channel, dst)?;
    dst.put_slice(&payload);
    Ok(())
}
