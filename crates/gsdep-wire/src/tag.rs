//! Closed tag enumerations carried in every frame header.
//!
//! Both tags travel as big-endian `u16` fields. Codes outside the closed
//! sets are decode failures, never a silently absent value.

use crate::error::{Result, WireError};

/// How the payload bytes of a message are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Structured key/value mapping, compact JSON object text.
    HashMap,
    /// Raw UTF-8 text.
    String,
    /// Decimal ASCII text of a 32-bit signed integer.
    Int,
    /// Decimal ASCII text of a 64-bit float.
    Float,
    /// Bracketed, comma-separated integer sequence.
    IntList,
    /// Bracketed, comma-separated float sequence.
    FloatList,
}

impl DataType {
    /// Wire code for this tag.
    pub fn wire(self) -> u16 {
        match self {
            DataType::HashMap => 1,
            DataType::String => 2,
            DataType::Int => 3,
            DataType::Float => 4,
            DataType::IntList => 5,
            DataType::FloatList => 6,
        }
    }

    /// Map a wire code back to a tag.
    pub fn from_wire(code: u16) -> Result<Self> {
        match code {
            1 => Ok(DataType::HashMap),
            2 => Ok(DataType::String),
            3 => Ok(DataType::Int),
            4 => Ok(DataType::Float),
            5 => Ok(DataType::IntList),
            6 => Ok(DataType::FloatList),
            other => Err(WireError::UnknownDataType(other)),
        }
    }

    /// Protocol-level name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            DataType::HashMap => "HASH_MAP",
            DataType::String => "STRING",
            DataType::Int => "INT",
            DataType::Float => "FLOAT",
            DataType::IntList => "LIST_INT",
            DataType::FloatList => "LIST_FLOAT",
        }
    }
}

/// Routing label carried in the header, independent of payload
/// interpretation. The framing and codec layers are channel-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Control/command channel.
    Com,
    /// Data channel.
    Dat,
}

impl Channel {
    /// Wire code for this channel.
    pub fn wire(self) -> u16 {
        match self {
            Channel::Com => 1,
            Channel::Dat => 2,
        }
    }

    /// Map a wire code back to a channel.
    pub fn from_wire(code: u16) -> Result<Self> {
        match code {
            1 => Ok(Channel::Com),
            2 => Ok(Channel::Dat),
            other => Err(WireError::UnknownChannel(other)),
        }
    }

    /// Protocol-level name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Com => "COM",
            Channel::Dat => "DAT",
        }
    }
}
