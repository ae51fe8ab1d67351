//! TCP transport for GSDEP sessions.
//!
//! This is the lowest layer of the stack: it dials the server with a
//! bounded connect timeout and hands out an established byte stream.
//! Connect failures are reported distinctly from mid-session I/O failures;
//! retrying a failed connect is the caller's decision, not this layer's.

pub mod error;
pub mod tcp;

pub use error::{Result, TransportError};
pub use tcp::{ShutdownHandle, TcpTransport, TransportConfig};
