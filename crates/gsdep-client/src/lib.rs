//! Client session management for GSDEP.
//!
//! This is the "just works" layer: connect to a server, run the retrying
//! CNCT handshake, then exchange typed messages on the COM and DAT
//! channels. All operations are synchronous and blocking; a session is
//! owned by a single logical thread of control, and callers needing
//! concurrency use independent sessions.

pub mod command;
pub mod error;
pub mod handshake;
pub mod retry;
pub mod session;

pub use command::{is_command, CMD_CONNECT, CMD_DISCONNECT, CMD_START_DATA, CMD_STOP_DATA};
pub use error::{ClientError, Result};
pub use handshake::handshake;
pub use retry::RetryPolicy;
pub use session::{Session, SessionConfig, SessionState};
