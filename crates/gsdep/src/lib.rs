//! Rust client for GSDEP, a small binary framing protocol for exchanging
//! typed values with a remote peer over TCP.
//!
//! # Crate structure
//!
//! - [`wire`] — Tags and the textual typed value codec
//! - [`frame`] — Fixed 8-byte header framing with exact-read discipline
//! - [`transport`] — TCP transport (connect timeout, out-of-band shutdown)
//! - [`client`] — Session state machine and retrying CNCT handshake

/// Re-export wire types.
pub mod wire {
    pub use gsdep_wire::*;
}

/// Re-export framing types.
pub mod frame {
    pub use gsdep_frame::*;
}

/// Re-export transport types.
pub mod transport {
    pub use gsdep_transport::*;
}

/// Re-export client session types.
pub mod client {
    pub use gsdep_client::*;
}

pub mod logging;
