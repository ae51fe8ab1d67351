//! Command tokens exchanged on the COM channel.
//!
//! Commands are plain STRING payloads; the closed set below is everything
//! a conforming peer recognizes.

/// Begin a session. Echoed back by the server to complete the handshake.
pub const CMD_CONNECT: &str = "CNCT";

/// Close the session. Sent by the client before dropping the socket.
pub const CMD_DISCONNECT: &str = "DISCNCT";

/// Ask the server to start streaming data on the DAT channel.
pub const CMD_START_DATA: &str = "start_data";

/// Ask the server to stop streaming data.
pub const CMD_STOP_DATA: &str = "stop_data";

/// All recognized command tokens.
pub const COMMANDS: [&str; 4] = [CMD_CONNECT, CMD_DISCONNECT, CMD_START_DATA, CMD_STOP_DATA];

/// Whether `text` is one of the recognized command tokens.
pub fn is_command(text: &str) -> bool {
    COMMANDS.contains(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_commands() {
        assert!(is_command("CNCT"));
        assert!(is_command("DISCNCT"));
        assert!(is_command("start_data"));
        assert!(is_command("stop_data"));
        assert!(!is_command("cnct"));
        assert!(!is_command("hello"));
    }
}
