use std::io::{Read, Write};
use std::thread;

use gsdep_frame::{FrameError, Message, MessageReader, MessageWriter};
use gsdep_wire::{Channel, TypedValue};
use tracing::{debug, warn};

use crate::command::CMD_CONNECT;
use crate::error::{ClientError, Result};
use crate::retry::RetryPolicy;

/// Drive the connect handshake until the server echoes the CNCT command.
///
/// Each attempt sends `CNCT` on the COM channel as a STRING and reads one
/// message. Anything other than a COM/STRING/`CNCT` echo — a read failure,
/// a channel or type mismatch, a different payload — schedules another
/// attempt after the policy interval; the server may simply not be ready
/// yet. Two outcomes end the loop early: the transport reports
/// [`FrameError::ConnectionClosed`] (the peer is gone, retrying cannot
/// help), or a bounded policy runs out of attempts.
///
/// Returns the number of attempts it took.
pub fn handshake<R: Read, W: Write>(
    reader: &mut MessageReader<R>,
    writer: &mut MessageWriter<W>,
    policy: &RetryPolicy,
) -> Result<u32> {
    let mut attempts = 0u32;

    loop {
        if let Some(max) = policy.max_attempts {
            if attempts >= max {
                return Err(ClientError::HandshakeExhausted(max));
            }
        }
        attempts += 1;

        debug!(attempts, "sending connect command");
        writer.write_message(Channel::Com, &TypedValue::Str(CMD_CONNECT.to_string()))?;

        match reader.read_message() {
            Ok(msg) if is_connect_ack(&msg) => {
                debug!(attempts, "handshake complete");
                return Ok(attempts);
            }
            Ok(msg) => {
                warn!(
                    channel = msg.channel.name(),
                    data_type = msg.data_type().name(),
                    "unexpected handshake reply, retrying"
                );
            }
            Err(FrameError::ConnectionClosed) => {
                return Err(ClientError::Frame(FrameError::ConnectionClosed));
            }
            Err(err) => {
                warn!(%err, "handshake read failed, retrying");
            }
        }

        thread::sleep(policy.interval);
    }
}

fn is_connect_ack(msg: &Message) -> bool {
    msg.channel == Channel::Com
        && matches!(&msg.value, TypedValue::Str(text) if text == CMD_CONNECT)
}
