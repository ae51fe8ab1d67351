use std::net::TcpStream;

use gsdep_frame::{Message, MessageReader, MessageWriter};
use gsdep_transport::{ShutdownHandle, TcpTransport, TransportConfig};
use gsdep_wire::{Channel, TypedValue};
use tracing::{debug, info, warn};

use crate::command::{CMD_DISCONNECT, CMD_START_DATA, CMD_STOP_DATA};
use crate::error::{ClientError, Result};
use crate::handshake::handshake;
use crate::retry::RetryPolicy;

/// Connection lifecycle states.
///
/// `Failed` is reached from `Connecting` or `Handshaking` and is sticky
/// until the next [`Session::open`] call. Handshake rejections loop inside
/// `Handshaking` per the retry policy and do not count as failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Handshaking,
    Ready,
    Failed,
}

/// Session construction parameters.
///
/// Address and port are session-scoped, not process-wide: independent
/// sessions with different targets can coexist.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Transport settings (connect timeout).
    pub transport: TransportConfig,
    /// Handshake retry policy.
    pub retry: RetryPolicy,
}

impl SessionConfig {
    /// Config with default transport settings and retry policy.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            transport: TransportConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// The framed halves and shutdown handle of an established connection.
#[derive(Debug)]
struct Link {
    reader: MessageReader<TcpStream>,
    writer: MessageWriter<TcpStream>,
    shutdown: ShutdownHandle,
}

/// A GSDEP client session.
///
/// Starts `Disconnected`; [`Session::open`] walks it through `Connecting`
/// and `Handshaking` to `Ready`, or leaves it `Failed`. All send and
/// receive operations are synchronous and blocking, with no per-operation
/// timeouts; the session assumes a single logical thread of control and
/// owns its transport exclusively. The one out-of-band escape hatch is
/// [`Session::shutdown_handle`], which closes the socket and fails any
/// in-flight blocking operation.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    link: Option<Link>,
    state: SessionState,
}

impl Session {
    /// A disconnected session for the given target.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            link: None,
            state: SessionState::Disconnected,
        }
    }

    /// Connect and handshake in one step, returning a `Ready` session.
    pub fn connect(config: &SessionConfig) -> Result<Self> {
        let mut session = Self::new(config.clone());
        session.open()?;
        Ok(session)
    }

    /// Connect to the server and run the handshake.
    ///
    /// On error the session is left in the `Failed` state; calling `open`
    /// again starts over from a fresh transport.
    pub fn open(&mut self) -> Result<()> {
        self.state = SessionState::Connecting;
        debug!(
            host = %self.config.host,
            port = self.config.port,
            state = ?self.state,
            "connecting"
        );
        let transport =
            match TcpTransport::connect(&self.config.host, self.config.port, &self.config.transport)
            {
                Ok(transport) => transport,
                Err(err) => {
                    self.state = SessionState::Failed;
                    warn!(state = ?self.state, %err, "connect failed");
                    return Err(err.into());
                }
            };

        let shutdown = transport.shutdown_handle()?;
        let (read_half, write_half) = transport.split()?;
        let mut reader = MessageReader::new(read_half);
        let mut writer = MessageWriter::new(write_half);

        self.state = SessionState::Handshaking;
        debug!(state = ?self.state, "transport open, shaking hands");
        let attempts = match handshake(&mut reader, &mut writer, &self.config.retry) {
            Ok(attempts) => attempts,
            Err(err) => {
                self.state = SessionState::Failed;
                warn!(state = ?self.state, %err, "handshake failed");
                return Err(err);
            }
        };

        self.link = Some(Link {
            reader,
            writer,
            shutdown,
        });
        self.state = SessionState::Ready;
        info!(attempts, state = ?self.state, "session ready");
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Send one typed value (blocking until the frame is fully written).
    pub fn send(&mut self, channel: Channel, value: &TypedValue) -> Result<()> {
        self.link()?.writer.write_message(channel, value)?;
        Ok(())
    }

    /// Receive the next message (blocking).
    pub fn recv(&mut self) -> Result<Message> {
        Ok(self.link()?.reader.read_message()?)
    }

    /// Ask the server to start streaming data on the DAT channel.
    pub fn start_data(&mut self) -> Result<()> {
        self.send_command(CMD_START_DATA)
    }

    /// Ask the server to stop streaming data.
    pub fn stop_data(&mut self) -> Result<()> {
        self.send_command(CMD_STOP_DATA)
    }

    /// Handle for closing the socket from another thread, failing any
    /// in-flight blocking read or write on this session.
    pub fn shutdown_handle(&self) -> Result<ShutdownHandle> {
        match &self.link {
            Some(link) => Ok(link.shutdown.try_clone()?),
            None => Err(ClientError::NotConnected),
        }
    }

    /// Send the disconnect command and close the socket.
    ///
    /// The disconnect send is best effort: a peer that already went away
    /// must not prevent the local close. Closing a session that is not
    /// connected is a no-op.
    pub fn close(&mut self) -> Result<()> {
        self.state = SessionState::Disconnected;
        let Some(mut link) = self.link.take() else {
            return Ok(());
        };
        if let Err(err) = link
            .writer
            .write_message(Channel::Com, &TypedValue::Str(CMD_DISCONNECT.to_string()))
        {
            warn!(%err, "disconnect command not delivered");
        }
        link.shutdown.shutdown()?;
        info!("session closed");
        Ok(())
    }

    fn link(&mut self) -> Result<&mut Link> {
        self.link.as_mut().ok_or(ClientError::NotConnected)
    }

    fn send_command(&mut self, token: &str) -> Result<()> {
        debug!(token, "sending command");
        self.send(Channel::Com, &TypedValue::Str(token.to_string()))
    }
}
