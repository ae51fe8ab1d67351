use std::io::ErrorKind;
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, TransportError};

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Timeout for the initial connect only. Established streams block
    /// without per-operation timeouts; callers needing bounded waits close
    /// the socket out-of-band via a [`ShutdownHandle`].
    pub connect_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// An established TCP connection to a GSDEP server.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    peer_addr: SocketAddr,
}

impl TcpTransport {
    /// Resolve `host:port` and connect, trying each resolved address with
    /// the configured timeout (blocking).
    pub fn connect(host: &str, port: u16, config: &TransportConfig) -> Result<Self> {
        let addr_text = format!("{host}:{port}");
        let addrs = (host, port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Connect {
                addr: addr_text.clone(),
                source,
            })?;

        let mut last_err = None;
        for addr in addrs {
            debug!(%addr, timeout = ?config.connect_timeout, "dialing");
            match TcpStream::connect_timeout(&addr, config.connect_timeout) {
                Ok(stream) => {
                    info!(%addr, "connected");
                    return Ok(Self {
                        stream,
                        peer_addr: addr,
                    });
                }
                Err(err) => last_err = Some(err),
            }
        }

        Err(TransportError::Connect {
            addr: addr_text,
            source: last_err.unwrap_or_else(|| {
                std::io::Error::new(ErrorKind::AddrNotAvailable, "no addresses resolved")
            }),
        })
    }

    /// The address of the connected peer.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Handle for closing this socket from outside a blocking operation.
    pub fn shutdown_handle(&self) -> Result<ShutdownHandle> {
        Ok(ShutdownHandle {
            stream: self.stream.try_clone()?,
        })
    }

    /// Split into independently owned read and write halves of the same
    /// underlying socket.
    pub fn split(self) -> Result<(TcpStream, TcpStream)> {
        let read_half = self.stream.try_clone()?;
        Ok((read_half, self.stream))
    }
}

/// Closes the socket out-of-band.
///
/// Any in-flight blocking read or write on the same socket fails with a
/// connection error instead of hanging. This is the only cancellation
/// path the protocol offers.
#[derive(Debug)]
pub struct ShutdownHandle {
    stream: TcpStream,
}

impl ShutdownHandle {
    /// Shut down both directions of the socket.
    pub fn shutdown(&self) -> Result<()> {
        debug!("shutting down transport");
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Already closed by the peer; the goal state is reached.
            Err(err) if err.kind() == ErrorKind::NotConnected => Ok(()),
            Err(err) => Err(TransportError::Shutdown(err)),
        }
    }

    /// Clone the handle (each clone holds its own socket descriptor).
    pub fn try_clone(&self) -> Result<Self> {
        Ok(Self {
            stream: self.stream.try_clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    #[test]
    fn connect_to_listening_server() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let accepter = thread::spawn(move || {
            let _ = listener.accept().unwrap();
        });

        let transport =
            TcpTransport::connect("127.0.0.1", port, &TransportConfig::default()).unwrap();
        assert_eq!(transport.peer_addr().port(), port);

        accepter.join().unwrap();
    }

    #[test]
    fn connect_to_closed_port_fails() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = TcpTransport::connect("127.0.0.1", port, &TransportConfig::default());
        assert!(matches!(result, Err(TransportError::Connect { .. })));
    }

    #[test]
    fn unresolvable_host_fails() {
        let result = TcpTransport::connect(
            "host.invalid.gsdep.test",
            1337,
            &TransportConfig::default(),
        );
        assert!(matches!(result, Err(TransportError::Connect { .. })));
    }

    #[test]
    fn shutdown_unblocks_reader() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let accepter = thread::spawn(move || listener.accept().unwrap().0);

        let transport =
            TcpTransport::connect("127.0.0.1", port, &TransportConfig::default()).unwrap();
        let handle = transport.shutdown_handle().unwrap();
        let (mut read_half, _write_half) = transport.split().unwrap();
        let _server_side = accepter.join().unwrap();

        let reader = thread::spawn(move || {
            let mut buf = [0u8; 16];
            read_half.read(&mut buf)
        });

        thread::sleep(Duration::from_millis(50));
        handle.shutdown().unwrap();

        // A shut-down socket reports EOF (or an error) instead of hanging.
        let read_result = reader.join().unwrap();
        assert!(matches!(read_result, Ok(0) | Err(_)));
    }

    #[test]
    fn split_halves_share_one_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let accepter = thread::spawn(move || listener.accept().unwrap().0);
        let transport =
            TcpTransport::connect("127.0.0.1", port, &TransportConfig::default()).unwrap();
        let (read_half, write_half) = transport.split().unwrap();
        let server_side = accepter.join().unwrap();

        use std::io::Write;
        let mut write_half = write_half;
        write_half.write_all(b"ping").unwrap();

        let mut server_side = server_side;
        let mut buf = [0u8; 4];
        server_side.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ping");

        drop(read_half);
    }
}
