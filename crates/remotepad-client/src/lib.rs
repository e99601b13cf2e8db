//! # remotepad-client
//!
//! Companion client library for the RemotePad relay.  Front-ends (a mobile
//! app, a terminal, a test harness) build command strings such as
//! `mouseMove(10,20)` and hand them to a [`RelayClient`], which delivers
//! them to the server over TCP (line-framed, reliable, ordered) or UDP
//! (one datagram per batch, fire-and-forget).
//!
//! The server never replies on either transport, so every send is
//! one-way; the only failure a caller can observe is a local I/O error.

use std::io;

use remotepad_core::protocol::{companion_udp_port, DEFAULT_TCP_PORT};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, UdpSocket};
use tracing::debug;

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A send was attempted before [`RelayClient::connect`].
    #[error("not connected; call connect() first")]
    NotConnected,

    /// The underlying socket operation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A connection to a RemotePad relay server.
///
/// `connect()` opens the TCP stream and binds the UDP socket; after that,
/// commands can be sent over either transport until [`close`] is called or
/// the value is dropped.
///
/// [`close`]: RelayClient::close
pub struct RelayClient {
    host: String,
    tcp_port: u16,
    udp_port: u16,
    tcp: Option<TcpStream>,
    udp: Option<UdpSocket>,
}

impl RelayClient {
    /// Creates a client for a server on the default port (10999), with the
    /// conventional UDP companion port (one below).
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_port(host, DEFAULT_TCP_PORT)
    }

    /// Creates a client for a server on a specific TCP port; the UDP
    /// companion port follows the minus-one convention.
    pub fn with_port(host: impl Into<String>, tcp_port: u16) -> Self {
        let udp_port = companion_udp_port(tcp_port);
        Self::with_ports(host, tcp_port, udp_port)
    }

    /// Creates a client with both ports given explicitly, for deployments
    /// (and tests) that do not follow the companion-port convention.
    pub fn with_ports(host: impl Into<String>, tcp_port: u16, udp_port: u16) -> Self {
        Self {
            host: host.into(),
            tcp_port,
            udp_port,
            tcp: None,
            udp: None,
        }
    }

    /// The host this client targets.
    pub fn server_host(&self) -> &str {
        &self.host
    }

    /// The server's TCP port.
    pub fn server_port(&self) -> u16 {
        self.tcp_port
    }

    /// Opens the TCP connection and binds the UDP socket.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if either socket cannot be set up.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        let tcp = TcpStream::connect((self.host.as_str(), self.tcp_port)).await?;
        let udp = UdpSocket::bind("0.0.0.0:0").await?;
        self.tcp = Some(tcp);
        self.udp = Some(udp);
        Ok(())
    }

    /// Whether the TCP connection has been opened.
    pub fn is_connected(&self) -> bool {
        self.tcp.is_some()
    }

    /// Sends one command (or `;`-joined batch) over TCP as a single line.
    ///
    /// A line terminator is appended unless the command already ends with
    /// one, so one call always corresponds to one complete batch on the
    /// server side.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotConnected`] before `connect()` and
    /// [`ClientError::Io`] on write failure.
    pub async fn send_via_tcp(&mut self, command: &str) -> Result<(), ClientError> {
        let tcp = self.tcp.as_mut().ok_or(ClientError::NotConnected)?;

        debug!("sending command via TCP: {command}");
        tcp.write_all(command.as_bytes()).await?;
        if !command.ends_with('\n') {
            tcp.write_all(b"\n").await?;
        }
        Ok(())
    }

    /// Sends one command (or `;`-joined batch) as a single UDP datagram to
    /// the server's companion port.  No delivery guarantee, no reply.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotConnected`] before `connect()` and
    /// [`ClientError::Io`] on send failure.
    pub async fn send_via_udp(&self, command: &str) -> Result<(), ClientError> {
        let udp = self.udp.as_ref().ok_or(ClientError::NotConnected)?;

        debug!("sending command via UDP: {command}");
        udp.send_to(command.as_bytes(), (self.host.as_str(), self.udp_port))
            .await?;
        Ok(())
    }

    /// Closes the connection to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the TCP shutdown fails.
    pub async fn close(&mut self) -> Result<(), ClientError> {
        if let Some(mut tcp) = self.tcp.take() {
            tcp.shutdown().await?;
        }
        self.udp = None;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
