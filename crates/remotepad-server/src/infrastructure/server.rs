//! The server facade: bind, start, stop.
//!
//! [`RelayServer`] owns the acceptance manager and the optional datagram
//! loop, and exposes the only two calls the embedding CLI needs: `start`
//! and `stop`.  It binds the TCP listener on the configured port (default
//! 10999) and the UDP socket on the companion port, and reports the
//! actually-bound addresses — which matters when a test binds port 0 and
//! lets the OS choose.

use std::net::{IpAddr, SocketAddr};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use remotepad_core::{CommandExecutor, InputInjector};
use thiserror::Error;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::config::ServerConfig;
use crate::infrastructure::acceptance_manager::AcceptanceManager;
use crate::infrastructure::udp_session::DatagramSession;

/// Error type for server lifecycle operations.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid bind address {addr:?}: {source}")]
    InvalidBindAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to bind TCP listener on {addr}: {source}")]
    TcpBind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to bind UDP socket on {addr}: {source}")]
    UdpBind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server is already running")]
    AlreadyRunning,

    #[error("server is not running")]
    NotRunning,
}

/// Handles owned while the server is running.
struct Running {
    manager: Arc<AcceptanceManager>,
    accept_task: JoinHandle<()>,
    tcp_addr: SocketAddr,
    udp_shutdown: Arc<AtomicBool>,
    udp_task: Option<JoinHandle<()>>,
    udp_addr: Option<SocketAddr>,
}

/// The command relay server.
pub struct RelayServer {
    config: ServerConfig,
    executor: Arc<CommandExecutor>,
    running: Option<Running>,
}

impl RelayServer {
    /// Creates a stopped server that will drive the given injector.
    pub fn new(config: ServerConfig, injector: Arc<dyn InputInjector>) -> Self {
        Self {
            config,
            executor: Arc::new(CommandExecutor::new(injector)),
            running: None,
        }
    }

    /// Binds the sockets and starts the accept and datagram loops.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if the server is already running, the bind
    /// address is invalid, or a socket cannot be bound.  A UDP bind failure
    /// tears the already-started TCP side back down before returning.
    pub async fn start(&mut self) -> Result<(), ServerError> {
        if self.running.is_some() {
            return Err(ServerError::AlreadyRunning);
        }

        let ip: IpAddr = self.config.bind_address.parse().map_err(|source| {
            ServerError::InvalidBindAddress { addr: self.config.bind_address.clone(), source }
        })?;

        // ── TCP listener + acceptance manager ─────────────────────────────────
        let tcp_bind = SocketAddr::new(ip, self.config.listen_port);
        let listener = TcpListener::bind(tcp_bind)
            .await
            .map_err(|source| ServerError::TcpBind { addr: tcp_bind, source })?;
        let tcp_addr = listener
            .local_addr()
            .map_err(|source| ServerError::TcpBind { addr: tcp_bind, source })?;

        let manager = Arc::new(AcceptanceManager::new(listener, Arc::clone(&self.executor)));
        let accept_task = tokio::spawn({
            let manager = Arc::clone(&manager);
            async move { manager.run().await }
        });
        info!("listening for commands on TCP {tcp_addr}");

        // ── UDP datagram loop ─────────────────────────────────────────────────
        let udp_shutdown = Arc::new(AtomicBool::new(false));
        let (udp_task, udp_addr) = if self.config.enable_udp {
            let udp_bind = SocketAddr::new(ip, self.config.effective_udp_port());
            let socket = match UdpSocket::bind(udp_bind).await {
                Ok(socket) => socket,
                Err(source) => {
                    manager.dispose();
                    let _ = accept_task.await;
                    return Err(ServerError::UdpBind { addr: udp_bind, source });
                }
            };
            let udp_addr = match socket.local_addr() {
                Ok(addr) => addr,
                Err(source) => {
                    manager.dispose();
                    let _ = accept_task.await;
                    return Err(ServerError::UdpBind { addr: udp_bind, source });
                }
            };

            let session = DatagramSession::new(
                socket,
                Arc::clone(&self.executor),
                Arc::clone(&udp_shutdown),
            );
            let task = tokio::spawn(async move { session.run().await });
            info!("listening for command datagrams on UDP {udp_addr}");
            (Some(task), Some(udp_addr))
        } else {
            (None, None)
        };

        self.running = Some(Running {
            manager,
            accept_task,
            tcp_addr,
            udp_shutdown,
            udp_task,
            udp_addr,
        });
        Ok(())
    }

    /// Disposes all sessions, closes both sockets, and waits for the loops
    /// to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::NotRunning`] if the server was not started.
    pub async fn stop(&mut self) -> Result<(), ServerError> {
        let running = self.running.take().ok_or(ServerError::NotRunning)?;

        info!("stopping server");
        running.manager.dispose();
        running.udp_shutdown.store(true, Ordering::SeqCst);

        if running.accept_task.await.is_err() {
            error!("accept loop task panicked");
        }
        if let Some(task) = running.udp_task {
            if task.await.is_err() {
                error!("datagram loop task panicked");
            }
        }

        info!("server stopped");
        Ok(())
    }

    /// Whether the server is currently running.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// The bound TCP address while running.
    pub fn tcp_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().map(|r| r.tcp_addr)
    }

    /// The bound UDP address while running with UDP enabled.
    pub fn udp_addr(&self) -> Option<SocketAddr> {
        self.running.as_ref().and_then(|r| r.udp_addr)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use remotepad_core::inject::mock::RecordingInjector;

    fn test_config() -> ServerConfig {
        ServerConfig {
            listen_port: 0,
            udp_port: Some(0),
            bind_address: "127.0.0.1".to_string(),
            enable_udp: true,
            log_level: "info".to_string(),
        }
    }

    fn make_server(config: ServerConfig) -> RelayServer {
        RelayServer::new(config, Arc::new(RecordingInjector::new()))
    }

    #[tokio::test]
    async fn test_start_reports_bound_addresses() {
        let mut server = make_server(test_config());
        server.start().await.unwrap();

        assert!(server.is_running());
        assert!(server.tcp_addr().is_some());
        assert!(server.udp_addr().is_some());

        server.stop().await.unwrap();
        assert!(!server.is_running());
    }

    #[tokio::test]
    async fn test_udp_can_be_disabled() {
        let mut server = make_server(ServerConfig { enable_udp: false, ..test_config() });
        server.start().await.unwrap();

        assert!(server.udp_addr().is_none());

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_double_start_is_rejected() {
        let mut server = make_server(test_config());
        server.start().await.unwrap();

        assert!(matches!(server.start().await, Err(ServerError::AlreadyRunning)));

        server.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_without_start_is_rejected() {
        let mut server = make_server(test_config());
        assert!(matches!(server.stop().await, Err(ServerError::NotRunning)));
    }

    #[tokio::test]
    async fn test_invalid_bind_address_is_rejected() {
        let mut server = make_server(ServerConfig {
            bind_address: "not-an-address".to_string(),
            ..test_config()
        });
        assert!(matches!(
            server.start().await,
            Err(ServerError::InvalidBindAddress { .. })
        ));
        assert!(!server.is_running());
    }

    #[tokio::test]
    async fn test_server_can_be_restarted_after_stop() {
        let mut server = make_server(test_config());
        server.start().await.unwrap();
        server.stop().await.unwrap();

        server.start().await.unwrap();
        assert!(server.is_running());
        server.stop().await.unwrap();
    }
}
