//! Accepts connections on behalf of the listening socket.
//!
//! The single chokepoint that tells deliberate shutdown apart from a real
//! accept failure.  Shutdown is an explicit flag — shared with the
//! acceptance manager — checked between timeout-bounded accept attempts,
//! so the loop above never needs transport-specific knowledge and no error
//! message text is ever inspected.

use std::io;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

/// How long one accept attempt blocks before re-checking the shutdown flag.
const ACCEPT_POLL: Duration = Duration::from_millis(200);

/// Wraps the listening socket and an explicit shutdown flag.
pub struct ConnectionAcceptor {
    listener: TcpListener,
    shutdown: Arc<AtomicBool>,
}

impl ConnectionAcceptor {
    pub fn new(listener: TcpListener, shutdown: Arc<AtomicBool>) -> Self {
        Self { listener, shutdown }
    }

    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Blocks until a new connection arrives or the shutdown flag is set.
    ///
    /// Returns `Ok(Some(..))` with the accepted connection, or `Ok(None)`
    /// when the listener is shutting down — the expected, silent path.
    ///
    /// # Errors
    ///
    /// Propagates any accept failure unchanged; the caller decides whether
    /// to retry.
    pub async fn accept_connection(&self) -> io::Result<Option<(TcpStream, SocketAddr)>> {
        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                return Ok(None);
            }

            match timeout(ACCEPT_POLL, self.listener.accept()).await {
                Ok(Ok(accepted)) => return Ok(Some(accepted)),
                Ok(Err(e)) => return Err(e),
                // No connection within the poll window; re-check the flag.
                Err(_) => {}
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
