//! Stateless packet-oriented variant of command dispatch.
//!
//! UDP has no connection, so there is one loop for all callers: each
//! received datagram is decoded as text, split on `;`, and dispatched
//! exactly like a TCP line.  No acknowledgment or reply is ever sent; there
//! is no ordering guarantee between packets and none is attempted.  A
//! failing command affects neither the rest of its packet nor any future
//! packet.

use std::io;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use remotepad_core::CommandExecutor;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, error};

use crate::application::dispatch_batch;

/// How long one receive attempt blocks before re-checking the shutdown
/// flag.
const RECV_POLL: Duration = Duration::from_millis(200);

/// Largest accepted datagram payload.  Command batches are short; anything
/// beyond this is truncated by the OS.
const MAX_DATAGRAM: usize = 8192;

/// The UDP command loop.
pub struct DatagramSession {
    socket: UdpSocket,
    executor: Arc<CommandExecutor>,
    shutdown: Arc<AtomicBool>,
}

impl DatagramSession {
    pub fn new(
        socket: UdpSocket,
        executor: Arc<CommandExecutor>,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self { socket, executor, shutdown }
    }

    /// The address the socket is actually bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receives and dispatches datagrams until the shutdown flag is set.
    pub async fn run(&self) {
        let mut buf = vec![0u8; MAX_DATAGRAM];

        loop {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            match timeout(RECV_POLL, self.socket.recv_from(&mut buf)).await {
                Ok(Ok((len, src))) => {
                    let batch = String::from_utf8_lossy(&buf[..len]);
                    debug!("datagram from {src}: {len} byte(s)");
                    dispatch_batch(&self.executor, &batch);
                }
                Ok(Err(e)) => {
                    // Transient receive failure; the loop keeps serving.
                    error!("failed to receive datagram: {e}");
                }
                // No datagram within the poll window; re-check the flag.
                Err(_) => {}
            }
        }

        debug!("datagram loop exiting");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
