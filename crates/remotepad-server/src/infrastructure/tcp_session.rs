//! Per-connection session: reads command lines and dispatches them.
//!
//! Each accepted connection gets its own session running on its own task.
//! The session pulls one line at a time, splits it into `;`-separated
//! commands, and hands each to the shared executor.  A bad line or a
//! failing command is logged and the loop continues; only closure — by the
//! peer, by end-of-stream, or by [`SessionHandle::dispose`] — ends the
//! session.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use remotepad_core::CommandExecutor;
use tokio::io::AsyncRead;
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::application::dispatch_batch;
use crate::infrastructure::stream_reader::StreamReader;

/// Backoff after a non-closure read failure, so a persistent transport
/// fault cannot spin the loop hot.
const READ_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Control handle for a running session, kept in the acceptance manager's
/// registry.
pub struct SessionHandle {
    peer: SocketAddr,
    shutdown: Arc<Notify>,
}

impl SessionHandle {
    /// The remote address of the session's connection.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Closes the session: the read loop observes the signal on its next
    /// iteration, exits, and drops (closes) the connection.
    pub fn dispose(&self) {
        self.shutdown.notify_one();
    }
}

/// One client's read/dispatch loop.
pub struct ClientSession<R> {
    reader: StreamReader<R>,
    peer: SocketAddr,
    executor: Arc<CommandExecutor>,
    shutdown: Arc<Notify>,
}

impl<R: AsyncRead + Unpin> ClientSession<R> {
    /// Creates a session over an accepted connection, returning the session
    /// and the handle used to dispose of it later.
    pub fn new(
        stream: R,
        peer: SocketAddr,
        executor: Arc<CommandExecutor>,
    ) -> (Self, SessionHandle) {
        let shutdown = Arc::new(Notify::new());
        let session = Self {
            reader: StreamReader::new(stream),
            peer,
            executor,
            shutdown: Arc::clone(&shutdown),
        };
        (session, SessionHandle { peer, shutdown })
    }

    /// Runs the session until the connection closes or the handle disposes
    /// it.  Never returns an error: every failure is contained here.
    pub async fn run(mut self) {
        let peer = self.peer;
        debug!("session {peer}: started");

        loop {
            tokio::select! {
                result = self.reader.read_line() => match result {
                    Ok(Some(line)) => dispatch_batch(&self.executor, &line),
                    // Connection closed on either end; the expected way out.
                    Ok(None) => break,
                    Err(e) => {
                        warn!("session {peer}: failed to read from client: {e}");
                        tokio::time::sleep(READ_RETRY_DELAY).await;
                    }
                },
                _ = self.shutdown.notified() => break,
            }
        }

        debug!("session {peer}: closed");
        // Dropping the reader closes the connection.
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
