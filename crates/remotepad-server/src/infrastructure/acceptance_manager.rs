//! The top-level accept loop and session registry.
//!
//! Repeatedly asks the [`ConnectionAcceptor`] for connections and gives
//! each one a [`ClientSession`] on its own task, recording the session's
//! handle for later bulk disposal.  A single failed accept attempt is
//! logged and the listener keeps running.
//!
//! The manager has exactly two states: running and disposed.  [`dispose`]
//! first raises the shutdown flag (so the acceptor's next return is the
//! clean `None`), then disposes every registered session; sessions get a
//! chance to close cleanly before the listener itself goes away.  The
//! registry is mutex-guarded because disposal races with new connections
//! arriving.
//!
//! [`dispose`]: AcceptanceManager::dispose

use std::io;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
};

use remotepad_core::CommandExecutor;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::infrastructure::acceptor::ConnectionAcceptor;
use crate::infrastructure::tcp_session::{ClientSession, SessionHandle};

/// Accepts connections and owns the registry of live sessions.
pub struct AcceptanceManager {
    acceptor: ConnectionAcceptor,
    executor: Arc<CommandExecutor>,
    sessions: Mutex<Vec<SessionHandle>>,
    shutdown: Arc<AtomicBool>,
}

impl AcceptanceManager {
    pub fn new(listener: TcpListener, executor: Arc<CommandExecutor>) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        Self {
            acceptor: ConnectionAcceptor::new(listener, Arc::clone(&shutdown)),
            executor,
            sessions: Mutex::new(Vec::new()),
            shutdown,
        }
    }

    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.acceptor.local_addr()
    }

    /// The number of sessions currently registered.
    pub fn session_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Runs the accept loop until [`dispose`](Self::dispose) is called.
    pub async fn run(&self) {
        loop {
            match self.acceptor.accept_connection().await {
                Ok(Some((stream, peer))) => {
                    if self.shutdown.load(Ordering::SeqCst) {
                        // Lost the race with dispose(); this connection must
                        // not outlive the registry drain.
                        debug!("dropping connection from {peer} accepted during shutdown");
                        continue;
                    }

                    info!("accepted connection from {peer}");
                    let (session, handle) =
                        ClientSession::new(stream, peer, Arc::clone(&self.executor));
                    self.sessions
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(handle);
                    tokio::spawn(session.run());
                }
                Ok(None) => {
                    info!("listener shutting down; accept loop exiting");
                    break;
                }
                Err(e) => {
                    // One failed accept must not stop the listener.
                    error!("failed to accept connection: {e}");
                }
            }
        }
    }

    /// Disposes every registered session, then lets the accept loop exit
    /// and the listener close.
    pub fn dispose(&self) {
        self.shutdown.store(true, Ordering::SeqCst);

        let handles =
            std::mem::take(&mut *self.sessions.lock().unwrap_or_else(PoisonError::into_inner));
        for handle in &handles {
            debug!("disposing session {}", handle.peer());
            handle.dispose();
        }
        info!("disposed {} session(s)", handles.len());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
