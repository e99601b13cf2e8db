//! The single gateway between command text and the host input subsystem.
//!
//! Every transport path (TCP sessions, the UDP loop) hands its command
//! strings to one shared [`CommandExecutor`].  The executor parses the text
//! and drives the [`InputInjector`] inside a mutex, so input operations are
//! applied strictly one at a time in dispatch order no matter how many
//! sessions are feeding it concurrently.  Parsing happens inside the
//! critical section as well; commands are tiny and this path is nowhere
//! near a bottleneck.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

use crate::inject::{InjectError, InputInjector};
use crate::protocol::command::{Command, CommandError};

/// Error type for one command execution.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The text could not be parsed as a supported command.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The injector rejected the operation.
    #[error("input injection failed: {0}")]
    Inject(#[from] InjectError),
}

/// Parses and executes commands against the host input injector,
/// serialized process-wide.
pub struct CommandExecutor {
    injector: Arc<dyn InputInjector>,
    gate: Mutex<()>,
}

impl CommandExecutor {
    /// Creates an executor driving the given injector.
    pub fn new(injector: Arc<dyn InputInjector>) -> Self {
        Self { injector, gate: Mutex::new(()) }
    }

    /// Parses and executes one command, mutually exclusive with every other
    /// concurrent call.
    ///
    /// A command that fails to parse performs no injector call at all.
    /// `mouseMoveRelative` reads the current pointer position and moves to
    /// the sign-inverted offset: deltas describe a drag, and the cursor
    /// moves opposite the drag.
    ///
    /// # Errors
    ///
    /// Returns [`ExecuteError::Command`] for malformed or unknown command
    /// text and [`ExecuteError::Inject`] when the injector fails.
    pub fn execute(&self, text: &str) -> Result<(), ExecuteError> {
        let _gate = self.gate.lock().unwrap_or_else(PoisonError::into_inner);

        debug!("executing command: {text}");
        let command = Command::parse(text)?;

        match command {
            Command::KeyPress(code) => self.injector.key_press(code)?,
            Command::KeyRelease(code) => self.injector.key_release(code)?,
            Command::MouseMove { x, y } => self.injector.mouse_move(x, y)?,
            Command::MouseMoveRelative { dx, dy } => {
                let (px, py) = self.injector.pointer_position()?;
                self.injector.mouse_move(px - dx, py - dy)?;
            }
            Command::MousePress(button) => self.injector.mouse_press(button)?,
            Command::MouseRelease(button) => self.injector.mouse_release(button)?,
            Command::MouseWheel(notches) => self.injector.mouse_wheel(notches)?,
        }

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
