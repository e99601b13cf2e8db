//! # remotepad-core
//!
//! Transport-independent heart of the RemotePad relay: the textual command
//! grammar, the host input-injection trait, and the executor that applies
//! commands to the host one at a time.
//!
//! The relay's job is small but precise: a remote caller sends short
//! commands such as `mouseMove(10,20)` or `keyPress(65);keyRelease(65)`
//! over TCP or UDP, and the host replays them as real mouse and keyboard
//! input.  This crate knows nothing about sockets; the `remotepad-server`
//! crate feeds it text, and an [`InputInjector`] implementation supplied by
//! the embedder performs the actual OS-level event injection.
//!
//! Module map:
//!
//! - **`protocol`** – the `name(arg[,arg])` grammar: parsing one command
//!   into a typed [`Command`] and splitting `;`-separated batches.
//! - **`inject`** – the [`InputInjector`] collaborator trait plus the
//!   recording and tracing-only implementations used for tests and for
//!   running the relay headless.
//! - **`executor`** – [`CommandExecutor`], the single gateway to the host
//!   input subsystem.  It serializes execution process-wide so commands
//!   from concurrent sessions never interleave.

pub mod executor;
pub mod inject;
pub mod protocol;

pub use executor::{CommandExecutor, ExecuteError};
pub use inject::{InjectError, InputInjector};
pub use protocol::command::{split_batch, Command, CommandError};
