//! remotepad-server library entry point.
//!
//! The relay daemon: accepts TCP connections and UDP datagrams carrying
//! textual input commands and applies them to the host through the shared
//! [`remotepad_core::CommandExecutor`].
//!
//! Control flow:
//!
//! ```text
//! RelayServer (facade, start/stop)
//!  └─ AcceptanceManager (accept loop + session registry)
//!       └─ per connection: ClientSession (own task)
//!            └─ StreamReader → dispatch_batch → CommandExecutor
//!  └─ DatagramSession (UDP loop, bypasses the manager entirely)
//! ```
//!
//! Re-exports all public modules so that the integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.

/// Application layer: transport-independent dispatch logic.
pub mod application;

/// Domain layer: configuration schema.
pub mod domain;

/// Infrastructure layer: sockets, sessions, and the server facade.
pub mod infrastructure;

pub use domain::config::{load_config, ConfigError, ServerConfig};
pub use infrastructure::server::{RelayServer, ServerError};
