//! TOML-based configuration for the relay daemon.
//!
//! Every field has a default, so a missing file or an empty file yields a
//! working server on the conventional port.  Fields absent from the TOML
//! file fall back to their defaults individually, which keeps old config
//! files working when new fields are added.
//!
//! ```toml
//! listen_port = 10999
//! bind_address = "0.0.0.0"
//! enable_udp = true
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use remotepad_core::protocol::{companion_udp_port, DEFAULT_TCP_PORT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Relay daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// TCP port the command listener binds to.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// UDP companion port.  Absent means the convention applies: the TCP
    /// port minus one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_port: Option<u16>,

    /// IP address to bind both sockets to.  `"0.0.0.0"` binds all
    /// interfaces.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Whether the UDP datagram listener runs at all.
    #[serde(default = "default_true")]
    pub enable_udp: bool,

    /// `tracing` log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    DEFAULT_TCP_PORT
}
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            udp_port: None,
            bind_address: default_bind_address(),
            enable_udp: default_true(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// The UDP port the datagram listener binds to: the explicit override
    /// when configured, otherwise the TCP port minus one.
    pub fn effective_udp_port(&self) -> u16 {
        self.udp_port
            .unwrap_or_else(|| companion_udp_port(self.listen_port))
    }
}

/// Loads the configuration from `path`, returning defaults when no path is
/// given or the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not
/// found", and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(ServerConfig::default());
    };

    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ServerConfig::default()),
        Err(source) => Err(ConfigError::Io { path: path.to_path_buf(), source }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
