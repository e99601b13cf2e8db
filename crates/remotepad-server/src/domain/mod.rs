//! Domain layer: configuration schema for the relay daemon.

pub mod config;

pub use config::{load_config, ConfigError, ServerConfig};
