//! RemotePad server entry point.
//!
//! Loads configuration, initializes structured logging, and runs the relay
//! until Ctrl-C.  The binary ships without an OS input backend: events are
//! executed against the tracing-only [`NullInjector`].  Embedders that want
//! real input injection construct [`RelayServer`] themselves with a
//! platform implementation of `InputInjector`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use remotepad_core::inject::null::NullInjector;
use remotepad_server::domain::config::load_config;
use remotepad_server::infrastructure::server::RelayServer;

#[derive(Parser, Debug)]
#[command(
    name = "remotepad-server",
    about = "Relay textual input commands from the network to the host's mouse and keyboard",
    version
)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long, env = "REMOTEPAD_CONFIG")]
    config: Option<PathBuf>,

    /// TCP port to listen on (overrides the config file; default 10999).
    #[arg(long)]
    port: Option<u16>,

    /// UDP companion port (default: the TCP port minus one).
    #[arg(long)]
    udp_port: Option<u16>,

    /// Address to bind both sockets to.
    #[arg(long)]
    bind: Option<String>,

    /// Disable the UDP datagram listener.
    #[arg(long)]
    no_udp: bool,

    /// Log level used when RUST_LOG is not set.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.listen_port = port;
    }
    if let Some(udp_port) = args.udp_port {
        config.udp_port = Some(udp_port);
    }
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }
    if args.no_udp {
        config.enable_udp = false;
    }
    if let Some(log_level) = args.log_level {
        config.log_level = log_level;
    }

    // `RUST_LOG` wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    info!("RemotePad server starting");
    info!("no platform input backend configured; injected events will be logged only");

    let mut server = RelayServer::new(config, Arc::new(NullInjector::new()));
    server.start().await?;

    info!("press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    server.stop().await?;
    info!("RemotePad server stopped");
    Ok(())
}
