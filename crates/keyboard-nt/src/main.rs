//! keyboard-to-nt: entry point.
//!
//! Forwards the local keyboard to a NetworkTables server: every key press or
//! release becomes a boolean entry under `/Keyboard/Keys/`, so robot code can
//! use the keyboard as simulated driver input.
//!
//! # Usage
//!
//! ```text
//! keyboard-to-nt [OPTIONS] <SERVER>
//!
//! Arguments:
//!   <SERVER>  NetworkTables server IP or hostname, optionally host:port
//!
//! Options:
//!   --port <PORT>               Override the NT4 port [default: 5810]
//!   --client-name <NAME>        Client name [default: KeyboardToNetworkTables]
//!   --team <TEAM>               Team number [default: 4590]
//!   --table <PATH>              Table for key entries [default: Keyboard/Keys]
//! ```
//!
//! Only the command line is read: no environment variables (apart from
//! `RUST_LOG` for log filtering), no config file.
//! With just `<SERVER>` the bridge uses the defaults shown above.
//!
//! # Exit status
//!
//! `0` after the server connection drops; non-zero if the first connection
//! is not made within 60 seconds or the keyboard cannot be captured.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keyboard_nt::application::run_bridge;
use keyboard_nt::domain::config::{
    BridgeConfig, ClientIdentity, DEFAULT_CLIENT_NAME, DEFAULT_TABLE_PATH, DEFAULT_TEAM_NUMBER,
};
use keyboard_nt::infrastructure::input_capture::platform_input_source;
use keyboard_nt::infrastructure::network::Nt4Client;
use keyboard_nt_core::ServerTarget;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Forward keyboard state to a NetworkTables server.
#[derive(Debug, Parser)]
#[command(
    name = "keyboard-to-nt",
    about = "Publishes keyboard key states to NetworkTables as booleans",
    version
)]
struct Cli {
    /// NetworkTables server address (IP or hostname, optionally host:port).
    server: String,

    /// NT4 port; overrides a port given in SERVER.
    #[arg(long)]
    port: Option<u16>,

    /// Client name announced to the server.
    #[arg(long, default_value = DEFAULT_CLIENT_NAME)]
    client_name: String,

    /// FRC team number.
    #[arg(long, default_value_t = DEFAULT_TEAM_NUMBER)]
    team: u16,

    /// Table that receives one boolean per key.
    #[arg(long, default_value = DEFAULT_TABLE_PATH)]
    table: String,
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`BridgeConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `server` is not a valid host, IP, or `host:port`.
    fn into_bridge_config(self) -> anyhow::Result<BridgeConfig> {
        let mut server = ServerTarget::parse(&self.server)
            .with_context(|| format!("invalid server address: '{}'", self.server))?;
        if let Some(port) = self.port {
            server = server.with_port(port);
        }

        Ok(BridgeConfig {
            server,
            identity: ClientIdentity {
                client_name: self.client_name,
                team: self.team,
            },
            table_path: self.table,
            ..BridgeConfig::default()
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_bridge_config()?;
    info!(
        "keyboard-to-nt starting: server={}, table={}",
        config.server, config.table_path
    );

    let client = Arc::new(Nt4Client::new().context("failed to create NetworkTables client")?);
    let input = platform_input_source().context("no keyboard capture for this platform")?;

    run_bridge(client, input.as_ref(), &config)
        .await
        .context("keyboard bridge stopped with an error")?;

    info!("keyboard-to-nt stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
