//! Connection session use case: client lifecycle around the NetworkTables
//! client.
//!
//! # State machine
//!
//! ```text
//!   Disconnected ──open()──▶ Connecting ──is_connected()──▶ Connected
//!                                │                              │
//!                          timeout elapsed               close() on loss
//!                                ▼                              ▼
//!                             TimedOut                     Disconnected
//! ```
//!
//! Teardown (stop the Driver Station client, then the main client) runs
//! exactly once no matter how the session ends: explicit [`ConnectionSession::close`],
//! connect timeout, or drop.

use std::sync::Arc;
use std::time::Duration;

use keyboard_nt_core::ServerTarget;
use thiserror::Error;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::publish_keys::BooleanTable;
use crate::domain::config::{BridgeConfig, ClientIdentity};

/// Errors reported by a [`TableClient`] implementation.
#[derive(Debug, Error)]
pub enum TableClientError {
    #[error("no async runtime available: {0}")]
    NoRuntime(String),
    #[error("client has already been started")]
    AlreadyStarted,
}

/// The NetworkTables client operations the bridge relies on.
///
/// The production implementation is
/// `infrastructure::network::nt4_client::Nt4Client`; tests substitute a
/// recording mock or a `mockall` mock.
pub trait TableClient: Send + Sync {
    /// Starts the client under `identity`.  Connect attempts begin once a
    /// server is known.
    fn start_client(&self, identity: &ClientIdentity) -> Result<(), TableClientError>;
    /// Sets the server to connect to.
    fn set_server(&self, server: &ServerTarget);
    /// Starts Driver Station robot address discovery.
    fn start_ds_client(&self) -> Result<(), TableClientError>;
    /// `true` while a connection to the server is established.
    fn is_connected(&self) -> bool;
    /// Handle to the table at `path`.
    fn table(&self, path: &str) -> Arc<dyn BooleanTable>;
    /// Stops Driver Station discovery.  Idempotent.
    fn stop_ds_client(&self);
    /// Stops the client and closes its connection.  Idempotent.
    fn stop_client(&self);
}

/// Lifecycle state of a [`ConnectionSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
    TimedOut,
}

/// Errors from opening or awaiting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no connection to NetworkTables server after {waited:?}")]
    ConnectTimeout { waited: Duration },
    #[error("NetworkTables client error: {0}")]
    Client(#[from] TableClientError),
}

/// The single connection session of a process run.
pub struct ConnectionSession {
    client: Arc<dyn TableClient>,
    state: SessionState,
    connect_timeout: Duration,
    connect_poll: Duration,
    torn_down: bool,
}

impl ConnectionSession {
    /// Configures and starts the client: identity, server, Driver Station
    /// discovery.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Client`] if the client refuses to start.  The
    /// partially started client is torn down before the error is returned.
    pub fn open(client: Arc<dyn TableClient>, config: &BridgeConfig) -> Result<Self, SessionError> {
        let mut session = Self {
            client,
            state: SessionState::Disconnected,
            connect_timeout: config.connect_timeout,
            connect_poll: config.connect_poll,
            torn_down: false,
        };

        info!(
            "Setting up NetworkTables client for team {}",
            config.identity.team
        );
        session.client.start_client(&config.identity)?;
        session.client.set_server(&config.server);
        session.client.start_ds_client()?;
        debug!("client '{}' targeting {}", config.identity.client_name, config.server);

        session.state = SessionState::Connecting;
        Ok(session)
    }

    /// Polls the client until it reports a connection.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectTimeout`] once more than the configured
    /// timeout has elapsed.  The session is already torn down when the error
    /// is returned.
    pub async fn await_connected(&mut self) -> Result<(), SessionError> {
        info!("Waiting for connection to NetworkTables server...");

        let started = Instant::now();
        let mut ticker = interval(self.connect_poll);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if self.client.is_connected() {
                self.state = SessionState::Connected;
                info!("Connection to NetworkTables server succeeded!");
                return Ok(());
            }

            let waited = started.elapsed();
            if waited > self.connect_timeout {
                warn!("no connection to NetworkTables server after {waited:?}; giving up");
                self.close();
                self.state = SessionState::TimedOut;
                return Err(SessionError::ConnectTimeout { waited });
            }
        }
    }

    /// Current connection state as reported by the client.
    pub fn is_connected(&self) -> bool {
        !self.torn_down && self.client.is_connected()
    }

    /// Handle to the table at `path`.
    pub fn table(&self, path: &str) -> Arc<dyn BooleanTable> {
        self.client.table(path)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Stops the Driver Station client, then the main client.  Only the first
    /// call does anything.
    pub fn close(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.client.stop_ds_client();
        self.client.stop_client();
        self.state = SessionState::Disconnected;
        info!("NetworkTables client stopped");
    }
}

impl Drop for ConnectionSession {
    fn drop(&mut self) {
        self.close();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
