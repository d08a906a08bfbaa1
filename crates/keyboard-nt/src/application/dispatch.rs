//! Dispatch loop: forwards key events while the server stays reachable.
//!
//! ```text
//! OS keyboard ──▶ InputSource ──▶ KeyForwarder ──▶ classify ──▶ BooleanTable
//!                                                               (Keyboard/Keys)
//! main task:  every 10 ms ── session.is_connected()? ── no ──▶ stop input,
//!                                                              close session
//! ```
//!
//! Key events are delivered on the input source's threads; the main task only
//! polls the liveness flag.  The loop ends on the first observed
//! disconnection.  There is no reconnection at this layer.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use super::manage_session::{ConnectionSession, SessionError, TableClient};
use super::publish_keys::{KeyForwarder, KeyTablePublisher};
use crate::domain::config::BridgeConfig;
use crate::infrastructure::input_capture::{CaptureError, InputSource};

/// Top-level failure of a bridge run.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("keyboard capture failed: {0}")]
    Capture(#[from] CaptureError),
}

/// Supervises a connected session.
pub struct DispatchLoop {
    session: ConnectionSession,
    liveness_poll: Duration,
}

impl DispatchLoop {
    pub fn new(session: ConnectionSession, liveness_poll: Duration) -> Self {
        Self {
            session,
            liveness_poll,
        }
    }

    /// Polls liveness until the connection drops, then stops `input` and
    /// closes the session.  Returns the closed session so callers can inspect
    /// its final state.
    pub async fn run(mut self, input: &dyn InputSource) -> ConnectionSession {
        let mut ticker = interval(self.liveness_poll);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if !self.session.is_connected() {
                break;
            }
        }

        info!("Connection to NetworkTables server lost; shutting down");
        input.stop();
        self.session.close();
        self.session
    }
}

/// Runs the whole bridge: connect, forward keys, return on disconnect.
///
/// # Errors
///
/// - [`BridgeError::Session`] if the client cannot start or the first
///   connection is not made within `config.connect_timeout`.
/// - [`BridgeError::Capture`] if the input source cannot start.
///
/// The session is torn down exactly once on every path.
pub async fn run_bridge(
    client: Arc<dyn TableClient>,
    input: &dyn InputSource,
    config: &BridgeConfig,
) -> Result<(), BridgeError> {
    let mut session = ConnectionSession::open(client, config)?;
    session.await_connected().await?;

    let publisher = KeyTablePublisher::new(session.table(&config.table_path));
    input.start(Arc::new(KeyForwarder::new(publisher)))?;
    info!("Forwarding keyboard to table '{}'", config.table_path);

    DispatchLoop::new(session, config.liveness_poll)
        .run(input)
        .await;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::manage_session::SessionState;
    use crate::infrastructure::input_capture::mock::MockInputSource;
    use crate::infrastructure::network::mock::RecordingTableClient;
    use keyboard_nt_core::{KeyEvent, KeyEventKind};

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_loop_stops_input_and_closes_on_disconnect() {
        // Arrange
        let client = Arc::new(RecordingTableClient::new());
        client.set_connected(true);
        let config = BridgeConfig::default();
        let mut session = ConnectionSession::open(client.clone(), &config).unwrap();
        session.await_connected().await.unwrap();
        let input = MockInputSource::new();
        client.set_connected(false);

        // Act
        let session = DispatchLoop::new(session, config.liveness_poll)
            .run(&input)
            .await;

        // Assert
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(input.stop_count(), 1);
        assert_eq!(client.stop_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_bridge_capture_failure_tears_down() {
        let client = Arc::new(RecordingTableClient::new());
        client.set_connected(true);
        let input = MockInputSource::failing();

        let result = run_bridge(client.clone(), &input, &BridgeConfig::default()).await;

        assert!(matches!(result, Err(BridgeError::Capture(_))));
        assert_eq!(client.stop_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_bridge_forwards_until_disconnect() {
        let client = Arc::new(RecordingTableClient::new());
        client.set_connected(true);
        let input = Arc::new(MockInputSource::new());

        let bridge = {
            let client = client.clone();
            let input = input.clone();
            tokio::spawn(async move {
                run_bridge(client, input.as_ref(), &BridgeConfig::default()).await
            })
        };
        while !input.is_running() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        input.inject(&KeyEvent::new("w", KeyEventKind::Press, false));
        client.set_connected(false);

        bridge.await.unwrap().unwrap();
        assert_eq!(client.writes(), vec![("/Keyboard/Keys/w".to_string(), true)]);
        assert_eq!(client.stop_count(), 1);
    }
}
