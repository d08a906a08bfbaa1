//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for all runtime settings.
//! It is built once in `main.rs` from CLI arguments and handed to the session
//! and dispatch loop by reference; nothing reads the environment after that.

use std::time::Duration;

use keyboard_nt_core::protocol::{ServerTarget, DEFAULT_NT4_PORT};

/// Name the client announces to the NetworkTables server.
pub const DEFAULT_CLIENT_NAME: &str = "KeyboardToNetworkTables";

/// FRC team number reported when setting up the client.
pub const DEFAULT_TEAM_NUMBER: u16 = 4590;

/// Sub-table that receives one boolean entry per key.
pub const DEFAULT_TABLE_PATH: &str = "Keyboard/Keys";

/// How the client identifies itself to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    /// Client name; becomes the last path segment of the NT4 WebSocket URL.
    pub client_name: String,
    /// FRC team number.  Only used for logging; the server address is always
    /// given explicitly.
    pub team: u16,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            team: DEFAULT_TEAM_NUMBER,
        }
    }
}

/// All runtime configuration for one bridge run.
///
/// # Example
///
/// ```rust
/// use keyboard_nt::domain::BridgeConfig;
/// use keyboard_nt_core::ServerTarget;
///
/// let cfg = BridgeConfig::for_server(ServerTarget::new("10.45.90.2", 5810));
/// assert_eq!(cfg.table_path, "Keyboard/Keys");
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// NetworkTables server to connect to.
    pub server: ServerTarget,

    /// Client name and team number.
    pub identity: ClientIdentity,

    /// Table path that key entries are written under.
    pub table_path: String,

    /// Give up if the first connection has not been established after this
    /// long.
    pub connect_timeout: Duration,

    /// How often `is_connected` is polled while waiting for the first
    /// connection.
    pub connect_poll: Duration,

    /// How often `is_connected` is polled once connected.
    pub liveness_poll: Duration,
}

impl BridgeConfig {
    /// Default settings pointed at `server`.
    pub fn for_server(server: ServerTarget) -> Self {
        Self {
            server,
            ..Self::default()
        }
    }
}

impl Default for BridgeConfig {
    /// | Field           | Default                   |
    /// |-----------------|---------------------------|
    /// | server          | `127.0.0.1:5810`          |
    /// | identity        | `KeyboardToNetworkTables`, team 4590 |
    /// | table_path      | `Keyboard/Keys`           |
    /// | connect_timeout | 60 seconds                |
    /// | connect_poll    | 100 ms                    |
    /// | liveness_poll   | 10 ms                     |
    fn default() -> Self {
        Self {
            server: ServerTarget::new("127.0.0.1", DEFAULT_NT4_PORT),
            identity: ClientIdentity::default(),
            table_path: DEFAULT_TABLE_PATH.to_string(),
            connect_timeout: Duration::from_secs(60),
            connect_poll: Duration::from_millis(100),
            liveness_poll: Duration::from_millis(10),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_identity() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.identity.client_name, "KeyboardToNetworkTables");
        assert_eq!(cfg.identity.team, 4590);
    }

    #[test]
    fn test_default_timings() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.connect_timeout, Duration::from_secs(60));
        assert_eq!(cfg.connect_poll, Duration::from_millis(100));
        assert_eq!(cfg.liveness_poll, Duration::from_millis(10));
    }

    #[test]
    fn test_for_server_keeps_other_defaults() {
        // Arrange
        let server = ServerTarget::new("roborio-4590-frc.local", 5810);

        // Act
        let cfg = BridgeConfig::for_server(server.clone());

        // Assert
        assert_eq!(cfg.server, server);
        assert_eq!(cfg.table_path, DEFAULT_TABLE_PATH);
        assert_eq!(cfg.identity, ClientIdentity::default());
    }
}
