//! NetworkTables server addressing.
//!
//! The bridge accepts a bare IP or hostname (`10.45.90.2`, `roborio-4590-frc.local`)
//! or an explicit `host:port`.  IPv6 literals are accepted with or without
//! brackets; a port can only be given for the bracketed form.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::codec::ProtocolError;

/// Default NT4 WebSocket port.
pub const DEFAULT_NT4_PORT: u16 = 5810;

/// A NetworkTables server endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerTarget {
    /// IP literal or hostname, without brackets.
    pub host: String,
    /// WebSocket port.
    pub port: u16,
}

impl ServerTarget {
    /// Creates a target from a host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parses `host`, `host:port`, `ip`, or `[ipv6]:port`.
    ///
    /// When no port is given, [`DEFAULT_NT4_PORT`] is used.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAddress`] for empty input, an invalid
    /// port, or a hostname containing characters other than letters, digits,
    /// `-`, `_` and `.`.
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ProtocolError::InvalidAddress("empty server address".to_string()));
        }

        if let Ok(sock) = input.parse::<SocketAddr>() {
            return Ok(Self::new(sock.ip().to_string(), sock.port()));
        }
        if let Ok(ip) = input.trim_matches(|c| c == '[' || c == ']').parse::<IpAddr>() {
            return Ok(Self::new(ip.to_string(), DEFAULT_NT4_PORT));
        }

        let (host, port) = match input.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| {
                    ProtocolError::InvalidAddress(format!("invalid port in '{input}'"))
                })?;
                (host, port)
            }
            None => (input, DEFAULT_NT4_PORT),
        };

        if host.is_empty() || !host.chars().all(is_hostname_char) {
            return Err(ProtocolError::InvalidAddress(format!(
                "invalid host name '{host}'"
            )));
        }

        Ok(Self::new(host, port))
    }

    /// Target for a Driver Station-reported robot address.
    pub fn from_ipv4(ip: Ipv4Addr, port: u16) -> Self {
        Self::new(ip.to_string(), port)
    }

    /// Returns a copy of this target with a different port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// The NT4 WebSocket URL for a client called `client_name`.
    pub fn websocket_url(&self, client_name: &str) -> String {
        format!("ws://{}/nt/{}", self, encode_path_segment(client_name))
    }
}

impl fmt::Display for ServerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

fn is_hostname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for b in segment.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
