//! Driver Station status lines.
//!
//! A running FRC Driver Station serves newline-delimited JSON on
//! `127.0.0.1:1742`.  Each line is an object; the only field the bridge reads
//! is `robotIP`, the robot address packed into a big-endian `u32`.  Zero means
//! the Driver Station does not know the robot address yet.

use std::net::Ipv4Addr;

use serde::Deserialize;

/// TCP port of the local Driver Station status service.
pub const DS_PORT: u16 = 1742;

#[derive(Debug, Deserialize)]
struct DsStatus {
    #[serde(rename = "robotIP", default)]
    robot_ip: u32,
}

/// Extracts the robot address from one status line.
///
/// Returns `None` for blank or unparseable lines, lines without `robotIP`,
/// and a zero address.
pub fn parse_robot_ip(line: &str) -> Option<Ipv4Addr> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let status: DsStatus = serde_json::from_str(line).ok()?;
    (status.robot_ip != 0).then(|| Ipv4Addr::from(status.robot_ip))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
