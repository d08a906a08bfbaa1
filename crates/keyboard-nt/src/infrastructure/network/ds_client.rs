//! Driver Station robot address discovery.
//!
//! The FRC Driver Station publishes its state as newline-delimited JSON on
//! `127.0.0.1:1742`.  While connected, every line with a non-zero `robotIP`
//! overrides the NetworkTables server address.  When the Driver Station goes
//! away the override is cleared and the task retries once per second.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use keyboard_nt_core::protocol::ds::{parse_robot_ip, DS_PORT};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, trace};

/// Delay between Driver Station connection attempts.
pub const DS_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Address of the local Driver Station status service.
pub fn ds_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, DS_PORT))
}

/// Connects to the Driver Station at `addr` forever, publishing the reported
/// robot address through `robot_ip`.  Ends only when aborted.
pub async fn run_ds_client(
    addr: SocketAddr,
    robot_ip: Arc<watch::Sender<Option<Ipv4Addr>>>,
    retry: Duration,
) {
    loop {
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                debug!("connected to Driver Station at {addr}");
                if let Err(e) = read_status_lines(stream, &robot_ip).await {
                    debug!("Driver Station connection error: {e}");
                }
                if robot_ip.send_replace(None).is_some() {
                    info!("Driver Station disconnected; robot address override cleared");
                }
            }
            Err(e) => trace!("Driver Station not reachable at {addr}: {e}"),
        }
        sleep(retry).await;
    }
}

/// Reads status lines until EOF, updating `robot_ip` on every valid address.
async fn read_status_lines<R: AsyncRead + Unpin>(
    reader: R,
    robot_ip: &watch::Sender<Option<Ipv4Addr>>,
) -> io::Result<()> {
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(ip) = parse_robot_ip(&line) else {
            continue;
        };
        if robot_ip.send_replace(Some(ip)) != Some(ip) {
            info!("Driver Station reports robot at {ip}");
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
