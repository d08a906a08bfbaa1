//! Server clock estimation.
//!
//! The client sends `[-1, 0, int, t_client]`; the server answers with
//! `[-1, t_server, int, t_client]`.  Assuming a symmetric link, the server
//! clock at the moment the reply arrives is `t_server + rtt / 2`, so
//!
//! ```text
//! offset = t_server + (now - t_client) / 2 - now
//! ```
//!
//! Later samples only replace the offset when their round trip is shorter,
//! since a shorter round trip bounds the error more tightly.

/// Tracks the offset between the local monotonic clock and the server clock.
#[derive(Debug, Clone, Default)]
pub struct ServerClock {
    offset_us: Option<i64>,
    best_rtt_us: Option<i64>,
}

impl ServerClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a time sync reply.
    ///
    /// `client_send_us` is the value echoed back by the server, `server_us` is
    /// the server timestamp of the reply, and `now_us` is the local time it was
    /// received.  Replies with a negative round trip are ignored.
    pub fn record_response(&mut self, client_send_us: i64, server_us: i64, now_us: i64) {
        let rtt = now_us - client_send_us;
        if rtt < 0 {
            return;
        }
        if self.best_rtt_us.is_some_and(|best| rtt > best) {
            return;
        }
        self.best_rtt_us = Some(rtt);
        self.offset_us = Some(server_us + rtt / 2 - now_us);
    }

    /// `true` once at least one reply has been recorded.
    pub fn is_synced(&self) -> bool {
        self.offset_us.is_some()
    }

    /// Current server time for local time `now_us`, or `0` before the first
    /// sync (NT4 servers substitute their own clock for a zero timestamp).
    pub fn server_time_us(&self, now_us: i64) -> i64 {
        self.offset_us.map_or(0, |offset| now_us + offset)
    }

    /// Forgets the current estimate; called when the connection drops.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
