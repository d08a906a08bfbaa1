//! NetworkTables 4 client over WebSocket.
//!
//! # Task layout
//!
//! ```text
//!  Nt4Table::put_boolean ──(unbounded mpsc)──▶ connection task ──▶ WebSocket
//!                                                   ▲   │
//!  set_server / DS discovery ──(watch)──────────────┘   └──▶ connected flag
//! ```
//!
//! [`Nt4Client::start_client`] spawns one connection task on the Tokio
//! runtime that was current when the client was created.  The task:
//!
//! 1. Waits for a server address (the Driver Station override wins over the
//!    configured server) and tries to connect every 500 ms, each attempt
//!    bounded by a 2 s handshake timeout.
//! 2. Once connected, sets the shared `connected` flag, sends a time sync
//!    request, and then multiplexes:
//!    - outbound writes: `publish` the topic on first use, then a binary
//!      boolean value update stamped with the synchronised server time,
//!    - inbound frames: time sync replies, `announce`/`unannounce`/
//!      `properties` (logged), WebSocket pings/pongs,
//!    - a 1 s keepalive tick: WebSocket ping, time sync every few ticks, and
//!      a liveness check that drops the connection after 3 s of silence.
//! 3. On connection loss clears `connected` and exits.  There is no
//!    reconnection once a connection has been established, so a loss is
//!    never hidden from callers polling [`TableClient::is_connected`].
//!
//! Writes made while not connected are dropped; nothing is buffered across
//! connections.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{Sink, SinkExt, Stream, StreamExt};
use keyboard_nt_core::protocol::{
    decode_binary_frames, decode_text_frame, encode_binary_frame, encode_text_frame, BinaryFrame,
    ClientMessage, NtType, NtValue, ProtocolError, ServerClock, ServerMessage, ServerTarget,
    TablePath, DEFAULT_NT4_PORT, NT4_SUBPROTOCOLS,
};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::SEC_WEBSOCKET_PROTOCOL;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace, warn};

use super::ds_client::{ds_address, run_ds_client, DS_RETRY_INTERVAL};
use crate::application::manage_session::{TableClient, TableClientError};
use crate::application::publish_keys::BooleanTable;
use crate::domain::config::ClientIdentity;

/// Delay between connection attempts.
pub const RECONNECT_INTERVAL: Duration = Duration::from_millis(500);
/// Upper bound on a single WebSocket handshake.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(2);
/// Keepalive tick: one WebSocket ping per tick.
pub const PING_INTERVAL: Duration = Duration::from_secs(1);
/// A connection with no inbound frame for this long is considered lost.
pub const LIVENESS_TIMEOUT: Duration = Duration::from_secs(3);
/// Time sync is re-sent every this many keepalive ticks.
const TIME_SYNC_EVERY_TICKS: u32 = 5;

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Why a connection ended.
#[derive(Debug, Error)]
enum ConnectionError {
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("invalid handshake request: {0}")]
    Handshake(String),
    #[error("no frame from server for {0:?}")]
    Silent(Duration),
    #[error("server closed the connection")]
    Closed,
}

/// A boolean write queued for the connection task.
#[derive(Debug, Clone, PartialEq)]
struct TableWrite {
    topic: String,
    value: bool,
}

#[derive(Default)]
struct ClientTasks {
    shutdown: Option<watch::Sender<bool>>,
    connection: Option<JoinHandle<()>>,
    ds: Option<JoinHandle<()>>,
}

/// The production NetworkTables client.
pub struct Nt4Client {
    runtime: Handle,
    connected: Arc<AtomicBool>,
    server: Arc<watch::Sender<Option<ServerTarget>>>,
    robot_ip: Arc<watch::Sender<Option<Ipv4Addr>>>,
    outbound: mpsc::UnboundedSender<TableWrite>,
    outbound_rx: Mutex<Option<mpsc::UnboundedReceiver<TableWrite>>>,
    tasks: Mutex<ClientTasks>,
}

impl Nt4Client {
    /// Creates a client bound to the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`TableClientError::NoRuntime`] when called outside a runtime.
    pub fn new() -> Result<Self, TableClientError> {
        let runtime =
            Handle::try_current().map_err(|e| TableClientError::NoRuntime(e.to_string()))?;
        let (outbound, outbound_rx) = mpsc::unbounded_channel();
        Ok(Self {
            runtime,
            connected: Arc::new(AtomicBool::new(false)),
            server: Arc::new(watch::channel(None).0),
            robot_ip: Arc::new(watch::channel(None).0),
            outbound,
            outbound_rx: Mutex::new(Some(outbound_rx)),
            tasks: Mutex::new(ClientTasks::default()),
        })
    }

    fn tasks(&self) -> std::sync::MutexGuard<'_, ClientTasks> {
        // A poisoned lock only means a panic elsewhere; the handles are still valid.
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TableClient for Nt4Client {
    fn start_client(&self, identity: &ClientIdentity) -> Result<(), TableClientError> {
        let outbound_rx = self
            .outbound_rx
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .ok_or(TableClientError::AlreadyStarted)?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = ConnectionTask {
            client_name: identity.client_name.clone(),
            server: self.server.subscribe(),
            robot_ip: self.robot_ip.subscribe(),
            connected: Arc::clone(&self.connected),
            outbound: outbound_rx,
            shutdown: shutdown_rx,
            epoch: Instant::now(),
        };

        let mut tasks = self.tasks();
        tasks.shutdown = Some(shutdown_tx);
        tasks.connection = Some(self.runtime.spawn(task.run()));
        info!("NetworkTables client '{}' started", identity.client_name);
        Ok(())
    }

    fn set_server(&self, server: &ServerTarget) {
        info!("NetworkTables server set to {server}");
        self.server.send_replace(Some(server.clone()));
    }

    fn start_ds_client(&self) -> Result<(), TableClientError> {
        let mut tasks = self.tasks();
        if tasks.ds.as_ref().is_some_and(|t| !t.is_finished()) {
            return Ok(());
        }
        let robot_ip = Arc::clone(&self.robot_ip);
        tasks.ds = Some(
            self.runtime
                .spawn(run_ds_client(ds_address(), robot_ip, DS_RETRY_INTERVAL)),
        );
        debug!("Driver Station client started");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn table(&self, path: &str) -> Arc<dyn BooleanTable> {
        Arc::new(Nt4Table {
            path: TablePath::new(path),
            connected: Arc::clone(&self.connected),
            outbound: self.outbound.clone(),
        })
    }

    fn stop_ds_client(&self) {
        if let Some(task) = self.tasks().ds.take() {
            task.abort();
            debug!("Driver Station client stopped");
        }
        self.robot_ip.send_replace(None);
    }

    fn stop_client(&self) {
        let mut tasks = self.tasks();
        if let Some(shutdown) = tasks.shutdown.take() {
            shutdown.send_replace(true);
            debug!("NetworkTables connection task signalled to stop");
        }
        // Detached: the task sends a Close frame when it next runs, unless
        // the runtime shuts down first.
        tasks.connection.take();
        self.connected.store(false, Ordering::SeqCst);
    }
}

impl Drop for Nt4Client {
    fn drop(&mut self) {
        self.stop_ds_client();
        self.stop_client();
    }
}

/// Handle to one table; cheap to clone, safe to use from any thread.
#[derive(Clone)]
pub struct Nt4Table {
    path: TablePath,
    connected: Arc<AtomicBool>,
    outbound: mpsc::UnboundedSender<TableWrite>,
}

impl Nt4Table {
    /// The table's normalised path.
    pub fn path(&self) -> &TablePath {
        &self.path
    }
}

impl BooleanTable for Nt4Table {
    fn put_boolean(&self, key: &str, value: bool) {
        let topic = self.path.topic(key);
        if !self.connected.load(Ordering::SeqCst) {
            trace!("dropping write to {topic}: not connected");
            return;
        }
        // Send only fails once the client is gone; the write is dropped then too.
        let _ = self.outbound.send(TableWrite { topic, value });
    }
}

// ── Connection task ───────────────────────────────────────────────────────────

struct ConnectionTask {
    client_name: String,
    server: watch::Receiver<Option<ServerTarget>>,
    robot_ip: watch::Receiver<Option<Ipv4Addr>>,
    connected: Arc<AtomicBool>,
    outbound: mpsc::UnboundedReceiver<TableWrite>,
    shutdown: watch::Receiver<bool>,
    epoch: Instant,
}

impl ConnectionTask {
    async fn run(mut self) {
        let mut retry = interval(RECONNECT_INTERVAL);
        retry.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = retry.tick() => {}
                changed = self.shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
            if *self.shutdown.borrow() {
                break;
            }

            let Some(target) = self.current_target() else {
                continue;
            };
            let url = target.websocket_url(&self.client_name);

            match timeout(HANDSHAKE_TIMEOUT, open_websocket(&url)).await {
                Ok(Ok(ws)) => {
                    // One connection per client: once it ends, `connected`
                    // stays false for good.
                    self.serve(ws, &target).await;
                    break;
                }
                Ok(Err(e)) => debug!("connect to {target} failed: {e}"),
                Err(_) => debug!("connect to {target} timed out after {HANDSHAKE_TIMEOUT:?}"),
            }
        }

        self.connected.store(false, Ordering::SeqCst);
        debug!("NetworkTables connection task exiting");
    }

    /// The Driver Station robot address if known, otherwise the configured server.
    fn current_target(&self) -> Option<ServerTarget> {
        let server = self.server.borrow().clone();
        let port = server.as_ref().map_or(DEFAULT_NT4_PORT, |s| s.port);
        match *self.robot_ip.borrow() {
            Some(ip) => Some(ServerTarget::from_ipv4(ip, port)),
            None => server,
        }
    }

    async fn serve(&mut self, ws: WsStream, target: &ServerTarget) {
        let (sink, mut stream) = ws.split();

        // Writes queued while disconnected are stale.
        while self.outbound.try_recv().is_ok() {}

        let mut conn = Connection::new(sink, self.epoch);
        self.connected.store(true, Ordering::SeqCst);
        info!("connected to NetworkTables server {target}");

        match self.pump(&mut conn, &mut stream).await {
            Ok(()) => {
                conn.close().await;
                debug!("disconnected from {target}");
            }
            Err(e) => info!("connection to NetworkTables server {target} lost: {e}"),
        }
        self.connected.store(false, Ordering::SeqCst);
    }

    /// Runs one connection until shutdown (`Ok`) or loss (`Err`).
    async fn pump<S, R>(
        &mut self,
        conn: &mut Connection<S>,
        stream: &mut R,
    ) -> Result<(), ConnectionError>
    where
        S: Sink<WsMessage, Error = WsError> + Unpin,
        R: Stream<Item = Result<WsMessage, WsError>> + Unpin,
    {
        conn.send_time_sync().await?;

        let mut keepalive = interval(PING_INTERVAL);
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);
        keepalive.tick().await; // Skip the immediate first tick.

        loop {
            tokio::select! {
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        return Ok(());
                    }
                }
                write = self.outbound.recv() => match write {
                    Some(write) => conn.write_boolean(write).await?,
                    None => return Ok(()),
                },
                frame = stream.next() => match frame {
                    Some(Ok(msg)) => conn.handle_frame(msg)?,
                    Some(Err(e)) => return Err(e.into()),
                    None => return Err(ConnectionError::Closed),
                },
                _ = keepalive.tick() => conn.keepalive().await?,
            }
        }
    }
}

async fn open_websocket(url: &str) -> Result<WsStream, ConnectionError> {
    let mut request = url.into_client_request()?;
    let protocols = HeaderValue::from_str(&NT4_SUBPROTOCOLS.join(", "))
        .map_err(|e| ConnectionError::Handshake(e.to_string()))?;
    request
        .headers_mut()
        .insert(SEC_WEBSOCKET_PROTOCOL, protocols);

    let (ws, response) = connect_async(request).await?;
    debug!(
        "handshake complete, subprotocol {:?}",
        response.headers().get(SEC_WEBSOCKET_PROTOCOL)
    );
    Ok(ws)
}

// ── Per-connection state ──────────────────────────────────────────────────────

/// State that lives exactly as long as one WebSocket connection.
struct Connection<S> {
    sink: S,
    /// Topic name → our publisher id for this connection.
    pubuids: HashMap<String, i32>,
    next_pubuid: i32,
    clock: ServerClock,
    epoch: Instant,
    last_seen: Instant,
    ticks: u32,
}

impl<S> Connection<S>
where
    S: Sink<WsMessage, Error = WsError> + Unpin,
{
    fn new(sink: S, epoch: Instant) -> Self {
        Self {
            sink,
            pubuids: HashMap::new(),
            next_pubuid: 1,
            clock: ServerClock::new(),
            epoch,
            last_seen: Instant::now(),
            ticks: 0,
        }
    }

    /// Local monotonic time in microseconds.
    fn now_us(&self) -> i64 {
        i64::try_from(self.epoch.elapsed().as_micros()).unwrap_or(i64::MAX)
    }

    async fn send_time_sync(&mut self) -> Result<(), ConnectionError> {
        let bytes = encode_binary_frame(&BinaryFrame::time_sync_request(self.now_us()))?;
        self.sink.send(WsMessage::Binary(bytes)).await?;
        Ok(())
    }

    /// Publishes the topic if this connection has not yet, then sends the value.
    async fn write_boolean(&mut self, write: TableWrite) -> Result<(), ConnectionError> {
        let pubuid = match self.pubuids.get(&write.topic) {
            Some(&pubuid) => pubuid,
            None => {
                let pubuid = self.next_pubuid;
                self.next_pubuid += 1;
                let publish = ClientMessage::publish(write.topic.clone(), pubuid, NtType::Boolean);
                self.sink
                    .send(WsMessage::Text(encode_text_frame(&[publish])?))
                    .await?;
                debug!("published {} as pubuid {pubuid}", write.topic);
                self.pubuids.insert(write.topic.clone(), pubuid);
                pubuid
            }
        };

        let timestamp = self.clock.server_time_us(self.now_us());
        let frame = BinaryFrame::boolean(pubuid, timestamp, write.value);
        self.sink
            .send(WsMessage::Binary(encode_binary_frame(&frame)?))
            .await?;
        trace!("{} = {}", write.topic, write.value);
        Ok(())
    }

    fn handle_frame(&mut self, msg: WsMessage) -> Result<(), ConnectionError> {
        self.last_seen = Instant::now();
        match msg {
            WsMessage::Text(text) => match decode_text_frame(&text) {
                Ok(messages) => messages.iter().for_each(log_server_message),
                Err(e) => warn!("ignoring malformed text frame: {e}"),
            },
            WsMessage::Binary(bytes) => match decode_binary_frames(&bytes) {
                Ok(frames) => {
                    let now = self.now_us();
                    for frame in frames {
                        self.handle_value(frame, now);
                    }
                }
                Err(e) => warn!("ignoring malformed binary frame: {e}"),
            },
            WsMessage::Close(frame) => {
                debug!("server sent Close: {frame:?}");
                return Err(ConnectionError::Closed);
            }
            // tungstenite answers pings itself; pongs only refresh `last_seen`.
            WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => {}
        }
        Ok(())
    }

    fn handle_value(&mut self, frame: BinaryFrame, now_us: i64) {
        if !frame.is_time_sync() {
            trace!("ignoring value update for topic id {}", frame.id);
            return;
        }
        if let NtValue::Int(client_send_us) = frame.value {
            self.clock
                .record_response(client_send_us, frame.timestamp_us, now_us);
            trace!("server clock offset updated");
        }
    }

    async fn keepalive(&mut self) -> Result<(), ConnectionError> {
        let silent = self.last_seen.elapsed();
        if silent > LIVENESS_TIMEOUT {
            return Err(ConnectionError::Silent(silent));
        }
        self.sink.send(WsMessage::Ping(Vec::new())).await?;

        self.ticks = self.ticks.wrapping_add(1);
        if self.ticks % TIME_SYNC_EVERY_TICKS == 0 {
            self.send_time_sync().await?;
        }
        Ok(())
    }

    async fn close(&mut self) {
        if let Err(e) = self.sink.send(WsMessage::Close(None)).await {
            debug!("close frame not sent: {e}");
        }
    }
}

fn log_server_message(msg: &ServerMessage) {
    match msg {
        ServerMessage::Announce(a) => debug!(
            "announce {} (id {}, type {}, pubuid {:?})",
            a.name, a.id, a.type_str, a.pubuid
        ),
        ServerMessage::Unannounce(u) => debug!("unannounce {} (id {})", u.name, u.id),
        ServerMessage::Properties(p) => debug!("properties {}: {}", p.name, p.update),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Collects everything the connection sends.
    #[derive(Default)]
    struct VecSink(Vec<WsMessage>);

    impl Sink<WsMessage> for VecSink {
        type Error = WsError;

        fn poll_ready(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), WsError>> {
            Poll::Ready(Ok(()))
        }

        fn start_send(self: Pin<&mut Self>, item: WsMessage) -> Result<(), WsError> {
            self.get_mut().0.push(item);
            Ok(())
        }

        fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), WsError>> {
            Poll::Ready(Ok(()))
        }

        fn poll_close(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), WsError>> {
            Poll::Ready(Ok(()))
        }
    }

    fn connection() -> Connection<VecSink> {
        Connection::new(VecSink::default(), Instant::now())
    }

    fn write(topic: &str, value: bool) -> TableWrite {
        TableWrite {
            topic: topic.to_string(),
            value,
        }
    }

    fn binary(msg: &WsMessage) -> Vec<BinaryFrame> {
        let WsMessage::Binary(bytes) = msg else {
            panic!("expected binary frame, got {msg:?}");
        };
        decode_binary_frames(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_first_write_publishes_then_sends_value() {
        // Arrange
        let mut conn = connection();

        // Act
        conn.write_boolean(write("/Keyboard/Keys/a", true)).await.unwrap();

        // Assert
        let frames = &conn.sink.0;
        assert_eq!(frames.len(), 2);
        let WsMessage::Text(text) = &frames[0] else {
            panic!("expected publish text frame, got {:?}", frames[0]);
        };
        let publish: Vec<ClientMessage> = serde_json::from_str(text).unwrap();
        assert_eq!(
            publish,
            vec![ClientMessage::publish("/Keyboard/Keys/a", 1, NtType::Boolean)]
        );
        assert_eq!(binary(&frames[1]), vec![BinaryFrame::boolean(1, 0, true)]);
    }

    #[tokio::test]
    async fn test_repeated_writes_reuse_pubuid() {
        let mut conn = connection();

        conn.write_boolean(write("/Keyboard/Keys/a", true)).await.unwrap();
        conn.write_boolean(write("/Keyboard/Keys/a", false)).await.unwrap();
        conn.write_boolean(write("/Keyboard/Keys/b", true)).await.unwrap();

        let texts = conn
            .sink
            .0
            .iter()
            .filter(|m| matches!(m, WsMessage::Text(_)))
            .count();
        assert_eq!(texts, 2, "one publish per topic");
        assert_eq!(conn.pubuids.get("/Keyboard/Keys/b"), Some(&2));
        assert_eq!(binary(&conn.sink.0[2]), vec![BinaryFrame::boolean(1, 0, false)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_sync_reply_sets_value_timestamps() {
        // Arrange: a reply saying the server clock reads 1_000_000 µs
        let mut conn = connection();
        let reply = BinaryFrame {
            id: -1,
            timestamp_us: 1_000_000,
            value: NtValue::Int(0),
        };

        // Act
        conn.handle_frame(WsMessage::Binary(encode_binary_frame(&reply).unwrap()))
            .unwrap();
        conn.write_boolean(write("/k", true)).await.unwrap();

        // Assert: time is paused, so rtt is 0 and the value carries the server time
        assert_eq!(binary(&conn.sink.0[1])[0].timestamp_us, 1_000_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keepalive_pings_and_detects_silence() {
        let mut conn = connection();

        conn.keepalive().await.unwrap();
        assert!(matches!(conn.sink.0[..], [WsMessage::Ping(_)]));

        tokio::time::advance(LIVENESS_TIMEOUT + Duration::from_millis(1)).await;
        assert!(matches!(
            conn.keepalive().await,
            Err(ConnectionError::Silent(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keepalive_resends_time_sync_periodically() {
        let mut conn = connection();

        for _ in 0..TIME_SYNC_EVERY_TICKS {
            conn.handle_frame(WsMessage::Pong(Vec::new())).unwrap();
            conn.keepalive().await.unwrap();
        }

        let syncs: Vec<_> = conn
            .sink
            .0
            .iter()
            .filter(|m| matches!(m, WsMessage::Binary(_)))
            .flat_map(binary)
            .collect();
        assert_eq!(syncs.len(), 1);
        assert!(syncs[0].is_time_sync());
    }

    #[tokio::test]
    async fn test_close_frame_ends_connection() {
        let mut conn = connection();
        assert!(matches!(
            conn.handle_frame(WsMessage::Close(None)),
            Err(ConnectionError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_malformed_frames_are_ignored() {
        let mut conn = connection();
        conn.handle_frame(WsMessage::Text("not json".to_string()))
            .unwrap();
        conn.handle_frame(WsMessage::Binary(vec![0xC1])).unwrap();
    }

    #[tokio::test]
    async fn test_table_drops_writes_while_disconnected() {
        // Arrange
        let client = Nt4Client::new().unwrap();
        let table = client.table("Keyboard/Keys");
        let mut rx = client.outbound_rx.lock().unwrap().take().unwrap();

        // Act
        table.put_boolean("a", true);
        client.connected.store(true, Ordering::SeqCst);
        table.put_boolean("b", true);

        // Assert
        assert_eq!(rx.try_recv().unwrap(), write("/Keyboard/Keys/b", true));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_ds_override_wins_over_configured_server() {
        let client = Nt4Client::new().unwrap();
        client.set_server(&ServerTarget::new("localhost", 5811));
        let (_shutdown_tx, shutdown) = watch::channel(false);
        let task = ConnectionTask {
            client_name: "t".to_string(),
            server: client.server.subscribe(),
            robot_ip: client.robot_ip.subscribe(),
            connected: Arc::new(AtomicBool::new(false)),
            outbound: mpsc::unbounded_channel().1,
            shutdown,
            epoch: Instant::now(),
        };
        assert_eq!(task.current_target(), Some(ServerTarget::new("localhost", 5811)));

        client.robot_ip.send_replace(Some(Ipv4Addr::new(10, 45, 90, 2)));

        assert_eq!(task.current_target(), Some(ServerTarget::new("10.45.90.2", 5811)));
    }

    #[tokio::test]
    async fn test_start_client_twice_fails() {
        let client = Nt4Client::new().unwrap();
        client.start_client(&ClientIdentity::default()).unwrap();

        assert!(matches!(
            client.start_client(&ClientIdentity::default()),
            Err(TableClientError::AlreadyStarted)
        ));
        client.stop_client();
        assert!(!client.is_connected());
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        assert!(matches!(Nt4Client::new(), Err(TableClientError::NoRuntime(_))));
    }
}
