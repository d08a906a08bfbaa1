//! Recording table client for tests.
//!
//! [`RecordingTableClient`] implements [`TableClient`] without any network
//! I/O.  It records every lifecycle call in order, lets the test flip the
//! connection flag, and collects the writes made through its tables.  Like
//! the real client, it drops writes while disconnected.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use keyboard_nt_core::protocol::TablePath;
use keyboard_nt_core::ServerTarget;

use crate::application::manage_session::{TableClient, TableClientError};
use crate::application::publish_keys::BooleanTable;
use crate::domain::config::ClientIdentity;

/// A lifecycle call observed by [`RecordingTableClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCall {
    StartClient(String),
    SetServer(String),
    StartDsClient,
    StopDsClient,
    StopClient,
}

type WriteLog = Arc<Mutex<Vec<(String, bool)>>>;

/// A [`TableClient`] that records instead of connecting.
pub struct RecordingTableClient {
    connected: Arc<AtomicBool>,
    calls: Mutex<Vec<ClientCall>>,
    writes: WriteLog,
}

impl RecordingTableClient {
    /// Creates a disconnected client.
    pub fn new() -> Self {
        Self {
            connected: Arc::new(AtomicBool::new(false)),
            calls: Mutex::new(Vec::new()),
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets what `is_connected` reports.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Every lifecycle call so far, in order.
    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    /// Every accepted write as `(topic, value)`, in order.
    pub fn writes(&self) -> Vec<(String, bool)> {
        self.writes.lock().expect("lock poisoned").clone()
    }

    /// Number of `stop_client` calls.
    pub fn stop_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == ClientCall::StopClient)
            .count()
    }

    fn record(&self, call: ClientCall) {
        self.calls.lock().expect("lock poisoned").push(call);
    }
}

impl Default for RecordingTableClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TableClient for RecordingTableClient {
    fn start_client(&self, identity: &ClientIdentity) -> Result<(), TableClientError> {
        self.record(ClientCall::StartClient(identity.client_name.clone()));
        Ok(())
    }

    fn set_server(&self, server: &ServerTarget) {
        self.record(ClientCall::SetServer(server.to_string()));
    }

    fn start_ds_client(&self) -> Result<(), TableClientError> {
        self.record(ClientCall::StartDsClient);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn table(&self, path: &str) -> Arc<dyn BooleanTable> {
        Arc::new(RecordingTable {
            path: TablePath::new(path),
            connected: Arc::clone(&self.connected),
            writes: Arc::clone(&self.writes),
        })
    }

    fn stop_ds_client(&self) {
        self.record(ClientCall::StopDsClient);
    }

    fn stop_client(&self) {
        self.record(ClientCall::StopClient);
        self.set_connected(false);
    }
}

struct RecordingTable {
    path: TablePath,
    connected: Arc<AtomicBool>,
    writes: WriteLog,
}

impl BooleanTable for RecordingTable {
    fn put_boolean(&self, key: &str, value: bool) {
        if self.connected.load(Ordering::SeqCst) {
            self.writes
                .lock()
                .expect("lock poisoned")
                .push((self.path.topic(key), value));
        }
    }
}
