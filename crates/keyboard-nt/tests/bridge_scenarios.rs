//! End-to-end bridge scenarios without a network or a keyboard.
//!
//! `run_bridge` is driven with a `RecordingTableClient` (stands in for the
//! NetworkTables client) and a `MockInputSource` (stands in for the OS
//! keyboard).  Each test injects key transitions and checks the exact
//! sequence of boolean writes that reach `/Keyboard/Keys/`.

use std::sync::Arc;
use std::time::Duration;

use keyboard_nt::application::{run_bridge, BridgeError};
use keyboard_nt::domain::config::BridgeConfig;
use keyboard_nt::infrastructure::input_capture::mock::MockInputSource;
use keyboard_nt::infrastructure::network::mock::{ClientCall, RecordingTableClient};
use keyboard_nt_core::{KeyEvent, KeyEventKind};
use tokio::task::JoinHandle;
use tokio_test::{assert_err, assert_ok};

fn press(name: &str) -> KeyEvent {
    KeyEvent::new(name, KeyEventKind::Press, false)
}

fn release(name: &str) -> KeyEvent {
    KeyEvent::new(name, KeyEventKind::Release, false)
}

fn keypad(name: &str, kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new(name, kind, true)
}

fn entry(key: &str, value: bool) -> (String, bool) {
    (format!("/Keyboard/Keys/{key}"), value)
}

/// Spawns the bridge and waits until keyboard capture is running.
async fn start_bridge(
    client: &Arc<RecordingTableClient>,
    input: &Arc<MockInputSource>,
) -> JoinHandle<Result<(), BridgeError>> {
    let bridge = {
        let client = Arc::clone(client);
        let input = Arc::clone(input);
        tokio::spawn(async move {
            run_bridge(client, input.as_ref(), &BridgeConfig::default()).await
        })
    };
    while !input.is_running() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    bridge
}

// ── Key naming ────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_typing_session_writes_expected_entries() {
    // Arrange
    let client = Arc::new(RecordingTableClient::new());
    client.set_connected(true);
    let input = Arc::new(MockInputSource::new());
    let bridge = start_bridge(&client, &input).await;

    // Act
    input.inject(&press("A"));
    input.inject(&press("A")); // auto-repeat
    input.inject(&keypad("5", KeyEventKind::Press));
    input.inject(&keypad("/", KeyEventKind::Press));
    input.inject(&press("Enter"));
    input.inject(&KeyEvent::unnamed(KeyEventKind::Press));
    input.inject(&keypad("5", KeyEventKind::Release));
    input.inject(&release("A"));
    client.set_connected(false);
    let result = bridge.await.unwrap();

    // Assert
    assert_ok!(result);
    assert_eq!(
        client.writes(),
        vec![
            entry("a", true),
            entry("a", true),
            entry("numpad5", true),
            entry("slash", true),
            entry("enter", true),
            entry("numpad5", false),
            entry("a", false),
        ]
    );
}

// ── Connection lifecycle ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_late_connection_is_accepted_within_timeout() {
    // Arrange: the server comes up 5 s after start
    let client = Arc::new(RecordingTableClient::new());
    let input = Arc::new(MockInputSource::new());
    {
        let client = Arc::clone(&client);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            client.set_connected(true);
        });
    }

    // Act
    let bridge = start_bridge(&client, &input).await;
    input.inject(&press("Space"));
    client.set_connected(false);

    // Assert
    assert_ok!(bridge.await.unwrap());
    assert_eq!(client.writes(), vec![entry("space", true)]);
    assert_eq!(input.stop_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_disconnect_tears_down_in_order() {
    let client = Arc::new(RecordingTableClient::new());
    client.set_connected(true);
    let input = Arc::new(MockInputSource::new());
    let bridge = start_bridge(&client, &input).await;

    client.set_connected(false);
    assert_ok!(bridge.await.unwrap());

    assert!(!input.is_running());
    assert_eq!(
        client.calls(),
        vec![
            ClientCall::StartClient("KeyboardToNetworkTables".to_string()),
            ClientCall::SetServer("127.0.0.1:5810".to_string()),
            ClientCall::StartDsClient,
            ClientCall::StopDsClient,
            ClientCall::StopClient,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_capture_failure_is_fatal() {
    let client = Arc::new(RecordingTableClient::new());
    client.set_connected(true);
    let input = MockInputSource::failing();

    let result = run_bridge(client.clone(), &input, &BridgeConfig::default()).await;

    let err = assert_err!(result);
    assert!(matches!(err, BridgeError::Capture(_)));
    assert_eq!(client.stop_count(), 1);
    assert!(client.writes().is_empty());
}
