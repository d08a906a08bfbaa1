//! Linux keyboard capture via evdev.
//!
//! Every `/dev/input/event*` device that reports both `KEY_A` and `KEY_ENTER`
//! is treated as a keyboard.  Each one gets a blocking reader thread; key
//! events are named with `keymap::linux_evdev` and handed to the registered
//! handler.  Reading `/dev/input` requires membership of the `input` group
//! (or root).  Devices are read, not grabbed, so keystrokes still reach the
//! focused application.
//!
//! Reader threads block in `fetch_events`; after [`InputSource::stop`] they
//! drop their next event and exit.

#![cfg(target_os = "linux")]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use evdev::{Device, EventType, InputEvent, Key};
use keyboard_nt_core::keymap::linux_evdev;
use keyboard_nt_core::{KeyEvent, KeyEventKind};
use tracing::{debug, info, warn};

use super::{CaptureError, InputSource, KeyEventHandler};

/// evdev key event values.
const KEY_RELEASE: i32 = 0;
const KEY_PRESS: i32 = 1;
const KEY_REPEAT: i32 = 2;

/// Keyboard capture from all evdev keyboards.
pub struct EvdevKeyboardSource {
    /// Shared with reader threads; cleared by `stop()`.
    running: Arc<AtomicBool>,
    started: Mutex<bool>,
}

impl EvdevKeyboardSource {
    /// Creates a new (unstarted) source.
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            started: Mutex::new(false),
        }
    }
}

impl Default for EvdevKeyboardSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for EvdevKeyboardSource {
    fn start(&self, handler: Arc<dyn KeyEventHandler>) -> Result<(), CaptureError> {
        let mut started = self
            .started
            .lock()
            .map_err(|_| CaptureError::DeviceAccess("state lock poisoned".to_string()))?;
        if *started {
            return Err(CaptureError::AlreadyStarted);
        }

        let keyboards: Vec<(String, Device)> = evdev::enumerate()
            .filter(|(_, device)| is_keyboard(device))
            .map(|(path, device)| (path.display().to_string(), device))
            .collect();
        if keyboards.is_empty() {
            return Err(CaptureError::NoKeyboards);
        }

        self.running.store(true, Ordering::SeqCst);
        for (path, device) in keyboards {
            info!(
                "capturing keyboard {path} ({})",
                device.name().unwrap_or("unnamed")
            );
            let running = Arc::clone(&self.running);
            let handler = Arc::clone(&handler);
            thread::Builder::new()
                .name("kbnt-evdev".to_string())
                .spawn(move || read_device(path, device, running, handler))
                .map_err(|e| CaptureError::DeviceAccess(e.to_string()))?;
        }

        *started = true;
        Ok(())
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

fn is_keyboard(device: &Device) -> bool {
    device
        .supported_keys()
        .is_some_and(|keys| keys.contains(Key::KEY_A) && keys.contains(Key::KEY_ENTER))
}

/// Blocking read loop for one device.
fn read_device(
    path: String,
    mut device: Device,
    running: Arc<AtomicBool>,
    handler: Arc<dyn KeyEventHandler>,
) {
    while running.load(Ordering::SeqCst) {
        let events = match device.fetch_events() {
            Ok(events) => events,
            Err(e) => {
                warn!("stopped reading {path}: {e}");
                return;
            }
        };
        for event in events {
            if !running.load(Ordering::SeqCst) {
                break;
            }
            if let Some(key_event) = to_key_event(&event) {
                handler.on_key_transition(&key_event);
            }
        }
    }
    debug!("reader for {path} exiting");
}

/// Converts a raw evdev event; non-key events yield `None`.
fn to_key_event(event: &InputEvent) -> Option<KeyEvent> {
    if event.event_type() != EventType::KEY {
        return None;
    }
    let kind = match event.value() {
        KEY_PRESS | KEY_REPEAT => KeyEventKind::Press,
        KEY_RELEASE => KeyEventKind::Release,
        _ => return None,
    };
    Some(KeyEvent::from_key_name(
        linux_evdev::key_name(event.code()),
        kind,
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
