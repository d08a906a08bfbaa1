//! Mock input source for unit testing.
//!
//! Allows tests to inject synthetic [`KeyEvent`]s without requiring
//! keyboard devices, permissions, or OS hooks.

use std::sync::{Arc, Mutex};

use keyboard_nt_core::KeyEvent;

use super::{CaptureError, InputSource, KeyEventHandler};

/// A mock implementation of [`InputSource`] that allows tests to inject events.
pub struct MockInputSource {
    handler: Mutex<Option<Arc<dyn KeyEventHandler>>>,
    stop_count: Mutex<u32>,
    fail_start: bool,
}

impl MockInputSource {
    /// Creates a new mock input source.
    pub fn new() -> Self {
        Self {
            handler: Mutex::new(None),
            stop_count: Mutex::new(0),
            fail_start: false,
        }
    }

    /// A source whose `start` fails, as when no keyboard can be opened.
    pub fn failing() -> Self {
        Self {
            fail_start: true,
            ..Self::new()
        }
    }

    /// Delivers `event` to the registered handler, as if captured from hardware.
    ///
    /// Panics if `start()` has not been called or if `stop()` has been called.
    pub fn inject(&self, event: &KeyEvent) {
        let handler = self
            .handler
            .lock()
            .expect("lock poisoned")
            .clone()
            .expect("MockInputSource::inject called before start()");
        handler.on_key_transition(event);
    }

    /// `true` between `start()` and `stop()`.
    pub fn is_running(&self) -> bool {
        self.handler.lock().expect("lock poisoned").is_some()
    }

    /// Returns the number of times [`InputSource::stop`] was called.
    pub fn stop_count(&self) -> u32 {
        *self.stop_count.lock().expect("lock poisoned")
    }
}

impl Default for MockInputSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for MockInputSource {
    fn start(&self, handler: Arc<dyn KeyEventHandler>) -> Result<(), CaptureError> {
        if self.fail_start {
            return Err(CaptureError::NoKeyboards);
        }
        let mut slot = self.handler.lock().expect("lock poisoned");
        if slot.is_some() {
            return Err(CaptureError::AlreadyStarted);
        }
        *slot = Some(handler);
        Ok(())
    }

    fn stop(&self) {
        *self.handler.lock().expect("lock poisoned") = None;
        *self.stop_count.lock().expect("lock poisoned") += 1;
    }
}
