//! Key publishing use case: classified key transitions become table writes.

use std::sync::Arc;

use keyboard_nt_core::{classify, KeyEvent};
use tracing::trace;

use crate::infrastructure::input_capture::KeyEventHandler;

/// A remote table that accepts boolean writes.
///
/// Implementations must tolerate concurrent callers; key events arrive on the
/// input source's own threads.  Writes are fire-and-forget: there is no
/// result to observe.
pub trait BooleanTable: Send + Sync {
    /// Sets the entry `key` in this table to `value`.
    fn put_boolean(&self, key: &str, value: bool);
}

/// Thin wrapper over the keyboard sub-table.
#[derive(Clone)]
pub struct KeyTablePublisher {
    table: Arc<dyn BooleanTable>,
}

impl KeyTablePublisher {
    pub fn new(table: Arc<dyn BooleanTable>) -> Self {
        Self { table }
    }

    /// Writes `value` under `key`.  No buffering, no retry.
    pub fn set(&self, key: &str, value: bool) {
        self.table.put_boolean(key, value);
    }
}

/// Handler registered with the input source: classify, then publish.
pub struct KeyForwarder {
    publisher: KeyTablePublisher,
}

impl KeyForwarder {
    pub fn new(publisher: KeyTablePublisher) -> Self {
        Self { publisher }
    }
}

impl KeyEventHandler for KeyForwarder {
    fn on_key_transition(&self, event: &KeyEvent) {
        let Some(write) = classify(event) else {
            return;
        };
        trace!(key = %write.key, pressed = write.pressed, "key write");
        self.publisher.set(&write.key, write.pressed);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use keyboard_nt_core::KeyEventKind;
    use std::sync::Mutex;

    #[derive(Default)]
    struct VecTable {
        writes: Mutex<Vec<(String, bool)>>,
    }

    impl BooleanTable for VecTable {
        fn put_boolean(&self, key: &str, value: bool) {
            self.writes.lock().unwrap().push((key.to_string(), value));
        }
    }

    fn forwarder() -> (KeyForwarder, Arc<VecTable>) {
        let table = Arc::new(VecTable::default());
        let publisher = KeyTablePublisher::new(table.clone());
        (KeyForwarder::new(publisher), table)
    }

    #[test]
    fn test_press_then_release_writes_true_then_false() {
        // Arrange
        let (fwd, table) = forwarder();

        // Act
        fwd.on_key_transition(&KeyEvent::new("A", KeyEventKind::Press, false));
        fwd.on_key_transition(&KeyEvent::new("A", KeyEventKind::Release, false));

        // Assert
        assert_eq!(
            *table.writes.lock().unwrap(),
            vec![("a".to_string(), true), ("a".to_string(), false)]
        );
    }

    #[test]
    fn test_unnamed_event_writes_nothing() {
        let (fwd, table) = forwarder();

        fwd.on_key_transition(&KeyEvent::unnamed(KeyEventKind::Press));

        assert!(table.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_keypad_key_is_prefixed() {
        let (fwd, table) = forwarder();

        fwd.on_key_transition(&KeyEvent::new("7", KeyEventKind::Press, true));

        assert_eq!(*table.writes.lock().unwrap(), vec![("numpad7".to_string(), true)]);
    }

    #[test]
    fn test_publisher_set_passes_through() {
        let table = Arc::new(VecTable::default());
        let publisher = KeyTablePublisher::new(table.clone());

        publisher.set("slash", false);

        assert_eq!(*table.writes.lock().unwrap(), vec![("slash".to_string(), false)]);
    }
}
