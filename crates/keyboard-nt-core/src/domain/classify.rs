//! Event classifier: maps a [`KeyEvent`] to the boolean write it causes.
//!
//! # Naming policy
//!
//! The first matching rule wins:
//!
//! | Rule | Condition          | Key identifier                 |
//! |------|--------------------|--------------------------------|
//! | 1    | name is `"/"`      | `"slash"`                      |
//! | 2    | keypad key         | `"numpad"` + name (case kept)  |
//! | 3    | anything else      | name lower-cased               |
//!
//! Rule 1 exists because NetworkTables treats `/` as a path separator, so a
//! key literally named `/` would turn into a nested sub-table.

use super::key_event::KeyEvent;

/// Key identifier used in place of `/`.
pub const SLASH_KEY: &str = "slash";

/// Prefix for keys on the numeric keypad.
pub const NUMPAD_PREFIX: &str = "numpad";

/// A boolean write produced by [`classify`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyWrite {
    /// Entry name inside the keyboard sub-table.
    pub key: String,
    /// `true` while the key is held.
    pub pressed: bool,
}

/// Maps a key transition to the write it should cause.
///
/// Returns `None` when the event has no name (or an empty one).  Repeated
/// identical events each produce the same write; nothing is deduplicated.
pub fn classify(event: &KeyEvent) -> Option<KeyWrite> {
    let name = event.name.as_deref().filter(|n| !n.is_empty())?;

    let key = if name == "/" {
        SLASH_KEY.to_string()
    } else if event.is_keypad {
        format!("{NUMPAD_PREFIX}{name}")
    } else {
        name.to_lowercase()
    };

    Some(KeyWrite {
        key,
        pressed: event.kind.is_press(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
