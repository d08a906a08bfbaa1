//! The key transition delivered by an input source.

use crate::keymap::KeyName;

/// Whether a key went down or up.
///
/// Auto-repeat while a key is held is reported as [`KeyEventKind::Press`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    /// The key was pressed (or auto-repeated while held).
    Press,
    /// The key was released.
    Release,
}

impl KeyEventKind {
    /// `true` for [`KeyEventKind::Press`].
    pub fn is_press(self) -> bool {
        matches!(self, KeyEventKind::Press)
    }
}

/// A single physical key transition.
///
/// `name` is `None` when the platform code has no entry in the keymap; such
/// events are dropped by [`classify`](crate::domain::classify::classify).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Canonical key name (e.g. `"a"`, `"enter"`, `"7"`).
    pub name: Option<String>,
    /// Press or release.
    pub kind: KeyEventKind,
    /// `true` if the key sits on the numeric keypad.
    pub is_keypad: bool,
}

impl KeyEvent {
    /// Creates an event for a named key.
    pub fn new(name: impl Into<String>, kind: KeyEventKind, is_keypad: bool) -> Self {
        Self {
            name: Some(name.into()),
            kind,
            is_keypad,
        }
    }

    /// Creates an event for a key the keymap could not name.
    pub fn unnamed(kind: KeyEventKind) -> Self {
        Self {
            name: None,
            kind,
            is_keypad: false,
        }
    }

    /// Builds an event from an optional keymap lookup result.
    pub fn from_key_name(key: Option<KeyName>, kind: KeyEventKind) -> Self {
        match key {
            Some(k) => Self::new(k.name, kind, k.is_keypad),
            None => Self::unnamed(kind),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_press_only_for_press() {
        assert!(KeyEventKind::Press.is_press());
        assert!(!KeyEventKind::Release.is_press());
    }

    #[test]
    fn test_from_key_name_copies_name_and_keypad_flag() {
        // Arrange
        let key = KeyName::keypad("7");

        // Act
        let event = KeyEvent::from_key_name(Some(key), KeyEventKind::Release);

        // Assert
        assert_eq!(event.name.as_deref(), Some("7"));
        assert!(event.is_keypad);
        assert_eq!(event.kind, KeyEventKind::Release);
    }

    #[test]
    fn test_from_key_name_without_mapping_is_unnamed() {
        let event = KeyEvent::from_key_name(None, KeyEventKind::Press);
        assert_eq!(event, KeyEvent::unnamed(KeyEventKind::Press));
        assert!(event.name.is_none());
    }
}
