//! Key name tables for the supported capture platforms.
//!
//! Input sources see numeric key codes; the classifier works on names.  Both
//! tables below produce the same canonical vocabulary so robot code reads the
//! same entries no matter which OS the bridge runs on:
//!
//! | Key group        | Names                                             |
//! |------------------|---------------------------------------------------|
//! | Letters / digits | `"a"`..`"z"`, `"0"`..`"9"`                        |
//! | Punctuation      | the unshifted character (`"-"`, `";"`, `"/"` …)   |
//! | Modifiers        | `"shift"`, `"right shift"`, `"ctrl"`, `"alt"` …   |
//! | Navigation       | `"up"`, `"page down"`, `"home"`, `"delete"` …     |
//! | Keypad           | bare symbol (`"7"`, `"+"`, `"enter"`), keypad flag |
//!
//! Names are the *unshifted* legends: holding Shift does not turn `"1"` into
//! `"!"`.

pub mod linux_evdev;
pub mod windows_vk;

/// A canonical key name plus whether the key sits on the numeric keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyName {
    /// Canonical name, e.g. `"a"`, `"caps lock"`, `"7"`.
    pub name: &'static str,
    /// `true` for numeric keypad keys.
    pub is_keypad: bool,
}

impl KeyName {
    /// A key on the main block of the keyboard.
    pub const fn main(name: &'static str) -> Self {
        Self {
            name,
            is_keypad: false,
        }
    }

    /// A key on the numeric keypad.
    pub const fn keypad(name: &'static str) -> Self {
        Self {
            name,
            is_keypad: true,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
