//! Windows Virtual Key (VK) code to key name table.
//!
//! Reference: https://learn.microsoft.com/windows/win32/inputdev/virtual-key-codes
//!
//! # Keypad disambiguation
//!
//! Several keypad keys share a VK code with a main-block key and are told
//! apart by the `LLKHF_EXTENDED` flag of the low-level hook:
//!
//! | VK                    | extended = false        | extended = true  |
//! |-----------------------|-------------------------|------------------|
//! | `VK_RETURN`           | main Enter              | keypad Enter     |
//! | `VK_HOME`..`VK_DOWN`, `VK_INSERT`, `VK_DELETE` | keypad (Num Lock off) | navigation block |
//!
//! `VK_DIVIDE` is always on the keypad even though it is extended.

use super::KeyName;

/// Looks up the canonical name for a Windows virtual-key code.
///
/// Returns `None` for VK codes without a keyboard name (mouse buttons, IME
/// and browser keys).
pub fn key_name(vk: u8, is_extended: bool) -> Option<KeyName> {
    let key = match vk {
        0x08 => KeyName::main("backspace"),
        0x09 => KeyName::main("tab"),
        0x0C => KeyName::keypad("clear"), // VK_CLEAR (keypad 5, Num Lock off)
        0x0D if is_extended => KeyName::keypad("enter"),
        0x0D => KeyName::main("enter"),
        0x10 => KeyName::main("shift"),
        0x11 => KeyName::main("ctrl"),
        0x12 => KeyName::main("alt"),
        0x13 => KeyName::main("pause"),
        0x14 => KeyName::main("caps lock"),
        0x1B => KeyName::main("esc"),
        0x20 => KeyName::main("space"),
        0x21..=0x28 | 0x2D | 0x2E => navigation_key(vk, is_extended)?,
        0x2C => KeyName::main("print screen"),
        // Digit row: VK_0 = 0x30 … VK_9 = 0x39 (ASCII)
        0x30..=0x39 => KeyName::main(DIGITS[(vk - 0x30) as usize]),
        // Letters: VK_A = 0x41 … VK_Z = 0x5A (ASCII upper case)
        0x41..=0x5A => KeyName::main(LETTERS[(vk - 0x41) as usize]),
        0x5B => KeyName::main("left windows"),
        0x5C => KeyName::main("right windows"),
        0x5D => KeyName::main("menu"),
        // VK_NUMPAD0 = 0x60 … VK_NUMPAD9 = 0x69
        0x60..=0x69 => KeyName::keypad(DIGITS[(vk - 0x60) as usize]),
        0x6A => KeyName::keypad("*"),
        0x6B => KeyName::keypad("+"),
        0x6C => KeyName::keypad(","),
        0x6D => KeyName::keypad("-"),
        0x6E => KeyName::keypad("."),
        0x6F => KeyName::keypad("/"),
        // VK_F1 = 0x70 … VK_F24 = 0x87
        0x70..=0x87 => KeyName::main(FUNCTION_KEYS[(vk - 0x70) as usize]),
        0x90 => KeyName::main("num lock"),
        0x91 => KeyName::main("scroll lock"),
        0xA0 => KeyName::main("shift"),
        0xA1 => KeyName::main("right shift"),
        0xA2 => KeyName::main("ctrl"),
        0xA3 => KeyName::main("right ctrl"),
        0xA4 => KeyName::main("alt"),
        0xA5 => KeyName::main("right alt"),
        0xAD => KeyName::main("mute"),
        0xAE => KeyName::main("volume down"),
        0xAF => KeyName::main("volume up"),
        // OEM keys (US layout legends)
        0xBA => KeyName::main(";"),
        0xBB => KeyName::main("="),
        0xBC => KeyName::main(","),
        0xBD => KeyName::main("-"),
        0xBE => KeyName::main("."),
        0xBF => KeyName::main("/"),
        0xC0 => KeyName::main("`"),
        0xDB => KeyName::main("["),
        0xDC => KeyName::main("\\"),
        0xDD => KeyName::main("]"),
        0xDE => KeyName::main("'"),
        0xE2 => KeyName::main("<"), // VK_OEM_102
        _ => return None,
    };
    Some(key)
}

/// Navigation keys double as keypad keys when Num Lock is off; only the
/// dedicated navigation block reports them as extended.
fn navigation_key(vk: u8, is_extended: bool) -> Option<KeyName> {
    let name = match vk {
        0x21 => "page up",
        0x22 => "page down",
        0x23 => "end",
        0x24 => "home",
        0x25 => "left",
        0x26 => "up",
        0x27 => "right",
        0x28 => "down",
        0x2D => "insert",
        0x2E => "delete",
        _ => return None,
    };
    Some(if is_extended {
        KeyName::main(name)
    } else {
        KeyName::keypad(name)
    })
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

const LETTERS: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z",
];

const FUNCTION_KEYS: [&str; 24] = [
    "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12", "f13", "f14",
    "f15", "f16", "f17", "f18", "f19", "f20", "f21", "f22", "f23", "f24",
];

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_vks_map_to_lowercase() {
        assert_eq!(key_name(0x41, false), Some(KeyName::main("a")));
        assert_eq!(key_name(0x5A, false), Some(KeyName::main("z")));
    }

    #[test]
    fn test_numpad_vks_are_keypad_digits() {
        let key = key_name(0x67, false).unwrap(); // VK_NUMPAD7
        assert_eq!(key, KeyName::keypad("7"));
    }

    #[test]
    fn test_extended_return_is_keypad_enter() {
        assert_eq!(key_name(0x0D, true), Some(KeyName::keypad("enter")));
        assert_eq!(key_name(0x0D, false), Some(KeyName::main("enter")));
    }

    #[test]
    fn test_non_extended_navigation_is_keypad() {
        // Num Lock off: keypad 8 arrives as VK_UP without the extended flag
        assert_eq!(key_name(0x26, false), Some(KeyName::keypad("up")));
        assert_eq!(key_name(0x26, true), Some(KeyName::main("up")));
    }

    #[test]
    fn test_function_keys_cover_f1_to_f24() {
        assert_eq!(key_name(0x70, false).unwrap().name, "f1");
        assert_eq!(key_name(0x87, false).unwrap().name, "f24");
    }

    #[test]
    fn test_unmapped_vks_return_none() {
        assert_eq!(key_name(0x01, false), None); // VK_LBUTTON
        assert_eq!(key_name(0xFF, false), None);
    }
}
