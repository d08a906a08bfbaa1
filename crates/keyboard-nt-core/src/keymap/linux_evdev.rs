//! Linux evdev key code to key name table.
//!
//! Codes are the `KEY_*` constants from `linux/input-event-codes.h`.
//! Reference: https://elixir.bootlin.com/linux/latest/source/include/uapi/linux/input-event-codes.h
//!
//! evdev codes describe physical key positions, so the table maps each to the
//! US-layout legend.

use super::KeyName;

/// Looks up the canonical name for an evdev `KEY_*` code.
///
/// Returns `None` for codes without a keyboard name (mouse buttons, media
/// keys this bridge does not publish, unassigned codes).
pub fn key_name(code: u16) -> Option<KeyName> {
    let key = match code {
        1 => KeyName::main("esc"),
        2 => KeyName::main("1"),
        3 => KeyName::main("2"),
        4 => KeyName::main("3"),
        5 => KeyName::main("4"),
        6 => KeyName::main("5"),
        7 => KeyName::main("6"),
        8 => KeyName::main("7"),
        9 => KeyName::main("8"),
        10 => KeyName::main("9"),
        11 => KeyName::main("0"),
        12 => KeyName::main("-"),
        13 => KeyName::main("="),
        14 => KeyName::main("backspace"),
        15 => KeyName::main("tab"),
        16 => KeyName::main("q"),
        17 => KeyName::main("w"),
        18 => KeyName::main("e"),
        19 => KeyName::main("r"),
        20 => KeyName::main("t"),
        21 => KeyName::main("y"),
        22 => KeyName::main("u"),
        23 => KeyName::main("i"),
        24 => KeyName::main("o"),
        25 => KeyName::main("p"),
        26 => KeyName::main("["),
        27 => KeyName::main("]"),
        28 => KeyName::main("enter"),
        29 => KeyName::main("ctrl"),
        30 => KeyName::main("a"),
        31 => KeyName::main("s"),
        32 => KeyName::main("d"),
        33 => KeyName::main("f"),
        34 => KeyName::main("g"),
        35 => KeyName::main("h"),
        36 => KeyName::main("j"),
        37 => KeyName::main("k"),
        38 => KeyName::main("l"),
        39 => KeyName::main(";"),
        40 => KeyName::main("'"),
        41 => KeyName::main("`"),
        42 => KeyName::main("shift"),
        43 => KeyName::main("\\"),
        44 => KeyName::main("z"),
        45 => KeyName::main("x"),
        46 => KeyName::main("c"),
        47 => KeyName::main("v"),
        48 => KeyName::main("b"),
        49 => KeyName::main("n"),
        50 => KeyName::main("m"),
        51 => KeyName::main(","),
        52 => KeyName::main("."),
        53 => KeyName::main("/"),
        54 => KeyName::main("right shift"),
        55 => KeyName::keypad("*"), // KEY_KPASTERISK
        56 => KeyName::main("alt"),
        57 => KeyName::main("space"),
        58 => KeyName::main("caps lock"),
        59 => KeyName::main("f1"),
        60 => KeyName::main("f2"),
        61 => KeyName::main("f3"),
        62 => KeyName::main("f4"),
        63 => KeyName::main("f5"),
        64 => KeyName::main("f6"),
        65 => KeyName::main("f7"),
        66 => KeyName::main("f8"),
        67 => KeyName::main("f9"),
        68 => KeyName::main("f10"),
        69 => KeyName::main("num lock"),
        70 => KeyName::main("scroll lock"),
        // Keypad block (KEY_KP7 = 71 … KEY_KPDOT = 83)
        71 => KeyName::keypad("7"),
        72 => KeyName::keypad("8"),
        73 => KeyName::keypad("9"),
        74 => KeyName::keypad("-"),
        75 => KeyName::keypad("4"),
        76 => KeyName::keypad("5"),
        77 => KeyName::keypad("6"),
        78 => KeyName::keypad("+"),
        79 => KeyName::keypad("1"),
        80 => KeyName::keypad("2"),
        81 => KeyName::keypad("3"),
        82 => KeyName::keypad("0"),
        83 => KeyName::keypad("."),
        86 => KeyName::main("<"), // KEY_102ND (ISO extra key)
        87 => KeyName::main("f11"),
        88 => KeyName::main("f12"),
        96 => KeyName::keypad("enter"),
        97 => KeyName::main("right ctrl"),
        98 => KeyName::keypad("/"),
        99 => KeyName::main("print screen"), // KEY_SYSRQ
        100 => KeyName::main("right alt"),
        102 => KeyName::main("home"),
        103 => KeyName::main("up"),
        104 => KeyName::main("page up"),
        105 => KeyName::main("left"),
        106 => KeyName::main("right"),
        107 => KeyName::main("end"),
        108 => KeyName::main("down"),
        109 => KeyName::main("page down"),
        110 => KeyName::main("insert"),
        111 => KeyName::main("delete"),
        113 => KeyName::main("mute"),
        114 => KeyName::main("volume down"),
        115 => KeyName::main("volume up"),
        117 => KeyName::keypad("="),
        119 => KeyName::main("pause"),
        121 => KeyName::keypad(","),
        125 => KeyName::main("left windows"),
        126 => KeyName::main("right windows"),
        127 => KeyName::main("menu"), // KEY_COMPOSE
        // KEY_F13 = 183 … KEY_F24 = 194
        183 => KeyName::main("f13"),
        184 => KeyName::main("f14"),
        185 => KeyName::main("f15"),
        186 => KeyName::main("f16"),
        187 => KeyName::main("f17"),
        188 => KeyName::main("f18"),
        189 => KeyName::main("f19"),
        190 => KeyName::main("f20"),
        191 => KeyName::main("f21"),
        192 => KeyName::main("f22"),
        193 => KeyName::main("f23"),
        194 => KeyName::main("f24"),
        _ => return None,
    };
    Some(key)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_map_to_lowercase_names() {
        assert_eq!(key_name(30), Some(KeyName::main("a")));
        assert_eq!(key_name(44), Some(KeyName::main("z")));
        assert_eq!(key_name(16), Some(KeyName::main("q")));
    }

    #[test]
    fn test_digit_row_is_not_keypad() {
        // KEY_7 = 8 on the digit row
        let key = key_name(8).unwrap();
        assert_eq!(key.name, "7");
        assert!(!key.is_keypad);
    }

    #[test]
    fn test_keypad_digits_carry_keypad_flag() {
        for (code, name) in [(82, "0"), (79, "1"), (71, "7"), (73, "9")] {
            let key = key_name(code).unwrap();
            assert_eq!(key.name, name);
            assert!(key.is_keypad, "code {code} must be a keypad key");
        }
    }

    #[test]
    fn test_keypad_slash_and_main_slash_share_name() {
        assert_eq!(key_name(53).unwrap().name, "/");
        assert_eq!(key_name(98).unwrap().name, "/");
        assert!(key_name(98).unwrap().is_keypad);
    }

    #[test]
    fn test_unassigned_codes_return_none() {
        assert_eq!(key_name(0), None); // KEY_RESERVED
        assert_eq!(key_name(84), None); // gap in the table
        assert_eq!(key_name(0x110), None); // BTN_LEFT
    }

    #[test]
    fn test_function_keys_span_both_ranges() {
        assert_eq!(key_name(59).unwrap().name, "f1");
        assert_eq!(key_name(88).unwrap().name, "f12");
        assert_eq!(key_name(194).unwrap().name, "f24");
    }
}
