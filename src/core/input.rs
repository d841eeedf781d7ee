//! Key parsing for raw terminal byte sequences.
//!
//! Only the legacy (non-kitty) encodings are recognized: single control
//! bytes, alt-prefixed bytes, and CSI/SS3 navigation sequences. That covers
//! every terminal the widgets are expected to run under; anything else
//! surfaces as `InputEvent::UnknownRaw` and is ignored by the widgets.

const LEGACY_UP: [&str; 2] = ["\x1b[A", "\x1bOA"];
const LEGACY_DOWN: [&str; 2] = ["\x1b[B", "\x1bOB"];
const LEGACY_RIGHT: [&str; 2] = ["\x1b[C", "\x1bOC"];
const LEGACY_LEFT: [&str; 2] = ["\x1b[D", "\x1bOD"];
const LEGACY_HOME: [&str; 4] = ["\x1b[H", "\x1bOH", "\x1b[1~", "\x1b[7~"];
const LEGACY_END: [&str; 4] = ["\x1b[F", "\x1bOF", "\x1b[4~", "\x1b[8~"];
const LEGACY_DELETE: [&str; 1] = ["\x1b[3~"];
const LEGACY_PAGE_UP: [&str; 2] = ["\x1b[5~", "\x1b[[5~"];
const LEGACY_PAGE_DOWN: [&str; 2] = ["\x1b[6~", "\x1b[[6~"];

/// Decoded text carried by a sequence, if it is plain printable input.
///
/// Space is text, not a key: widgets that care about spaces (the tag field's
/// commit-on-space rule) see them through the text path.
pub fn parse_text(data: &str) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    if data.chars().all(|ch| !ch.is_control()) {
        return Some(data.to_string());
    }
    None
}

fn legacy_sequence_key_id(data: &str) -> Option<&'static str> {
    let tables: [(&[&str], &'static str); 9] = [
        (&LEGACY_UP, "up"),
        (&LEGACY_DOWN, "down"),
        (&LEGACY_RIGHT, "right"),
        (&LEGACY_LEFT, "left"),
        (&LEGACY_HOME, "home"),
        (&LEGACY_END, "end"),
        (&LEGACY_DELETE, "delete"),
        (&LEGACY_PAGE_UP, "pageUp"),
        (&LEGACY_PAGE_DOWN, "pageDown"),
    ];
    for (sequences, key_id) in tables {
        if sequences.contains(&data) {
            return Some(key_id);
        }
    }
    None
}

/// Normalized key identifier for a raw sequence, e.g. `"enter"`, `"ctrl+c"`,
/// `"alt+backspace"`. `None` when the sequence is not a recognizable key.
pub fn parse_key(data: &str) -> Option<String> {
    if let Some(key_id) = legacy_sequence_key_id(data) {
        return Some(key_id.to_string());
    }

    if data == "\x1b" {
        return Some("escape".to_string());
    }
    if data == "\t" {
        return Some("tab".to_string());
    }
    if data == "\x1b[Z" {
        return Some("shift+tab".to_string());
    }
    if data == "\r" || data == "\n" || data == "\x1bOM" {
        return Some("enter".to_string());
    }
    if data == "\x00" {
        return Some("ctrl+space".to_string());
    }
    if data == "\x7f" || data == "\x08" {
        return Some("backspace".to_string());
    }
    if data == "\x1b\r" {
        return Some("alt+enter".to_string());
    }
    if data == "\x1b " {
        return Some("alt+space".to_string());
    }
    if data == "\x1b\x7f" || data == "\x1b\x08" {
        return Some("alt+backspace".to_string());
    }

    if data.len() == 2 && data.starts_with('\x1b') {
        let code = data.as_bytes()[1];
        if (1..=26).contains(&code) {
            let ch = (code + 96) as char;
            return Some(format!("ctrl+alt+{ch}"));
        }
        if (97..=122).contains(&code) {
            let ch = code as char;
            return Some(format!("alt+{ch}"));
        }
    }

    if data.len() == 1 {
        let code = data.as_bytes()[0];
        if (1..=26).contains(&code) {
            let ch = (code + 96) as char;
            return Some(format!("ctrl+{ch}"));
        }
        if (32..=126).contains(&code) {
            return Some(data.to_string());
        }
    }

    None
}
