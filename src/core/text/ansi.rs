//! ANSI escape-sequence scanning.

/// One escape sequence found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiCode {
    pub code: String,
    pub length: usize,
}

/// Extract the escape sequence starting at byte offset `pos`, if any.
///
/// Recognizes CSI (`ESC[` .. final byte), string-terminated sequences
/// (OSC/APC/DCS, ended by BEL or `ESC\`), and SS3 (`ESC O x`).
pub fn extract_ansi_code(input: &str, pos: usize) -> Option<AnsiCode> {
    let bytes = input.as_bytes();
    if pos + 1 >= bytes.len() || bytes[pos] != 0x1b {
        return None;
    }

    match bytes[pos + 1] {
        b'[' => extract_csi(input, pos),
        b']' | b'_' | b'P' => extract_string_terminated(input, pos),
        b'O' => extract_ss3(input, pos),
        _ => None,
    }
}

fn extract_csi(input: &str, pos: usize) -> Option<AnsiCode> {
    let bytes = input.as_bytes();
    let mut idx = pos + 2;
    while idx < bytes.len() {
        if (0x40..=0x7e).contains(&bytes[idx]) {
            let end = idx + 1;
            return Some(AnsiCode {
                code: input[pos..end].to_string(),
                length: end - pos,
            });
        }
        idx += 1;
    }
    None
}

fn extract_ss3(input: &str, pos: usize) -> Option<AnsiCode> {
    let bytes = input.as_bytes();
    if pos + 2 >= bytes.len() {
        return None;
    }
    let end = pos + 3;
    Some(AnsiCode {
        code: input[pos..end].to_string(),
        length: end - pos,
    })
}

fn extract_string_terminated(input: &str, pos: usize) -> Option<AnsiCode> {
    let bytes = input.as_bytes();
    let mut idx = pos + 2;
    while idx < bytes.len() {
        if bytes[idx] == 0x07 {
            let end = idx + 1;
            return Some(AnsiCode {
                code: input[pos..end].to_string(),
                length: end - pos,
            });
        }
        if bytes[idx] == 0x1b && idx + 1 < bytes.len() && bytes[idx + 1] == b'\\' {
            let end = idx + 2;
            return Some(AnsiCode {
                code: input[pos..end].to_string(),
                length: end - pos,
            });
        }
        idx += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::extract_ansi_code;

    #[test]
    fn csi_sequence_is_extracted() {
        let found = extract_ansi_code("\x1b[31mred", 0).expect("csi");
        assert_eq!(found.code, "\x1b[31m");
        assert_eq!(found.length, 5);
    }

    #[test]
    fn osc_sequence_terminated_by_bel() {
        let input = "\x1b]8;;https://example.com\x07link";
        let found = extract_ansi_code(input, 0).expect("osc");
        assert_eq!(found.length, input.len() - "link".len());
    }

    #[test]
    fn osc_sequence_terminated_by_st() {
        let input = "\x1b]0;title\x1b\\rest";
        let found = extract_ansi_code(input, 0).expect("osc");
        assert_eq!(found.length, input.len() - "rest".len());
    }

    #[test]
    fn plain_text_yields_none() {
        assert!(extract_ansi_code("plain", 0).is_none());
        assert!(extract_ansi_code("\x1b", 0).is_none());
    }
}
