//! Grapheme, truncation, and wrapping helpers.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::extract_ansi_code;
use super::width::visible_width;

const ANSI_RESET: &str = "\x1b[0m";

pub fn grapheme_segments(text: &str) -> unicode_segmentation::Graphemes<'_> {
    UnicodeSegmentation::graphemes(text, true)
}

enum Segment {
    Ansi(String),
    Grapheme(String),
}

fn segments_of(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut idx = 0;
    while idx < text.len() {
        if let Some(ansi) = extract_ansi_code(text, idx) {
            idx += ansi.length;
            segments.push(Segment::Ansi(ansi.code));
            continue;
        }

        let text_end = next_ansi_or_end(text, idx);
        for grapheme in grapheme_segments(&text[idx..text_end]) {
            segments.push(Segment::Grapheme(grapheme.to_string()));
        }
        idx = text_end;
    }
    segments
}

fn next_ansi_or_end(input: &str, mut idx: usize) -> usize {
    while idx < input.len() {
        if extract_ansi_code(input, idx).is_some() {
            break;
        }
        let ch = input[idx..].chars().next().expect("missing char");
        idx += ch.len_utf8();
    }
    idx
}

/// Clip `text` to `max_width` cells, ANSI-aware, appending `ellipsis` (and a
/// style reset) when clipping happened. Optionally pads to exactly `max_width`.
pub fn truncate_to_width(text: &str, max_width: usize, ellipsis: &str, pad: bool) -> String {
    if max_width == 0 {
        return String::new();
    }

    let text_width = visible_width(text);
    if text_width <= max_width {
        if pad {
            return format!("{text}{}", " ".repeat(max_width - text_width));
        }
        return text.to_string();
    }

    let ellipsis_width = visible_width(ellipsis);
    let target_width = max_width.saturating_sub(ellipsis_width);
    if target_width == 0 {
        return ellipsis.chars().take(max_width).collect();
    }

    let mut truncated = String::new();
    let mut current_width = 0;
    for segment in segments_of(text) {
        match segment {
            Segment::Ansi(code) => truncated.push_str(&code),
            Segment::Grapheme(grapheme) => {
                let width = visible_width(&grapheme);
                if current_width + width > target_width {
                    break;
                }
                truncated.push_str(&grapheme);
                current_width += width;
            }
        }
    }

    let mut result = String::with_capacity(truncated.len() + ellipsis.len() + ANSI_RESET.len());
    result.push_str(&truncated);
    result.push_str(ANSI_RESET);
    result.push_str(ellipsis);

    if pad {
        let result_width = visible_width(&result);
        if result_width < max_width {
            result.push_str(&" ".repeat(max_width - result_width));
        }
    }

    result
}

/// Word-wrap a single logical line to `width` cells, ANSI-aware.
///
/// Escape sequences ride along with the word they are attached to and cost
/// nothing. A single word wider than `width` gets its own overflowing line
/// rather than being broken mid-grapheme.
pub fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split(' ') {
        if word.is_empty() {
            continue;
        }
        let word_width = visible_width(word);

        if current_width == 0 {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::{grapheme_segments, truncate_to_width, wrap_line};
    use crate::core::text::width::visible_width;

    #[test]
    fn truncate_returns_original_when_shorter() {
        assert_eq!(truncate_to_width("hello", 6, "...", false), "hello");
    }

    #[test]
    fn truncate_adds_ellipsis_and_reset() {
        let truncated = truncate_to_width("hello", 4, "...", false);
        assert_eq!(truncated, "h\x1b[0m...");
        assert_eq!(visible_width(&truncated), 4);
    }

    #[test]
    fn truncate_preserves_ansi_prefix() {
        let truncated = truncate_to_width("\x1b[31mhello", 4, "...", false);
        assert_eq!(truncated, "\x1b[31mh\x1b[0m...");
        assert_eq!(visible_width(&truncated), 4);
    }

    #[test]
    fn truncate_pads_when_requested() {
        let padded = truncate_to_width("hi", 4, "...", true);
        assert_eq!(padded, "hi  ");
        assert_eq!(visible_width(&padded), 4);
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(wrap_line("word word", 4), vec!["word", "word"]);
        assert_eq!(wrap_line("a b c", 3), vec!["a b", "c"]);
    }

    #[test]
    fn wrap_keeps_oversize_word_whole() {
        assert_eq!(wrap_line("overflowing", 4), vec!["overflowing"]);
    }

    #[test]
    fn wrap_of_empty_text_is_one_empty_line() {
        assert_eq!(wrap_line("", 10), vec![String::new()]);
    }

    #[test]
    fn grapheme_segments_splits_clusters() {
        let clusters: Vec<&str> = grapheme_segments("a🇺🇸").collect();
        assert_eq!(clusters, vec!["a", "🇺🇸"]);
    }
}
