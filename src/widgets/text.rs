//! Text widget.

use crate::core::component::Component;
use crate::core::text::utils::wrap_line;
use crate::core::text::width::visible_width;

/// Static text block with horizontal/vertical padding and a render cache.
pub struct Text {
    text: String,
    padding_x: usize,
    padding_y: usize,
    cached_text: Option<String>,
    cached_width: Option<usize>,
    cached_lines: Option<Vec<String>>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_padding(text, 1, 1)
    }

    pub fn with_padding(text: impl Into<String>, padding_x: usize, padding_y: usize) -> Self {
        Self {
            text: text.into(),
            padding_x,
            padding_y,
            cached_text: None,
            cached_width: None,
            cached_lines: None,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.invalidate();
    }
}

impl Component for Text {
    fn render(&mut self, width: usize) -> Vec<String> {
        if let Some(cached) = self.cached_lines.as_ref() {
            if self.cached_text.as_deref() == Some(&self.text) && self.cached_width == Some(width) {
                return cached.clone();
            }
        }

        let mut result = Vec::new();
        if !self.text.trim().is_empty() {
            let normalized = self.text.replace('\t', "   ");
            let content_width = width.saturating_sub(self.padding_x * 2).max(1);
            let margin = " ".repeat(self.padding_x);

            let mut content_lines = Vec::new();
            for source_line in normalized.split('\n') {
                for line in wrap_line(source_line, content_width) {
                    let with_margins = format!("{margin}{line}{margin}");
                    let visible_len = visible_width(&with_margins);
                    let padding = " ".repeat(width.saturating_sub(visible_len));
                    content_lines.push(format!("{with_margins}{padding}"));
                }
            }

            let empty_line = " ".repeat(width);
            for _ in 0..self.padding_y {
                result.push(empty_line.clone());
            }
            result.extend(content_lines);
            for _ in 0..self.padding_y {
                result.push(empty_line.clone());
            }
        }

        self.cached_text = Some(self.text.clone());
        self.cached_width = Some(width);
        self.cached_lines = Some(result.clone());

        result
    }

    fn invalidate(&mut self) {
        self.cached_text = None;
        self.cached_width = None;
        self.cached_lines = None;
    }
}
