//! Tag-input widget.
//!
//! A single-line input whose whitespace-delimited words become discrete tags.
//! A trailing space commits the pending text, enter commits explicitly, and
//! backspace on an empty buffer removes the last tag. The widget owns its tag
//! list; callers observe mutations through `set_on_change` and read the list
//! through the `tags()` snapshot.

use crate::core::component::{Component, Focusable};
use crate::core::cursor::CursorPos;
use crate::core::input_event::InputEvent;
use crate::core::text::utils::grapheme_segments;
use crate::core::text::width::visible_width;
use crate::theme::{dim, paint, DisplayMode};

const DISMISS_GLYPH: &str = "×";
const CURSOR_BLOCK: &str = "\x1b[7m \x1b[27m";
const PROMPT: &str = "> ";

pub type TagsChangedFn = Box<dyn FnMut(&[String])>;

/// Styling hooks for the tag field.
pub struct TagFieldTheme {
    pub pill: Box<dyn Fn(&str) -> String>,
    pub dismiss: Box<dyn Fn(&str) -> String>,
    pub prompt: Box<dyn Fn(&str) -> String>,
    pub placeholder: Box<dyn Fn(&str) -> String>,
}

impl TagFieldTheme {
    pub fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Light => Self {
                pill: Box::new(|text| paint("30;46", text)),
                dismiss: Box::new(|text| paint("36", text)),
                prompt: Box::new(dim),
                placeholder: Box::new(dim),
            },
            DisplayMode::Dark => Self {
                pill: Box::new(|text| paint("97;44", text)),
                dismiss: Box::new(|text| paint("94", text)),
                prompt: Box::new(dim),
                placeholder: Box::new(dim),
            },
        }
    }

    /// Identity styling for monochrome terminals and tests.
    pub fn plain() -> Self {
        Self {
            pill: Box::new(str::to_string),
            dismiss: Box::new(str::to_string),
            prompt: Box::new(str::to_string),
            placeholder: Box::new(str::to_string),
        }
    }
}

/// Construction-time configuration.
///
/// `initial_tags` seeds the tag list verbatim: no trimming or validation is
/// applied, so a caller can seed an empty-string tag unless they validate it
/// themselves.
#[derive(Default)]
pub struct TagFieldOptions {
    pub initial_tags: Vec<String>,
    pub placeholder: String,
}

pub struct TagField {
    tags: Vec<String>,
    buffer: String,
    placeholder: String,
    focused: bool,
    theme: TagFieldTheme,
    on_change: Option<TagsChangedFn>,
    last_cursor_pos: Option<CursorPos>,
}

impl TagField {
    pub fn new(theme: TagFieldTheme, options: TagFieldOptions) -> Self {
        Self {
            tags: options.initial_tags,
            buffer: String::new(),
            placeholder: options.placeholder,
            focused: false,
            theme,
            on_change: None,
            last_cursor_pos: None,
        }
    }

    /// Snapshot of the current tag list. Later widget mutation never affects
    /// a snapshot already returned.
    pub fn tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    /// The not-yet-committed text in the input.
    pub fn pending_text(&self) -> &str {
        &self.buffer
    }

    pub fn set_on_change(&mut self, handler: Option<TagsChangedFn>) {
        self.on_change = handler;
    }

    pub fn set_theme(&mut self, theme: TagFieldTheme) {
        self.theme = theme;
    }

    /// Remove the tag at `index`, preserving the order of the rest.
    /// An out-of-range index is a no-op.
    pub fn remove_tag_at(&mut self, index: usize) {
        if index >= self.tags.len() {
            return;
        }
        self.tags.remove(index);
        self.notify_change();
    }

    fn notify_change(&mut self) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(&self.tags);
        }
    }

    /// Append every whitespace-delimited token of `raw` as a tag.
    /// Fires `on_change` once for the whole batch; all-whitespace input is a
    /// no-op with no callback.
    fn append_tokens(&mut self, raw: &str) {
        let tokens: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return;
        }
        self.tags.extend(tokens);
        self.notify_change();
    }

    /// The text-changed policy: a buffer ending in a space commits; anything
    /// else simply becomes the new pending value.
    fn apply_typed(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut next = String::with_capacity(self.buffer.len() + text.len());
        next.push_str(&self.buffer);
        next.push_str(text);

        if next.ends_with(' ') {
            // Trailing space always clears the buffer, even when the trimmed
            // content is empty and nothing gets committed.
            self.buffer.clear();
            self.append_tokens(&next);
        } else {
            self.buffer = next;
        }
    }

    fn handle_paste(&mut self, pasted_text: &str) {
        let cleaned = pasted_text.replace(['\r', '\n'], "");
        self.apply_typed(&cleaned);
    }

    /// Enter: commit the trimmed buffer. An all-whitespace buffer is left
    /// untouched (no-op, no callback).
    fn commit_pending(&mut self) {
        if self.buffer.trim().is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.buffer);
        self.append_tokens(&pending);
    }

    /// Backspace: with an empty buffer, drop the last tag; otherwise delete
    /// one grapheme cluster from the buffer.
    fn backspace(&mut self) {
        if self.buffer.is_empty() {
            if self.tags.pop().is_some() {
                self.notify_change();
            }
            return;
        }
        let last_len = grapheme_segments(&self.buffer)
            .next_back()
            .map(|segment| segment.len())
            .unwrap_or(1);
        let cut = self.buffer.len() - last_len;
        self.buffer.truncate(cut);
    }
}

impl Component for TagField {
    fn render(&mut self, width: usize) -> Vec<String> {
        let width = width.max(1);
        self.last_cursor_pos = None;

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0usize;

        for tag in &self.tags {
            let label = format!(" {tag} ");
            // label + dismiss glyph + separator space
            let segment_width = visible_width(&label) + 2;
            if current_width > 0 && current_width + segment_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            current.push_str(&(self.theme.pill)(&label));
            current.push_str(&(self.theme.dismiss)(DISMISS_GLYPH));
            current.push(' ');
            current_width += segment_width;
        }

        let show_placeholder = self.tags.is_empty() && self.buffer.is_empty();
        let prompt_width = visible_width(PROMPT);

        let mut input_styled = (self.theme.prompt)(PROMPT);
        let mut input_width = prompt_width;
        if show_placeholder {
            if self.focused {
                input_styled.push_str(CURSOR_BLOCK);
                input_width += 1;
            }
            input_styled.push_str(&(self.theme.placeholder)(&self.placeholder));
            input_width += visible_width(&self.placeholder);
        } else {
            input_styled.push_str(&self.buffer);
            input_width += visible_width(&self.buffer);
            if self.focused {
                input_styled.push_str(CURSOR_BLOCK);
                input_width += 1;
            }
        }

        if current_width > 0 && current_width + input_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        let input_col = current_width;
        current.push_str(&input_styled);
        lines.push(current);

        if self.focused {
            let col = if show_placeholder {
                input_col + prompt_width
            } else {
                input_col + prompt_width + visible_width(&self.buffer)
            };
            self.last_cursor_pos = Some(CursorPos {
                row: lines.len() - 1,
                col,
            });
        }

        lines
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Text { text, .. } => self.apply_typed(text),
            InputEvent::Paste { text, .. } => self.handle_paste(text),
            InputEvent::Key { key_id, .. } => match key_id.as_str() {
                "enter" => self.commit_pending(),
                "backspace" => self.backspace(),
                _ => {}
            },
            _ => {}
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.last_cursor_pos
    }

    fn invalidate(&mut self) {
        // No cached state to invalidate.
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for TagField {
    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}
