//! Host view composing one tag field.
//!
//! The host never mutates the field's tag list directly: it holds an opaque
//! `Rc<RefCell<TagField>>` handle and only invokes the read-only `tags()`
//! query, caching the returned snapshot for display. It also owns the global
//! light/dark display mode and restyles itself and the field on toggle.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::EnvConfig;
use crate::core::component::{Component, Focusable};
use crate::core::cursor::CursorPos;
use crate::core::input_event::InputEvent;
use crate::core::text::utils::truncate_to_width;
use crate::theme::{bold, detect_ambient_mode, dim, paint, AmbientModeFn, DisplayMode};
use crate::widgets::tag_field::{TagField, TagFieldTheme};
use crate::widgets::text::Text;

const HEADING: &str = "Tag Input";
const HELP_TEXT: &str = "Type words and press Space or Enter to create tags. \
Backspace on an empty input removes the last tag.";
const PANEL_TITLE: &str = "console output";

/// Styling hooks for the host chrome.
pub struct HostTheme {
    pub heading: Box<dyn Fn(&str) -> String>,
    pub hint: Box<dyn Fn(&str) -> String>,
    pub panel_title: Box<dyn Fn(&str) -> String>,
    pub panel_text: Box<dyn Fn(&str) -> String>,
}

impl HostTheme {
    pub fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Light => Self {
                heading: Box::new(bold),
                hint: Box::new(dim),
                panel_title: Box::new(|text| paint("2;36", text)),
                panel_text: Box::new(|text| paint("32", text)),
            },
            DisplayMode::Dark => Self {
                heading: Box::new(|text| paint("1;97", text)),
                hint: Box::new(dim),
                panel_title: Box::new(|text| paint("2;94", text)),
                panel_text: Box::new(|text| paint("92", text)),
            },
        }
    }

    /// Identity styling for monochrome terminals and tests.
    pub fn plain() -> Self {
        Self {
            heading: Box::new(str::to_string),
            hint: Box::new(str::to_string),
            panel_title: Box::new(str::to_string),
            panel_text: Box::new(str::to_string),
        }
    }
}

/// Construction-time configuration for the host view.
///
/// `ambient_mode` is the injectable platform display-mode query; when `None`
/// the `COLORFGBG` detector is used. `config` defaults to the process
/// environment and can force a mode over the ambient signal.
#[derive(Default)]
pub struct HostViewOptions {
    pub ambient_mode: Option<AmbientModeFn>,
    pub config: Option<EnvConfig>,
}

pub struct HostView {
    field: Rc<RefCell<TagField>>,
    retrieved: Option<Vec<String>>,
    mode: DisplayMode,
    theme: HostTheme,
    help: Text,
    last_cursor_pos: Option<CursorPos>,
}

impl HostView {
    pub fn new(field: Rc<RefCell<TagField>>, options: HostViewOptions) -> Self {
        let config = options.config.unwrap_or_else(EnvConfig::from_env);
        let ambient = options
            .ambient_mode
            .unwrap_or_else(|| Box::new(detect_ambient_mode));
        let mode = config
            .force_mode
            .or_else(|| ambient())
            .unwrap_or(DisplayMode::Light);

        let mut host = Self {
            field,
            retrieved: None,
            mode,
            theme: HostTheme::for_mode(mode),
            help: Text::with_padding(HELP_TEXT, 0, 1),
            last_cursor_pos: None,
        };
        host.apply_mode();
        host
    }

    /// Query the field through its handle and cache the snapshot for display.
    pub fn retrieve_tags(&mut self) {
        self.retrieved = Some(self.field.borrow().tags());
    }

    /// Empty the display cache. The field's own tags are untouched.
    pub fn clear_output(&mut self) {
        self.retrieved = None;
    }

    /// Flip the global display mode and restyle host and field.
    pub fn toggle_display_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.apply_mode();
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// The last retrieved snapshot, if any.
    pub fn retrieved(&self) -> Option<&[String]> {
        self.retrieved.as_deref()
    }

    fn apply_mode(&mut self) {
        self.theme = HostTheme::for_mode(self.mode);
        self.field
            .borrow_mut()
            .set_theme(TagFieldTheme::for_mode(self.mode));
    }

    fn mode_label(&self) -> &'static str {
        match self.mode {
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
        }
    }

    fn format_tag_list(tags: &[String]) -> String {
        let quoted: Vec<String> = tags.iter().map(|tag| format!("\"{tag}\"")).collect();
        format!("[{}]", quoted.join(", "))
    }
}

impl Component for HostView {
    fn render(&mut self, width: usize) -> Vec<String> {
        self.last_cursor_pos = None;

        let mut lines = vec![(self.theme.heading)(HEADING)];
        lines.extend(self.help.render(width));

        let field_row_offset = lines.len();
        let (field_lines, field_cursor) = {
            let mut field = self.field.borrow_mut();
            let rendered = field.render(width);
            (rendered, field.cursor_pos())
        };
        lines.extend(field_lines);

        if let Some(cursor) = field_cursor {
            self.last_cursor_pos = Some(CursorPos {
                row: field_row_offset + cursor.row,
                col: cursor.col,
            });
        }

        let hint = format!(
            "ctrl+g get tags · ctrl+l clear output · ctrl+d mode: {} · ctrl+c quit",
            self.mode_label()
        );
        lines.push((self.theme.hint)(&truncate_to_width(&hint, width, "…", false)));

        if let Some(tags) = self.retrieved.as_ref() {
            lines.push(String::new());
            lines.push((self.theme.panel_title)(PANEL_TITLE));
            let listing = Self::format_tag_list(tags);
            lines.push((self.theme.panel_text)(&truncate_to_width(
                &listing, width, "…", false,
            )));
        }

        lines
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::Key { key_id, .. } = event {
            match key_id.as_str() {
                "ctrl+g" => {
                    self.retrieve_tags();
                    return;
                }
                "ctrl+l" => {
                    self.clear_output();
                    return;
                }
                "ctrl+d" => {
                    self.toggle_display_mode();
                    return;
                }
                _ => {}
            }
        }
        self.field.borrow_mut().handle_event(event);
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.last_cursor_pos
    }

    fn invalidate(&mut self) {
        self.help.invalidate();
        self.field.borrow_mut().invalidate();
    }

    fn as_focusable(&mut self) -> Option<&mut dyn Focusable> {
        Some(self)
    }
}

impl Focusable for HostView {
    fn set_focused(&mut self, focused: bool) {
        self.field.borrow_mut().set_focused(focused);
    }

    fn is_focused(&self) -> bool {
        self.field.borrow().is_focused()
    }
}

#[cfg(test)]
mod tests {
    use super::{HostView, HostViewOptions};
    use crate::config::EnvConfig;
    use crate::core::component::Component;
    use crate::core::input_event::parse_input_events;
    use crate::theme::DisplayMode;
    use crate::widgets::tag_field::{TagField, TagFieldOptions, TagFieldTheme};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fixed_config() -> EnvConfig {
        EnvConfig {
            force_mode: None,
            write_log: None,
            debug: false,
        }
    }

    fn host_with_tags(tags: &[&str]) -> (HostView, Rc<RefCell<TagField>>) {
        let field = Rc::new(RefCell::new(TagField::new(
            TagFieldTheme::plain(),
            TagFieldOptions {
                initial_tags: tags.iter().map(|tag| tag.to_string()).collect(),
                placeholder: "Type something...".to_string(),
            },
        )));
        let host = HostView::new(
            Rc::clone(&field),
            HostViewOptions {
                ambient_mode: Some(Box::new(|| None)),
                config: Some(fixed_config()),
            },
        );
        (host, field)
    }

    fn send(host: &mut HostView, data: &str) {
        for event in parse_input_events(data) {
            host.handle_event(&event);
        }
    }

    #[test]
    fn defaults_to_light_when_ambient_unavailable() {
        let (host, _field) = host_with_tags(&[]);
        assert_eq!(host.display_mode(), DisplayMode::Light);
    }

    #[test]
    fn ambient_query_is_injectable() {
        let field = Rc::new(RefCell::new(TagField::new(
            TagFieldTheme::plain(),
            TagFieldOptions::default(),
        )));
        let host = HostView::new(
            field,
            HostViewOptions {
                ambient_mode: Some(Box::new(|| Some(DisplayMode::Dark))),
                config: Some(fixed_config()),
            },
        );
        assert_eq!(host.display_mode(), DisplayMode::Dark);
    }

    #[test]
    fn forced_mode_overrides_ambient() {
        let field = Rc::new(RefCell::new(TagField::new(
            TagFieldTheme::plain(),
            TagFieldOptions::default(),
        )));
        let mut config = fixed_config();
        config.force_mode = Some(DisplayMode::Dark);
        let host = HostView::new(
            field,
            HostViewOptions {
                ambient_mode: Some(Box::new(|| Some(DisplayMode::Light))),
                config: Some(config),
            },
        );
        assert_eq!(host.display_mode(), DisplayMode::Dark);
    }

    #[test]
    fn retrieve_caches_snapshot_and_clear_leaves_field_alone() {
        let (mut host, field) = host_with_tags(&["a", "b"]);
        assert!(host.retrieved().is_none());

        host.retrieve_tags();
        assert_eq!(host.retrieved(), Some(&["a".to_string(), "b".to_string()][..]));

        // Later field mutation does not rewrite the cached snapshot.
        field.borrow_mut().remove_tag_at(0);
        assert_eq!(host.retrieved(), Some(&["a".to_string(), "b".to_string()][..]));

        host.clear_output();
        assert!(host.retrieved().is_none());
        assert_eq!(field.borrow().tags(), vec!["b"]);
    }

    #[test]
    fn key_bindings_drive_actions_and_forward_the_rest() {
        let (mut host, field) = host_with_tags(&[]);

        send(&mut host, "tui ");
        assert_eq!(field.borrow().tags(), vec!["tui"]);

        send(&mut host, "\x07"); // ctrl+g
        assert_eq!(host.retrieved(), Some(&["tui".to_string()][..]));

        send(&mut host, "\x0c"); // ctrl+l
        assert!(host.retrieved().is_none());

        send(&mut host, "\x04"); // ctrl+d
        assert_eq!(host.display_mode(), DisplayMode::Dark);
        send(&mut host, "\x04");
        assert_eq!(host.display_mode(), DisplayMode::Light);
    }

    #[test]
    fn render_shows_output_panel_only_after_retrieve() {
        let (mut host, _field) = host_with_tags(&["x"]);
        let before = host.render(60);
        assert!(!before.iter().any(|line| line.contains("console output")));

        host.retrieve_tags();
        let after = host.render(60);
        assert!(after.iter().any(|line| line.contains("console output")));
        assert!(after.iter().any(|line| line.contains("[\"x\"]")));
    }

    #[test]
    fn hint_reflects_current_mode() {
        let (mut host, _field) = host_with_tags(&[]);
        let light = host.render(80);
        assert!(light.iter().any(|line| line.contains("mode: light")));

        host.toggle_display_mode();
        let dark = host.render(80);
        assert!(dark.iter().any(|line| line.contains("mode: dark")));
    }
}
