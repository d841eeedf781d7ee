//! Inline TUI tag-input widget.
//!
//! The centerpiece is [`TagField`]: a single-line input whose whitespace-delimited
//! words become discrete, removable tags. [`HostView`] composes one `TagField`
//! behind an opaque handle and demonstrates its read-only query surface plus a
//! light/dark display-mode toggle.
//!
//! # Public API Overview
//! - Build widgets and compose them into a runtime via [`TUI`].
//! - Parse/inspect input with [`parse_input_events`] and [`InputEvent`].
//! - Drive a real terminal with [`ProcessTerminal`] or any [`Terminal`] impl.
//! - Use the ANSI-aware text helpers for width, truncation, and wrapping.
//!
//! # Runtime Alias
//! [`TUI`] is a type alias for `runtime::tui::TuiRuntime<T>`.

pub mod config;
pub mod logging;
pub mod theme;

pub mod core;
pub mod platform;
pub mod runtime;
pub mod widgets;

/// Built-in widgets.
pub use crate::widgets::{
    HostTheme, HostView, HostViewOptions, TagField, TagFieldOptions, TagFieldTheme, Text,
};

/// Widget traits and cursor metadata.
pub use crate::core::component::{Component, Focusable};
pub use crate::core::cursor::CursorPos;

/// Keyboard input parsing.
pub use crate::core::input::{parse_key, parse_text};
pub use crate::core::input_event::{parse_input_events, InputEvent};

/// Terminal interfaces and process-backed implementation.
pub use crate::core::terminal::{Terminal, TerminalGuard};
pub use crate::platform::process_terminal::ProcessTerminal;

/// Runtime types.
pub use crate::runtime::tui::{ComponentRc, RenderHandle, TuiRuntime};

/// Display-mode detection and ANSI style helpers.
pub use crate::theme::{detect_ambient_mode, DisplayMode};

/// ANSI-aware width helper.
pub use crate::core::text::width::visible_width;
/// ANSI-aware truncation helper.
pub use crate::core::text::utils::truncate_to_width;

/// Alias for the main runtime type.
pub type TUI<T> = crate::runtime::tui::TuiRuntime<T>;

/// Returns whether a component exposes focus behavior via [`Focusable`].
pub fn is_focusable(component: &mut dyn Component) -> bool {
    component.as_focusable().is_some()
}
