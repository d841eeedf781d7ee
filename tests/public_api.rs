#![allow(unused_imports)]

use tagfield_tui::{
    detect_ambient_mode, is_focusable, parse_input_events, parse_key, parse_text,
    truncate_to_width, visible_width, Component, ComponentRc, CursorPos, DisplayMode, Focusable,
    HostTheme, HostView, HostViewOptions, InputEvent, ProcessTerminal, RenderHandle, TagField,
    TagFieldOptions, TagFieldTheme, Terminal, TerminalGuard, Text, TuiRuntime, TUI,
};

#[test]
fn public_api_exports_compile() {}
