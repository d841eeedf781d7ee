//! Display modes and ANSI style helpers.
//!
//! Widgets style themselves through caller-supplied closures; the helpers here
//! are the building blocks the built-in light/dark themes are made of.

use std::env;

/// Global presentation mode toggled by the host view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Light,
    Dark,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }
}

/// Ambient display-mode query, injectable so the host view stays free of
/// platform environment lookups.
pub type AmbientModeFn = Box<dyn Fn() -> Option<DisplayMode>>;

/// Best-effort ambient detection from `COLORFGBG` (set by several terminal
/// emulators as `<fg>;<bg>`). Returns `None` when the variable is missing or
/// unparsable; callers default to light.
pub fn detect_ambient_mode() -> Option<DisplayMode> {
    let value = env::var("COLORFGBG").ok()?;
    let background = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    match background {
        0..=6 | 8 => Some(DisplayMode::Dark),
        _ => Some(DisplayMode::Light),
    }
}

fn ansi_wrap(text: &str, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{text}{suffix}")
}

pub fn bold(text: &str) -> String {
    ansi_wrap(text, "\x1b[1m", "\x1b[22m")
}

pub fn dim(text: &str) -> String {
    ansi_wrap(text, "\x1b[2m", "\x1b[22m")
}

pub fn italic(text: &str) -> String {
    ansi_wrap(text, "\x1b[3m", "\x1b[23m")
}

pub fn inverse(text: &str) -> String {
    ansi_wrap(text, "\x1b[7m", "\x1b[27m")
}

/// Wrap `text` in `ESC[{codes}m .. ESC[0m` for arbitrary SGR parameter lists.
pub fn paint(codes: &str, text: &str) -> String {
    format!("\x1b[{codes}m{text}\x1b[0m")
}
