//! Cursor position metadata.

/// Cursor position relative to a component's rendered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub row: usize,
    pub col: usize,
}
