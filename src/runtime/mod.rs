//! Event loop and inline renderer.

pub mod tui;
