//! Platform-specific terminal backends.

pub mod process_terminal;
