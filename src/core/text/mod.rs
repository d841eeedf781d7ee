//! ANSI-aware text helpers.

pub mod ansi;
pub mod utils;
pub mod width;
