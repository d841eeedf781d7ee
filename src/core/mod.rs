//! Widget traits, input parsing, and text primitives.

pub mod component;
pub mod cursor;
pub mod input;
pub mod input_event;
pub mod terminal;
pub mod text;
