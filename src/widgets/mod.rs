//! Built-in widgets.

pub mod host_view;
pub mod tag_field;
pub mod text;

pub use host_view::{HostTheme, HostView, HostViewOptions};
pub use tag_field::{TagField, TagFieldOptions, TagFieldTheme, TagsChangedFn};
pub use text::Text;
