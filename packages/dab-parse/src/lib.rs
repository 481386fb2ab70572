//! Textual parsers turning device-side CLI output into structured data.
pub mod long_listing;
pub mod ui_dump;

pub use long_listing::{parse_long_listing, FileEntry};
pub use ui_dump::{find_elements, parse_ui_dump, FindCriteria, UiNode};
