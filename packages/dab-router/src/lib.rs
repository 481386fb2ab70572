//! Decides, per operation, whether to speak the scrcpy control protocol or
//! fall back to an ADB shell command, and composes ADB output with parsers
//! for the file-browsing and UI-automation tools.
pub mod clipboard;
pub mod composite;
pub mod error;
pub mod keycodes;
pub mod router;
pub mod sdk;
pub mod shell_escape;

pub use composite::{dump_ui, find_element, list_dir, tap_element};
pub use error::{RouterError, RouterResult};
pub use router::Router;
