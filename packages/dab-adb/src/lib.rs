//! ADB process adapter: the only place this bridge spawns the `adb` binary
//! for one-shot invocations (the scrcpy server's long-lived child is owned
//! by `dab-session`).
pub mod error;
pub mod file_transfer;
pub mod package;
pub mod process;

pub use error::{AdbError, AdbResult};
pub use process::{exec_adb, exec_adb_shell, get_device_property, resolve_serial, AdbOutput};
