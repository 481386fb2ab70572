use thiserror::Error;

/// Errors raised by the ADB process adapter.
#[derive(Error, Debug)]
pub enum AdbError {
    /// Spawning the `adb` process itself failed (binary missing, etc).
    #[error("failed to spawn adb: {0}")]
    Io(#[from] std::io::Error),

    /// `adb` exited non-zero.
    #[error("adb invocation failed (exit {exit_code:?}): {stderr}")]
    AdbInvocationFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The subprocess did not finish within its time budget.
    #[error("adb invocation timed out")]
    AdbTimeout,

    /// No device was attached and none was specified.
    #[error("no device attached")]
    NoDeviceAttached,

    /// More than one device is attached and the caller specified none.
    #[error("ambiguous device: {0} devices attached, specify a serial")]
    AmbiguousDevice(usize),

    /// A package name failed the `com.example.app`-shaped grammar check.
    #[error("invalid package name: {0}")]
    InvalidPackageName(String),
}

pub type AdbResult<T> = Result<T, AdbError>;
