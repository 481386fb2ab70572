use thiserror::Error;

/// Errors raised by the scrcpy session engine.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Adb(#[from] dab_adb::AdbError),

    #[error(transparent)]
    Codec(#[from] dab_wire::CodecError),

    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),

    /// No scrcpy server jar could be located on the host.
    #[error("scrcpy server jar not found (set SCRCPY_SERVER_PATH)")]
    ServerNotFound,

    /// The dummy byte was not received within the retry budget.
    #[error("dummy byte not received within the retry budget")]
    DummyByteMissing,

    /// The 76-byte device metadata frame was not received in time.
    #[error("device metadata not received within the timeout")]
    MetadataTimeout,

    /// The control socket errored or closed during an active session.
    #[error("control transport broken")]
    TransportBroken,

    /// A clipboard-get reply was not received within the timeout.
    #[error("clipboard reply not received within the timeout")]
    ClipboardTimeout,

    /// No active, ready session exists for this serial.
    #[error("no active scrcpy session for this device")]
    NoActiveSession,
}

pub type SessionResult<T> = Result<T, SessionError>;
