use thiserror::Error;

/// Errors raised while routing a high-level operation to either the
/// scrcpy control socket or an ADB shell fallback.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error(transparent)]
    Adb(#[from] dab_adb::AdbError),

    #[error(transparent)]
    Session(#[from] dab_session::SessionError),

    #[error(transparent)]
    Codec(#[from] dab_wire::CodecError),

    #[error("unknown key name: {0}")]
    UnknownKeyName(String),

    #[error("no UI element matched the given criteria")]
    ElementNotFound,

    #[error("{0} UI elements matched the given criteria, expected exactly one")]
    AmbiguousMatch(usize),
}

pub type RouterResult<T> = Result<T, RouterError>;
