use thiserror::Error;

/// Errors raised by pure codec functions: size-bound violations only, since
/// encoding itself cannot fail once a length check passes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("inject text payload of {0} bytes exceeds the {max} byte limit", max = crate::constants::MAX_TEXT_BYTES)]
    TextTooLong(usize),

    #[error("package name of {0} bytes exceeds the {max} byte limit", max = crate::constants::MAX_PACKAGE_NAME_BYTES)]
    PackageNameTooLong(usize),

    #[error("clipboard reply of {0} bytes exceeds the {max} byte limit", max = crate::constants::MAX_CLIPBOARD_BYTES)]
    OversizeClipboardReply(usize),
}
