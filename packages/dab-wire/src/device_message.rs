//! Decoding for the single device→host message this bridge consumes.
use crate::{constants::MAX_CLIPBOARD_BYTES, error::CodecError};

/// Validate a clipboard reply's declared payload length against the
/// 1 MiB cap before the caller reads that many bytes off the socket.
pub fn validate_clipboard_payload_len(len: u32) -> Result<(), CodecError> {
    let len = len as usize;
    if len > MAX_CLIPBOARD_BYTES {
        return Err(CodecError::OversizeClipboardReply(len));
    }
    Ok(())
}

/// Decode a clipboard reply payload (already read off the wire) to text.
pub fn decode_clipboard_payload(payload: &[u8]) -> String {
    String::from_utf8_lossy(payload).into_owned()
}
