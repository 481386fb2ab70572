//! Wire constants for the scrcpy control protocol.
//!
//! These values must match the device-side server exactly: it does strict
//! equality checks against the version string and message type bytes, and a
//! mismatch causes a silent exit or dropped message rather than a decodable
//! error.

/// Host → device control message type ids (byte 0 of every message).
pub mod msg {
    pub const INJECT_KEYCODE: u8 = 0;
    pub const INJECT_TEXT: u8 = 1;
    pub const INJECT_TOUCH: u8 = 2;
    pub const INJECT_SCROLL: u8 = 3;
    pub const EXPAND_NOTIFICATIONS: u8 = 5;
    pub const EXPAND_SETTINGS: u8 = 6;
    pub const COLLAPSE_PANELS: u8 = 7;
    pub const GET_CLIPBOARD: u8 = 8;
    pub const SET_CLIPBOARD: u8 = 9;
    pub const SET_DISPLAY_POWER: u8 = 10;
    pub const ROTATE_DEVICE: u8 = 11;
    pub const START_APP: u8 = 16;
}

/// Device → host message type ids.
pub mod device_msg {
    /// The only variant this bridge consumes.
    pub const CLIPBOARD: u8 = 0;
}

/// `AMOTION_EVENT_ACTION_*` codes used by `inject touch`.
pub mod motion_action {
    pub const DOWN: u8 = 0;
    pub const UP: u8 = 1;
    pub const MOVE: u8 = 2;
}

/// `AKEY_EVENT_ACTION_*` codes used by `inject keycode`.
pub mod key_action {
    pub const DOWN: u8 = 0;
    pub const UP: u8 = 1;
}

/// `copyKey` values for `get clipboard`: none, copy, or cut.
pub mod copy_key {
    pub const NONE: u8 = 0;
    pub const COPY: u8 = 1;
    pub const CUT: u8 = 2;
}

/// Maximum UTF-8 byte length of an `inject text` payload.
pub const MAX_TEXT_BYTES: usize = 300;

/// Maximum UTF-8 byte length of a `start app` package name.
pub const MAX_PACKAGE_NAME_BYTES: usize = 255;

/// Maximum accepted size of a device→host clipboard reply payload.
pub const MAX_CLIPBOARD_BYTES: usize = 1 << 20;

/// Size in bytes of the device-metadata frame sent on the video socket.
pub const METADATA_FRAME_LEN: usize = 76;

/// Size in bytes of the null-padded device-name field within the metadata frame.
pub const DEVICE_NAME_LEN: usize = 64;

/// Default scrcpy control-protocol version, also the server's first positional argument.
pub const DEFAULT_VERSION: &str = "3.3.4";
