//! Pure encoders for host→device scrcpy control messages.
//!
//! No I/O here; each function returns the exact byte layout from the
//! protocol table and nothing else reaches into a socket.
use crate::{constants::*, error::CodecError};

/// Clamp a pressure value to `[0, 1]` and scale it to the 16-bit fixed-point
/// representation where `1.0` maps to `0xFFFF`.
fn encode_pressure(pressure: f32) -> u16 {
    let clamped = pressure.clamp(0.0, 1.0);
    (clamped * 0xFFFF as f32).round() as u16
}

/// Clamp a scroll axis value to `[-1, 1]` and scale it to the 16-bit signed
/// fixed-point representation where `-1.0` maps to `-0x8000` and `1.0` maps
/// to `0x7FFF`.
fn encode_scroll_axis(value: f32) -> i16 {
    let clamped = value.clamp(-1.0, 1.0);
    let scale = if clamped >= 0.0 { 0x7FFF_i32 } else { 0x8000_i32 };
    (clamped * scale as f32).round() as i16
}

/// `[0][action][keycode:i32][repeat:i32][meta:i32]` — 14 bytes.
pub fn inject_keycode(action: u8, keycode: i32, repeat: i32, meta_state: i32) -> [u8; 14] {
    let mut buf = [0u8; 14];
    buf[0] = msg::INJECT_KEYCODE;
    buf[1] = action;
    buf[2..6].copy_from_slice(&keycode.to_be_bytes());
    buf[6..10].copy_from_slice(&repeat.to_be_bytes());
    buf[10..14].copy_from_slice(&meta_state.to_be_bytes());
    buf
}

/// `[1][len:u32][utf8 bytes]` — 5+N bytes, N ≤ 300.
pub fn inject_text(text: &str) -> Result<Vec<u8>, CodecError> {
    let bytes = text.as_bytes();
    if bytes.len() > MAX_TEXT_BYTES {
        return Err(CodecError::TextTooLong(bytes.len()));
    }
    let mut buf = Vec::with_capacity(5 + bytes.len());
    buf.push(msg::INJECT_TEXT);
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    buf.extend_from_slice(bytes);
    Ok(buf)
}

/// `[2][action][pointerId:u64][x:i32][y:i32][w:u16][h:u16][pressure:u16][actionBtn:u32][btns:u32]` — 32 bytes.
#[allow(clippy::too_many_arguments)]
pub fn inject_touch(
    action: u8,
    pointer_id: u64,
    x: i32,
    y: i32,
    w: u16,
    h: u16,
    pressure: f32,
    action_button: u32,
    buttons: u32,
) -> [u8; 32] {
    let mut buf = [0u8; 32];
    buf[0] = msg::INJECT_TOUCH;
    buf[1] = action;
    buf[2..10].copy_from_slice(&pointer_id.to_be_bytes());
    buf[10..14].copy_from_slice(&x.to_be_bytes());
    buf[14..18].copy_from_slice(&y.to_be_bytes());
    buf[18..20].copy_from_slice(&w.to_be_bytes());
    buf[20..22].copy_from_slice(&h.to_be_bytes());
    buf[22..24].copy_from_slice(&encode_pressure(pressure).to_be_bytes());
    buf[24..28].copy_from_slice(&action_button.to_be_bytes());
    buf[28..32].copy_from_slice(&buttons.to_be_bytes());
    buf
}

/// `[3][x:i32][y:i32][w:u16][h:u16][hScroll:i16][vScroll:i16][btns:u32]` — 21 bytes.
#[allow(clippy::too_many_arguments)]
pub fn inject_scroll(
    x: i32,
    y: i32,
    w: u16,
    h: u16,
    h_scroll: f32,
    v_scroll: f32,
    buttons: u32,
) -> [u8; 21] {
    let mut buf = [0u8; 21];
    buf[0] = msg::INJECT_SCROLL;
    buf[1..5].copy_from_slice(&x.to_be_bytes());
    buf[5..9].copy_from_slice(&y.to_be_bytes());
    buf[9..11].copy_from_slice(&w.to_be_bytes());
    buf[11..13].copy_from_slice(&h.to_be_bytes());
    buf[13..15].copy_from_slice(&encode_scroll_axis(h_scroll).to_be_bytes());
    buf[15..17].copy_from_slice(&encode_scroll_axis(v_scroll).to_be_bytes());
    buf[17..21].copy_from_slice(&buttons.to_be_bytes());
    buf
}

/// `[10][on]` — 2 bytes.
pub fn set_display_power(on: bool) -> [u8; 2] {
    [msg::SET_DISPLAY_POWER, on as u8]
}

/// `[5]` — 1 byte.
pub fn expand_notifications() -> [u8; 1] {
    [msg::EXPAND_NOTIFICATIONS]
}

/// `[6]` — 1 byte.
pub fn expand_settings() -> [u8; 1] {
    [msg::EXPAND_SETTINGS]
}

/// `[7]` — 1 byte.
pub fn collapse_panels() -> [u8; 1] {
    [msg::COLLAPSE_PANELS]
}

/// `[11]` — 1 byte.
pub fn rotate_device() -> [u8; 1] {
    [msg::ROTATE_DEVICE]
}

/// `[8][copyKey]` — 2 bytes.
pub fn get_clipboard(copy_key: u8) -> [u8; 2] {
    [msg::GET_CLIPBOARD, copy_key]
}

/// `[9][seq:u64][paste][len:u32][utf8 bytes]` — 14+N bytes.
pub fn set_clipboard(sequence: u64, paste: bool, text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    let mut buf = Vec::with_capacity(14 + bytes.len());
    buf.push(msg::SET_CLIPBOARD);
    buf.extend_from_slice(&sequence.to_be_bytes());
    buf.push(paste as u8);
    buf.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    buf.extend_from_slice(bytes);
    buf
}

/// `[16][len:u8][utf8 bytes]` — 2+N bytes, N ≤ 255.
pub fn start_app(package_name: &str) -> Result<Vec<u8>, CodecError> {
    let bytes = package_name.as_bytes();
    if bytes.len() > MAX_PACKAGE_NAME_BYTES {
        return Err(CodecError::PackageNameTooLong(bytes.len()));
    }
    let mut buf = Vec::with_capacity(2 + bytes.len());
    buf.push(msg::START_APP);
    buf.push(bytes.len() as u8);
    buf.extend_from_slice(bytes);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keycode_exact_bytes() {
        let buf = inject_keycode(key_action::DOWN, 66, 0, 0);
        assert_eq!(buf.len(), 14);
        assert_eq!(
            buf,
            [0, 0, 0, 0, 0, 0x42, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn text_ascii_exact_bytes() {
        let buf = inject_text("AB").unwrap();
        assert_eq!(buf, vec![1, 0, 0, 0, 2, b'A', b'B']);
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn text_multibyte_counts_utf8_len() {
        let buf = inject_text("\u{e9}").unwrap(); // "é" -> 2 UTF-8 bytes
        assert_eq!(buf.len(), 7);
        assert_eq!(&buf[0..5], &[1, 0, 0, 0, 2]);
    }

    #[test]
    fn text_size_bounds() {
        let ok = "a".repeat(300);
        let buf = inject_text(&ok).unwrap();
        assert_eq!(buf.len(), 305);

        let too_long = "a".repeat(301);
        assert_eq!(
            inject_text(&too_long),
            Err(CodecError::TextTooLong(301))
        );
    }

    #[test]
    fn touch_exact_bytes_and_pressure_clamp() {
        let buf = inject_touch(
            motion_action::DOWN,
            0xFFFF_FFFF_FFFF_FFFF,
            540,
            1200,
            1080,
            2400,
            1.0,
            0,
            0,
        );
        assert_eq!(buf.len(), 32);
        assert_eq!(buf[0], 2);
        assert_eq!(&buf[22..24], &[0xFF, 0xFF]);

        let zero_pressure = inject_touch(
            motion_action::DOWN,
            0,
            0,
            0,
            0,
            0,
            0.0,
            0,
            0,
        );
        assert_eq!(&zero_pressure[22..24], &[0x00, 0x00]);

        let clamped = inject_touch(motion_action::DOWN, 0, 0, 0, 0, 0, 2.0, 0, 0);
        assert_eq!(&clamped[22..24], &[0xFF, 0xFF]);
    }

    #[test]
    fn scroll_exact_bytes() {
        let positive = inject_scroll(0, 0, 0, 0, 0.0, 16.0, 0);
        assert_eq!(&positive[15..17], &[0x7F, 0xFF]);

        let negative = inject_scroll(0, 0, 0, 0, 0.0, -16.0, 0);
        assert_eq!(&negative[15..17], &[0x80, 0x00]);
    }

    #[test]
    fn display_power_exact_bytes() {
        assert_eq!(set_display_power(true), [0x0A, 0x01]);
        assert_eq!(set_display_power(false), [0x0A, 0x00]);
    }

    #[test]
    fn set_clipboard_exact_bytes() {
        let buf = set_clipboard(42, true, "");
        assert_eq!(buf.len(), 14);
        assert_eq!(&buf[1..9], &42u64.to_be_bytes());
        assert_eq!(buf[9], 1);
        assert_eq!(&buf[10..14], &0u32.to_be_bytes());
    }

    #[test]
    fn start_app_exact_bytes() {
        let buf = start_app("com.example.app").unwrap();
        assert_eq!(buf[0], 16);
        assert_eq!(buf[1], 0x0F);
        assert_eq!(&buf[2..], b"com.example.app");
    }

    #[test]
    fn start_app_size_bounds() {
        let ok = "a".repeat(255);
        assert!(start_app(&ok).is_ok());

        let too_long = "a".repeat(256);
        assert_eq!(
            start_app(&too_long),
            Err(CodecError::PackageNameTooLong(256))
        );
    }
}
