//! Names accepted by the `keyEvent` tool, mapped to Android `KeyEvent`
//! keycode values.
pub fn lookup_keycode(name: &str) -> Option<i32> {
    let code = match name.to_ascii_uppercase().as_str() {
        "HOME" => 3,
        "BACK" => 4,
        "CALL" => 5,
        "ENDCALL" => 6,
        "VOLUME_UP" => 24,
        "VOLUME_DOWN" => 25,
        "POWER" => 26,
        "CAMERA" => 27,
        "DPAD_UP" => 19,
        "DPAD_DOWN" => 20,
        "DPAD_LEFT" => 21,
        "DPAD_RIGHT" => 22,
        "DPAD_CENTER" => 23,
        "ENTER" => 66,
        "DEL" | "BACKSPACE" => 67,
        "TAB" => 61,
        "MENU" => 82,
        "NOTIFICATION" => 83,
        "SEARCH" => 84,
        "MEDIA_PLAY_PAUSE" => 85,
        "APP_SWITCH" => 187,
        "SLEEP" => 223,
        "WAKEUP" => 224,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_common_keys_case_insensitively() {
        assert_eq!(lookup_keycode("home"), Some(3));
        assert_eq!(lookup_keycode("BACK"), Some(4));
        assert_eq!(lookup_keycode("App_Switch"), Some(187));
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(lookup_keycode("FROBNICATE"), None);
    }
}
