//! Escaping for text injected via `adb shell input text`, used as the
//! ADB-path fallback for `inputText` when no scrcpy session is active.
const SPECIAL: &[char] = &[
    '(', ')', '[', ']', '{', '}', '|', ';', '<', '>', '&', '*', '?', '!', '"', '\'', '`', '\\', '$',
];

/// `input text` splits on whitespace and interprets shell metacharacters,
/// so spaces become the literal `%s` escape and everything else shell-
/// significant is backslash-escaped.
pub fn escape_for_input_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == ' ' {
            out.push_str("%s");
        } else if SPECIAL.contains(&ch) {
            out.push('\\');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_spaces_as_percent_s() {
        assert_eq!(escape_for_input_text("hello world"), "hello%sworld");
    }

    #[test]
    fn backslash_escapes_shell_metacharacters() {
        assert_eq!(escape_for_input_text("a&b"), "a\\&b");
        assert_eq!(escape_for_input_text("(test)"), "\\(test\\)");
        assert_eq!(escape_for_input_text("[a]{b}?!"), "\\[a\\]\\{b\\}\\?\\!");
    }

    #[test]
    fn leaves_plain_alphanumerics_untouched() {
        assert_eq!(escape_for_input_text("abc123"), "abc123");
    }
}
