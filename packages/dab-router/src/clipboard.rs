//! Parses the text out of `service call clipboard 2`/`cmd clipboard get`
//! shell output, which wraps the actual content in layers of framework
//! debug noise depending on Android version and clipboard provider.
use regex::Regex;
use std::sync::LazyLock;

static RESULT_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)result=0[^)]*\)\s*(.+)").unwrap());
static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("\"([^\"]*)\"").unwrap());
static HEX_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("0x[0-9a-fA-F]+").unwrap());

/// Extract clipboard text from raw ADB shell output, trying each strategy
/// in order until one matches: a `result=0(...)` wrapper, the first
/// double-quoted substring, or a run of hex digits decoded as UTF-8 bytes.
/// Whatever is extracted then has any `\ddd` octal escapes decoded.
pub fn parse_clipboard_dump(output: &str) -> String {
    if let Some(caps) = RESULT_LINE_RE.captures(output) {
        return decode_octal_escapes(caps[1].trim());
    }
    if let Some(caps) = QUOTED_RE.captures(output) {
        return decode_octal_escapes(&caps[1]);
    }
    if let Some(m) = HEX_RUN_RE.find(output) {
        if let Some(bytes) = decode_hex(&m.as_str()[2..]) {
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    String::new()
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

fn decode_octal_escapes(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && i + 4 <= bytes.len()
            && bytes[i + 1..i + 4].iter().all(|b| (b'0'..=b'7').contains(b))
        {
            let octal = std::str::from_utf8(&bytes[i + 1..i + 4]).unwrap();
            out.push(u8::from_str_radix(octal, 8).unwrap());
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_result_wrapper() {
        let output = "Result: Parcel(Result: 0, result=0) hello world\n";
        assert_eq!(parse_clipboard_dump(output), "hello world");
    }

    #[test]
    fn parses_first_quoted_substring_when_no_result_wrapper() {
        let output = "clip label=\"label\" text=\"clipped text\"";
        assert_eq!(parse_clipboard_dump(output), "label");
    }

    #[test]
    fn parses_hex_run_as_utf8() {
        let output = "raw(0x68656c6c6f)";
        assert_eq!(parse_clipboard_dump(output), "hello");
    }

    #[test]
    fn decodes_octal_escapes_after_extraction() {
        let output = "result=0) \\150\\145\\154\\154\\157";
        assert_eq!(parse_clipboard_dump(output), "hello");
    }

    #[test]
    fn returns_empty_when_nothing_matches() {
        assert_eq!(parse_clipboard_dump("no content here"), "");
    }
}
