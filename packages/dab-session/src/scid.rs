//! Session-connection-id generation.
use rand::Rng;

/// Generate a uniform 31-bit random session-connection-id.
pub fn generate_scid() -> u32 {
    rand::rng().random_range(0..=0x7FFF_FFFF_u32)
}

/// Render a scid as the lowercase 8-hex-digit string used both as the
/// abstract socket name suffix and the server's `scid=` argument.
pub fn scid_hex(scid: u32) -> String {
    format!("{scid:08x}")
}

/// `scrcpy_<scid>` — the abstract socket name the server listens on.
pub fn abstract_socket_name(scid: u32) -> String {
    format!("scrcpy_{}", scid_hex(scid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scid_renders_as_zero_padded_lowercase_hex() {
        assert_eq!(scid_hex(0), "00000000");
        assert_eq!(scid_hex(0xabcdef), "00abcdef");
    }

    #[test]
    fn abstract_socket_name_has_expected_shape() {
        assert_eq!(abstract_socket_name(0x1234), "scrcpy_00001234");
    }

    #[test]
    fn generated_scid_is_31_bit() {
        for _ in 0..100 {
            assert!(generate_scid() <= 0x7FFF_FFFF);
        }
    }
}
