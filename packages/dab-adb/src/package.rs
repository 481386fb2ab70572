//! Android package-name validation.
//!
//! Every package name reaches a shell (`pm install`, `monkey -p`, `am
//! broadcast`) sooner or later, so this grammar check is a gate against the
//! string accidentally carrying shell metacharacters, not just a cosmetic
//! format check.
use crate::error::{AdbError, AdbResult};

/// `com.example.app`-shaped: at least two dot-separated segments, each
/// starting with a letter or underscore and containing only letters,
/// digits, and underscores.
pub fn validate_package_name(name: &str) -> AdbResult<()> {
    let segments: Vec<&str> = name.split('.').collect();
    let valid = segments.len() >= 2
        && segments.iter().all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                }
                _ => false,
            }
        });

    if valid {
        Ok(())
    } else {
        Err(AdbError::InvalidPackageName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_name() {
        assert!(validate_package_name("com.example.app").is_ok());
    }

    #[test]
    fn rejects_single_segment() {
        assert!(validate_package_name("foo").is_err());
    }

    #[test]
    fn rejects_segment_starting_with_digit() {
        assert!(validate_package_name("com.1example.app").is_err());
    }

    #[test]
    fn rejects_empty_segment() {
        assert!(validate_package_name("com..example").is_err());
    }

    #[test]
    fn rejects_shell_unsafe_name() {
        assert!(validate_package_name("com.example;rm -rf /").is_err());
    }
}
