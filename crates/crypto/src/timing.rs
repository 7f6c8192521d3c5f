//! Constant-time operations for security.

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Slices of different length compare unequal immediately; the length of a
/// hex digest is not secret.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Compare two hex digests in constant time.
///
/// The comparison is case-sensitive: `"ab"` and `"AB"` are different digests.
pub fn digests_match(expected: &str, received: &str) -> bool {
    constant_time_compare(expected.as_bytes(), received.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_slices() {
        assert!(constant_time_compare(b"payload", b"payload"));
    }

    #[test]
    fn test_different_lengths() {
        assert!(!constant_time_compare(b"payload", b"pay"));
    }

    #[test]
    fn test_empty_slices() {
        assert!(constant_time_compare(b"", b""));
    }

    #[test]
    fn test_digest_match_is_case_sensitive() {
        assert!(digests_match("0a1b2c", "0a1b2c"));
        assert!(!digests_match("0a1b2c", "0A1B2C"));
    }

    #[test]
    fn test_digest_single_char_difference() {
        assert!(!digests_match("0a1b2c", "0a1b2d"));
    }
}
