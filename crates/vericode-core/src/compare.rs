//! Timing-safe code comparison

use subtle::{Choice, ConstantTimeEq};

/// Compare a submitted code against an expected one in constant time.
///
/// The length check is folded in as a `Choice` rather than an early return,
/// and the byte loop always walks the full expected length, so running time
/// depends only on `expected.len()` and never on where the inputs differ.
pub fn constant_time_eq(submitted: &[u8], expected: &[u8]) -> bool {
    let same_len = (submitted.len() as u64).ct_eq(&(expected.len() as u64));

    let mut same_bytes = Choice::from(1u8);
    for (i, e) in expected.iter().enumerate() {
        // Out-of-range reads compare a zero pad; the length check already fails.
        let s = submitted.get(i).copied().unwrap_or(0);
        same_bytes &= s.ct_eq(e);
    }

    (same_len & same_bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal() {
        assert!(constant_time_eq(b"123456", b"123456"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_different_bytes() {
        assert!(!constant_time_eq(b"123456", b"123457"));
        assert!(!constant_time_eq(b"023456", b"123456"));
    }

    #[test]
    fn test_different_lengths() {
        assert!(!constant_time_eq(b"12345", b"123456"));
        assert!(!constant_time_eq(b"1234567", b"123456"));
        assert!(!constant_time_eq(b"", b"123456"));
    }

    #[test]
    fn test_zero_padding_not_accepted() {
        // A short input must not match an expected value ending in NULs
        assert!(!constant_time_eq(b"ab", b"ab\0\0"));
    }
}
