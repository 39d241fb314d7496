//! Integer parsing in radix 2, 8, 10 and 16.
//!
//! Every function takes a buffer and a start cursor and returns the cursor
//! one past the last consumed digit together with the value. Digits are
//! accumulated as `value * base + digit`. With `check_overflow` set the scan
//! stops with [`ErrorKind::Overflow`] at the first digit whose multiply-add
//! would leave the target type's range, so a wrapped value is never returned.
//! Without it the value wraps silently; callers that already know their input
//! is in range skip the comparison on every digit.

use crate::error::{ErrorKind, LexError};

/// Digit base for the integer scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    /// `0` and `1`.
    Binary,
    /// `0` through `7`.
    Octal,
    /// `0` through `9`.
    Decimal,
    /// `0` through `9`, `a` through `f`, either case.
    Hex,
}

impl Radix {
    /// The numeric base.
    #[must_use]
    pub const fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }

    /// Value of `b` as a digit in this radix.
    #[inline]
    #[must_use]
    pub const fn digit(self, b: u8) -> Option<u32> {
        let d = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => return None,
        };
        if (d as u32) < self.base() {
            Some(d as u32)
        } else {
            None
        }
    }
}

/// Fixed-width two's complement targets for the scanners.
pub(crate) trait Integer: Copy {
    const MAX: u64;

    /// Truncates a wrapped 64-bit magnitude to `Self`, negating if asked.
    fn from_magnitude(magnitude: u64, negative: bool) -> Self;
}

impl Integer for i32 {
    const MAX: u64 = i32::MAX as u64;

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn from_magnitude(magnitude: u64, negative: bool) -> Self {
        let v = magnitude as u32 as i32;
        if negative { v.wrapping_neg() } else { v }
    }
}

impl Integer for i64 {
    const MAX: u64 = i64::MAX as u64;

    #[allow(clippy::cast_possible_wrap)]
    fn from_magnitude(magnitude: u64, negative: bool) -> Self {
        let v = magnitude as i64;
        if negative { v.wrapping_neg() } else { v }
    }
}

/// Scans the maximal run of `radix` digits starting at `from`.
///
/// With `limit` set, fails before any multiply-add that would push the
/// magnitude past it.
pub(crate) fn accumulate(
    buf: &[u8],
    from: usize,
    radix: Radix,
    limit: Option<u64>,
) -> Result<(usize, u64), LexError> {
    let base = u64::from(radix.base());
    let mut acc: u64 = 0;
    let mut pos = from;
    while let Some(d) = buf.get(pos).and_then(|&b| radix.digit(b)) {
        let d = u64::from(d);
        if let Some(limit) = limit {
            // acc * base + d > limit, without computing it
            if acc > (limit - d) / base {
                return Err(LexError::new(ErrorKind::Overflow, pos));
            }
        }
        acc = acc.wrapping_mul(base).wrapping_add(d);
        pos += 1;
    }
    if pos == from {
        return Err(LexError::new(ErrorKind::NoDigits, from));
    }
    Ok((pos, acc))
}

/// Consumes an optional `+` or `-`; returns the new cursor and whether it was
/// `-`.
#[inline]
pub(crate) fn sign(buf: &[u8], from: usize) -> (usize, bool) {
    match buf.get(from) {
        Some(b'-') => (from + 1, true),
        Some(b'+') => (from + 1, false),
        _ => (from, false),
    }
}

fn unsigned<T: Integer>(
    buf: &[u8],
    from: usize,
    radix: Radix,
    check_overflow: bool,
) -> Result<(usize, T), LexError> {
    let (end, magnitude) = accumulate(buf, from, radix, check_overflow.then_some(T::MAX))?;
    Ok((end, T::from_magnitude(magnitude, false)))
}

fn signed_digits<T: Integer>(
    buf: &[u8],
    from: usize,
    negative: bool,
    radix: Radix,
    check_overflow: bool,
) -> Result<(usize, T), LexError> {
    // The negative range is one wider: MIN is accepted.
    let limit = T::MAX + u64::from(negative);
    let (end, magnitude) = accumulate(buf, from, radix, check_overflow.then_some(limit))?;
    Ok((end, T::from_magnitude(magnitude, negative)))
}

fn signed<T: Integer>(
    buf: &[u8],
    from: usize,
    radix: Radix,
    check_overflow: bool,
) -> Result<(usize, T), LexError> {
    let (pos, negative) = sign(buf, from);
    signed_digits(buf, pos, negative, radix, check_overflow)
}

fn extended<T: Integer>(
    buf: &[u8],
    from: usize,
    check_overflow: bool,
) -> Result<(usize, T), LexError> {
    let (pos, negative) = sign(buf, from);
    if buf.get(pos) != Some(&b'0') {
        return signed_digits(buf, pos, negative, Radix::Decimal, check_overflow);
    }
    match buf.get(pos + 1) {
        Some(b'b' | b'B') => signed_digits(buf, pos + 2, negative, Radix::Binary, check_overflow),
        Some(b'x' | b'X') => signed_digits(buf, pos + 2, negative, Radix::Hex, check_overflow),
        // The leading zero is itself an octal digit, so a lone `0` is zero.
        _ => signed_digits(buf, pos, negative, Radix::Octal, check_overflow),
    }
}

/// Parses an unsigned `i32` in `radix` starting at `from`.
///
/// # Errors
///
/// [`ErrorKind::NoDigits`] if `from` is not a digit, [`ErrorKind::Overflow`]
/// (when `check_overflow`) at the first digit that leaves `i32` range.
pub fn parse_unsigned_int(
    buf: &[u8],
    from: usize,
    radix: Radix,
    check_overflow: bool,
) -> Result<(usize, i32), LexError> {
    unsigned(buf, from, radix, check_overflow)
}

/// Parses an unsigned `i64` in `radix` starting at `from`.
///
/// # Errors
///
/// As [`parse_unsigned_int`], with `i64` range.
pub fn parse_unsigned_long(
    buf: &[u8],
    from: usize,
    radix: Radix,
    check_overflow: bool,
) -> Result<(usize, i64), LexError> {
    unsigned(buf, from, radix, check_overflow)
}

/// Parses an `i32` with an optional leading `+` or `-`.
///
/// `i32::MIN` is accepted even when checking for overflow.
///
/// # Errors
///
/// As [`parse_unsigned_int`].
pub fn parse_signed_int(
    buf: &[u8],
    from: usize,
    radix: Radix,
    check_overflow: bool,
) -> Result<(usize, i32), LexError> {
    signed(buf, from, radix, check_overflow)
}

/// Parses an `i64` with an optional leading `+` or `-`.
///
/// # Errors
///
/// As [`parse_unsigned_int`], with `i64` range.
pub fn parse_signed_long(
    buf: &[u8],
    from: usize,
    radix: Radix,
    check_overflow: bool,
) -> Result<(usize, i64), LexError> {
    signed(buf, from, radix, check_overflow)
}

/// Parses an optionally signed `i32` whose radix comes from its prefix:
/// `0b`/`0B` binary, `0x`/`0X` hex, a leading `0` octal, otherwise decimal.
///
/// # Errors
///
/// [`ErrorKind::NoDigits`] if no digit follows the sign or a `0b`/`0x`
/// prefix; [`ErrorKind::Overflow`] as for [`parse_unsigned_int`].
pub fn parse_extended_int(
    buf: &[u8],
    from: usize,
    check_overflow: bool,
) -> Result<(usize, i32), LexError> {
    extended(buf, from, check_overflow)
}

/// [`parse_extended_int`] with `i64` range.
///
/// # Errors
///
/// As [`parse_extended_int`].
pub fn parse_extended_long(
    buf: &[u8],
    from: usize,
    check_overflow: bool,
) -> Result<(usize, i64), LexError> {
    extended(buf, from, check_overflow)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Radix::Binary, "1011 ", 4, 11)]
    #[case(Radix::Octal, "0777x", 4, 511)]
    #[case(Radix::Octal, "128", 2, 10)]
    #[case(Radix::Decimal, "12345,", 5, 12345)]
    #[case(Radix::Hex, "7fFf;", 4, 0x7fff)]
    #[case(Radix::Hex, "0g", 1, 0)]
    fn consumes_maximal_digit_run(
        #[case] radix: Radix,
        #[case] src: &str,
        #[case] end: usize,
        #[case] value: i32,
    ) {
        assert_eq!(
            parse_unsigned_int(src.as_bytes(), 0, radix, true),
            Ok((end, value))
        );
    }

    #[test]
    fn starts_at_cursor() {
        assert_eq!(
            parse_unsigned_long(b"abc=42;", 4, Radix::Decimal, true),
            Ok((6, 42))
        );
    }

    #[test]
    fn no_digits_leaves_cursor() {
        let err = parse_unsigned_int(b"x1", 0, Radix::Decimal, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoDigits);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn overflow_reported_at_offending_digit() {
        let err = parse_unsigned_int(b"99999999999", 0, Radix::Decimal, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        // 999_999_999 * 10 already exceeds i32::MAX
        assert_eq!(err.offset, 9);
    }

    #[test]
    fn unchecked_overflow_wraps() {
        // 99_999_999_999 mod 2^32
        assert_eq!(
            parse_unsigned_int(b"99999999999", 0, Radix::Decimal, false),
            Ok((11, 1_215_752_191))
        );
        assert_eq!(
            parse_unsigned_int(b"ffffffff", 0, Radix::Hex, false),
            Ok((8, -1))
        );
    }

    #[test]
    fn max_fits_exactly() {
        assert_eq!(
            parse_unsigned_int(b"2147483647", 0, Radix::Decimal, true),
            Ok((10, i32::MAX))
        );
        assert!(parse_unsigned_int(b"2147483648", 0, Radix::Decimal, true).is_err());
        assert_eq!(
            parse_unsigned_long(b"7fffffffffffffff", 0, Radix::Hex, true),
            Ok((16, i64::MAX))
        );
    }

    #[rstest]
    #[case("-2147483648", i32::MIN)]
    #[case("+17", 17)]
    #[case("-0", 0)]
    fn signed_int(#[case] src: &str, #[case] value: i32) {
        assert_eq!(
            parse_signed_int(src.as_bytes(), 0, Radix::Decimal, true),
            Ok((src.len(), value))
        );
    }

    #[test]
    fn signed_long_min() {
        assert_eq!(
            parse_signed_long(b"-9223372036854775808", 0, Radix::Decimal, true),
            Ok((20, i64::MIN))
        );
        let err = parse_signed_long(b"-9223372036854775809", 0, Radix::Decimal, true).unwrap_err();
        assert_eq!(err.offset, 19);
    }

    #[test]
    fn sign_without_digits() {
        let err = parse_signed_int(b"-x", 0, Radix::Decimal, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoDigits);
        assert_eq!(err.offset, 1);
    }

    #[rstest]
    #[case("0", 1, 0)]
    #[case("0b101", 5, 5)]
    #[case("0B11", 4, 3)]
    #[case("0x1F", 4, 31)]
    #[case("0XfF", 4, 255)]
    #[case("017", 3, 15)]
    #[case("08", 1, 0)]
    #[case("42", 2, 42)]
    #[case("-0x10", 5, -16)]
    fn extended_prefix_dispatch(#[case] src: &str, #[case] end: usize, #[case] value: i64) {
        assert_eq!(
            parse_extended_long(src.as_bytes(), 0, true),
            Ok((end, value))
        );
    }

    #[test]
    fn extended_prefix_requires_digits() {
        let err = parse_extended_int(b"0x", 0, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoDigits);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn extended_checks_hex_range() {
        let err = parse_extended_int(b"0x80000000", 0, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        assert_eq!(parse_extended_int(b"-0x80000000", 0, true), Ok((11, i32::MIN)));
    }
}
