//! Whitespace and identifier scanning.

use core::ops::Range;

use crate::error::{ErrorKind, LexError};

/// Advances past bytes `<= b' '`. With `stop_on_newline` the cursor stops on
/// a `\n` instead of skipping it.
#[must_use]
pub fn skip_blank(buf: &[u8], from: usize, stop_on_newline: bool) -> usize {
    let rest = buf.get(from..).unwrap_or_default();
    let skipped = rest
        .iter()
        .take_while(|&&b| b <= b' ' && !(stop_on_newline && b == b'\n'))
        .count();
    from + skipped
}

#[inline]
fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

#[inline]
fn is_name_part(b: u8) -> bool {
    is_name_start(b) || b.is_ascii_digit()
}

/// Scans an identifier at `from` and returns its byte range.
///
/// A name starts with an ASCII letter, `_`, `$` or any non-ASCII byte, and
/// continues with those or ASCII digits.
///
/// # Errors
///
/// [`ErrorKind::InvalidIdentifier`] at `from` if no name starts there.
pub fn parse_name(buf: &[u8], from: usize) -> Result<Range<usize>, LexError> {
    parse_name_with(buf, from, &[])
}

/// [`parse_name`], also accepting each byte in `extra` after the first
/// character (for dotted or dashed keys such as `log.level`).
///
/// ```rust
/// use bufcodec::parse_name_with;
///
/// assert_eq!(parse_name_with(b"log.level = 3", 0, b".-"), Ok(0..9));
/// ```
///
/// # Errors
///
/// As [`parse_name`].
pub fn parse_name_with(buf: &[u8], from: usize, extra: &[u8]) -> Result<Range<usize>, LexError> {
    match buf.get(from) {
        Some(&b) if is_name_start(b) => {}
        _ => return Err(LexError::new(ErrorKind::InvalidIdentifier, from)),
    }
    let len = buf[from + 1..]
        .iter()
        .take_while(|&&b| is_name_part(b) || extra.contains(&b))
        .count();
    Ok(from..from + 1 + len)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"   x", 0, false, 3)]
    #[case(b" \t\r\n y", 0, false, 5)]
    #[case(b" \t\r\n y", 0, true, 3)]
    #[case(b"\n\n", 0, true, 0)]
    #[case(b"ab", 2, false, 2)]
    #[case(b"  ", 0, false, 2)]
    fn skips_blank(
        #[case] src: &[u8],
        #[case] from: usize,
        #[case] stop_on_newline: bool,
        #[case] expected: usize,
    ) {
        assert_eq!(skip_blank(src, from, stop_on_newline), expected);
    }

    #[rstest]
    #[case(b"name = 1", 0, 0..4)]
    #[case(b"  _tmp9+", 2, 2..7)]
    #[case(b"$ref", 0, 0..4)]
    #[case("größe:".as_bytes(), 0, 0..7)]
    fn parses_names(#[case] src: &[u8], #[case] from: usize, #[case] expected: Range<usize>) {
        assert_eq!(parse_name(src, from), Ok(expected));
    }

    #[rstest]
    #[case(b"9lives", 0)]
    #[case(b"-x", 0)]
    #[case(b"abc", 3)]
    fn rejects_bad_start(#[case] src: &[u8], #[case] from: usize) {
        assert_eq!(
            parse_name(src, from),
            Err(LexError::new(ErrorKind::InvalidIdentifier, from))
        );
    }

    #[test]
    fn extra_bytes_never_start_a_name() {
        assert!(parse_name_with(b".a", 0, b".").is_err());
        assert_eq!(parse_name(b"log.level", 0), Ok(0..3));
    }

    #[quickcheck_macros::quickcheck]
    fn skip_blank_stops_on_first_kept_byte(buf: Vec<u8>, stop_on_newline: bool) -> bool {
        let skipped = |b: u8| b <= b' ' && !(stop_on_newline && b == b'\n');
        let end = skip_blank(&buf, 0, stop_on_newline);
        buf[..end].iter().all(|&b| skipped(b)) && buf.get(end).is_none_or(|&b| !skipped(b))
    }
}
