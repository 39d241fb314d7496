//! Backslash escapes, in both directions.
//!
//! Decoding grammar (after `\`):
//!
//! | escape       | value                                  |
//! |--------------|----------------------------------------|
//! | `\" \' \\`   | the character itself                   |
//! | `\b \f`      | U+0008, U+000C                         |
//! | `\n \r \t`   | U+000A, U+000D, U+0009                 |
//! | `\0dd`       | two octal digits after the `0`         |
//! | `\uXXXX`     | four hex digits, one UTF-16 code unit  |
//! | `\/`         | `/`, inside strings only               |
//!
//! The printer emits the same table in reverse, so anything it produces is
//! accepted by [`decode_string`].

use alloc::vec::Vec;

use bstr::ByteSlice;

use crate::{
    error::{ErrorKind, LexError},
    fill::{Fill, Sink},
    integer::Radix,
};

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

fn digits(buf: &[u8], at: usize, count: usize, radix: Radix) -> Result<(usize, u32), LexError> {
    let mut value = 0;
    for pos in at..at + count {
        let b = *buf
            .get(pos)
            .ok_or(LexError::new(ErrorKind::TruncatedEscape, pos))?;
        let d = radix
            .digit(b)
            .ok_or(LexError::new(ErrorKind::InvalidEscapeDigit(b), pos))?;
        value = value * radix.base() + d;
    }
    Ok((at + count, value))
}

/// One escape without its leading backslash. Yields a UTF-16 code unit; the
/// caller decides what to do with surrogates.
fn code_unit(buf: &[u8], at: usize, slash: bool) -> Result<(usize, u32), LexError> {
    let b = *buf
        .get(at)
        .ok_or(LexError::new(ErrorKind::TruncatedEscape, at))?;
    let unit = match b {
        b'"' | b'\'' | b'\\' => u32::from(b),
        b'/' if slash => u32::from(b),
        b'b' => 0x08,
        b'f' => 0x0C,
        b'n' => u32::from(b'\n'),
        b'r' => u32::from(b'\r'),
        b't' => u32::from(b'\t'),
        b'0' => return digits(buf, at + 1, 2, Radix::Octal),
        b'u' => return digits(buf, at + 1, 4, Radix::Hex),
        other => return Err(LexError::new(ErrorKind::UnknownEscape(other), at)),
    };
    Ok((at + 1, unit))
}

/// Decodes the escape whose backslash sits at `start`, pairing a high
/// surrogate with an immediately following `\u` low surrogate.
fn escape(buf: &[u8], start: usize, slash: bool) -> Result<(usize, char), LexError> {
    let (end, unit) = code_unit(buf, start + 1, slash)?;
    let lone = LexError::new(ErrorKind::InvalidUnicodeEscape(unit), start);
    match unit {
        0xD800..=0xDBFF => {
            if buf.get(end..end + 2) != Some(b"\\u".as_slice()) {
                return Err(lone);
            }
            let (after, low) = digits(buf, end + 2, 4, Radix::Hex)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(lone);
            }
            let scalar = 0x1_0000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            let ch = char::from_u32(scalar).ok_or(lone)?;
            Ok((after, ch))
        }
        _ => Ok((end, char::from_u32(unit).ok_or(lone)?)),
    }
}

#[inline]
fn push_char(out: &mut Vec<u8>, ch: char) {
    out.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes());
}

/// Decodes one character at `from`: either a backslash escape or a single
/// UTF-8 encoded character.
///
/// ```rust
/// use bufcodec::decode_char;
///
/// assert_eq!(decode_char(br"\u0041", 0), Ok((6, 'A')));
/// assert_eq!(decode_char("é!".as_bytes(), 0), Ok((2, 'é')));
/// ```
///
/// # Errors
///
/// - [`ErrorKind::UnexpectedEndOfInput`] if `from` is past the buffer.
/// - [`ErrorKind::UnknownEscape`] at the byte after `\` if it names no escape.
/// - [`ErrorKind::TruncatedEscape`] if the buffer ends inside an escape.
/// - [`ErrorKind::InvalidEscapeDigit`] for a bad digit in `\0dd` or `\uXXXX`.
/// - [`ErrorKind::InvalidUnicodeEscape`] for an unpaired surrogate.
/// - [`ErrorKind::InvalidUtf8`] if the bytes at `from` are not UTF-8.
pub fn decode_char(buf: &[u8], from: usize) -> Result<(usize, char), LexError> {
    match buf.get(from) {
        None => Err(LexError::new(ErrorKind::UnexpectedEndOfInput, from)),
        Some(b'\\') => escape(buf, from, false),
        Some(_) => match bstr::decode_utf8(&buf[from..]) {
            (Some(ch), len) => Ok((from + len, ch)),
            (None, _) => Err(LexError::new(ErrorKind::InvalidUtf8, from)),
        },
    }
}

/// Decodes a quoted body starting at `from` into `out`, stopping after the
/// first unescaped `terminal`.
///
/// Bytes other than `\` and `terminal` are copied as they are. Returns the
/// cursor just past `terminal`. On error `out` holds whatever was decoded
/// before the failing byte.
///
/// # Errors
///
/// - [`ErrorKind::UnterminatedString`] at `buf.len()` if `terminal` never
///   appears.
/// - Any escape error listed on [`decode_char`]; `\/` is accepted here.
pub fn decode_string(
    buf: &[u8],
    from: usize,
    terminal: u8,
    out: &mut Vec<u8>,
) -> Result<usize, LexError> {
    let mut pos = from;
    loop {
        let rest = buf.get(pos..).unwrap_or_default();
        let Some(run) = rest.find_byteset([terminal, b'\\']) else {
            out.extend_from_slice(rest);
            return Err(LexError::new(ErrorKind::UnterminatedString, buf.len()));
        };
        out.extend_from_slice(&rest[..run]);
        pos += run;
        if buf[pos] == terminal {
            return Ok(pos + 1);
        }
        let (end, ch) = escape(buf, pos, true)?;
        push_char(out, ch);
        pos = end;
    }
}

/// [`decode_string`] with variable-length numeric escapes.
///
/// `\0` starts a run of octal digits, or of hex digits when the next byte is
/// `x`/`X`. The run ends at the first non-digit; its value is truncated to a
/// UTF-16 code unit.
///
/// A run that reaches the end of the buffer leaves the cursor one byte short,
/// so its last digit is read again as a literal before the string is reported
/// unterminated.
///
/// # Errors
///
/// As [`decode_string`]; a run whose code unit is a surrogate fails with
/// [`ErrorKind::InvalidUnicodeEscape`] at the backslash.
pub fn decode_string_extended(
    buf: &[u8],
    from: usize,
    terminal: u8,
    out: &mut Vec<u8>,
) -> Result<usize, LexError> {
    let mut i = from;
    while i < buf.len() {
        let b = buf[i];
        if b == terminal {
            return Ok(i + 1);
        }
        if b != b'\\' {
            out.push(b);
        } else if buf.get(i + 1) == Some(&b'0') {
            let zero = i + 1;
            let (radix, mut scan) = match buf.get(zero + 1) {
                Some(b'x' | b'X') => (Radix::Hex, zero + 2),
                _ => (Radix::Octal, zero + 1),
            };
            let mut acc: u32 = 0;
            while let Some(&d) = buf.get(scan) {
                scan += 1;
                let Some(v) = radix.digit(d) else { break };
                acc = acc.wrapping_mul(radix.base()).wrapping_add(v);
            }
            #[allow(clippy::cast_possible_truncation)]
            let unit = u32::from(acc as u16);
            let ch = char::from_u32(unit)
                .ok_or(LexError::new(ErrorKind::InvalidUnicodeEscape(unit), i))?;
            push_char(out, ch);
            i = scan - 2;
        } else {
            let (end, ch) = escape(buf, i, true)?;
            push_char(out, ch);
            i = end - 1;
        }
        i += 1;
    }
    Err(LexError::new(ErrorKind::UnterminatedString, buf.len()))
}

fn emit_char(sink: &mut Sink<'_>, ch: char) {
    let short = match ch {
        '\u{8}' => Some(b'b'),
        '\u{c}' => Some(b'f'),
        '\n' => Some(b'n'),
        '\r' => Some(b'r'),
        '\t' => Some(b't'),
        '\\' | '"' | '\'' => Some(ch as u8),
        _ => None,
    };
    if let Some(letter) = short {
        sink.push_all(&[b'\\', letter]);
        return;
    }
    let code = u32::from(ch);
    if code < 0x20 {
        #[allow(clippy::cast_possible_truncation)]
        let code = code as u8;
        sink.push_all(&[b'\\', b'0', b'0' + (code >> 3), b'0' + (code & 7)]);
    } else if code > 0xFF {
        for unit in ch.encode_utf16(&mut [0; 2]) {
            sink.push_all(b"\\u");
            for shift in [12, 8, 4, 0] {
                sink.push(HEX_UPPER[usize::from((*unit >> shift) & 0xF)]);
            }
        }
    } else {
        sink.push_all(ch.encode_utf8(&mut [0; 4]).as_bytes());
    }
}

/// Prints `ch` at `from` in its escaped form.
///
/// Control characters use their mnemonic (`\n`, `\t`, ...) or `\0oo`;
/// backslash and both quotes are prefixed with `\`; characters above U+00FF
/// become `\uXXXX`, as a surrogate pair outside the Basic Multilingual Plane.
/// Everything else is copied as UTF-8.
///
/// `strong_escaping` is accepted for call-site compatibility and does not
/// change the output.
pub fn print_escaped_char(buf: &mut [u8], from: usize, ch: char, strong_escaping: bool) -> Fill {
    let _ = strong_escaping;
    let mut sink = Sink::fill(buf, from);
    emit_char(&mut sink, ch);
    sink.finish()
}

/// End cursor [`print_escaped_char`] would reach, without writing.
#[must_use]
pub fn probe_escaped_char(from: usize, ch: char, strong_escaping: bool) -> usize {
    let _ = strong_escaping;
    let mut sink = Sink::probe(from);
    emit_char(&mut sink, ch);
    sink.pos()
}

/// Prints every character of `text` escaped, back to back.
pub fn print_escaped(buf: &mut [u8], from: usize, text: &str, strong_escaping: bool) -> Fill {
    let _ = strong_escaping;
    let mut sink = Sink::fill(buf, from);
    text.chars().for_each(|ch| emit_char(&mut sink, ch));
    sink.finish()
}

/// End cursor [`print_escaped`] would reach, without writing.
#[must_use]
pub fn probe_escaped(from: usize, text: &str, strong_escaping: bool) -> usize {
    let _ = strong_escaping;
    let mut sink = Sink::probe(from);
    text.chars().for_each(|ch| emit_char(&mut sink, ch));
    sink.pos()
}
