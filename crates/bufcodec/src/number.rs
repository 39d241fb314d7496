//! Suffix-aware numeric literals.
//!
//! [`parse_number`] reads `[sign] digits [ '.' digits ] [ exponent ] [ suffix ]`
//! and classifies the literal as `int`, `long`, `float` or `double`:
//!
//! | literal | result |
//! |---|---|
//! | `12` | `Int`, or `Long` when it does not fit `i32` |
//! | `12L` | `Long` |
//! | `1.5`, `1e3`, integer wider than `i64` | `Double` |
//! | `1.5f`, `1f` | `Float` |
//!
//! [`validate_number`] is defined in terms of [`parse_number`], so both accept
//! exactly the same language; the validator only reduces the error to the
//! offset of the first bad byte.

use core::fmt;

use crate::{
    error::{BadOffset, ErrorKind, LexError},
    float,
    integer::{Integer, Radix, sign},
    options::NumberKinds,
};

/// The kind of a parsed literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberKind {
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumberKind::Int => "int",
            NumberKind::Long => "long",
            NumberKind::Float => "float",
            NumberKind::Double => "double",
        })
    }
}

/// A classified numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Number {
    /// An `int` literal.
    Int(i32),
    /// A `long` literal.
    Long(i64),
    /// A `float` literal.
    Float(f32),
    /// A `double` literal.
    Double(f64),
}

impl Number {
    /// The literal's kind.
    #[must_use]
    pub fn kind(self) -> NumberKind {
        match self {
            Number::Int(_) => NumberKind::Int,
            Number::Long(_) => NumberKind::Long,
            Number::Float(_) => NumberKind::Float,
            Number::Double(_) => NumberKind::Double,
        }
    }

    /// The raw bit pattern plus kind tag: integers as-is, floats through
    /// `to_bits`.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn to_raw(self) -> (i64, NumberKind) {
        let bits = match self {
            Number::Int(v) => i64::from(v),
            Number::Long(v) => v,
            Number::Float(v) => i64::from(v.to_bits() as i32),
            Number::Double(v) => v.to_bits() as i64,
        };
        (bits, self.kind())
    }

    /// The value widened to `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => f64::from(v),
            Number::Long(v) => v as f64,
            Number::Float(v) => f64::from(v),
            Number::Double(v) => v,
        }
    }
}

/// Integer digits of a literal, accumulated against both integer widths.
struct Digits {
    end: usize,
    /// Exact magnitude, valid while `long_overflow` is `None`.
    magnitude: u64,
    /// Magnitude modulo 2^64, for unchecked wrapping.
    wrapped: u64,
    int_overflow: Option<usize>,
    long_overflow: Option<usize>,
}

fn scan_digits(buf: &[u8], from: usize, negative: bool) -> Result<Digits, LexError> {
    let int_limit = <i32 as Integer>::MAX + u64::from(negative);
    let long_limit = <i64 as Integer>::MAX + u64::from(negative);
    let mut digits = Digits {
        end: from,
        magnitude: 0,
        wrapped: 0,
        int_overflow: None,
        long_overflow: None,
    };
    while let Some(d) = digits.end_digit(buf) {
        let d = u64::from(d);
        let pos = digits.end;
        if digits.int_overflow.is_none() && digits.magnitude > (int_limit - d) / 10 {
            digits.int_overflow = Some(pos);
        }
        if digits.long_overflow.is_none() {
            if digits.magnitude > (long_limit - d) / 10 {
                digits.long_overflow = Some(pos);
            } else {
                digits.magnitude = digits.magnitude * 10 + d;
            }
        }
        digits.wrapped = digits.wrapped.wrapping_mul(10).wrapping_add(d);
        digits.end += 1;
    }
    if digits.end == from {
        return Err(LexError::new(ErrorKind::NoDigits, from));
    }
    Ok(digits)
}

impl Digits {
    #[inline]
    fn end_digit(&self, buf: &[u8]) -> Option<u32> {
        buf.get(self.end).and_then(|&b| Radix::Decimal.digit(b))
    }
}

fn disallowed(kind: NumberKind, at: usize) -> LexError {
    LexError::new(ErrorKind::DisallowedKind(kind), at)
}

/// Parses a numeric literal starting at `from`, restricted to `kinds`.
///
/// Returns the cursor past the literal (including any suffix) and the value.
///
/// # Errors
///
/// - [`ErrorKind::NoDigits`], [`ErrorKind::EmptyFraction`],
///   [`ErrorKind::MissingExponent`] for malformed literals.
/// - [`ErrorKind::DisallowedKind`] when the literal can only be a kind that
///   `kinds` excludes.
/// - [`ErrorKind::Overflow`] (when `check_overflow`) for integers outside the
///   chosen type's range, and always for `f`-suffixed values beyond
///   `f32::MAX`.
pub fn parse_number(
    buf: &[u8],
    from: usize,
    kinds: NumberKinds,
    check_overflow: bool,
) -> Result<(usize, Number), LexError> {
    let (digits_from, negative) = sign(buf, from);
    let digits = scan_digits(buf, digits_from, negative)?;
    let end = digits.end;

    match buf.get(end) {
        Some(b'l' | b'L') => {
            if !kinds.long {
                return Err(disallowed(NumberKind::Long, end));
            }
            if let (Some(at), true) = (digits.long_overflow, check_overflow) {
                return Err(LexError::new(ErrorKind::Overflow, at));
            }
            let value = <i64 as Integer>::from_magnitude(digits.wrapped, negative);
            return Ok((end + 1, Number::Long(value)));
        }
        Some(b'.' | b'e' | b'E' | b'f' | b'F') if kinds.floating() => {
            return floating(buf, from, kinds, check_overflow);
        }
        _ if digits.long_overflow.is_some() && kinds.floating() => {
            return floating(buf, from, kinds, check_overflow);
        }
        _ if digits.int_overflow.is_some() && !kinds.long && kinds.double => {
            return floating(buf, from, kinds, check_overflow);
        }
        _ => {}
    }

    if kinds.int && digits.int_overflow.is_none() {
        let value = <i32 as Integer>::from_magnitude(digits.magnitude, negative);
        return Ok((end, Number::Int(value)));
    }
    if kinds.long {
        if let (Some(at), true) = (digits.long_overflow, check_overflow) {
            return Err(LexError::new(ErrorKind::Overflow, at));
        }
        let value = <i64 as Integer>::from_magnitude(digits.wrapped, negative);
        return Ok((end, Number::Long(value)));
    }
    if kinds.int {
        if let (Some(at), true) = (digits.int_overflow, check_overflow) {
            return Err(LexError::new(ErrorKind::Overflow, at));
        }
        let value = <i32 as Integer>::from_magnitude(digits.wrapped, negative);
        return Ok((end, Number::Int(value)));
    }
    if kinds.double {
        // Only reachable within i64 range; wider literals took the float path.
        #[allow(clippy::cast_precision_loss)]
        let value = <i64 as Integer>::from_magnitude(digits.magnitude, negative) as f64;
        return Ok((end, Number::Double(value)));
    }
    Err(disallowed(NumberKind::Int, digits_from))
}

/// The float/double branch: re-reads the literal with the decimal grammar,
/// then applies the optional `f`/`F` suffix.
fn floating(
    buf: &[u8],
    from: usize,
    kinds: NumberKinds,
    check_overflow: bool,
) -> Result<(usize, Number), LexError> {
    let (digits_from, negative) = sign(buf, from);
    let (end, magnitude) = float::scan(buf, digits_from, check_overflow)?;
    let value = if negative { -magnitude } else { magnitude };

    if matches!(buf.get(end), Some(b'f' | b'F')) {
        if !kinds.float {
            return Err(disallowed(NumberKind::Float, end));
        }
        if magnitude > f64::from(f32::MAX) {
            return Err(LexError::new(ErrorKind::Overflow, digits_from));
        }
        #[allow(clippy::cast_possible_truncation)]
        let narrowed = value as f32;
        return Ok((end + 1, Number::Float(narrowed)));
    }
    if !kinds.double {
        return Err(disallowed(NumberKind::Double, end));
    }
    Ok((end, Number::Double(value)))
}

/// Checks that a numeric literal starts at `from` without keeping its value.
///
/// Accepts exactly the literals [`parse_number`] accepts, with the same
/// `kinds` and `check_overflow`. Returns the cursor past the literal and its
/// kind.
///
/// # Errors
///
/// [`BadOffset`] with the offset at which [`parse_number`] would fail.
pub fn validate_number(
    buf: &[u8],
    from: usize,
    kinds: NumberKinds,
    check_overflow: bool,
) -> Result<(usize, NumberKind), BadOffset> {
    parse_number(buf, from, kinds, check_overflow)
        .map(|(end, number)| (end, number.kind()))
        .map_err(BadOffset::from)
}
