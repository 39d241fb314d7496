//! Decimal floating-point parsing.
//!
//! Grammar: `digits [ '.' digits ] [ ('e' | 'E') [sign] digits ]`. The
//! special spellings `NaN` and `Infinity` are only produced by the printer;
//! they are not part of the input grammar.
//!
//! Accumulation
//! - Integer and fraction digits feed one `u64` mantissa while it has room;
//!   each fraction digit lowers the decimal scale by one.
//! - Integer digits that arrive after the mantissa is full continue in an
//!   `f64` accumulator. Precision lost from that point on is accepted.
//! - Fraction digits that arrive after the mantissa is full are consumed and
//!   ignored.
//! - The result is `mantissa * 10^(exponent + scale)`, applied with a lookup
//!   in the exponent table.

use crate::{
    error::{ErrorKind, LexError},
    integer::{Radix, sign},
    pow10::{self, BOUND},
};

/// Mantissa values below this can take another digit without overflowing.
const MANTISSA_ROOM: u64 = u64::MAX / 10;

/// Exponent digits stop accumulating past this; any larger value is already
/// outside every representable range.
const EXPONENT_CAP: i32 = 100_000;

#[inline]
fn decimal_digit(buf: &[u8], pos: usize) -> Option<u8> {
    buf.get(pos).and_then(|&b| Radix::Decimal.digit(b)).map(|d| d as u8)
}

/// Scans an unsigned decimal number starting at `from`.
pub(crate) fn scan(buf: &[u8], from: usize, check_overflow: bool) -> Result<(usize, f64), LexError> {
    let mut pos = from;
    let mut mantissa: u64 = 0;
    let mut wide: Option<f64> = None;
    let mut scale: i32 = 0;

    while let Some(d) = decimal_digit(buf, pos) {
        if let Some(w) = wide.as_mut() {
            *w = *w * 10.0 + f64::from(d);
        } else if mantissa < MANTISSA_ROOM {
            mantissa = mantissa * 10 + u64::from(d);
        } else {
            #[allow(clippy::cast_precision_loss)]
            let spill = mantissa as f64 * 10.0 + f64::from(d);
            wide = Some(spill);
        }
        pos += 1;
    }
    if pos == from {
        return Err(LexError::new(ErrorKind::NoDigits, from));
    }

    if buf.get(pos) == Some(&b'.') {
        pos += 1;
        let fraction_from = pos;
        while let Some(d) = decimal_digit(buf, pos) {
            if wide.is_none() && mantissa < MANTISSA_ROOM {
                mantissa = mantissa * 10 + u64::from(d);
                scale = scale.saturating_sub(1);
            }
            pos += 1;
        }
        if pos == fraction_from {
            return Err(LexError::new(ErrorKind::EmptyFraction, pos));
        }
    }

    let mut exponent: i32 = 0;
    if matches!(buf.get(pos), Some(b'e' | b'E')) {
        let (digits_from, negative) = sign(buf, pos + 1);
        pos = digits_from;
        while let Some(d) = decimal_digit(buf, pos) {
            if exponent < EXPONENT_CAP {
                exponent = exponent * 10 + i32::from(d);
            }
            pos += 1;
        }
        if pos == digits_from {
            return Err(LexError::new(ErrorKind::MissingExponent, pos));
        }
        if exponent > BOUND {
            if check_overflow {
                return Err(LexError::new(ErrorKind::Overflow, digits_from));
            }
            exponent = BOUND;
        }
        if negative {
            exponent = -exponent;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let value = wide.unwrap_or(mantissa as f64);
    let value = if value == 0.0 {
        0.0
    } else {
        pow10::scale(value, exponent.saturating_add(scale))
    };
    if check_overflow && !value.is_finite() {
        return Err(LexError::new(ErrorKind::Overflow, from));
    }
    Ok((pos, value))
}

/// Parses an unsigned `f64` starting at `from`.
///
/// # Errors
///
/// - [`ErrorKind::NoDigits`] if `from` is not a digit.
/// - [`ErrorKind::EmptyFraction`] if `.` is not followed by a digit.
/// - [`ErrorKind::MissingExponent`] if `e`/`E` (and sign) is not followed by a
///   digit.
/// - [`ErrorKind::Overflow`] (when `check_overflow`) if the exponent is
///   outside `[-308, 308]` or the value is not finite. Without the check the
///   exponent is clamped instead.
pub fn parse_unsigned_double(
    buf: &[u8],
    from: usize,
    check_overflow: bool,
) -> Result<(usize, f64), LexError> {
    scan(buf, from, check_overflow)
}

/// Parses an `f64` with an optional leading `+` or `-`.
///
/// # Errors
///
/// As [`parse_unsigned_double`].
pub fn parse_signed_double(
    buf: &[u8],
    from: usize,
    check_overflow: bool,
) -> Result<(usize, f64), LexError> {
    let (pos, negative) = sign(buf, from);
    let (end, value) = scan(buf, pos, check_overflow)?;
    Ok((end, if negative { -value } else { value }))
}

#[allow(clippy::cast_possible_truncation)]
fn narrow(value: f64, at: usize, check_overflow: bool) -> Result<f32, LexError> {
    if check_overflow && value.abs() > f64::from(f32::MAX) {
        return Err(LexError::new(ErrorKind::Overflow, at));
    }
    Ok(value as f32)
}

/// Parses an unsigned `f32` starting at `from`.
///
/// # Errors
///
/// As [`parse_unsigned_double`], with `f32` range.
pub fn parse_unsigned_float(
    buf: &[u8],
    from: usize,
    check_overflow: bool,
) -> Result<(usize, f32), LexError> {
    let (end, value) = scan(buf, from, check_overflow)?;
    Ok((end, narrow(value, from, check_overflow)?))
}

/// Parses an `f32` with an optional leading `+` or `-`.
///
/// # Errors
///
/// As [`parse_unsigned_double`], with `f32` range.
pub fn parse_signed_float(
    buf: &[u8],
    from: usize,
    check_overflow: bool,
) -> Result<(usize, f32), LexError> {
    let (end, value) = parse_signed_double(buf, from, check_overflow)?;
    Ok((end, narrow(value, from, check_overflow)?))
}
