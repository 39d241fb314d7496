//! Decimal printers for `i64` and `f64`.
//!
//! Both write at a cursor and return a [`Fill`]: if the destination runs out
//! the pass keeps counting, so the reported capacity is exact. The `probe_*`
//! variants only count.
//!
//! Digits are produced by repeated subtraction of a power-of-ten block
//! instead of division.
//!
//! `f64` output
//! - `NaN`, `Infinity`, `-Infinity` are spelled out; both zeros print `0`.
//! - Magnitudes in `[1e-19, 1e19]` print plainly (`123.456`, `0.00000025`).
//! - Anything else is rescaled to one integer digit and followed by
//!   `E<exponent>` (`1E20`, `3E-25`).
//! - The fraction is the truncated 18-digit block `(v - trunc(v)) * 10^18`,
//!   so every bit the multiply keeps is printed (`0.1 + 0.2` gives
//!   `0.300000000000000064`). Trailing zeros and a bare `.` are dropped.

use crate::{
    fill::{Fill, Sink},
    pow10,
};

const POW10: [u64; 20] = [
    10_000_000_000_000_000_000,
    1_000_000_000_000_000_000,
    100_000_000_000_000_000,
    10_000_000_000_000_000,
    1_000_000_000_000_000,
    100_000_000_000_000,
    10_000_000_000_000,
    1_000_000_000_000,
    100_000_000_000,
    10_000_000_000,
    1_000_000_000,
    100_000_000,
    10_000_000,
    1_000_000,
    100_000,
    10_000,
    1_000,
    100,
    10,
    1,
];

/// `10^18`: the fraction block prefix.
const FRACTION_ONE: u64 = POW10[1];

const PLAIN_RANGE: core::ops::RangeInclusive<f64> = 1e-19..=1e19;

/// Emits `magnitude`, adding `fix` to the last digit.
fn emit_digits(sink: &mut Sink<'_>, magnitude: u64, fix: u8) {
    let first = POW10
        .iter()
        .position(|&p| p <= magnitude)
        .unwrap_or(POW10.len() - 1);
    let mut rest = magnitude;
    for &block in &POW10[first..] {
        let mut digit = b'0';
        while rest >= block {
            rest -= block;
            digit += 1;
        }
        if block == 1 {
            digit += fix;
        }
        sink.push(digit);
    }
}

fn emit_long(sink: &mut Sink<'_>, value: i64) {
    if value == 0 {
        sink.push(b'0');
        return;
    }
    if value > 0 {
        emit_digits(sink, value.unsigned_abs(), 0);
        return;
    }
    sink.push(b'-');
    // -i64::MIN is out of range: print -(MIN + 1) and bump the last digit.
    let fix = u8::from(value == i64::MIN);
    let magnitude = -(value + i64::from(fix));
    emit_digits(sink, magnitude.unsigned_abs(), fix);
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn emit_double(sink: &mut Sink<'_>, value: f64) {
    if value.is_nan() {
        sink.push_all(b"NaN");
        return;
    }
    if value.is_infinite() {
        sink.push_all(if value > 0.0 { b"Infinity".as_slice() } else { b"-Infinity" });
        return;
    }
    if value == 0.0 {
        sink.push(b'0');
        return;
    }

    let mut v = value;
    if v < 0.0 {
        sink.push(b'-');
        v = -v;
    }
    let rescaled = !PLAIN_RANGE.contains(&v);
    let mut exp = 0;
    if rescaled {
        exp = pow10::floor_log10(v);
        v = pow10::scale(v, -exp);
        if v >= 10.0 {
            v /= 10.0;
            exp += 1;
        } else if v < 1.0 {
            v *= 10.0;
            exp -= 1;
        }
    }

    let int_part = v as u64;
    // A fraction a hair below one can round up to a full block in the multiply.
    let fraction = (((v - int_part as f64) * FRACTION_ONE as f64) as u64).min(FRACTION_ONE - 1);

    emit_digits(sink, int_part, 0);
    if fraction != 0 {
        let mut block = fraction + FRACTION_ONE;
        while block % 10 == 0 {
            block /= 10;
        }
        // The block's leading `1` becomes the decimal point.
        let dot = sink.pos();
        emit_digits(sink, block, 0);
        sink.set(dot, b'.');
    }
    if rescaled {
        sink.push(b'E');
        emit_long(sink, i64::from(exp));
    }
}

/// Prints `value` in decimal at `from`.
///
/// ```rust
/// use bufcodec::{Fill, print_long};
///
/// let mut buf = [0u8; 20];
/// assert_eq!(print_long(&mut buf, 0, i64::MIN), Fill::Written(20));
/// assert_eq!(&buf, b"-9223372036854775808");
///
/// let mut short = [0u8; 3];
/// assert_eq!(print_long(&mut short, 0, 1234), Fill::NeedsCapacity(4));
/// ```
pub fn print_long(buf: &mut [u8], from: usize, value: i64) -> Fill {
    let mut sink = Sink::fill(buf, from);
    emit_long(&mut sink, value);
    sink.finish()
}

/// End cursor [`print_long`] would reach, without writing.
#[must_use]
pub fn probe_long(from: usize, value: i64) -> usize {
    let mut sink = Sink::probe(from);
    emit_long(&mut sink, value);
    sink.pos()
}

/// Prints `value` at `from`, in plain or `E` notation.
pub fn print_double(buf: &mut [u8], from: usize, value: f64) -> Fill {
    let mut sink = Sink::fill(buf, from);
    emit_double(&mut sink, value);
    sink.finish()
}

/// End cursor [`print_double`] would reach, without writing.
#[must_use]
pub fn probe_double(from: usize, value: f64) -> usize {
    let mut sink = Sink::probe(from);
    emit_double(&mut sink, value);
    sink.pos()
}
