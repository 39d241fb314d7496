//! Powers of ten for scaling decimal mantissas.
//!
//! [`EXP_TABLE`] holds `10^k` for every `k` in `[-BOUND, BOUND]` and is
//! evaluated at compile time, so it is ready before the first parse and never
//! changes afterwards. Each positive entry is a product of at most nine
//! correctly rounded literals (`1e1`, `1e2`, `1e4`, … `1e256`), which keeps
//! every power up to `1e22` exact. Negative entries are reciprocals of the
//! positive ones.

/// Largest decimal exponent a finite `f64` can carry.
pub const BOUND: i32 = 308;

const LEN: usize = (2 * BOUND + 1) as usize;

/// `EXP_TABLE[BOUND + k] == 10^k` for `k` in `[-BOUND, BOUND]`.
pub static EXP_TABLE: [f64; LEN] = build_table();

const SQUARES: [f64; 9] = [1e1, 1e2, 1e4, 1e8, 1e16, 1e32, 1e64, 1e128, 1e256];

const fn positive_power(k: u32) -> f64 {
    let mut n = k;
    let mut i = 0;
    let mut acc = 1.0;
    while n != 0 {
        if n & 1 == 1 {
            acc *= SQUARES[i];
        }
        n >>= 1;
        i += 1;
    }
    acc
}

const fn build_table() -> [f64; LEN] {
    let mut table = [0.0; LEN];
    let mut k = 0;
    while k <= BOUND as usize {
        #[allow(clippy::cast_possible_truncation)]
        let p = positive_power(k as u32);
        table[BOUND as usize + k] = p;
        table[BOUND as usize - k] = 1.0 / p;
        k += 1;
    }
    table
}

/// `10^k` for `k` in `[-BOUND, BOUND]`.
#[inline]
#[allow(clippy::cast_sign_loss)]
pub(crate) fn get(k: i32) -> f64 {
    debug_assert!((-BOUND..=BOUND).contains(&k));
    EXP_TABLE[(BOUND + k) as usize]
}

/// `value * 10^exp`.
///
/// Negative scales divide by the positive power so that short decimal
/// literals (`0.3`, `1e-5`) come out correctly rounded. Exponents beyond the
/// table are applied in `BOUND`-sized steps; the common case is one lookup.
pub(crate) fn scale(mut value: f64, mut exp: i32) -> f64 {
    while exp > BOUND && value.is_finite() && value != 0.0 {
        value *= get(BOUND);
        exp -= BOUND;
    }
    while exp < -BOUND && value != 0.0 {
        value /= get(BOUND);
        exp += BOUND;
    }
    let exp = exp.clamp(-BOUND, BOUND);
    if exp >= 0 {
        value * get(exp)
    } else {
        value / get(-exp)
    }
}

/// `floor(log10(value))` for a positive finite `value`, found by a binary
/// search of [`EXP_TABLE`] instead of a transcendental call.
pub(crate) fn floor_log10(value: f64) -> i32 {
    debug_assert!(value > 0.0 && value.is_finite());
    let idx = EXP_TABLE.partition_point(|&p| p <= value);
    if idx == 0 {
        // Subnormal: lift into the table's range first.
        return floor_log10(value * get(BOUND)) - BOUND;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let idx = idx as i32;
    idx - 1 - BOUND
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn small_powers_are_exact() {
        let mut expected = 1.0;
        for k in 0..=22 {
            assert_eq!(get(k), expected, "10^{k}");
            expected *= 10.0;
        }
    }

    #[test]
    fn table_is_strictly_increasing() {
        assert!(EXP_TABLE.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn table_ends_are_finite() {
        assert!(get(BOUND).is_finite());
        assert!(get(-BOUND) > 0.0);
    }

    #[rstest]
    #[case(1.0, 0)]
    #[case(9.999, 0)]
    #[case(10.0, 1)]
    #[case(1e20, 20)]
    #[case(0.5, -1)]
    #[case(1e-4, -4)]
    #[case(1.7976931348623157e308, 308)]
    #[case(5e-324, -324)]
    fn floor_log10_matches(#[case] value: f64, #[case] expected: i32) {
        assert_eq!(floor_log10(value), expected);
    }

    #[test]
    fn scale_divides_for_negative_exponents() {
        assert_eq!(scale(3.0, -1), 0.3);
        assert_eq!(scale(123_456.0, -3), 123.456);
        assert_eq!(scale(1.0, 22), 1e22);
    }

    #[test]
    fn scale_steps_past_the_table() {
        assert_eq!(scale(1.0, 400), f64::INFINITY);
        assert_eq!(scale(1.0, -400), 0.0);
        assert!(scale(5.0, -324) > 0.0);
    }
}
