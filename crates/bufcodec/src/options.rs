#![allow(clippy::struct_excessive_bools)]

/// Which literal kinds [`parse_number`](crate::parse_number) may produce.
///
/// A kind that is not allowed is never returned: a suffix that would force it
/// fails with [`ErrorKind::DisallowedKind`](crate::ErrorKind::DisallowedKind),
/// and an unsuffixed literal falls through to the next allowed kind.
///
/// # Examples
///
/// ```rust
/// use bufcodec::{Number, NumberKinds, parse_number};
///
/// let (end, n) = parse_number(b"42", 0, NumberKinds::INTEGERS, true).unwrap();
/// assert_eq!((end, n), (2, Number::Int(42)));
///
/// assert!(parse_number(b"1.5", 0, NumberKinds::INTEGERS, true).is_ok_and(|(end, _)| end == 1));
/// ```
///
/// # Default
///
/// All kinds are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberKinds {
    /// Plain integers that fit in `i32`.
    pub int: bool,
    /// `l`/`L`-suffixed integers, and plain integers too wide for `i32`.
    pub long: bool,
    /// `f`/`F`-suffixed literals.
    pub float: bool,
    /// Literals with a fraction or exponent and no suffix.
    pub double: bool,
}

impl NumberKinds {
    /// Every kind.
    pub const ALL: Self = Self {
        int: true,
        long: true,
        float: true,
        double: true,
    };

    /// `int` and `long` only.
    pub const INTEGERS: Self = Self {
        int: true,
        long: true,
        float: false,
        double: false,
    };

    /// `float` and `double` only.
    pub const FLOATING: Self = Self {
        int: false,
        long: false,
        float: true,
        double: true,
    };

    /// Whether either floating-point kind is allowed.
    #[must_use]
    pub const fn floating(self) -> bool {
        self.float || self.double
    }
}

#[cfg(any(test, feature = "fuzzing"))]
impl NumberKinds {
    /// Builds a mask from the low four bits of `bits`: int, long, float,
    /// double.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        Self {
            int: bits & 1 != 0,
            long: bits & 2 != 0,
            float: bits & 4 != 0,
            double: bits & 8 != 0,
        }
    }
}

impl Default for NumberKinds {
    fn default() -> Self {
        Self::ALL
    }
}

/// Default bound on `${}` nesting.
pub const MAX_SUBST_DEPTH: usize = 16;

/// Configuration for [`substitute_with`](crate::substitute_with).
///
/// # Default
///
/// `max_depth` is [`MAX_SUBST_DEPTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstituteOptions {
    /// How many resolutions may nest inside one another before the engine
    /// gives up with [`ErrorKind::RecursionTooDeep`](crate::ErrorKind::RecursionTooDeep).
    ///
    /// A resolved value that refers to itself, directly or through other
    /// names, always ends here instead of looping.
    ///
    /// # Default
    ///
    /// `16`
    pub max_depth: usize,
}

impl Default for SubstituteOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_SUBST_DEPTH,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn options_serialize_by_field() {
        insta::assert_yaml_snapshot!(NumberKinds::INTEGERS, @r"
        int: true
        long: true
        float: false
        double: false
        ");
        insta::assert_yaml_snapshot!(SubstituteOptions::default(), @"max_depth: 16");
    }
}
