use thiserror::Error;

use crate::number::NumberKind;

/// A grammar or range violation, pinned to the offset of the offending byte.
///
/// Every `parse_*`, `decode_*` and `substitute*` function reports failures
/// through this type. It is `Copy` and never allocates, so speculative callers
/// can probe a buffer in a loop without paying for the error path.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct LexError {
    pub(crate) kind: ErrorKind,
    /// Offset of the byte that made the input invalid.
    pub offset: usize,
}

impl LexError {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether this is a numeric range violation rather than a syntax error.
    #[must_use]
    pub fn is_overflow(&self) -> bool {
        matches!(self.kind, ErrorKind::Overflow)
    }
}

/// The reason a [`LexError`] was raised.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No digit where a number must start.
    #[error("expected at least one digit")]
    NoDigits,
    /// The value does not fit the target type.
    #[error("numeric overflow")]
    Overflow,
    /// A `.` with no digit after it.
    #[error("expected a digit after '.'")]
    EmptyFraction,
    /// An `e` or `E` with no exponent digits.
    #[error("expected a digit in the exponent")]
    MissingExponent,
    /// The literal can only be a kind the caller excluded.
    #[error("{0} literals are not allowed here")]
    DisallowedKind(NumberKind),
    /// A `\` followed by a byte that starts no escape.
    #[error("unknown escape sequence '\\{}'", char::from(*.0))]
    UnknownEscape(u8),
    /// The buffer ends inside an escape.
    #[error("input ends inside an escape sequence")]
    TruncatedEscape,
    /// A non-digit inside a `\0dd` or `\uXXXX` escape.
    #[error("invalid digit '{}' in escape sequence", char::from(*.0))]
    InvalidEscapeDigit(u8),
    /// A `\u` code unit that is an unpaired surrogate.
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscape(u32),
    /// Bytes that are not valid UTF-8.
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
    /// Nothing left to decode at the cursor.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// No terminal byte before the end of the buffer.
    #[error("unterminated string")]
    UnterminatedString,
    /// No name starts at the cursor.
    #[error("invalid identifier start")]
    InvalidIdentifier,
    /// A `${` with no matching `}`.
    #[error("unbalanced braces")]
    UnbalancedBraces,
    /// `${}`.
    #[error("empty variable name")]
    EmptyName,
    /// Resolved values nest deeper than the configured bound.
    #[error("substitution nested deeper than {0} levels")]
    RecursionTooDeep(usize),
}

/// Validate Signal: the offset of the first malformed byte.
///
/// Returned by [`validate_number`](crate::validate_number), which never builds
/// a [`LexError`] message for its caller to inspect.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("malformed input at offset {0}")]
pub struct BadOffset(pub usize);

impl From<LexError> for BadOffset {
    fn from(err: LexError) -> Self {
        BadOffset(err.offset)
    }
}
