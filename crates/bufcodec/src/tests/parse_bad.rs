use alloc::string::ToString;

use rstest::rstest;

use crate::{
    BadOffset, ErrorKind, LexError, NumberKinds, Radix, decode_char, decode_string,
    parse_extended_long, parse_name, parse_number, parse_signed_int, parse_unsigned_double,
    substitute, validate_number,
};

fn assert_err_contains(err: LexError, expected_sub: &str, offset: usize) {
    let s = err.to_string();
    assert!(s.contains(expected_sub), "expected substring {expected_sub:?} in {s:?}");
    assert_eq!(err.offset, offset);
}

#[rstest]
#[case("", "expected at least one digit", 0)]
#[case("-", "expected at least one digit", 1)]
#[case("x1", "expected at least one digit", 0)]
#[case("3.", "expected a digit after '.'", 2)]
#[case("3.x", "expected a digit after '.'", 2)]
#[case("3e", "expected a digit in the exponent", 2)]
#[case("3e+", "expected a digit in the exponent", 3)]
#[case("1e400", "numeric overflow", 2)]
#[case("9223372036854775808L", "numeric overflow", 18)]
fn malformed_numbers(#[case] src: &str, #[case] expected_sub: &str, #[case] offset: usize) {
    let err = parse_number(src.as_bytes(), 0, NumberKinds::ALL, true).unwrap_err();
    assert_err_contains(err, expected_sub, offset);
    assert_eq!(
        validate_number(src.as_bytes(), 0, NumberKinds::ALL, true),
        Err(BadOffset(offset))
    );
}

#[test]
fn int_overflow_reports_digit() {
    let err = parse_signed_int(b"99999999999", 0, Radix::Decimal, true).unwrap_err();
    assert_err_contains(err, "numeric overflow", 9);
    assert_eq!(
        parse_signed_int(b"99999999999", 0, Radix::Decimal, false),
        Ok((11, 1_215_752_191))
    );
}

#[test]
fn extended_prefix_without_digits() {
    let err = parse_extended_long(b"0x", 0, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoDigits);
    assert_eq!(err.offset, 2);
}

#[test]
fn double_disallowed_message() {
    let err = parse_number(b"2.5", 0, NumberKinds { double: false, ..NumberKinds::ALL }, true)
        .unwrap_err();
    assert_err_contains(err, "double literals are not allowed here", 3);
}

#[test]
fn escape_errors() {
    assert_err_contains(decode_char(br"\q", 0).unwrap_err(), r"unknown escape sequence '\q'", 1);
    assert_err_contains(decode_char(br"\u12", 0).unwrap_err(), "input ends inside", 4);
    let mut out = alloc::vec::Vec::new();
    assert_err_contains(
        decode_string(br#"\uDC00""#, 0, b'"', &mut out).unwrap_err(),
        r"invalid unicode escape sequence \uDC00",
        0,
    );
    assert_err_contains(
        decode_string(b"open", 0, b'"', &mut out).unwrap_err(),
        "unterminated string",
        4,
    );
}

#[test]
fn scanner_and_substitution_errors() {
    assert_err_contains(parse_name(b" a", 0).unwrap_err(), "invalid identifier", 0);
    let vars = alloc::collections::BTreeMap::<alloc::string::String, alloc::string::String>::new();
    assert_err_contains(substitute(b"k", b"a${b", &vars).unwrap_err(), "unbalanced braces", 1);
    assert_err_contains(substitute(b"k", b"${}", &vars).unwrap_err(), "empty variable name", 0);
}

#[test]
fn unchecked_double_still_needs_grammar() {
    assert!(parse_unsigned_double(b"1e", 0, false).is_err());
}
