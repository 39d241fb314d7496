#![no_main]
use std::{cell::RefCell, collections::BTreeMap};

use arbitrary::Arbitrary;
use bufcodec::{
    Fill, Number, NumberKinds, Radix, decode_string, decode_string_extended,
    parse_extended_long, parse_number, parse_signed_double, parse_signed_long, print_double,
    print_escaped, print_long, probe_double, probe_escaped, probe_long, substitute,
    validate_number,
};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 1; // kinds mask (4 bits) + check flag

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

/// Fragments that steer inputs into the interesting corners of the grammars.
static TOKEN_TABLE: &[&[u8]] = &[
    b"0", b"7", b"-", b"+", b".", b"e", b"E-", b"e+", b"f", b"L", b"0x", b"0b",
    b"2147483648", b"9223372036854775808", b"1e308", b"1e-400",
    b"\\", b"\\u", b"\\uD83D", b"\\uDE00", b"\\0", b"\\0x", b"\\n", b"\"",
    b"$", b"${", b"}", b"${a}", b"${${b}}",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x1F);
        let mut prefix = HEADER;
        while prefix < max_size.min(HEADER + 64) {
            let limit = max_size - prefix;
            let written = append_token(&mut data[prefix..], limit);
            if written == 0 {
                break;
            }
            prefix += written;
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends either a table token or a printed arbitrary number.
fn append_token(buf: &mut [u8], limit: usize) -> usize {
    let token: Vec<u8> = with_rng(|rng| {
        if rng.random_bool(0.7) {
            TOKEN_TABLE[rng.random_range(0..TOKEN_TABLE.len())].to_vec()
        } else {
            let bytes: Vec<u8> = (0..16).map(|_| rng.random::<u8>()).collect();
            let n = ArbitraryNumber::arbitrary(&mut arbitrary::Unstructured::new(&bytes))
                .map_or(Number::Int(0), |n| n.0);
            printed(n)
        }
    });
    if token.len() > limit {
        return 0;
    }
    buf[..token.len()].copy_from_slice(&token);
    token.len()
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryNumber(Number);

impl<'a> Arbitrary<'a> for ArbitraryNumber {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let n = match u.choose_index(4)? {
            0 => Number::Int(u.arbitrary()?),
            1 => Number::Long(u.arbitrary()?),
            2 => Number::Float(u.arbitrary()?),
            _ => Number::Double(u.arbitrary()?),
        };
        Ok(ArbitraryNumber(n))
    }
}

/// Prints `n` and checks that the probe agreed and that integers parse back.
fn printed(n: Number) -> Vec<u8> {
    let integer = match n {
        Number::Int(v) => Some(i64::from(v)),
        Number::Long(v) => Some(v),
        Number::Float(_) | Number::Double(_) => None,
    };
    let (len, fill, buf) = if let Some(v) = integer {
        let len = probe_long(0, v);
        let mut buf = vec![0; len];
        (len, print_long(&mut buf, 0, v), buf)
    } else {
        let len = probe_double(0, n.as_f64());
        let mut buf = vec![0; len];
        (len, print_double(&mut buf, 0, n.as_f64()), buf)
    };
    assert_eq!(fill, Fill::Written(len), "probe and print disagree");
    if let Some(v) = integer {
        assert_eq!(parse_signed_long(&buf, 0, Radix::Decimal, true), Ok((len, v)));
    }
    buf
}

fn codec(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let flags = data[0];
    let kinds = NumberKinds::from_bits(flags);
    let check_overflow = flags & 0x10 != 0;
    let text = &data[HEADER..];

    for from in 0..=text.len() {
        let parsed = parse_number(text, from, kinds, check_overflow);
        let validated = validate_number(text, from, kinds, check_overflow);
        match (parsed, validated) {
            (Ok((end, n)), Ok((vend, kind))) => {
                assert_eq!(end, vend);
                assert_eq!(n.kind(), kind);
                match n {
                    Number::Int(_) | Number::Long(_) => {
                        printed(n);
                    }
                    Number::Double(v) if v.is_finite() => {
                        let buf = printed(n);
                        assert!(parse_signed_double(&buf, 0, false).is_ok());
                    }
                    _ => {}
                }
            }
            (Err(err), Err(bad)) => assert_eq!(err.offset, bad.0),
            (p, v) => panic!("parse {p:?} and validate {v:?} disagree"),
        }
        let _ = parse_extended_long(text, from, check_overflow);
    }

    let mut out = Vec::new();
    if decode_string(text, 0, b'"', &mut out).is_ok() {
        if let Ok(s) = std::str::from_utf8(&out) {
            let len = probe_escaped(0, s, false);
            let mut buf = vec![0; len + 1];
            assert_eq!(print_escaped(&mut buf, 0, s, false), Fill::Written(len));
            buf[len] = b'"';
            let mut again = Vec::new();
            assert_eq!(decode_string(&buf, 0, b'"', &mut again), Ok(len + 1));
            assert_eq!(again, out);
        }
    }
    out.clear();
    let _ = decode_string_extended(text, 0, b'"', &mut out);

    let vars = BTreeMap::from([
        ("a".to_owned(), "${b}".to_owned()),
        ("b".to_owned(), "1".to_owned()),
        ("c".to_owned(), "${c}".to_owned()),
    ]);
    let _ = substitute(b"fuzz", text, &vars);
}

fuzz_target!(|data: &[u8]| codec(data));
