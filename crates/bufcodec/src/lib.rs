//! Allocation-free scalar codecs over byte buffers.
//!
//! Every parser takes a buffer and a start cursor and returns the cursor just
//! past what it consumed, together with the value. Printers write at a cursor
//! into a caller-owned buffer and report a [`Fill`]: either the end they
//! reached or the exact end they would have needed. Nothing here keeps state
//! between calls; the exponent table is a compile-time constant.
//!
//! ```rust
//! use bufcodec::{Fill, Number, NumberKinds, parse_number, print_double};
//!
//! let (end, n) = parse_number(b"2.5e3,", 0, NumberKinds::ALL, true).unwrap();
//! assert_eq!((end, n), (5, Number::Double(2500.0)));
//!
//! let mut buf = [0u8; 8];
//! assert_eq!(print_double(&mut buf, 0, n.as_f64()), Fill::Written(4));
//! assert_eq!(&buf[..4], b"2500");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod escape;
mod fill;
mod float;
mod integer;
mod number;
mod options;
mod pow10;
mod print;
mod scan;
mod split;
mod substitute;

#[cfg(test)]
mod tests;

pub use error::{BadOffset, ErrorKind, LexError};
pub use escape::{
    decode_char, decode_string, decode_string_extended, print_escaped, print_escaped_char,
    probe_escaped, probe_escaped_char,
};
pub use fill::Fill;
pub use float::{parse_signed_double, parse_signed_float, parse_unsigned_double, parse_unsigned_float};
pub use integer::{
    Radix, parse_extended_int, parse_extended_long, parse_signed_int, parse_signed_long,
    parse_unsigned_int, parse_unsigned_long,
};
pub use number::{Number, NumberKind, parse_number, validate_number};
pub use options::{MAX_SUBST_DEPTH, NumberKinds, SubstituteOptions};
pub use pow10::{BOUND, EXP_TABLE};
pub use print::{print_double, print_long, probe_double, probe_long};
pub use scan::{parse_name, parse_name_with, skip_blank};
pub use split::{join, split, split_into, split_str, split_str_into};
pub use substitute::{SubstitutionSource, substitute, substitute_with};
