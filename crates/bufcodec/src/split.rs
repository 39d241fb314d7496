//! Two-pass split and single-allocation join.
//!
//! Splitting first counts the delimiters, then slices, so the result is
//! allocated once at its final size. Pieces borrow from the input.

use alloc::vec::Vec;

use bstr::ByteSlice;

use crate::fill::Fill;

fn count_pieces(buf: &[u8], delim: &[u8]) -> usize {
    if delim.is_empty() {
        1
    } else {
        buf.find_iter(delim).count() + 1
    }
}

fn for_each_piece<'a>(buf: &'a [u8], delim: &[u8], mut f: impl FnMut(&'a [u8])) {
    if delim.is_empty() {
        f(buf);
        return;
    }
    let mut start = 0;
    for at in buf.find_iter(delim) {
        f(&buf[start..at]);
        start = at + delim.len();
    }
    f(&buf[start..]);
}

/// Splits `buf` on every `delim` byte.
///
/// Adjacent delimiters yield empty pieces, and an empty input yields one
/// empty piece.
///
/// ```rust
/// use bufcodec::split;
///
/// assert_eq!(split(b"a,,b", b','), [&b"a"[..], b"", b"b"]);
/// ```
#[must_use]
pub fn split(buf: &[u8], delim: u8) -> Vec<&[u8]> {
    split_str(buf, &[delim])
}

/// Splits `buf` on every non-overlapping occurrence of `delim`, scanning left
/// to right. An empty `delim` returns `buf` whole.
#[must_use]
pub fn split_str<'a>(buf: &'a [u8], delim: &[u8]) -> Vec<&'a [u8]> {
    let mut pieces = Vec::with_capacity(count_pieces(buf, delim));
    for_each_piece(buf, delim, |piece| pieces.push(piece));
    pieces
}

/// [`split`] into caller-provided slots.
///
/// Returns [`Fill::Written`] with the number of pieces stored at the front of
/// `out`, or [`Fill::NeedsCapacity`] with the number of slots required, in
/// which case `out` is left untouched.
pub fn split_into<'a>(buf: &'a [u8], delim: u8, out: &mut [&'a [u8]]) -> Fill {
    split_str_into(buf, &[delim], out)
}

/// [`split_str`] into caller-provided slots. See [`split_into`].
pub fn split_str_into<'a>(buf: &'a [u8], delim: &[u8], out: &mut [&'a [u8]]) -> Fill {
    let needed = count_pieces(buf, delim);
    if needed > out.len() {
        tracing::trace!(needed, available = out.len(), "split needs more slots");
        return Fill::NeedsCapacity(needed);
    }
    let mut slots = out.iter_mut();
    for_each_piece(buf, delim, |piece| {
        if let Some(slot) = slots.next() {
            *slot = piece;
        }
    });
    Fill::Written(needed)
}

/// Concatenates `parts` with `delim` between each pair.
///
/// The output is sized up front; `join(d, &split_str(s, d)) == s` for any
/// non-empty `d`.
#[must_use]
pub fn join<P: AsRef<[u8]>>(delim: &[u8], parts: &[P]) -> Vec<u8> {
    let Some((first, rest)) = parts.split_first() else {
        return Vec::new();
    };
    let len = parts.iter().map(|p| p.as_ref().len()).sum::<usize>()
        + delim.len() * rest.len();
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(first.as_ref());
    for part in rest {
        out.extend_from_slice(delim);
        out.extend_from_slice(part.as_ref());
    }
    out
}
