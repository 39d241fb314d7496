//! `${name}` expansion.
//!
//! Names are looked up through a [`SubstitutionSource`]. A resolved value is
//! expanded again before it is spliced in, so values may refer to other
//! names. A name may itself be built from a reference (`${${kind}_dir}`); the
//! inner part is expanded first.
//!
//! Invariants
//! - Text outside `${...}` is copied unchanged; a `$` not followed by `{` is
//!   literal.
//! - A name the source does not know is kept verbatim, braces included.
//! - Expansion nests at most [`SubstituteOptions::max_depth`] levels, so a
//!   value that refers back to itself fails instead of looping.
//! - Errors raised while expanding a resolved value are reported at the `$`
//!   in the caller's buffer that led to it.

use alloc::{
    borrow::Cow,
    collections::BTreeMap,
    string::String,
    vec::Vec,
};
use core::ops::Range;

use bstr::ByteSlice;

use crate::{
    error::{ErrorKind, LexError},
    options::SubstituteOptions,
};

/// Resolves names for [`substitute`].
///
/// Implemented for closures returning an owned value and for `BTreeMap`s
/// keyed by `String` or `Vec<u8>`.
pub trait SubstitutionSource {
    /// The value bound to `name`, or `None` if it has none.
    fn resolve(&self, name: &[u8]) -> Option<Cow<'_, [u8]>>;
}

impl<F> SubstitutionSource for F
where
    F: Fn(&[u8]) -> Option<Vec<u8>>,
{
    fn resolve(&self, name: &[u8]) -> Option<Cow<'_, [u8]>> {
        self(name).map(Cow::Owned)
    }
}

impl SubstitutionSource for BTreeMap<String, String> {
    fn resolve(&self, name: &[u8]) -> Option<Cow<'_, [u8]>> {
        let name = core::str::from_utf8(name).ok()?;
        self.get(name).map(|v| Cow::Borrowed(v.as_bytes()))
    }
}

impl SubstitutionSource for BTreeMap<Vec<u8>, Vec<u8>> {
    fn resolve(&self, name: &[u8]) -> Option<Cow<'_, [u8]>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_slice()))
    }
}

/// Expands every `${name}` in `buf`.
///
/// `key` names the entry being expanded and only appears in log events.
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// use bufcodec::substitute;
///
/// let vars = BTreeMap::from([
///     ("a".to_string(), "1".to_string()),
///     ("b".to_string(), "${a}".to_string()),
/// ]);
/// assert_eq!(substitute(b"x", b"${a}${b}", &vars).unwrap(), b"11");
/// ```
///
/// # Errors
///
/// See [`substitute_with`].
pub fn substitute<S>(key: &[u8], buf: &[u8], source: &S) -> Result<Vec<u8>, LexError>
where
    S: SubstitutionSource + ?Sized,
{
    substitute_with(key, buf, 0..buf.len(), source, SubstituteOptions::default())
}

/// Expands every `${name}` in `buf[range]`.
///
/// # Errors
///
/// - [`ErrorKind::UnbalancedBraces`] at the `$` of a `${` that is never
///   closed.
/// - [`ErrorKind::EmptyName`] at the `$` of `${}`.
/// - [`ErrorKind::RecursionTooDeep`] at the outermost `$` once resolutions
///   nest deeper than `options.max_depth`.
pub fn substitute_with<S>(
    key: &[u8],
    buf: &[u8],
    range: Range<usize>,
    source: &S,
    options: SubstituteOptions,
) -> Result<Vec<u8>, LexError>
where
    S: SubstitutionSource + ?Sized,
{
    let mut out = Vec::with_capacity(range.len());
    Expander {
        key,
        source,
        max_depth: options.max_depth,
    }
    .expand(buf, range, 0, &mut out)?;
    Ok(out)
}

struct Expander<'k, 's, S: ?Sized> {
    key: &'k [u8],
    source: &'s S,
    max_depth: usize,
}

impl<S> Expander<'_, '_, S>
where
    S: SubstitutionSource + ?Sized,
{
    fn expand(
        &self,
        buf: &[u8],
        range: Range<usize>,
        depth: usize,
        out: &mut Vec<u8>,
    ) -> Result<(), LexError> {
        if depth > self.max_depth {
            tracing::debug!(
                key = %self.key.as_bstr(),
                max_depth = self.max_depth,
                "substitution depth exceeded"
            );
            return Err(LexError::new(
                ErrorKind::RecursionTooDeep(self.max_depth),
                range.start,
            ));
        }

        let end = range.end.min(buf.len());
        let mut pos = range.start.min(end);
        while let Some(found) = buf[pos..end].find_byte(b'$') {
            let dollar = pos + found;
            out.extend_from_slice(&buf[pos..dollar]);
            if dollar + 1 >= end || buf[dollar + 1] != b'{' {
                out.push(b'$');
                pos = dollar + 1;
                continue;
            }

            let (close, nested) = closing_brace(buf, dollar, end)?;
            let name_range = dollar + 2..close;
            if name_range.is_empty() {
                return Err(LexError::new(ErrorKind::EmptyName, dollar));
            }
            let name: Cow<'_, [u8]> = if nested {
                let mut expanded = Vec::with_capacity(name_range.len());
                self.expand(buf, name_range, depth + 1, &mut expanded)?;
                Cow::Owned(expanded)
            } else {
                Cow::Borrowed(&buf[name_range])
            };

            if let Some(value) = self.source.resolve(&name) {
                tracing::trace!(
                    key = %self.key.as_bstr(),
                    name = %name.as_bstr(),
                    value = %value.as_bstr(),
                    depth,
                    "resolved"
                );
                self.expand(&value, 0..value.len(), depth + 1, out)
                    .map_err(|err| LexError::new(err.kind, dollar))?;
            } else {
                tracing::debug!(
                    key = %self.key.as_bstr(),
                    name = %name.as_bstr(),
                    "unresolved name kept verbatim"
                );
                out.extend_from_slice(&buf[dollar..=close]);
            }
            pos = close + 1;
        }
        out.extend_from_slice(&buf[pos..end]);
        Ok(())
    }
}

/// Finds the `}` matching the `${` at `dollar`, counting nested braces.
/// Also reports whether the name contains a `${` of its own.
fn closing_brace(buf: &[u8], dollar: usize, end: usize) -> Result<(usize, bool), LexError> {
    let mut level = 1usize;
    let mut nested = false;
    for i in dollar + 2..end {
        match buf[i] {
            b'{' => {
                nested |= buf[i - 1] == b'$';
                level += 1;
            }
            b'}' => {
                level -= 1;
                if level == 0 {
                    return Ok((i, nested));
                }
            }
            _ => {}
        }
    }
    Err(LexError::new(ErrorKind::UnbalancedBraces, dollar))
}
