//! Probe-or-fill output.
//!
//! Printers run a single pass over their output. While a destination buffer
//! has room the bytes are stored; once it runs out the pass keeps counting
//! without writing, so the final position is always the exact end the output
//! needs. A printer called without a buffer (a probe) does only the counting.
//!
//! Invariants
//! - `Sink::pos` only ever grows.
//! - Bytes below `min(pos, buf.len())` hold the output written so far; nothing
//!   at or past `buf.len()` is touched.

/// Outcome of a fill operation (printers and pre-sized splits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    /// Everything fit; the payload is the cursor just past the output.
    Written(usize),
    /// The destination was too small; the payload is the exact end position
    /// (or slot count, for splits) that would have been required.
    NeedsCapacity(usize),
}

impl Fill {
    /// The end position (or slot count) the operation needs, whether or not it
    /// fit.
    #[must_use]
    pub fn required(self) -> usize {
        match self {
            Fill::Written(n) | Fill::NeedsCapacity(n) => n,
        }
    }

    /// The cursor just past the output, if everything fit.
    #[must_use]
    pub fn written(self) -> Option<usize> {
        match self {
            Fill::Written(n) => Some(n),
            Fill::NeedsCapacity(_) => None,
        }
    }

    /// `true` if the output fit into the destination.
    #[must_use]
    pub fn is_written(self) -> bool {
        matches!(self, Fill::Written(_))
    }
}

/// Write cursor over an optional destination.
pub(crate) struct Sink<'a> {
    buf: Option<&'a mut [u8]>,
    pos: usize,
}

impl<'a> Sink<'a> {
    pub(crate) fn fill(buf: &'a mut [u8], from: usize) -> Self {
        Self {
            buf: Some(buf),
            pos: from,
        }
    }

    pub(crate) fn probe(from: usize) -> Self {
        Self { buf: None, pos: from }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn push(&mut self, b: u8) {
        self.set(self.pos, b);
        self.pos += 1;
    }

    pub(crate) fn push_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    /// Overwrites an already emitted position, if it landed in the buffer.
    #[inline]
    pub(crate) fn set(&mut self, at: usize, b: u8) {
        if let Some(buf) = self.buf.as_deref_mut() {
            if let Some(slot) = buf.get_mut(at) {
                *slot = b;
            }
        }
    }

    pub(crate) fn finish(self) -> Fill {
        match self.buf {
            Some(buf) if self.pos > buf.len() => Fill::NeedsCapacity(self.pos),
            _ => Fill::Written(self.pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_while_room_then_counts() {
        let mut buf = [0u8; 3];
        let mut sink = Sink::fill(&mut buf, 1);
        sink.push_all(b"abcd");
        assert_eq!(sink.finish(), Fill::NeedsCapacity(5));
        assert_eq!(&buf, b"\0ab");
    }

    #[test]
    fn probe_never_truncates() {
        let mut sink = Sink::probe(2);
        sink.push_all(b"xyz");
        assert_eq!(sink.finish(), Fill::Written(5));
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut buf = [b'-'; 2];
        let mut sink = Sink::fill(&mut buf, 0);
        sink.push(b'1');
        sink.set(0, b'.');
        sink.set(9, b'!');
        assert_eq!(sink.finish(), Fill::Written(1));
        assert_eq!(&buf, b".-");
    }

    #[test]
    fn required_is_exact_either_way() {
        assert_eq!(Fill::Written(4).required(), 4);
        assert_eq!(Fill::NeedsCapacity(9).required(), 9);
        assert_eq!(Fill::NeedsCapacity(9).written(), None);
    }
}
