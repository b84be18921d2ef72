//! Fixed-capacity `fmt::Write` sinks.
//!
//! core's float formatting is only reachable through `fmt::Write`, so these
//! adapters let it run without allocating: [`StackBuf`] captures short output
//! on the stack, [`LengthCounter`] measures output without storing it, and
//! [`SpanWriter`] streams into a caller's buffer once the length is known.

use core::fmt;

/// Stack buffer large enough for the shortest `{:e}` rendering of an
/// [`F128`](crate::F128): sign, 36 digits, point, `e`, sign and five exponent
/// digits.
pub(crate) struct StackBuf {
    buf: [u8; 48],
    len: usize,
}

impl StackBuf {
    pub(crate) const fn new() -> Self {
        Self {
            buf: [0; 48],
            len: 0,
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl fmt::Write for StackBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let new_len = self.len + bytes.len();
        if new_len > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..new_len].copy_from_slice(bytes);
        self.len = new_len;
        Ok(())
    }
}

/// Counts the bytes a formatting call would produce.
#[derive(Default)]
pub(crate) struct LengthCounter {
    pub(crate) len: usize,
}

impl fmt::Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.len += s.len();
        Ok(())
    }
}

/// Writes into a borrowed byte slice, failing instead of overrunning it.
pub(crate) struct SpanWriter<'a> {
    out: &'a mut [u8],
    pos: usize,
}

impl<'a> SpanWriter<'a> {
    pub(crate) fn new(out: &'a mut [u8]) -> Self {
        Self { out, pos: 0 }
    }

    pub(crate) const fn written(&self) -> usize {
        self.pos
    }
}

impl fmt::Write for SpanWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let end = self.pos + bytes.len();
        let dest = self.out.get_mut(self.pos..end).ok_or(fmt::Error)?;
        dest.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write as _;

    #[test]
    fn test_stack_buf_holds_longest_f64() {
        let mut buf = StackBuf::new();
        write!(buf, "{:e}", -2.225_073_858_507_201_4e-308_f64).unwrap();
        assert_eq!(buf.as_bytes(), b"-2.2250738585072014e-308");
    }

    #[test]
    fn test_stack_buf_rejects_overflow() {
        let mut buf = StackBuf::new();
        assert!(buf.write_str(&"x".repeat(49)).is_err());
    }

    #[test]
    fn test_length_counter() {
        let mut counter = LengthCounter::default();
        write!(counter, "{:.3}", 1.5_f64).unwrap();
        assert_eq!(counter.len, 5);
    }

    #[test]
    fn test_span_writer_stops_at_capacity() {
        let mut out = [0u8; 4];
        let mut w = SpanWriter::new(&mut out);
        assert!(w.write_str("abc").is_ok());
        assert!(w.write_str("de").is_err());
        assert_eq!(w.written(), 3);
        assert_eq!(&out[..3], b"abc");
    }
}
