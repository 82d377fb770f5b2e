//! # ByteBuffer
//!
//! A short-lived growable byte sequence used to compose one terminal frame
//! before a single write. Raw bytes rather than `String`, since row content
//! is not guaranteed to be valid UTF-8.

use std::fmt;

/// Growable byte buffer used to compose one rendered frame.
#[derive(Default)]
pub struct ByteBuffer(Vec<u8>);

impl ByteBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self { Self(Vec::new()) }

    /// Append raw bytes.
    pub fn push_bytes(&mut self, bytes: &[u8]) { self.0.extend_from_slice(bytes); }

    /// Append a single byte.
    pub fn push_byte(&mut self, byte: u8) { self.0.push(byte); }

    /// Append an ASCII/UTF-8 string, e.g. an ANSI escape sequence.
    pub fn push_str(&mut self, s: &str) { self.0.extend_from_slice(s.as_bytes()); }

    /// The accumulated bytes, ready for a single write to the terminal.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.0 }
}

impl fmt::Write for ByteBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::{self, Write as _};

    use super::ByteBuffer;

    #[test]
    fn accumulates_mixed_content() -> Result<(), fmt::Error> {
        let mut buf = ByteBuffer::new();
        buf.push_str("\x1b[H");
        buf.push_bytes(b"hello");
        buf.push_byte(b'!');
        write!(buf, "{}", 42)?;
        assert_eq!(buf.as_bytes(), b"\x1b[Hhello!42");
        Ok(())
    }

    #[test]
    fn starts_empty() {
        assert_eq!(ByteBuffer::new().as_bytes(), b"");
    }
}
