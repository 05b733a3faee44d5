use crate::error::ScanError;

use super::{
    cursor::{Cursor, Position},
    options::CharUnit,
};

/// Read-only view over the UTF-8 input and its length in host character units.
///
/// The bytes are not required to be valid UTF-8; the scanner degrades to
/// plain text where decoding fails.
#[derive(Debug, Clone, Copy)]
pub struct Buffer<'a> {
    bytes: &'a [u8],
    char_len: usize,
    unit: CharUnit,
}

impl<'a> Buffer<'a> {
    pub fn new(text: &'a str, unit: CharUnit) -> Self {
        Self::from_bytes(text.as_bytes(), unit)
    }

    /// Wraps raw bytes, counting characters the same way the scanner steps
    /// (undecodable bytes count as one unit each).
    pub fn from_bytes(bytes: &'a [u8], unit: CharUnit) -> Self {
        let mut buffer = Self {
            bytes,
            char_len: 0,
            unit,
        };
        buffer.char_len = buffer.stepped_char_len();
        buffer
    }

    /// Wraps raw bytes with a character count supplied by the host.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidCharLength`] when `char_len` differs from
    /// the count the scanner steps in `unit`.
    pub fn with_char_len(bytes: &'a [u8], char_len: usize, unit: CharUnit) -> Result<Self, ScanError> {
        let buffer = Self::from_bytes(bytes, unit);
        if buffer.char_len != char_len {
            return Err(ScanError::InvalidCharLength {
                char_len,
                expected: buffer.char_len,
            });
        }
        Ok(buffer)
    }

    fn stepped_char_len(&self) -> usize {
        let mut cur = Cursor::new(*self, Position::ZERO);
        while !cur.eof() {
            cur.bump_lenient();
        }
        cur.pos().char_index()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length in host character units.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn unit(&self) -> CharUnit {
        self.unit
    }

    pub fn start(&self) -> Position {
        Position::ZERO
    }

    pub fn end(&self) -> Position {
        Position::new(self.bytes.len(), self.char_len)
    }

    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    /// A backslash escapes the following character unless that character is a
    /// newline or the buffer ends.
    pub fn is_escape_at(&self, offset: usize) -> bool {
        self.byte_at(offset) == Some(b'\\')
            && matches!(self.byte_at(offset + 1), Some(next) if next != b'\n')
    }

    /// True at the first byte of the buffer or right after a newline.
    pub fn is_line_start(&self, offset: usize) -> bool {
        offset == 0 || self.byte_at(offset - 1) == Some(b'\n')
    }

    /// Bytes between two positions, clamped to the buffer.
    pub fn slice(&self, start: Position, end: Position) -> &'a [u8] {
        let end = end.byte_offset().min(self.bytes.len());
        let start = start.byte_offset().min(end);
        &self.bytes[start..end]
    }
}
