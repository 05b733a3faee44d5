use serde::Serialize;

use crate::error::DecodeError;

use super::buffer::Buffer;

/// A location in the buffer, tracked in bytes and in host character units.
///
/// Both coordinates only ever move together, one codepoint at a time, so
/// `byte_offset >= char_index` holds for every position a scan produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    byte_offset: usize,
    char_index: usize,
}

impl Position {
    pub const ZERO: Position = Position {
        byte_offset: 0,
        char_index: 0,
    };

    /// Only used for positions whose coordinates are known to agree, such as
    /// the end of a buffer.
    pub(crate) const fn new(byte_offset: usize, char_index: usize) -> Self {
        Self {
            byte_offset,
            char_index,
        }
    }

    #[must_use]
    pub const fn byte_offset(self) -> usize {
        self.byte_offset
    }

    #[must_use]
    pub const fn char_index(self) -> usize {
        self.char_index
    }

    fn advance(&mut self, bytes: usize, chars: usize) {
        self.byte_offset += bytes;
        self.char_index += chars;
    }

    /// Steps back over one single-byte character. The caller must know the
    /// preceding byte is ASCII.
    pub(crate) fn retreat_ascii(self) -> Self {
        Self {
            byte_offset: self.byte_offset - 1,
            char_index: self.char_index - 1,
        }
    }
}

/// Size in bytes of the UTF-8 sequence introduced by `lead`, or 0 when `lead`
/// cannot start a sequence.
#[must_use]
pub const fn codepoint_size(lead: u8) -> usize {
    if lead & 0x80 == 0x00 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        0
    }
}

/// Codepoint-at-a-time cursor over a [`Buffer`].
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    buffer: Buffer<'a>,
    pos: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: Buffer<'a>, pos: Position) -> Self {
        Self { buffer, pos }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    pub fn eof(&self) -> bool {
        self.pos.byte_offset >= self.buffer.len()
    }

    /// Peeks at the lead byte of the current codepoint.
    pub fn peek(&self) -> Option<u8> {
        self.buffer.byte_at(self.pos.byte_offset)
    }

    /// True when the cursor sits on a backslash that escapes the next character.
    pub fn at_escape(&self) -> bool {
        self.buffer.is_escape_at(self.pos.byte_offset)
    }

    /// Advances over one codepoint, failing on bytes that do not decode.
    pub fn bump(&mut self) -> Result<(), DecodeError> {
        let offset = self.pos.byte_offset;
        let byte = self.peek().ok_or(DecodeError::EndOfInput { offset })?;
        let size = codepoint_size(byte);
        if size == 0 {
            return Err(DecodeError::InvalidLead { offset, byte });
        }
        if offset + size > self.buffer.len() {
            return Err(DecodeError::Truncated { offset });
        }
        self.pos.advance(size, self.buffer.unit().width(size));
        Ok(())
    }

    /// Advances over a backslash and the character it escapes.
    pub fn bump_escape(&mut self) -> Result<(), DecodeError> {
        self.bump()?;
        self.bump()
    }

    /// Advances over one codepoint, treating an undecodable byte as a
    /// single-byte, single-unit character. Does nothing at end of input.
    pub fn bump_lenient(&mut self) {
        let offset = self.pos.byte_offset;
        let Some(byte) = self.peek() else {
            return;
        };
        let size = codepoint_size(byte);
        if size == 0 || offset + size > self.buffer.len() {
            self.pos.advance(1, 1);
        } else {
            self.pos.advance(size, self.buffer.unit().width(size));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanning::options::CharUnit;

    #[test]
    fn codepoint_sizes_from_lead_byte() {
        assert_eq!(codepoint_size(b'a'), 1);
        assert_eq!(codepoint_size(0xC3), 2);
        assert_eq!(codepoint_size(0xE2), 3);
        assert_eq!(codepoint_size(0xF0), 4);
        // Continuation bytes and 5+ byte leads are not valid starts
        assert_eq!(codepoint_size(0x80), 0);
        assert_eq!(codepoint_size(0xBF), 0);
        assert_eq!(codepoint_size(0xF8), 0);
        assert_eq!(codepoint_size(0xFF), 0);
    }

    #[test]
    fn cursor_basics() {
        let buffer = Buffer::new("hello", CharUnit::Scalar);
        let mut cur = Cursor::new(buffer, Position::ZERO);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        cur.bump().unwrap();
        assert_eq!(cur.pos(), Position::new(1, 1));
    }

    #[test]
    fn bump_advances_both_coordinates_over_multibyte() {
        let buffer = Buffer::new("é€😀", CharUnit::Scalar);
        let mut cur = Cursor::new(buffer, Position::ZERO);
        cur.bump().unwrap();
        assert_eq!(cur.pos(), Position::new(2, 1));
        cur.bump().unwrap();
        assert_eq!(cur.pos(), Position::new(5, 2));
        cur.bump().unwrap();
        assert_eq!(cur.pos(), Position::new(9, 3));
        assert!(cur.eof());
    }

    #[test]
    fn utf16_unit_counts_astral_codepoints_twice() {
        let buffer = Buffer::new("😀a", CharUnit::Utf16);
        let mut cur = Cursor::new(buffer, Position::ZERO);
        cur.bump().unwrap();
        assert_eq!(cur.pos(), Position::new(4, 2));
        cur.bump().unwrap();
        assert_eq!(cur.pos(), Position::new(5, 3));
    }

    #[test]
    fn bump_rejects_continuation_byte() {
        let buffer = Buffer::from_bytes(&[0x80, b'a'], CharUnit::Scalar);
        let mut cur = Cursor::new(buffer, Position::ZERO);
        assert_eq!(
            cur.bump(),
            Err(DecodeError::InvalidLead {
                offset: 0,
                byte: 0x80
            })
        );
        assert_eq!(cur.pos(), Position::ZERO);
    }

    #[test]
    fn bump_rejects_truncated_sequence() {
        let buffer = Buffer::from_bytes(&[b'a', 0xE2, 0x82], CharUnit::Scalar);
        let mut cur = Cursor::new(buffer, Position::ZERO);
        cur.bump().unwrap();
        assert_eq!(cur.bump(), Err(DecodeError::Truncated { offset: 1 }));
    }

    #[test]
    fn bump_at_eof_is_an_error() {
        let buffer = Buffer::new("x", CharUnit::Scalar);
        let mut cur = Cursor::new(buffer, Position::ZERO);
        cur.bump().unwrap();
        assert_eq!(cur.bump(), Err(DecodeError::EndOfInput { offset: 1 }));
    }

    #[test]
    fn lenient_bump_steps_over_garbage() {
        let buffer = Buffer::from_bytes(&[0xFF, 0xE2, 0x82], CharUnit::Scalar);
        let mut cur = Cursor::new(buffer, Position::ZERO);
        cur.bump_lenient();
        assert_eq!(cur.pos(), Position::new(1, 1));
        // Truncated lead also advances by one byte
        cur.bump_lenient();
        assert_eq!(cur.pos(), Position::new(2, 2));
        cur.bump_lenient();
        assert!(cur.eof());
        cur.bump_lenient();
        assert_eq!(cur.pos(), Position::new(3, 3));
    }

    #[test]
    fn escape_detection() {
        let buffer = Buffer::new("\\*\\\n\\", CharUnit::Scalar);
        let mut cur = Cursor::new(buffer, Position::ZERO);
        assert!(cur.at_escape());
        cur.bump_escape().unwrap();
        // Backslash before a newline is literal
        assert!(!cur.at_escape());
        cur.bump().unwrap();
        cur.bump().unwrap();
        // Trailing backslash is literal
        assert!(!cur.at_escape());
    }

    #[test]
    fn retreat_ascii_moves_both_coordinates() {
        let pos = Position::new(7, 4).retreat_ascii();
        assert_eq!(pos.byte_offset(), 6);
        assert_eq!(pos.char_index(), 3);
    }
}
