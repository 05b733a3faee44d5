use crate::scanning::{
    buffer::Buffer,
    cursor::{Cursor, Position},
};

/// Copies `char_count` host units starting at `byte_offset`, dropping the
/// backslash of every escape and keeping the escaped character.
///
/// Decoding is lenient: undecodable bytes come out as U+FFFD. Offsets past
/// the end of the buffer are clamped.
pub fn escaped_substring(buffer: &Buffer<'_>, byte_offset: usize, char_count: usize) -> String {
    let bytes = buffer.as_bytes();
    let start = byte_offset.min(buffer.len());
    let mut out = Vec::with_capacity(char_count.min(bytes.len() - start));
    let mut cur = Cursor::new(*buffer, Position::new(start, 0));

    while cur.pos().char_index() < char_count && !cur.eof() {
        if cur.at_escape() {
            cur.bump_lenient();
        }
        let from = cur.pos().byte_offset();
        cur.bump_lenient();
        out.extend_from_slice(&bytes[from..cur.pos().byte_offset()]);
    }
    String::from_utf8_lossy(&out).into_owned()
}
