use crate::scanning::{
    buffer::Buffer,
    cursor::Position,
    tag::{TagKind, TagRecord},
};

fn is_dropped_whitespace(buffer: &Buffer<'_>, offset: usize) -> bool {
    matches!(buffer.byte_at(offset), Some(b' ' | b'\t' | b'\r' | b'\n')) || buffer.is_escape_at(offset)
}

fn ordered(a: Position, b: Position) -> bool {
    a.byte_offset() <= b.byte_offset() && a.char_index() <= b.char_index()
}

/// Validates scanner output invariants.
///
/// Asserts that:
/// - Every position lies within the buffer and has `byte_offset >= char_index`
/// - `start_position <= start_text <= end_text <= end_position` in both coordinates
/// - Non-paragraph spans are ordered and never overlap
/// - Input not covered by any span is whitespace (or an escaping backslash)
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(buffer: &Buffer<'_>, tags: &[TagRecord]) {
    let end = buffer.end();
    for tag in tags {
        for pos in [tag.start_position, tag.start_text, tag.end_text, tag.end_position] {
            assert!(
                ordered(pos, end),
                "position out of bounds: {pos:?} (buffer end: {end:?}) in {tag:?}"
            );
            assert!(
                pos.byte_offset() >= pos.char_index(),
                "char index ahead of byte offset: {pos:?} in {tag:?}"
            );
        }
        assert!(
            ordered(tag.start_position, tag.start_text)
                && ordered(tag.start_text, tag.end_text)
                && ordered(tag.end_text, tag.end_position),
            "tag bounds not nested: {tag:?}"
        );
        if tag.kind == TagKind::Paragraph {
            assert_eq!(
                tag.start_position, tag.end_position,
                "paragraph marker has width: {tag:?}"
            );
        }
    }

    let mut covered_to = buffer.start();
    for tag in tags.iter().filter(|tag| tag.kind != TagKind::Paragraph) {
        assert!(
            ordered(covered_to, tag.start_position),
            "tag overlaps previous span ending at {covered_to:?}: {tag:?}"
        );
        assert_gap_is_whitespace(buffer, covered_to, tag.start_position);
        covered_to = tag.end_position;
    }
    assert_gap_is_whitespace(buffer, covered_to, end);
}

fn assert_gap_is_whitespace(buffer: &Buffer<'_>, from: Position, to: Position) {
    for offset in from.byte_offset()..to.byte_offset() {
        assert!(
            is_dropped_whitespace(buffer, offset),
            "uncovered non-whitespace byte {:?} at offset {offset}",
            buffer.byte_at(offset).map(char::from)
        );
    }
}
