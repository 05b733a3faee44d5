use crate::error::ScanError;

use super::{
    buffer::Buffer,
    collector::Collector,
    cursor::Cursor,
    tag::{StyleFlags, TagRecord},
};

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Emits the plain-text `span` as one `Normal` tag per paragraph.
///
/// A blank line closes a paragraph. Consecutive paragraphs are separated by
/// a zero-width `Paragraph` marker, and whitespace-only text is dropped.
pub fn split_paragraphs(
    buffer: &Buffer<'_>,
    span: TagRecord,
    out: &mut Collector,
) -> Result<(), ScanError> {
    let mut region_start = span.start_position;
    let mut region_text = span.start_text;
    let mut line_start = span.start_text;
    // Text continuing a line after a special tag starts right away
    let mut content_start = (span.start_text.byte_offset() > 0
        && buffer.byte_at(span.start_text.byte_offset() - 1) != Some(b'\n'))
    .then_some(span.start_text);
    let mut paragraph_end = span.start_text;
    let mut newlines = 0;
    let mut escaped = false;
    let mut closed_any = false;

    let mut cur = Cursor::new(*buffer, span.start_text);
    while cur.pos() < span.end_text {
        let at = cur.pos();
        let Some(byte) = cur.peek() else {
            break;
        };
        if cur.at_escape() {
            escaped = true;
            cur.bump_lenient();
            continue;
        }
        if content_start.is_none() && !is_whitespace(byte) {
            content_start = Some(line_start);
        }
        cur.bump_lenient();

        if byte == b'\n' {
            line_start = cur.pos();
            let Some(content) = content_start else {
                continue;
            };
            newlines += 1;
            if newlines == 1 {
                paragraph_end = at;
                continue;
            }
            if closed_any {
                out.push(TagRecord::paragraph_marker(region_text))?;
            }
            if let Some(mut tag) = TagRecord::normal(buffer, region_start, content, paragraph_end) {
                if escaped {
                    tag.flags |= StyleFlags::ESCAPED;
                }
                out.push(tag)?;
                region_start = cur.pos();
                region_text = cur.pos();
            }
            escaped = false;
            closed_any = true;
            content_start = None;
            newlines = 0;
        } else if byte != b' ' {
            newlines = 0;
        }
    }

    if let Some(content) = content_start {
        if closed_any {
            out.push(TagRecord::paragraph_marker(region_text))?;
        }
        let mut tag = span;
        tag.start_position = region_start;
        tag.start_text = content;
        if escaped {
            tag.flags |= StyleFlags::ESCAPED;
        }
        if tag.has_text() {
            out.push(tag)?;
        }
    }
    Ok(())
}
