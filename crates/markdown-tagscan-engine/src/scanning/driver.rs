use log::debug;

use crate::error::ScanError;

use super::{
    buffer::Buffer,
    collector::Collector,
    cursor::Position,
    matchers::find_next,
    nested::resolve_nested,
    options::ScanOptions,
    paragraph::split_paragraphs,
    tag::{TagKind, TagRecord},
};

/// Scans `buffer` into an ordered list of tags.
///
/// Plain text between special tags is split into paragraphs, emphasis is
/// split around nested emphasis, and headers are emitted as matched.
///
/// # Errors
/// Returns [`ScanError::UnitMismatch`] if the buffer counts characters in a
/// different unit than `options`, and [`ScanError::Allocation`] if the output
/// cannot grow. Malformed markup and undecodable bytes never fail a scan.
pub fn scan(buffer: &Buffer<'_>, options: &ScanOptions) -> Result<Vec<TagRecord>, ScanError> {
    if buffer.unit() != options.char_unit {
        return Err(ScanError::UnitMismatch {
            buffer: buffer.unit(),
            options: options.char_unit,
        });
    }
    let mut out = Collector::new();
    let end = buffer.end();
    let mut position = buffer.start();

    while let Some(tag) = find_next(buffer, position, end) {
        if tag.start_position > position {
            emit_plain(buffer, position, tag.start_position, &mut out)?;
        }
        if tag.kind == TagKind::TextStyle {
            resolve_nested(buffer, tag, 0, options, &mut out)?;
        } else {
            out.push(tag)?;
        }
        position = tag.end_position;
    }
    if position < end {
        emit_plain(buffer, position, end, &mut out)?;
    }

    debug!(
        "Scanned {} bytes ({} units) into {} tags",
        buffer.len(),
        buffer.char_len(),
        out.len()
    );
    Ok(out.into_tags())
}

fn emit_plain(
    buffer: &Buffer<'_>,
    start: Position,
    end: Position,
    out: &mut Collector,
) -> Result<(), ScanError> {
    match TagRecord::normal(buffer, start, start, end) {
        Some(span) => split_paragraphs(buffer, span, out),
        None => Ok(()),
    }
}
