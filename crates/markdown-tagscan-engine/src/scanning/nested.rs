use log::debug;

use crate::error::ScanError;

use super::{
    buffer::Buffer,
    collector::Collector,
    matchers::find_next,
    options::ScanOptions,
    tag::{TagKind, TagRecord},
};

/// Emits `outer`, split around any emphasis nested inside its text.
///
/// The nested tag inherits the outer styling. Text before and after it is
/// emitted as fragments of `outer`; an empty fragment is folded into the
/// nested tag so the emitted spans still tile `outer` exactly.
pub fn resolve_nested(
    buffer: &Buffer<'_>,
    outer: TagRecord,
    depth: usize,
    options: &ScanOptions,
    out: &mut Collector,
) -> Result<(), ScanError> {
    if depth >= options.max_nesting_depth {
        debug!(
            "Nesting depth {depth} reached at byte {}, emitting unsplit",
            outer.start_position.byte_offset()
        );
        return out.push(outer);
    }

    let Some(mut inner) = find_next(buffer, outer.start_text, outer.end_text)
        .filter(|tag| tag.kind != TagKind::Header && tag.end_position < outer.end_position)
    else {
        return out.push(outer);
    };
    inner.flags |= outer.flags.text_style();

    let before = TagRecord::fragment(
        outer.kind,
        outer.flags,
        outer.start_position,
        outer.start_text,
        inner.start_position,
        inner.start_position,
    );
    let after = TagRecord::fragment(
        outer.kind,
        outer.flags,
        inner.end_position,
        inner.end_position,
        outer.end_position,
        outer.end_text,
    );

    if before.has_text() {
        out.push(before)?;
    } else {
        inner.start_position = outer.start_position;
    }
    if !after.has_text() {
        inner.end_position = outer.end_position;
    }
    resolve_nested(buffer, inner, depth + 1, options, out)?;
    if after.has_text() {
        out.push(after)?;
    }
    Ok(())
}
