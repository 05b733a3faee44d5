use log::debug;

use super::{
    buffer::Buffer,
    cursor::{Cursor, Position},
    kinds::{EmphasisRules, Header},
    tag::{StyleFlags, TagKind, TagRecord},
};

/// Finds the next header or emphasis tag starting in `from..limit`.
///
/// Returns `None` when the range holds no special tag. A header marker
/// without content and an undecodable byte also return `None`, which ends
/// the caller's search for the rest of the range.
pub fn find_next(buffer: &Buffer<'_>, from: Position, limit: Position) -> Option<TagRecord> {
    let mut cur = Cursor::new(*buffer, from);
    while cur.pos() < limit {
        let at = cur.pos();
        if cur.at_escape() {
            if let Err(err) = cur.bump_escape() {
                debug!("Ending tag search: {err}");
                return None;
            }
            continue;
        }
        let byte = cur.peek()?;
        if byte == Header::MARK && buffer.is_line_start(at.byte_offset()) {
            let header = match_header(buffer, at, limit);
            if header.is_none() {
                debug!("Ending tag search: header without content at byte {}", at.byte_offset());
            }
            return header;
        }
        if let Some(rules) = EmphasisRules::for_trigger(byte)
            && let Some(tag) = match_emphasis(buffer, rules, at, limit)
        {
            return Some(tag);
        }
        if let Err(err) = cur.bump() {
            debug!("Ending tag search: {err}");
            return None;
        }
    }
    None
}

/// Matches a header line whose first marker sits at `start`.
///
/// Up to [`Header::MAX_LEVEL`] consecutive markers set the level. Spaces
/// after the markers are skipped and the text runs to the end of the line.
pub fn match_header(buffer: &Buffer<'_>, start: Position, limit: Position) -> Option<TagRecord> {
    let mut cur = Cursor::new(*buffer, start);
    let mut flags = StyleFlags::empty();
    let mut level = 0u8;
    let mut markers_done = false;
    let mut start_text = None;
    let mut line_end = None;

    while cur.pos() < limit {
        let at = cur.pos();
        if cur.at_escape() {
            // An escaped marker or space is header text
            flags |= StyleFlags::ESCAPED;
            start_text.get_or_insert(at);
            cur.bump_escape().ok()?;
            continue;
        }
        let byte = cur.peek()?;
        match start_text {
            None if byte == Header::MARK && !markers_done && level < Header::MAX_LEVEL => {
                level += 1;
            }
            None if byte == Header::SEPARATOR => markers_done = true,
            None => start_text = Some(at),
            Some(_) if byte == b'\n' => {
                cur.bump().ok()?;
                line_end = Some((cur.pos(), at));
                break;
            }
            Some(_) => {}
        }
        cur.bump().ok()?;
    }

    let start_text = start_text?;
    let (end_position, end_text) = line_end.unwrap_or((limit, limit));
    let mut tag = TagRecord::fragment(
        TagKind::Header,
        flags,
        start,
        start_text,
        end_position,
        end_text,
    );
    tag.size_for_type = level;
    Some(tag)
}

/// Matches an emphasis or strikethrough run opened at `start`.
///
/// The opening run length is the strength. Content closes when a run of the
/// same trigger counts the strength back down to zero. With partial close
/// enabled, a shorter closing run resolves the matched part of the strength
/// and gives the unmatched opening delimiters back to the text.
pub fn match_emphasis(
    buffer: &Buffer<'_>,
    rules: &EmphasisRules,
    start: Position,
    limit: Position,
) -> Option<TagRecord> {
    let trigger = rules.trigger;
    let mut cur = Cursor::new(*buffer, start);
    let mut flags = StyleFlags::empty();
    let mut opener = [start; 3];
    let mut strength = 0;

    let start_text = loop {
        if cur.pos() >= limit {
            return None;
        }
        let at = cur.pos();
        match cur.peek() {
            Some(byte) if byte == trigger && strength < rules.max_strength => {
                opener[strength] = at;
                strength += 1;
            }
            Some(_) if rules.opens_at(strength) => break at,
            _ => return None,
        }
        cur.bump().ok()?;
    };

    let mut need = strength;
    let mut countdown_start = start_text;
    while cur.pos() < limit {
        if cur.at_escape() {
            flags |= StyleFlags::ESCAPED;
            cur.bump_escape().ok()?;
            continue;
        }
        let at = cur.pos();
        let byte = cur.peek()?;
        if byte == trigger {
            // A longer run of our own trigger may open a complete inner match
            if need == strength
                && strength < rules.max_strength
                && run_len(buffer, at, trigger) > strength
                && let Some(inner) = match_emphasis(buffer, rules, at, limit)
            {
                flags |= inner.flags & StyleFlags::ESCAPED;
                cur = Cursor::new(*buffer, inner.end_position);
                continue;
            }
            if need == strength {
                countdown_start = at;
            }
            need -= 1;
            if need == 0 {
                cur.bump().ok()?;
                return Some(TagRecord::fragment(
                    TagKind::TextStyle,
                    flags | rules.flags_for(strength),
                    start,
                    start_text,
                    cur.pos(),
                    countdown_start,
                ));
            }
        } else if need != strength {
            if rules.partial_close {
                let matched = strength - need;
                return Some(TagRecord::fragment(
                    TagKind::TextStyle,
                    flags | rules.flags_for(matched),
                    start,
                    opener[matched],
                    at,
                    countdown_start,
                ));
            }
            need = strength;
        }
        cur.bump().ok()?;
    }
    None
}

/// Length of the run of `byte` starting at `at`.
pub fn run_len(buffer: &Buffer<'_>, at: Position, byte: u8) -> usize {
    buffer.as_bytes()[at.byte_offset().min(buffer.len())..]
        .iter()
        .take_while(|&&b| b == byte)
        .count()
}
