//! UniFFI bindings for markdown-tagscan mobile apps
//!
//! Exposes the tag scanner to Kotlin and Swift hosts. All character
//! positions crossing this boundary are UTF-16 code units, matching JVM and
//! Foundation string indices; byte positions index the UTF-8 encoding.

use markdown_tagscan_engine::{Buffer, CharUnit, ScanOptions, TagKind, TagRecord, scan};

uniffi::setup_scaffolding!();

/// Number of integers per tag in [`find_native_tags`] output.
pub const TAG_FIELD_COUNT: usize = 9;

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Scan error: {reason}")]
    ScanError { reason: String },
    #[error("Input too large: {reason}")]
    InputTooLarge { reason: String },
}

impl From<markdown_tagscan_engine::ScanError> for FfiError {
    fn from(err: markdown_tagscan_engine::ScanError) -> Self {
        FfiError::ScanError {
            reason: err.to_string(),
        }
    }
}

fn scan_utf16(text: &str) -> Result<Vec<TagRecord>, FfiError> {
    let buffer = Buffer::new(text, CharUnit::Utf16);
    Ok(scan(&buffer, &ScanOptions::with_unit(CharUnit::Utf16))?)
}

fn wire<T: TryFrom<usize>>(value: usize, field: &str) -> Result<T, FfiError> {
    T::try_from(value).map_err(|_| FfiError::InputTooLarge {
        reason: format!("{field} {value} does not fit the wire format"),
    })
}

// ============ DTOs ============

/// One scanned tag.
///
/// Character positions are UTF-16 code units; `*_byte` fields are UTF-8
/// byte offsets into the same text.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct TagDto {
    /// Tag type: "normal", "paragraph", "text_style" or "header"
    pub kind: String,
    /// Style bitmask: 1 italics, 2 bold, 4 strikethrough, 0x40000000 escaped
    pub flags: u32,
    pub start_position: u32,
    pub end_position: u32,
    pub start_text: u32,
    pub end_text: u32,
    pub start_byte: u32,
    pub end_byte: u32,
    pub start_text_byte: u32,
    pub end_text_byte: u32,
    /// Header level for headers, 1 otherwise
    pub size_for_type: u8,
}

impl TagDto {
    fn from_engine(tag: &TagRecord) -> Result<Self, FfiError> {
        let kind = match tag.kind {
            TagKind::Normal => "normal",
            TagKind::Paragraph => "paragraph",
            TagKind::TextStyle => "text_style",
            TagKind::Header => "header",
        };
        Ok(Self {
            kind: kind.to_string(),
            flags: tag.flags.bits(),
            start_position: wire(tag.start_position.char_index(), "start position")?,
            end_position: wire(tag.end_position.char_index(), "end position")?,
            start_text: wire(tag.start_text.char_index(), "start text")?,
            end_text: wire(tag.end_text.char_index(), "end text")?,
            start_byte: wire(tag.start_position.byte_offset(), "start byte")?,
            end_byte: wire(tag.end_position.byte_offset(), "end byte")?,
            start_text_byte: wire(tag.start_text.byte_offset(), "start text byte")?,
            end_text_byte: wire(tag.end_text.byte_offset(), "end text byte")?,
            size_for_type: tag.size_for_type,
        })
    }

    fn is_escaped(&self) -> bool {
        self.flags & markdown_tagscan_engine::StyleFlags::ESCAPED.bits() != 0
    }
}

fn extract(text: &str, escaped: bool, start_byte: u32, end_byte: u32, units: u32) -> String {
    let buffer = Buffer::new(text, CharUnit::Utf16);
    let (start, end) = (start_byte as usize, end_byte as usize);
    if escaped {
        return markdown_tagscan_engine::escaped_substring(&buffer, start, units as usize);
    }
    let bytes = buffer.as_bytes();
    let end = end.min(bytes.len());
    String::from_utf8_lossy(&bytes[start.min(end)..end]).into_owned()
}

// ============ Standalone Functions ============

/// Scans `text` into the flat integer encoding: nine values per tag,
/// `[kind, flags, start, end, start_text, end_text, start_byte,
/// start_text_byte, size_for_type]`.
#[uniffi::export]
pub fn find_native_tags(text: String) -> Result<Vec<i32>, FfiError> {
    let tags = scan_utf16(&text)?;
    let mut flat = Vec::with_capacity(tags.len() * TAG_FIELD_COUNT);
    for tag in &tags {
        flat.extend([
            i32::from(tag.kind.code()),
            wire(tag.flags.bits() as usize, "flags")?,
            wire(tag.start_position.char_index(), "start position")?,
            wire(tag.end_position.char_index(), "end position")?,
            wire(tag.start_text.char_index(), "start text")?,
            wire(tag.end_text.char_index(), "end text")?,
            wire(tag.start_position.byte_offset(), "start byte")?,
            wire(tag.start_text.byte_offset(), "start text byte")?,
            i32::from(tag.size_for_type),
        ]);
    }
    Ok(flat)
}

/// Scans `text` into tag records.
#[uniffi::export]
pub fn find_tags(text: String) -> Result<Vec<TagDto>, FfiError> {
    scan_utf16(&text)?.iter().map(TagDto::from_engine).collect()
}

/// Copies `length` UTF-16 units of `text` starting at UTF-8 byte
/// `byte_position`, with backslash escapes collapsed.
#[uniffi::export]
pub fn escaped_substring(text: String, byte_position: u32, length: u32) -> String {
    let buffer = Buffer::new(&text, CharUnit::Utf16);
    markdown_tagscan_engine::escaped_substring(&buffer, byte_position as usize, length as usize)
}

/// The text content of `tag`, without its markers.
#[uniffi::export]
pub fn extract_text(text: String, tag: TagDto) -> String {
    extract(
        &text,
        tag.is_escaped(),
        tag.start_text_byte,
        tag.end_text_byte,
        tag.end_text.saturating_sub(tag.start_text),
    )
}

/// The full span of `tag`, markers included.
#[uniffi::export]
pub fn extract_full(text: String, tag: TagDto) -> String {
    extract(
        &text,
        tag.is_escaped(),
        tag.start_byte,
        tag.end_byte,
        tag.end_position.saturating_sub(tag.start_position),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_native_tags_for_italics() {
        let flat = find_native_tags("*a*".to_string()).unwrap();
        assert_eq!(flat, vec![2, 1, 0, 3, 1, 2, 0, 1, 1]);
    }

    #[test]
    fn test_native_tags_use_utf16_positions() {
        let flat = find_native_tags("😀 **b**".to_string()).unwrap();
        assert_eq!(flat.len(), 2 * TAG_FIELD_COUNT);
        assert_eq!(&flat[..9], &[0, 0, 0, 3, 0, 3, 0, 0, 1]);
        assert_eq!(&flat[9..], &[2, 2, 3, 8, 5, 6, 5, 7, 1]);
    }

    #[test]
    fn test_native_tags_header_level_and_escape_flag() {
        let flat = find_native_tags("## Head\n\\*x".to_string()).unwrap();
        assert_eq!(&flat[..9], &[3, 0, 0, 8, 3, 7, 0, 3, 2]);
        assert_eq!(flat[9], 0);
        assert_eq!(flat[10], 0x4000_0000);
    }

    #[test]
    fn test_empty_text_has_no_tags() {
        assert!(find_native_tags(String::new()).unwrap().is_empty());
        assert!(find_tags(String::new()).unwrap().is_empty());
    }

    #[test]
    fn test_find_tags_and_extract() {
        let text = "Plain **bold** \\*star\\*".to_string();
        let tags = find_tags(text.clone()).unwrap();

        let kinds: Vec<_> = tags.iter().map(|tag| tag.kind.as_str()).collect();
        assert_eq!(kinds, vec!["normal", "text_style", "normal"]);

        assert_eq!(extract_text(text.clone(), tags[1].clone()), "bold");
        assert_eq!(extract_full(text.clone(), tags[1].clone()), "**bold**");
        assert_eq!(extract_text(text.clone(), tags[2].clone()), " *star*");
    }

    #[test]
    fn test_escaped_substring_export() {
        let text = "a \\_b\\_".to_string();
        assert_eq!(escaped_substring(text, 2, 5), "_b_");
    }

    #[test]
    fn test_wire_overflow_is_reported() {
        let err = wire::<i32>(usize::MAX, "end byte").unwrap_err();
        assert!(matches!(err, FfiError::InputTooLarge { .. }));
    }
}
