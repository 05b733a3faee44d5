use std::borrow::Cow;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::extract::escaped_substring;

use super::{buffer::Buffer, cursor::Position};

/// What a tag describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TagKind {
    /// Plain text.
    Normal = 0,
    /// Zero-width marker telling the consumer to insert a paragraph break.
    Paragraph = 1,
    /// Emphasis or strikethrough run.
    TextStyle = 2,
    /// ATX-style header line, level in `size_for_type`.
    Header = 3,
}

impl TagKind {
    /// Wire value used by the flat integer encoding.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

bitflags! {
    /// Styling and escape information attached to a tag.
    ///
    /// `BOLD | ITALICS` together mean bold-italic; use [`StyleFlags::emphasis`]
    /// to get it as a named case.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct StyleFlags: u32 {
        const ITALICS = 1 << 0;
        const BOLD = 1 << 1;
        const STRIKETHROUGH = 1 << 2;
        /// The span contains at least one backslash escape.
        const ESCAPED = 1 << 30;

        const BOLD_ITALICS = Self::BOLD.bits() | Self::ITALICS.bits();
        const TEXT_STYLE = Self::BOLD.bits() | Self::ITALICS.bits() | Self::STRIKETHROUGH.bits();
    }
}

/// Emphasis weight carried by a set of flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Emphasis {
    Plain,
    Italics,
    Bold,
    BoldItalics,
}

impl StyleFlags {
    /// Flags for an emphasis delimiter run of the given length.
    #[must_use]
    pub const fn for_strength(strength: usize) -> Self {
        match strength {
            1 => Self::ITALICS,
            2 => Self::BOLD,
            3 => Self::BOLD_ITALICS,
            _ => Self::empty(),
        }
    }

    #[must_use]
    pub fn emphasis(self) -> Emphasis {
        match (self.contains(Self::BOLD), self.contains(Self::ITALICS)) {
            (true, true) => Emphasis::BoldItalics,
            (true, false) => Emphasis::Bold,
            (false, true) => Emphasis::Italics,
            (false, false) => Emphasis::Plain,
        }
    }

    #[must_use]
    pub fn text_style(self) -> Self {
        self & Self::TEXT_STYLE
    }
}

/// A labelled span of the input.
///
/// `start_position..end_position` covers the whole construct including its
/// markers; `start_text..end_text` is the semantic content. For every tag
/// `start_position <= start_text <= end_text <= end_position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub kind: TagKind,
    pub flags: StyleFlags,
    pub start_position: Position,
    pub end_position: Position,
    pub start_text: Position,
    pub end_text: Position,
    /// Header level (1-6) for headers, otherwise 1.
    pub size_for_type: u8,
}

impl TagRecord {
    pub const DEFAULT_SIZE: u8 = 1;

    pub(crate) fn fragment(
        kind: TagKind,
        flags: StyleFlags,
        start_position: Position,
        start_text: Position,
        end_position: Position,
        end_text: Position,
    ) -> Self {
        Self {
            kind,
            flags,
            start_position,
            end_position,
            start_text,
            end_text,
            size_for_type: Self::DEFAULT_SIZE,
        }
    }

    pub(crate) fn paragraph_marker(at: Position) -> Self {
        Self::fragment(TagKind::Paragraph, StyleFlags::empty(), at, at, at, at)
    }

    /// Plain text ending at `end`, minus one trailing newline.
    ///
    /// Returns `None` when no text is left.
    pub(crate) fn normal(
        buffer: &Buffer<'_>,
        start_position: Position,
        start_text: Position,
        end: Position,
    ) -> Option<Self> {
        let mut end_text = end;
        if end.byte_offset() > 0 && buffer.byte_at(end.byte_offset() - 1) == Some(b'\n') {
            end_text = end_text.retreat_ascii();
        }
        (start_text < end_text).then(|| {
            Self::fragment(
                TagKind::Normal,
                StyleFlags::empty(),
                start_position,
                start_text,
                end,
                end_text,
            )
        })
    }

    pub fn has_text(&self) -> bool {
        self.start_text < self.end_text
    }

    pub fn emphasis(&self) -> Emphasis {
        self.flags.emphasis()
    }

    /// The semantic content, with escapes collapsed when the tag is escaped.
    pub fn text<'b>(&self, buffer: &Buffer<'b>) -> Cow<'b, str> {
        self.extract(buffer, self.start_text, self.end_text)
    }

    /// The whole span including markers, with escapes collapsed when the tag
    /// is escaped.
    pub fn full_text<'b>(&self, buffer: &Buffer<'b>) -> Cow<'b, str> {
        self.extract(buffer, self.start_position, self.end_position)
    }

    fn extract<'b>(&self, buffer: &Buffer<'b>, start: Position, end: Position) -> Cow<'b, str> {
        if self.flags.contains(StyleFlags::ESCAPED) {
            let units = end.char_index().saturating_sub(start.char_index());
            Cow::Owned(escaped_substring(buffer, start.byte_offset(), units))
        } else {
            String::from_utf8_lossy(buffer.slice(start, end))
        }
    }
}
