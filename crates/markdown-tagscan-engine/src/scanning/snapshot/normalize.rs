use serde::Serialize;

use crate::scanning::{
    buffer::Buffer,
    tag::{StyleFlags, TagKind, TagRecord},
};

/// Compact view of one tag for table assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagSnap {
    pub kind: TagKind,
    pub flags: StyleFlags,
    pub size: u8,
    pub text: String,
}

impl TagSnap {
    pub fn normal(text: &str) -> Self {
        Self::styled(TagKind::Normal, StyleFlags::empty(), text)
    }

    pub fn paragraph() -> Self {
        Self::styled(TagKind::Paragraph, StyleFlags::empty(), "")
    }

    pub fn style(flags: StyleFlags, text: &str) -> Self {
        Self::styled(TagKind::TextStyle, flags, text)
    }

    pub fn header(level: u8, text: &str) -> Self {
        Self {
            size: level,
            ..Self::styled(TagKind::Header, StyleFlags::empty(), text)
        }
    }

    /// Same tag with the escape flag set.
    pub fn escaped(mut self) -> Self {
        self.flags |= StyleFlags::ESCAPED;
        self
    }

    fn styled(kind: TagKind, flags: StyleFlags, text: &str) -> Self {
        Self {
            kind,
            flags,
            size: TagRecord::DEFAULT_SIZE,
            text: text.to_string(),
        }
    }
}

pub fn normalize(buffer: &Buffer<'_>, tags: &[TagRecord]) -> Vec<TagSnap> {
    tags.iter()
        .map(|tag| TagSnap {
            kind: tag.kind,
            flags: tag.flags,
            size: tag.size_for_type,
            text: tag.text(buffer).into_owned(),
        })
        .collect()
}
