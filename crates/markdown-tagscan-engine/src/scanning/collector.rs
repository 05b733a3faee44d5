use log::trace;

use crate::error::ScanError;

use super::tag::TagRecord;

/// Append-only output of a scan. Tags keep their emission order.
#[derive(Debug, Default)]
pub struct Collector {
    tags: Vec<TagRecord>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tag, reporting allocation failure instead of aborting.
    pub fn push(&mut self, tag: TagRecord) -> Result<(), ScanError> {
        self.tags.try_reserve(1)?;
        trace!(
            "{:?} {:?} bytes {}..{} text {}..{}",
            tag.kind,
            tag.flags,
            tag.start_position.byte_offset(),
            tag.end_position.byte_offset(),
            tag.start_text.byte_offset(),
            tag.end_text.byte_offset()
        );
        self.tags.push(tag);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[TagRecord] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<TagRecord> {
        self.tags
    }
}
