pub mod error;
pub mod extract;
pub mod scanning;

// Re-export key types for easier usage
pub use error::{DecodeError, ScanError};
pub use extract::escaped_substring;
pub use scanning::{
    Buffer, CharUnit, Emphasis, Position, ScanOptions, StyleFlags, TagKind, TagRecord, scan,
};

/// Scans `text` with default options.
///
/// # Errors
/// Fails only when the tag list cannot grow.
pub fn find_tags(text: &str) -> Result<Vec<TagRecord>, ScanError> {
    scan(&Buffer::new(text, CharUnit::Scalar), &ScanOptions::default())
}

/// Scans raw bytes, counting characters in `options.char_unit`.
///
/// Bytes need not be valid UTF-8; tag search stops at the first byte that
/// does not decode and the rest becomes plain text.
///
/// # Errors
/// Fails only when the tag list cannot grow.
pub fn find_tags_in(bytes: &[u8], options: &ScanOptions) -> Result<Vec<TagRecord>, ScanError> {
    scan(&Buffer::from_bytes(bytes, options.char_unit), options)
}
