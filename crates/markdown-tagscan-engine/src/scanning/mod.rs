//! # Tag Scanning
//!
//! Single-pass scanner that turns a UTF-8 buffer into an ordered list of
//! [`TagRecord`]s: headers, emphasis and strikethrough runs, paragraph
//! markers and plain text.
//!
//! ## Architecture
//!
//! Data flows one way, leaves first:
//!
//! - **`cursor`**: `Position` pairs a byte offset with a character index and
//!   only ever advances both together, one codepoint at a time
//! - **`buffer`**: read-only input view with its host character count
//! - **`tag`**: `TagRecord`, `TagKind` and `StyleFlags`
//! - **`kinds`**: delimiter constants and the per-trigger emphasis rules
//! - **`matchers`**: header and emphasis matchers plus `find_next`
//! - **`nested`**: splits an emphasis tag around emphasis nested inside it
//! - **`paragraph`**: splits plain text on blank lines
//! - **`collector`** / **`driver`**: own the output and run the loop
//!
//! ## Failure Policy
//!
//! Unmatched delimiters fall back to plain text. An undecodable byte or a
//! header marker with no text ends the search for special tags, and the
//! rest of the buffer becomes plain text. Only allocation failure is an
//! error.

pub mod buffer;
pub mod collector;
pub mod cursor;
pub mod driver;
pub mod kinds;
pub mod matchers;
pub mod nested;
pub mod options;
pub mod paragraph;
pub mod snapshot;
pub mod tag;

#[cfg(test)]
mod tests;

pub use buffer::Buffer;
pub use cursor::{Position, codepoint_size};
pub use driver::scan;
pub use options::{CharUnit, ScanOptions};
pub use tag::{Emphasis, StyleFlags, TagKind, TagRecord};
