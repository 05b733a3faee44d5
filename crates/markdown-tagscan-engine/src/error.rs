use std::collections::TryReserveError;

use crate::scanning::options::CharUnit;

/// Errors that abort a scan.
///
/// Malformed markup is never an error: unterminated emphasis or a header
/// without content simply fails to match and falls back to plain text.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Failed to grow tag output: {0}")]
    Allocation(#[from] TryReserveError),
    #[error("Character length {char_len} does not match the {expected} units in the buffer")]
    InvalidCharLength { char_len: usize, expected: usize },
    #[error("Buffer counts {buffer:?} units but the scan expects {options:?}")]
    UnitMismatch { buffer: CharUnit, options: CharUnit },
}

/// A codepoint that could not be decoded while stepping strictly.
///
/// Recoverable: the scanner stops looking for special tags and treats the
/// rest of the buffer as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Invalid UTF-8 lead byte {byte:#04x} at offset {offset}")]
    InvalidLead { offset: usize, byte: u8 },
    #[error("Truncated UTF-8 sequence at offset {offset}")]
    Truncated { offset: usize },
    #[error("Unexpected end of input at offset {offset}")]
    EndOfInput { offset: usize },
}
