use serde::{Deserialize, Serialize};

/// How character indices are counted.
///
/// Hosts index strings differently: Rust counts scalar values, JVM and JS
/// strings count UTF-16 code units. One convention holds for a whole scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharUnit {
    /// One unit per Unicode scalar value.
    #[default]
    Scalar,
    /// One unit per UTF-16 code unit (4-byte sequences count as two).
    Utf16,
}

impl CharUnit {
    /// Number of units occupied by a codepoint encoded in `utf8_len` bytes.
    #[must_use]
    pub const fn width(self, utf8_len: usize) -> usize {
        match self {
            CharUnit::Utf16 if utf8_len == 4 => 2,
            _ => 1,
        }
    }
}

/// Tunables for a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    pub char_unit: CharUnit,
    /// Emphasis nesting deeper than this is emitted unsplit.
    pub max_nesting_depth: usize,
}

impl ScanOptions {
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

    /// Default options counting characters in `char_unit`.
    #[must_use]
    pub fn with_unit(char_unit: CharUnit) -> Self {
        Self {
            char_unit,
            ..Self::default()
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            char_unit: CharUnit::Scalar,
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
