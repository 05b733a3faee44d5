//! # Delimiter Kinds
//!
//! Types that own the syntax of each special tag. The matchers read the
//! constants and rule tables here and never hardcode `#`, `*`, `_` or `~`.
//!
//! ## Types
//!
//! - **`Header`**: `MARK = b'#'`, `MAX_LEVEL = 6`
//! - **`EmphasisRules`**: one row per emphasis trigger, consumed uniformly by
//!   the emphasis matcher

pub mod emphasis;
pub mod header;

pub use emphasis::EmphasisRules;
pub use header::Header;
