//! # Snapshot Testing Support
//!
//! Utilities for testing the scanner via compact tag tables and invariant
//! checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts scanned tags to a stable `TagSnap` form
//!   (kind, flags, header level, extracted text) for snapshots and tables
//! - **`invariants`**: Runtime checks for scanner correctness (bounds in both
//!   coordinates, ordered non-overlapping spans, only whitespace left
//!   uncovered)
//!
//! ## Testing Strategy
//!
//! Fixture documents under `tests/fixtures/` are normalized and compared
//! against YAML snapshots (`insta`); short behaviour cases are pinned in
//! rstest tables. Every input also runs through the invariant checks.

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{TagSnap, normalize};
