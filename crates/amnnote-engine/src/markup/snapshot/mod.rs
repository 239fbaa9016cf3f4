//! # Snapshot Testing Support
//!
//! Utilities for checking parser output in tests and benches.
//!
//! - **`dump`**: renders analyzed blocks as stable text for inline `insta`
//!   snapshots, and folds runs into maximal runs with [`coalesce`]
//! - **`invariants`**: runtime checks for parser correctness (spans in bounds,
//!   markers ordered and disjoint, content spans reproducing block text)

pub mod dump;
pub mod invariants;

pub use dump::{coalesce, dump};
pub use invariants::check as invariants;
