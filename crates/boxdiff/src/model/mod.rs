//! Data models for parsed diffs.

mod commit;
mod diff;

pub use commit::Commit;
pub use diff::{DiffHunk, ModificationPair, ParsedDiff, ParsedLine};
