//! # boxdiff
//!
//! Parse unified diffs (plain `git diff` or multi-commit `git log -p` output)
//! and pre-render them as fixed-width, box-drawn two-column tables that read
//! well in plain text.
//!
//! ## Design Principles
//!
//! The crate is **pure**: it takes text and returns text. It never runs git or
//! touches the filesystem, which keeps parsing and layout testable without
//! a repository. Display width is measured through the [`WidthProvider`]
//! trait so callers can plug in their own notion of a terminal column.
//!
//! ## Usage
//!
//! ```rust
//! use boxdiff::{parse_diff, DiffRenderer, UnicodeWidths};
//!
//! let diff = parse_diff("diff --git a/a.txt b/a.txt\n@@ -1 +1 @@\n-foo\n+bar\n");
//! assert_eq!(diff.hunks.len(), 1);
//!
//! let table = DiffRenderer::new(&UnicodeWidths).box_width(40).render(&diff);
//! for line in table.lines() {
//!     assert_eq!(unicode_width::UnicodeWidthStr::width(line), 40);
//! }
//! ```

pub mod model;
pub mod parser;
pub mod render;
pub mod traits;

// Re-export commonly used types
pub use model::{Commit, DiffHunk, ModificationPair, ParsedDiff, ParsedLine};
pub use parser::{parse_and_pair_lines, parse_diff};
pub use render::{
    render_diff, DiffRenderer, RenderOutput, UsedSymbols, DEFAULT_BOX_WIDTH, MIN_BOX_WIDTH,
};
pub use traits::{UnicodeWidths, WidthProvider};
