//! Diff data structures produced by the parser and consumed by the renderer.

use super::Commit;
use serde::Serialize;
use std::collections::BTreeMap;

/// A parsed diff, possibly spanning several commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDiff {
    /// All hunks, in the order they appear in the input.
    pub hunks: Vec<DiffHunk>,
    /// Files reported as `Binary files ... differ`, first-seen order.
    pub binary_files: Vec<String>,
    /// Renamed files (new path -> old path).
    pub renamed_files: BTreeMap<String, String>,
    /// Commits found in a `log -p` style input.
    pub commits: Vec<Commit>,
    /// The commit that last touched each file.
    pub file_to_commit: BTreeMap<String, Commit>,
}

impl ParsedDiff {
    /// Whether nothing renderable was found.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty() && self.binary_files.is_empty() && self.renamed_files.is_empty()
    }

    /// Whether any hunk belongs to `path`.
    pub fn has_hunks_for(&self, path: &str) -> bool {
        self.hunks.iter().any(|h| h.file == path)
    }

    /// Renames without a content change, as `(new_path, old_path)`.
    pub fn pure_renames(&self) -> impl Iterator<Item = (&str, &str)> {
        self.renamed_files
            .iter()
            .filter(|(new_path, _)| !self.has_hunks_for(new_path))
            .map(|(new_path, old_path)| (new_path.as_str(), old_path.as_str()))
    }

    /// The commit owning `path`, if the input carried commit headers.
    pub fn commit_for(&self, path: &str) -> Option<&Commit> {
        self.file_to_commit.get(path)
    }

    /// Number of added lines (modification pairs count once).
    pub fn additions(&self) -> usize {
        self.hunks.iter().map(DiffHunk::additions).sum()
    }

    /// Number of deleted lines (modification pairs count once).
    pub fn deletions(&self) -> usize {
        self.hunks.iter().map(DiffHunk::deletions).sum()
    }
}

/// One `@@ ... @@` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffHunk {
    /// Path of the file (new side).
    pub file: String,
    /// First line number on the old side.
    pub old_start: u32,
    /// First line number on the new side.
    pub new_start: u32,
    /// Trailing text of the hunk header (usually the enclosing function).
    pub context: String,
    /// Lines in diff order. Order drives line numbering while rendering.
    pub lines: Vec<ParsedLine>,
    /// Owning commit for multi-commit input.
    pub commit: Option<Commit>,
}

impl DiffHunk {
    /// Create an empty hunk.
    pub fn new(file: impl Into<String>, old_start: u32, new_start: u32) -> Self {
        Self {
            file: file.into(),
            old_start,
            new_start,
            context: String::new(),
            lines: Vec::new(),
            commit: None,
        }
    }

    /// Set the header context text.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Set the lines of this hunk.
    pub fn with_lines(mut self, lines: Vec<ParsedLine>) -> Self {
        self.lines = lines;
        self
    }

    /// Highest line number printed for this hunk.
    ///
    /// Walks the lines with the same old/new counters the renderer uses.
    pub fn max_line_number(&self) -> u32 {
        let mut old_line = self.old_start;
        let mut new_line = self.new_start;
        let mut max = self.old_start.max(self.new_start);

        // counters saturate so absurd headers near u32::MAX cannot overflow
        for line in &self.lines {
            match line {
                ParsedLine::Context(_) => {
                    max = max.max(new_line);
                    old_line = old_line.saturating_add(1);
                    new_line = new_line.saturating_add(1);
                }
                ParsedLine::Deletion(_) => {
                    max = max.max(old_line);
                    old_line = old_line.saturating_add(1);
                }
                ParsedLine::Addition(_) => {
                    max = max.max(new_line);
                    new_line = new_line.saturating_add(1);
                }
                ParsedLine::Modification(_) => {
                    max = max.max(old_line).max(new_line);
                    old_line = old_line.saturating_add(1);
                    new_line = new_line.saturating_add(1);
                }
            }
        }

        max
    }

    fn additions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, ParsedLine::Addition(_) | ParsedLine::Modification(_)))
            .count()
    }

    fn deletions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, ParsedLine::Deletion(_) | ParsedLine::Modification(_)))
            .count()
    }
}

/// A single logical line of a hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum ParsedLine {
    /// Unchanged line.
    Context(String),
    /// Removed line.
    Deletion(String),
    /// Added line.
    Addition(String),
    /// A removed line immediately followed by an added line.
    Modification(ModificationPair),
}

/// A deleted and an added line treated as one edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModificationPair {
    pub old_content: String,
    pub new_content: String,
}

impl ModificationPair {
    pub fn new(old_content: impl Into<String>, new_content: impl Into<String>) -> Self {
        Self {
            old_content: old_content.into(),
            new_content: new_content.into(),
        }
    }

    /// Both sides are equal once spaces and tabs are removed.
    pub fn is_whitespace_only(&self) -> bool {
        let strip = |s: &str| -> String { s.chars().filter(|c| *c != ' ' && *c != '\t').collect() };
        strip(&self.old_content) == strip(&self.new_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hunk() -> DiffHunk {
        DiffHunk::new("src/lib.rs", 8, 8).with_lines(vec![
            ParsedLine::Context("a".into()),
            ParsedLine::Deletion("b".into()),
            ParsedLine::Deletion("c".into()),
            ParsedLine::Modification(ModificationPair::new("d", "e")),
            ParsedLine::Context("f".into()),
        ])
    }

    #[test]
    fn test_max_line_number_follows_old_side() {
        // the modification's deletion row prints 11, the new side never passes 10
        assert_eq!(hunk().max_line_number(), 11);
    }

    #[test]
    fn test_max_line_number_empty_hunk() {
        assert_eq!(DiffHunk::new("a", 3, 7).max_line_number(), 7);
    }

    #[test]
    fn test_counts() {
        let diff = ParsedDiff {
            hunks: vec![hunk()],
            ..Default::default()
        };
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.deletions(), 3);
    }

    #[test]
    fn test_pure_renames_skip_files_with_hunks() {
        let mut diff = ParsedDiff {
            hunks: vec![hunk()],
            ..Default::default()
        };
        diff.renamed_files
            .insert("src/lib.rs".into(), "src/old_lib.rs".into());
        diff.renamed_files.insert("b.txt".into(), "a.txt".into());

        let renames: Vec<_> = diff.pure_renames().collect();
        assert_eq!(renames, vec![("b.txt", "a.txt")]);
        assert!(!diff.is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        assert!(ModificationPair::new("foo bar", "foo  bar").is_whitespace_only());
        assert!(ModificationPair::new("\tx", "    x").is_whitespace_only());
        assert!(!ModificationPair::new("foo", "bar").is_whitespace_only());
    }

    #[test]
    fn test_max_line_number_saturates() {
        let hunk = DiffHunk::new("a", u32::MAX, u32::MAX).with_lines(vec![
            ParsedLine::Context("x".into()),
            ParsedLine::Context("y".into()),
            ParsedLine::Modification(ModificationPair::new("p", "q")),
        ]);
        assert_eq!(hunk.max_line_number(), u32::MAX);
    }

    #[test]
    fn test_serializes_to_json() {
        let mut diff = ParsedDiff {
            hunks: vec![hunk()],
            ..Default::default()
        };
        let commit = Commit::new("abc1234", "Subject", "");
        diff.file_to_commit.insert("z.rs".into(), commit.clone());
        diff.file_to_commit.insert("a.rs".into(), commit);

        let value = serde_json::to_value(&diff).unwrap();
        assert_eq!(value["hunks"][0]["file"], "src/lib.rs");
        assert_eq!(value["hunks"][0]["lines"][0]["kind"], "context");
        assert_eq!(value["hunks"][0]["lines"][3]["kind"], "modification");
        assert_eq!(value["hunks"][0]["lines"][3]["content"]["new_content"], "e");

        // keys come out sorted, so dumps are stable between runs
        let json = serde_json::to_string(&diff).unwrap();
        let a = json.find("\"a.rs\"").unwrap();
        let z = json.find("\"z.rs\"").unwrap();
        assert!(a < z);
        assert_eq!(json, serde_json::to_string(&diff.clone()).unwrap());
    }
}
