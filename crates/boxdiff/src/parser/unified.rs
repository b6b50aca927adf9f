//! Parse unified diff text, including `git log -p` style multi-commit input.

use super::pairing::parse_and_pair_lines;
use crate::model::{Commit, DiffHunk, ParsedDiff};
use regex::Regex;
use std::sync::OnceLock;

/// Header lines that carry no information the renderer needs.
const METADATA_PREFIXES: &[&str] = &[
    "index ",
    "--- ",
    "+++ ",
    "new file",
    "deleted file",
    "similarity",
];

const MESSAGE_INDENT: &str = "    ";

/// Parse a unified diff string into a structured `ParsedDiff`.
///
/// Never fails: lines that match no known shape are skipped, so arbitrary
/// text yields an empty diff. The same input always yields the same output.
///
/// # Example
/// ```
/// use boxdiff::parse_diff;
///
/// let diff = parse_diff("diff --git a/a.txt b/a.txt\n@@ -1,1 +1,1 @@\n-foo\n+bar\n");
/// assert_eq!(diff.hunks.len(), 1);
/// assert_eq!(diff.hunks[0].file, "a.txt");
/// ```
pub fn parse_diff(diff_text: &str) -> ParsedDiff {
    let mut state = ParserState::default();
    for line in diff_text.lines() {
        state.feed(line);
    }
    state.finish()
}

/// Cursor threaded through the scan.
#[derive(Default)]
struct ParserState {
    diff: ParsedDiff,
    current_commit: Option<Commit>,
    current_file: Option<String>,
    rename_from: Option<String>,
    hunk: Option<OpenHunk>,
    commit_header: Option<CommitHeader>,
}

struct OpenHunk {
    hunk: DiffHunk,
    raw_lines: Vec<String>,
    old_remaining: u32,
    new_remaining: u32,
}

impl OpenHunk {
    fn expects_more(&self) -> bool {
        self.old_remaining > 0 || self.new_remaining > 0
    }
}

struct CommitHeader {
    hash: String,
    in_message: bool,
    message: Vec<String>,
}

impl ParserState {
    fn feed(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix("commit ") {
            self.start_commit(rest);
            return;
        }

        if self.feed_commit_header(line) {
            return;
        }

        if let Some(rest) = line.strip_prefix("diff --git ") {
            self.start_file(rest);
            return;
        }

        // Inside a hunk that still expects lines, `--- x` is a deleted line
        // rather than a file header.
        if self.hunk.as_ref().is_some_and(OpenHunk::expects_more) && self.buffer_hunk_line(line)
        {
            return;
        }

        if let Some(from) = line.strip_prefix("rename from ") {
            self.rename_from = Some(from.trim().to_string());
            return;
        }

        if line.starts_with("rename to ") {
            if let (Some(from), Some(file)) = (self.rename_from.take(), &self.current_file) {
                self.diff.renamed_files.insert(file.clone(), from);
            }
            return;
        }

        if line.starts_with("Binary files ") {
            self.record_binary(line);
            return;
        }

        if METADATA_PREFIXES.iter().any(|p| line.starts_with(p)) {
            return;
        }

        if line.starts_with("@@") {
            if let Some(hunk) = parse_hunk_header(line) {
                self.start_hunk(hunk);
                return;
            }
        }

        if !self.buffer_hunk_line(line) {
            log::trace!("Skipping unrecognized diff line: {line}");
        }
    }

    /// Consume commit metadata and message lines. Returns false once the
    /// line belongs to something else.
    fn feed_commit_header(&mut self, line: &str) -> bool {
        let Some(header) = self.commit_header.as_mut() else {
            return false;
        };

        if !header.in_message {
            if line.starts_with("diff --git ") {
                self.finish_commit();
                return false;
            }
            // Author:, Date:, Merge: and friends
            if line.trim().is_empty() {
                header.in_message = true;
            }
            return true;
        }

        if let Some(text) = line.strip_prefix(MESSAGE_INDENT) {
            header.message.push(text.to_string());
            return true;
        }
        if line.trim().is_empty() {
            header.message.push(String::new());
            return true;
        }

        self.finish_commit();
        false
    }

    fn start_commit(&mut self, rest: &str) {
        self.finish_hunk();
        self.finish_commit();

        let hash = rest.split_whitespace().next().unwrap_or_default();
        self.current_file = None;
        self.rename_from = None;
        self.commit_header = Some(CommitHeader {
            hash: hash.to_string(),
            in_message: false,
            message: Vec::new(),
        });
    }

    fn start_file(&mut self, rest: &str) {
        self.finish_hunk();
        self.rename_from = None;

        let Some((_, new_path)) = rest.rsplit_once(" b/") else {
            log::debug!("Unrecognized diff header: diff --git {rest}");
            self.current_file = None;
            return;
        };

        let new_path = new_path.trim().to_string();
        if let Some(commit) = &self.current_commit {
            self.diff
                .file_to_commit
                .insert(new_path.clone(), commit.clone());
        }
        self.current_file = Some(new_path);
    }

    fn record_binary(&mut self, line: &str) {
        let path = self
            .current_file
            .clone()
            .or_else(|| binary_path_from_line(line));

        if let Some(path) = path {
            if !self.diff.binary_files.contains(&path) {
                self.diff.binary_files.push(path);
            }
        }
    }

    fn start_hunk(&mut self, header: HunkHeader) {
        self.finish_hunk();

        let file = self.current_file.clone().unwrap_or_default();
        let mut hunk =
            DiffHunk::new(file, header.old_start, header.new_start).with_context(header.context);
        hunk.commit = self.current_commit.clone();

        self.hunk = Some(OpenHunk {
            hunk,
            raw_lines: Vec::new(),
            old_remaining: header.old_count,
            new_remaining: header.new_count,
        });
    }

    fn buffer_hunk_line(&mut self, line: &str) -> bool {
        let Some(open) = self.hunk.as_mut() else {
            return false;
        };

        match line.chars().next() {
            Some(' ') => {
                open.old_remaining = open.old_remaining.saturating_sub(1);
                open.new_remaining = open.new_remaining.saturating_sub(1);
            }
            Some('-') => open.old_remaining = open.old_remaining.saturating_sub(1),
            Some('+') => open.new_remaining = open.new_remaining.saturating_sub(1),
            Some('\\') => {}
            _ => return false,
        }

        open.raw_lines.push(line.to_string());
        true
    }

    fn finish_hunk(&mut self) {
        if let Some(open) = self.hunk.take() {
            let lines = parse_and_pair_lines(&open.raw_lines);
            self.diff.hunks.push(open.hunk.with_lines(lines));
        }
    }

    fn finish_commit(&mut self) {
        if let Some(header) = self.commit_header.take() {
            let commit = Commit::from_message(header.hash, &header.message);
            self.diff.commits.push(commit.clone());
            self.current_commit = Some(commit);
        }
    }

    fn finish(mut self) -> ParsedDiff {
        self.finish_hunk();
        self.finish_commit();
        self.diff
    }
}

struct HunkHeader {
    old_start: u32,
    old_count: u32,
    new_start: u32,
    new_count: u32,
    context: String,
}

fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    static HUNK_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = HUNK_REGEX.get_or_init(|| {
        // @@ -old[,count] +new[,count] @@ context
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@(.*)$").unwrap()
    });

    let captures = re.captures(line)?;
    let number = |idx: usize| -> Option<u32> {
        match captures.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(1),
        }
    };

    Some(HunkHeader {
        old_start: number(1)?,
        old_count: number(2)?,
        new_start: number(3)?,
        new_count: number(4)?,
        context: captures.get(5).map_or("", |m| m.as_str()).trim().to_string(),
    })
}

/// Recover the path from `Binary files a/x and b/y differ` when no
/// `diff --git` header preceded it.
fn binary_path_from_line(line: &str) -> Option<String> {
    let rest = line.strip_prefix("Binary files ")?.strip_suffix(" differ")?;
    let (old, new) = rest.split_once(" and ")?;
    let path = if new == "/dev/null" {
        old.strip_prefix("a/").unwrap_or(old)
    } else {
        new.strip_prefix("b/").unwrap_or(new)
    };
    Some(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModificationPair, ParsedLine};
    use pretty_assertions::assert_eq;

    const SAMPLE_DIFF: &str = r#"diff --git a/src/main.rs b/src/main.rs
index abc123..def456 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,5 +1,6 @@ fn main()
 fn main() {
     println!("Hello");
+    println!("World");
 }

diff --git a/src/lib.rs b/src/lib.rs
index 111222..333444 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -10,7 +10,6 @@ impl Foo {
 impl Foo {
     fn bar(&self) {
-        // old comment
         self.do_thing();
     }
 }
"#;

    const MULTI_COMMIT: &str = r#"commit 1111111aaaaaaa (HEAD -> feature)
Author: Dev <dev@example.com>
Date:   Mon Jan 1 00:00:00 2024 +0000

    Add greeting

    Prints a friendly hello.

diff --git a/hello.txt b/hello.txt
new file mode 100644
index 0000000..e965047
--- /dev/null
+++ b/hello.txt
@@ -0,0 +1 @@
+Hello
commit 2222222bbbbbbb
Author: Dev <dev@example.com>
Date:   Tue Jan 2 00:00:00 2024 +0000

    Shout greeting

diff --git a/hello.txt b/hello.txt
index e965047..3b18e51 100644
--- a/hello.txt
+++ b/hello.txt
@@ -1 +1 @@
-Hello
+HELLO
"#;

    #[test]
    fn test_parse_simple_diff() {
        let diff = parse_diff(SAMPLE_DIFF);

        assert_eq!(diff.hunks.len(), 2);
        let first = &diff.hunks[0];
        assert_eq!(first.file, "src/main.rs");
        assert_eq!(first.old_start, 1);
        assert_eq!(first.new_start, 1);
        assert_eq!(first.context, "fn main()");
        assert_eq!(first.lines.len(), 4);
        assert_eq!(
            first.lines[2],
            ParsedLine::Addition("    println!(\"World\");".into())
        );

        let second = &diff.hunks[1];
        assert_eq!(second.file, "src/lib.rs");
        assert_eq!(second.old_start, 10);
        assert_eq!(second.context, "impl Foo {");
        assert_eq!(
            second.lines[2],
            ParsedLine::Deletion("        // old comment".into())
        );
        assert!(diff.commits.is_empty());
        assert!(diff.file_to_commit.is_empty());
    }

    #[test]
    fn test_single_modification() {
        let diff = parse_diff("diff --git a/a.txt b/a.txt\n@@ -1,1 +1,1 @@\n-foo\n+bar\n");
        assert_eq!(diff.hunks.len(), 1);
        assert_eq!(
            diff.hunks[0].lines,
            vec![ParsedLine::Modification(ModificationPair::new("foo", "bar"))]
        );
    }

    #[test]
    fn test_parse_binary_file() {
        let diff = parse_diff(
            "diff --git a/img.png b/img.png\nindex 1..2 100644\nBinary files a/img.png and b/img.png differ\n",
        );
        assert_eq!(diff.binary_files, vec!["img.png".to_string()]);
        assert!(diff.hunks.is_empty());
    }

    #[test]
    fn test_binary_without_git_header() {
        let diff = parse_diff("Binary files /dev/null and b/logo.gif differ\n");
        assert_eq!(diff.binary_files, vec!["logo.gif".to_string()]);
    }

    #[test]
    fn test_pure_rename() {
        let diff = parse_diff(
            "diff --git a/old.txt b/new.txt\nsimilarity index 100%\nrename from old.txt\nrename to new.txt\n",
        );
        assert_eq!(diff.renamed_files.get("new.txt"), Some(&"old.txt".to_string()));
        assert!(diff.hunks.is_empty());
        assert!(diff.binary_files.is_empty());
        assert_eq!(diff.pure_renames().count(), 1);
    }

    #[test]
    fn test_rename_with_changes() {
        let diff = parse_diff(
            r#"diff --git a/old_name.rs b/new_name.rs
similarity index 95%
rename from old_name.rs
rename to new_name.rs
index abc123..def456 100644
--- a/old_name.rs
+++ b/new_name.rs
@@ -1,3 +1,3 @@
 fn example() {
-    // old
+    // new
 }
"#,
        );
        assert_eq!(
            diff.renamed_files.get("new_name.rs"),
            Some(&"old_name.rs".to_string())
        );
        assert_eq!(diff.hunks.len(), 1);
        assert_eq!(diff.pure_renames().count(), 0);
    }

    #[test]
    fn test_multi_commit_log() {
        let diff = parse_diff(MULTI_COMMIT);

        assert_eq!(diff.commits.len(), 2);
        assert_eq!(diff.commits[0].hash, "1111111aaaaaaa");
        assert_eq!(diff.commits[0].subject, "Add greeting");
        assert_eq!(diff.commits[0].body, "Prints a friendly hello.");
        assert_eq!(diff.commits[1].subject, "Shout greeting");
        assert_eq!(diff.commits[1].body, "");

        assert_eq!(diff.hunks.len(), 2);
        assert_eq!(
            diff.hunks[0].commit.as_ref().map(|c| c.hash.as_str()),
            Some("1111111aaaaaaa")
        );
        assert_eq!(diff.hunks[0].old_start, 0);
        assert_eq!(diff.hunks[0].lines, vec![ParsedLine::Addition("Hello".into())]);
        assert_eq!(
            diff.hunks[1].commit.as_ref().map(|c| c.hash.as_str()),
            Some("2222222bbbbbbb")
        );

        // the later commit wins for a file touched twice
        assert_eq!(
            diff.file_to_commit.get("hello.txt").map(|c| c.hash.as_str()),
            Some("2222222bbbbbbb")
        );
    }

    #[test]
    fn test_commit_message_open_at_end_of_input() {
        let diff = parse_diff("commit abc\nAuthor: x\n\n    Only a message\n");
        assert_eq!(diff.commits.len(), 1);
        assert_eq!(diff.commits[0].subject, "Only a message");
        assert!(diff.is_empty());
    }

    #[test]
    fn test_dashes_inside_hunk_are_content() {
        let diff = parse_diff("diff --git a/a.md b/a.md\n@@ -1,2 +1,2 @@\n--- old rule\n+++ new rule\n");
        assert_eq!(
            diff.hunks[0].lines,
            vec![ParsedLine::Modification(ModificationPair::new(
                "-- old rule",
                "++ new rule"
            ))]
        );
    }

    #[test]
    fn test_no_newline_marker() {
        let diff = parse_diff(
            "diff --git a/a b/a\n@@ -1 +1 @@\n-x\n\\ No newline at end of file\n+y\n\\ No newline at end of file\n",
        );
        assert_eq!(
            diff.hunks[0].lines,
            vec![ParsedLine::Modification(ModificationPair::new("x", "y"))]
        );
    }

    #[test]
    fn test_garbage_yields_empty_diff() {
        let diff = parse_diff("hello\nthis is not a diff\n@@ nope @@\n");
        assert!(diff.is_empty());
        assert!(diff.commits.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_diff(""), ParsedDiff::default());
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse_diff(MULTI_COMMIT), parse_diff(MULTI_COMMIT));
        assert_eq!(parse_diff(SAMPLE_DIFF), parse_diff(SAMPLE_DIFF));
    }

    #[test]
    fn test_hunk_header_defaults() {
        let header = parse_hunk_header("@@ -3 +4,2 @@").unwrap();
        assert_eq!(header.old_start, 3);
        assert_eq!(header.old_count, 1);
        assert_eq!(header.new_start, 4);
        assert_eq!(header.new_count, 2);
        assert_eq!(header.context, "");
        assert!(parse_hunk_header("@@ -x +1 @@").is_none());
    }

    #[test]
    fn test_path_with_spaces() {
        let diff = parse_diff("diff --git a/my file.txt b/my file.txt\n@@ -1 +1 @@\n-a\n+b\n");
        assert_eq!(diff.hunks[0].file, "my file.txt");
    }
}
