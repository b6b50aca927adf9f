//! Commit headers found in `log -p` style input.

use serde::Serialize;

/// One commit of a multi-commit diff range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// Full commit hash as printed after `commit `.
    pub hash: String,
    /// First non-blank message line.
    pub subject: String,
    /// Remaining message lines, blank edges trimmed.
    pub body: String,
}

impl Commit {
    pub fn new(
        hash: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Build a commit from raw message lines (indent already removed).
    ///
    /// Leading and trailing blank lines are dropped, the first remaining
    /// line becomes the subject and the rest (trimmed the same way) the body.
    pub fn from_message(hash: impl Into<String>, lines: &[String]) -> Self {
        let lines = trim_blank_edges(lines);
        let (subject, rest) = match lines.split_first() {
            Some((first, rest)) => (first.trim().to_string(), rest),
            None => (String::new(), lines),
        };
        let body = trim_blank_edges(rest).join("\n");

        Self {
            hash: hash.into(),
            subject,
            body,
        }
    }

    /// Abbreviated hash for display.
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

fn trim_blank_edges(lines: &[String]) -> &[String] {
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |i| i + 1);
    &lines[start..end]
}
