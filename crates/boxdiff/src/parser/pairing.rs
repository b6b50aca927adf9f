//! Turn buffered raw hunk lines into parsed lines.

use crate::model::{ModificationPair, ParsedLine};

const NO_NEWLINE_MARKER: char = '\\';

/// Classify raw hunk lines and merge adjacent deletion/addition pairs.
///
/// Pairing is positional: a `Deletion` directly followed by an `Addition`
/// becomes one `Modification`. With several deletions followed by several
/// additions only the last deletion and the first addition are paired.
///
/// Only lines that touch are merged, the rest of each block stays a plain
/// `Deletion` or `Addition`. Lining up whole blocks first-with-first would
/// claim that unrelated lines replaced each other, and no content matching
/// is attempted.
pub fn parse_and_pair_lines<S: AsRef<str>>(raw_lines: &[S]) -> Vec<ParsedLine> {
    pair_lines(classify_lines(raw_lines))
}

fn classify_lines<S: AsRef<str>>(raw_lines: &[S]) -> Vec<ParsedLine> {
    raw_lines
        .iter()
        .filter_map(|raw| {
            let raw = raw.as_ref();
            let mut chars = raw.chars();
            let prefix = chars.next()?;
            let content = chars.as_str().to_string();
            match prefix {
                '+' => Some(ParsedLine::Addition(content)),
                '-' => Some(ParsedLine::Deletion(content)),
                ' ' => Some(ParsedLine::Context(content)),
                NO_NEWLINE_MARKER => None,
                _ => None,
            }
        })
        .collect()
}

fn pair_lines(lines: Vec<ParsedLine>) -> Vec<ParsedLine> {
    let mut paired = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter().peekable();

    while let Some(line) = iter.next() {
        match line {
            ParsedLine::Deletion(old_content) => {
                match iter.next_if(|next| matches!(next, ParsedLine::Addition(_))) {
                    Some(ParsedLine::Addition(new_content)) => {
                        paired.push(ParsedLine::Modification(ModificationPair {
                            old_content,
                            new_content,
                        }));
                    }
                    _ => paired.push(ParsedLine::Deletion(old_content)),
                }
            }
            other => paired.push(other),
        }
    }

    paired
}
