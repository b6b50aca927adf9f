//! Counts from the summary line of `git diff --stat`.

use regex::Regex;
use std::sync::OnceLock;

/// Totals reported by `git diff --stat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStat {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

fn files_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+) files? changed").unwrap())
}

fn insertions_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+) insertions?\(\+\)").unwrap())
}

fn deletions_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+) deletions?\(-\)").unwrap())
}

/// Parse the last non-empty line of `--stat` output.
///
/// Missing parts count as zero, so a rename-only change parses as
/// `1 file changed` with no insertions or deletions.
pub fn parse_stat_summary(stat_output: &str) -> DiffStat {
    let Some(summary) = stat_output.lines().rev().find(|l| !l.trim().is_empty()) else {
        return DiffStat::default();
    };

    DiffStat {
        files_changed: capture_count(files_regex(), summary),
        insertions: capture_count(insertions_regex(), summary),
        deletions: capture_count(deletions_regex(), summary),
    }
}

fn capture_count(re: &Regex, line: &str) -> usize {
    re.captures(line)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_summary() {
        let out = " src/lib.rs | 12 +++++++---\n README.md  |  2 +-\n 2 files changed, 8 insertions(+), 4 deletions(-)\n";
        assert_eq!(
            parse_stat_summary(out),
            DiffStat {
                files_changed: 2,
                insertions: 8,
                deletions: 4,
            }
        );
    }

    #[test]
    fn test_singular_forms() {
        let out = " a.txt | 1 +\n 1 file changed, 1 insertion(+)\n";
        assert_eq!(
            parse_stat_summary(out),
            DiffStat {
                files_changed: 1,
                insertions: 1,
                deletions: 0,
            }
        );
    }

    #[test]
    fn test_deletions_only() {
        let out = " 3 files changed, 40 deletions(-)";
        assert_eq!(
            parse_stat_summary(out),
            DiffStat {
                files_changed: 3,
                insertions: 0,
                deletions: 40,
            }
        );
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(parse_stat_summary(""), DiffStat::default());
        assert_eq!(parse_stat_summary("\n\n"), DiffStat::default());
    }
}
