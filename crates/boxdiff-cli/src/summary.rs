//! Assemble the summary document for the current branch.
//!
//! The document has three sections: totals, the list of changed files and
//! the rendered table. Any failure along the way becomes a one-line
//! explanation instead of a partial document.

use crate::base_branch::{detect_base_branch, resolve_base_branch};
use crate::stat::{parse_stat_summary, DiffStat};
use crate::vcs::{Vcs, VcsError};
use boxdiff::{parse_diff, DiffRenderer, UnicodeWidths};
use boxdiff_config::AppConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error("Could not find base branch '{base}' (also tried 'origin/{base}').")]
    BaseNotFound { base: String },

    #[error("Failed to get diff against '{base}': {reason}")]
    Git { base: String, reason: String },

    #[error("No changes found between '{base}' and HEAD.")]
    NoChanges { base: String },

    #[error("No parseable changes found in diff against '{base}'.")]
    NothingParseable { base: String },
}

impl SummaryError {
    fn git(base: &str, err: VcsError) -> Self {
        SummaryError::Git {
            base: base.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Summary document, or the reason there is none.
pub fn summarize(vcs: &dyn Vcs, config: &AppConfig) -> String {
    build_summary(vcs, config).unwrap_or_else(|err| {
        log::warn!("No summary: {:?}", err);
        err.to_string()
    })
}

pub fn build_summary(vcs: &dyn Vcs, config: &AppConfig) -> Result<String, SummaryError> {
    let wanted = detect_base_branch(vcs, config.base_branch.as_deref());
    let base = resolve_base_branch(vcs, &wanted)
        .ok_or_else(|| SummaryError::BaseNotFound { base: wanted.clone() })?;

    let files = vcs
        .changed_files(&base)
        .map_err(|e| SummaryError::git(&base, e))?;
    if files.is_empty() {
        return Err(SummaryError::NoChanges { base });
    }

    let mut stat = vcs
        .diff_stat(&base)
        .map(|out| parse_stat_summary(&out))
        .map_err(|e| SummaryError::git(&base, e))?;

    let diff_text = vcs
        .diff_text(&base, config.diff_mode)
        .map_err(|e| SummaryError::git(&base, e))?;
    if diff_text.trim().is_empty() {
        return Err(SummaryError::NoChanges { base });
    }

    let diff = parse_diff(&diff_text);
    if diff.is_empty() {
        return Err(SummaryError::NothingParseable { base });
    }
    log::info!(
        "Parsed {} hunks, {} binary files, {} renames against {}",
        diff.hunks.len(),
        diff.binary_files.len(),
        diff.renamed_files.len(),
        base
    );

    if stat == DiffStat::default() {
        log::debug!("No usable --stat summary, counting parsed lines instead");
        stat = DiffStat {
            files_changed: files.len(),
            insertions: diff.additions(),
            deletions: diff.deletions(),
        };
    }

    let rendered = DiffRenderer::new(&UnicodeWidths)
        .box_width(config.box_width)
        .legend(config.show_legend)
        .render(&diff);

    Ok(format_summary(
        &base,
        &stat,
        &files,
        &rendered,
        config.max_listed_files,
    ))
}

fn format_summary(
    base: &str,
    stat: &DiffStat,
    files: &[String],
    rendered: &str,
    max_listed_files: usize,
) -> String {
    // a rename-only stat line can still report zero files
    let files_changed = if stat.files_changed == 0 {
        files.len()
    } else {
        stat.files_changed
    };

    let mut lines = vec![
        "## Diff Summary".to_string(),
        String::new(),
        format!("- Base branch: `{base}`"),
        format!("- Files changed: {files_changed}"),
        format!("- Insertions: +{}", stat.insertions),
        format!("- Deletions: -{}", stat.deletions),
        String::new(),
        "## Changed Files".to_string(),
        String::new(),
    ];

    lines.extend(
        files
            .iter()
            .take(max_listed_files)
            .map(|file| format!("- {file}")),
    );
    if files.len() > max_listed_files {
        lines.push(format!("- ... +{} more", files.len() - max_listed_files));
    }

    lines.extend([
        String::new(),
        "## Rendered Diff (2-column format)".to_string(),
        String::new(),
        "```text".to_string(),
        rendered.to_string(),
        "```".to_string(),
    ]);

    let mut document = lines.join("\n");
    document.push('\n');
    document
}
