//! Access to the repository being summarised.
//!
//! Everything the summary needs from version control goes through [`Vcs`],
//! so the orchestration can be tested without a real repository.

use boxdiff_config::DiffMode;
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("`git {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
}

/// Queries against one repository.
pub trait Vcs {
    /// Root directory of the working tree.
    fn toplevel(&self) -> Result<PathBuf, VcsError>;

    /// Checked-out branch, `None` on a detached HEAD.
    fn current_branch(&self) -> Result<Option<String>, VcsError>;

    /// Upstream tracking branch including its remote, e.g. `origin/main`.
    fn upstream_branch(&self) -> Option<String>;

    /// Whether `name` resolves to a commit.
    fn branch_exists(&self, name: &str) -> bool;

    /// Paths changed between `base` and `HEAD`.
    fn changed_files(&self, base: &str) -> Result<Vec<String>, VcsError>;

    /// `--stat` output between `base` and `HEAD`.
    fn diff_stat(&self, base: &str) -> Result<String, VcsError>;

    /// Raw diff text between `base` and `HEAD`.
    fn diff_text(&self, base: &str, mode: DiffMode) -> Result<String, VcsError>;
}

/// [`Vcs`] backed by the `git` executable.
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    fn run(&self, args: &[&str]) -> Result<String, VcsError> {
        log::debug!("Running git {} in {}", args.join(" "), self.repo.display());

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .arg("--no-pager")
            .args(args)
            .output()?;

        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Vcs for GitCli {
    fn toplevel(&self) -> Result<PathBuf, VcsError> {
        let out = self.run(&["rev-parse", "--show-toplevel"])?;
        Ok(PathBuf::from(out.trim()))
    }

    fn current_branch(&self) -> Result<Option<String>, VcsError> {
        let out = self.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let branch = out.trim();
        if branch.is_empty() || branch == "HEAD" {
            return Ok(None);
        }
        Ok(Some(branch.to_string()))
    }

    fn upstream_branch(&self) -> Option<String> {
        let out = self
            .run(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"])
            .ok()?;
        let upstream = out.trim();
        (!upstream.is_empty()).then(|| upstream.to_string())
    }

    fn branch_exists(&self, name: &str) -> bool {
        let revision = format!("{name}^{{commit}}");
        self.run(&["rev-parse", "--verify", "--quiet", &revision]).is_ok()
    }

    fn changed_files(&self, base: &str) -> Result<Vec<String>, VcsError> {
        let range = format!("{base}...HEAD");
        let out = self.run(&["diff", "--name-only", &range])?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn diff_stat(&self, base: &str) -> Result<String, VcsError> {
        let range = format!("{base}...HEAD");
        self.run(&["diff", "--stat", &range])
    }

    fn diff_text(&self, base: &str, mode: DiffMode) -> Result<String, VcsError> {
        match mode {
            DiffMode::Combined => {
                let range = format!("{base}...HEAD");
                self.run(&["diff", "--no-color", "--no-ext-diff", "-M", &range])
            }
            DiffMode::PerCommit => {
                let range = format!("{base}..HEAD");
                self.run(&[
                    "log",
                    "-p",
                    "--reverse",
                    "--no-color",
                    "--no-ext-diff",
                    "-M",
                    "--format=medium",
                    &range,
                ])
            }
        }
    }
}
