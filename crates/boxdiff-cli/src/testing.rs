//! In-memory [`Vcs`] for tests.

use crate::vcs::{Vcs, VcsError};
use boxdiff_config::DiffMode;
use std::cell::Cell;
use std::path::PathBuf;

#[derive(Default)]
pub struct FakeVcs {
    pub toplevel: PathBuf,
    pub current_branch: Option<String>,
    pub upstream: Option<String>,
    pub branches: Vec<String>,
    pub files: Vec<String>,
    pub stat: String,
    pub diff: String,
    /// Makes every diff query fail with this stderr.
    pub failure: Option<String>,
    pub mode: Cell<Option<DiffMode>>,
}

impl FakeVcs {
    pub fn requested_mode(&self) -> Option<DiffMode> {
        self.mode.get()
    }

    fn check(&self, command: &str) -> Result<(), VcsError> {
        match &self.failure {
            Some(stderr) => Err(VcsError::CommandFailed {
                command: command.to_string(),
                stderr: stderr.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Vcs for FakeVcs {
    fn toplevel(&self) -> Result<PathBuf, VcsError> {
        Ok(self.toplevel.clone())
    }

    fn current_branch(&self) -> Result<Option<String>, VcsError> {
        Ok(self.current_branch.clone())
    }

    fn upstream_branch(&self) -> Option<String> {
        self.upstream.clone()
    }

    fn branch_exists(&self, name: &str) -> bool {
        self.branches.iter().any(|b| b == name)
    }

    fn changed_files(&self, _base: &str) -> Result<Vec<String>, VcsError> {
        self.check("diff")?;
        Ok(self.files.clone())
    }

    fn diff_stat(&self, _base: &str) -> Result<String, VcsError> {
        self.check("diff")?;
        Ok(self.stat.clone())
    }

    fn diff_text(&self, _base: &str, mode: DiffMode) -> Result<String, VcsError> {
        self.check("diff")?;
        self.mode.set(Some(mode));
        Ok(self.diff.clone())
    }
}
