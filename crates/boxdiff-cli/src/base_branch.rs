//! Work out which branch the current work should be compared against.

use crate::vcs::Vcs;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

const DEFAULT_BASE: &str = "main";
const WORKTREES_DIR: &str = "worktrees";
const REMOTE_PREFIX: &str = "origin/";

/// `1.4-some-topic` style names belong to the `v1.4` release line.
fn release_topic_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\.(\d+)-").unwrap())
}

fn release_branch_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v\d+\.\d+$").unwrap())
}

/// Pick the base branch name without checking that it exists.
///
/// Order: explicit choice, worktree directory name, current branch name,
/// upstream tracking branch, then `main`.
pub fn detect_base_branch(vcs: &dyn Vcs, explicit: Option<&str>) -> String {
    if let Some(base) = explicit.filter(|b| !b.trim().is_empty()) {
        log::debug!("Using configured base branch {}", base);
        return base.trim().to_string();
    }

    match vcs.toplevel() {
        Ok(toplevel) => {
            if let Some(base) = base_from_worktree(&toplevel) {
                log::debug!("Base branch {} from worktree {}", base, toplevel.display());
                return base;
            }
        }
        Err(err) => log::debug!("No worktree path: {}", err),
    }

    let current = match vcs.current_branch() {
        Ok(branch) => branch,
        Err(err) => {
            log::debug!("No current branch: {}", err);
            None
        }
    };

    if let Some(base) = current.as_deref().and_then(base_from_branch) {
        log::debug!("Base branch {} from branch name", base);
        return base;
    }

    if let Some(upstream) = vcs.upstream_branch() {
        let name = strip_remote(&upstream);
        if current.as_deref() != Some(name) {
            log::debug!("Base branch {} from upstream {}", name, upstream);
            return name.to_string();
        }
        log::debug!("Ignoring upstream {} of the branch itself", upstream);
    }

    DEFAULT_BASE.to_string()
}

/// Return the name that exists, `base` itself or its `origin/` twin.
pub fn resolve_base_branch(vcs: &dyn Vcs, base: &str) -> Option<String> {
    if vcs.branch_exists(base) {
        return Some(base.to_string());
    }

    let remote = format!("{REMOTE_PREFIX}{base}");
    if vcs.branch_exists(&remote) {
        log::info!("Base branch {} not found locally, using {}", base, remote);
        return Some(remote);
    }

    None
}

fn base_from_worktree(toplevel: &Path) -> Option<String> {
    let parent = toplevel.parent()?.file_name()?.to_str()?;
    if parent != WORKTREES_DIR {
        return None;
    }
    let name = toplevel.file_name()?.to_str()?;
    release_line(name)
}

fn base_from_branch(branch: &str) -> Option<String> {
    if release_branch_regex().is_match(branch) {
        return Some(DEFAULT_BASE.to_string());
    }
    release_line(branch)
}

fn release_line(name: &str) -> Option<String> {
    let captures = release_topic_regex().captures(name)?;
    Some(format!("v{}.{}", &captures[1], &captures[2]))
}

/// `origin/feature/x` -> `feature/x`
fn strip_remote(upstream: &str) -> &str {
    upstream
        .split_once('/')
        .map_or(upstream, |(_, name)| name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeVcs;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_explicit_base_wins() {
        let vcs = FakeVcs {
            current_branch: Some("1.2-feature".into()),
            ..Default::default()
        };
        assert_eq!(detect_base_branch(&vcs, Some("develop")), "develop");
    }

    #[test]
    fn test_blank_explicit_base_is_ignored() {
        let vcs = FakeVcs::default();
        assert_eq!(detect_base_branch(&vcs, Some("  ")), "main");
    }

    #[test]
    fn test_worktree_directory_name() {
        let vcs = FakeVcs {
            toplevel: "/src/project/worktrees/3.7-fix-crash".into(),
            current_branch: Some("unrelated".into()),
            ..Default::default()
        };
        assert_eq!(detect_base_branch(&vcs, None), "v3.7");
    }

    #[test]
    fn test_release_name_outside_worktrees_is_ignored() {
        let vcs = FakeVcs {
            toplevel: "/src/3.7-checkout".into(),
            ..Default::default()
        };
        assert_eq!(detect_base_branch(&vcs, None), "main");
    }

    #[test]
    fn test_topic_branch_name() {
        let vcs = FakeVcs {
            current_branch: Some("10.2-new-parser".into()),
            upstream: Some("origin/10.2-new-parser".into()),
            ..Default::default()
        };
        assert_eq!(detect_base_branch(&vcs, None), "v10.2");
    }

    #[test]
    fn test_release_branch_compares_against_main() {
        let vcs = FakeVcs {
            current_branch: Some("v4.1".into()),
            ..Default::default()
        };
        assert_eq!(detect_base_branch(&vcs, None), "main");
    }

    #[test]
    fn test_upstream_with_remote_stripped() {
        let vcs = FakeVcs {
            current_branch: Some("topic".into()),
            upstream: Some("origin/integration/next".into()),
            ..Default::default()
        };
        assert_eq!(detect_base_branch(&vcs, None), "integration/next");
    }

    #[test]
    fn test_upstream_of_same_name_is_ignored() {
        let vcs = FakeVcs {
            current_branch: Some("topic".into()),
            upstream: Some("origin/topic".into()),
            ..Default::default()
        };
        assert_eq!(detect_base_branch(&vcs, None), "main");
    }

    #[test]
    fn test_fallback_to_main() {
        assert_eq!(detect_base_branch(&FakeVcs::default(), None), "main");
    }

    #[test]
    fn test_resolve_prefers_local() {
        let vcs = FakeVcs {
            branches: vec!["main".into(), "origin/main".into()],
            ..Default::default()
        };
        assert_eq!(resolve_base_branch(&vcs, "main").as_deref(), Some("main"));
    }

    #[test]
    fn test_resolve_falls_back_to_origin() {
        let vcs = FakeVcs {
            branches: vec!["origin/v2.0".into()],
            ..Default::default()
        };
        assert_eq!(
            resolve_base_branch(&vcs, "v2.0").as_deref(),
            Some("origin/v2.0")
        );
        assert_eq!(resolve_base_branch(&vcs, "v9.9"), None);
    }

    #[test]
    fn test_strip_remote() {
        assert_eq!(strip_remote("origin/main"), "main");
        assert_eq!(strip_remote("main"), "main");
    }
}
