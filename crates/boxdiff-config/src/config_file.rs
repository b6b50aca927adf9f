use crate::paths::{app_config_path, home_config_path, LOCAL_CONFIG_FILE};
use std::path::{Path, PathBuf};

/// Load config file content, most specific location first
///
/// Searches for:
/// 1. `.boxdiff.toml` in `dir` (usually the repository being summarised)
/// 2. `~/.boxdiff.toml`
/// 3. `config.toml` in the platform config directory
///
/// Returns the path and content of the first readable file.
pub fn load_config_file(dir: &Path) -> Option<(PathBuf, String)> {
    candidate_paths(dir).into_iter().find_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some((path, content))
    })
}

fn candidate_paths(dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![dir.join(LOCAL_CONFIG_FILE)];
    paths.extend(home_config_path());
    paths.extend(app_config_path().ok());
    paths
}
