//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/boxdiff/`
//! - macOS: `~/Library/Application Support/boxdiff/`
//! - Windows: `%APPDATA%\boxdiff\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "boxdiff";

/// Name of the per-project and per-user config file.
pub const LOCAL_CONFIG_FILE: &str = ".boxdiff.toml";

/// Get the application config directory
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to app config file inside the config directory
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get path to `~/.boxdiff.toml`
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOCAL_CONFIG_FILE))
}
