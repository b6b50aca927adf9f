//! Application configuration
//!
//! Configuration loaded from `.boxdiff.toml`.

use crate::ConfigError;
use boxdiff::{DEFAULT_BOX_WIDTH, MIN_BOX_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How the diff against the base branch is collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffMode {
    /// One combined diff of `base...HEAD`.
    #[default]
    Combined,
    /// Every commit of `base..HEAD` with its own header.
    PerCommit,
}

impl fmt::Display for DiffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffMode::Combined => f.write_str("combined"),
            DiffMode::PerCommit => f.write_str("per-commit"),
        }
    }
}

impl FromStr for DiffMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "combined" => Ok(DiffMode::Combined),
            "per-commit" => Ok(DiffMode::PerCommit),
            other => Err(ConfigError::UnknownDiffMode(other.to_string())),
        }
    }
}

/// Application configuration loaded from `.boxdiff.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Total width of the rendered table in columns
    #[serde(default = "default_box_width")]
    pub box_width: usize,

    /// Base branch to compare against; detected when unset
    #[serde(default)]
    pub base_branch: Option<String>,

    /// How many changed files the summary lists before collapsing the rest
    #[serde(default = "default_max_listed_files")]
    pub max_listed_files: usize,

    /// Combined diff or one section per commit
    #[serde(default)]
    pub diff_mode: DiffMode,

    /// Append the symbol legend after the table
    #[serde(default = "default_show_legend")]
    pub show_legend: bool,
}

fn default_box_width() -> usize {
    DEFAULT_BOX_WIDTH
}

fn default_max_listed_files() -> usize {
    20
}

fn default_show_legend() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            box_width: default_box_width(),
            base_branch: None,
            max_listed_files: default_max_listed_files(),
            diff_mode: DiffMode::default(),
            show_legend: default_show_legend(),
        }
    }
}

impl AppConfig {
    /// Load config for `dir`, falling back to defaults
    ///
    /// Unreadable or invalid files are logged and ignored.
    pub fn load(dir: &Path) -> Self {
        if let Some((path, content)) = crate::load_config_file(dir) {
            match Self::from_toml_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Ignoring config file {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse and validate TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the renderer and summary cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.box_width < MIN_BOX_WIDTH {
            return Err(ConfigError::BoxWidthTooSmall {
                width: self.box_width,
                min: MIN_BOX_WIDTH,
            });
        }
        if self.max_listed_files == 0 {
            return Err(ConfigError::NoListedFiles);
        }
        Ok(())
    }
}
