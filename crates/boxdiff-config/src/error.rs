use thiserror::Error;

/// Errors produced while reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Box width {width} is too small, the minimum is {min}")]
    BoxWidthTooSmall { width: usize, min: usize },

    #[error("max_listed_files must be at least 1")]
    NoListedFiles,

    #[error("Unknown diff mode '{0}', expected 'combined' or 'per-commit'")]
    UnknownDiffMode(String),
}
