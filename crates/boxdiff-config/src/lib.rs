//! Configuration for boxdiff
//!
//! This crate provides:
//! - Config file discovery (TOML)
//! - Application configuration (AppConfig) with validation
//! - Platform config directory paths

pub mod app_config;
pub mod config_file;
pub mod error;
pub mod paths;

pub use app_config::{AppConfig, DiffMode};
pub use config_file::load_config_file;
pub use error::ConfigError;
