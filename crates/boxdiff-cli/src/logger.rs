//! Logging to stderr using env_logger
//!
//! stdout carries the rendered document, so log lines never go there.
//! The level comes from `RUST_LOG` and defaults to `warn`.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initialize stderr logging
///
/// `verbose` raises the default level to `debug`.
pub fn init(verbose: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr);
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    if let Err(err) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}", err);
    }
}
