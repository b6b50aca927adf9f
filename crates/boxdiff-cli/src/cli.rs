use boxdiff_config::{AppConfig, DiffMode};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Summarise branch changes as a box-drawn two-column diff")]
pub struct Cli {
    /// Action to perform. If omitted, prints the summary for the current branch.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Total width of the rendered table in columns.
    #[arg(long, short = 'w', global = true, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Branch to compare against instead of detecting one.
    #[arg(long, short = 'b', global = true, value_name = "BRANCH")]
    pub base: Option<String>,

    /// Diff collection mode: `combined` or `per-commit`.
    #[arg(long, global = true, value_name = "MODE")]
    pub mode: Option<DiffMode>,

    /// Do not append the symbol legend.
    #[arg(long = "no-legend", global = true, default_value_t = false)]
    pub no_legend: bool,

    /// How many changed files to list before collapsing the rest.
    #[arg(long = "max-files", global = true, value_name = "N")]
    pub max_files: Option<usize>,

    /// Log debug output to stderr.
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    /// Run as if started in this directory.
    #[arg(long = "cd", short = 'C', global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Summarise the current branch against its base (default).
    Summary,

    /// Render a diff read from a file or stdin.
    Render(RenderArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Diff file to read; stdin when omitted or `-`.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print the parsed diff as JSON instead of the table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Cli {
    /// Let command line flags override config file values.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(width) = self.width {
            config.box_width = width;
        }
        if let Some(base) = &self.base {
            config.base_branch = Some(base.clone());
        }
        if let Some(mode) = self.mode {
            config.diff_mode = mode;
        }
        if self.no_legend {
            config.show_legend = false;
        }
        if let Some(max_files) = self.max_files {
            config.max_listed_files = max_files.max(1);
        }
    }
}
