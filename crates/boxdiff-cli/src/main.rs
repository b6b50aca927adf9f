use anyhow::{Context, Result};
use boxdiff::{parse_diff, DiffRenderer, UnicodeWidths};
use boxdiff_config::AppConfig;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::Path;

mod base_branch;
mod cli;
mod logger;
mod stat;
mod summary;
#[cfg(test)]
mod testing;
mod vcs;

use cli::{Cli, Command, RenderArgs};
use vcs::GitCli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    log::debug!("Starting boxdiff");

    let cwd = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Could not determine current directory")?,
    };

    let mut config = AppConfig::load(&cwd);
    cli.apply_overrides(&mut config);
    log::debug!("Effective config: {:?}", config);

    let output = match &cli.command {
        None | Some(Command::Summary) => summary::summarize(&GitCli::new(&cwd), &config),
        Some(Command::Render(args)) => render(args, &config)?,
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n").context("Failed to write output")?;
    }
    Ok(())
}

/// Parse and render a diff read from a file or stdin.
fn render(args: &RenderArgs, config: &AppConfig) -> Result<String> {
    let text = read_input(args.file.as_deref())?;
    let diff = parse_diff(&text);

    if args.json {
        return serde_json::to_string_pretty(&diff).context("Failed to serialize parsed diff");
    }

    Ok(DiffRenderer::new(&UnicodeWidths)
        .box_width(config.box_width)
        .legend(config.show_legend)
        .render(&diff))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read diff from {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read diff from stdin")?;
            Ok(text)
        }
    }
}
