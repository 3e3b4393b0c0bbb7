//! ctxsnap - project context snapshot tool.
//!
//! Concatenates the project's source files into one timestamped text
//! snapshot in the project root, then prunes old snapshots beyond the
//! retention count.

mod runner;

use clap::Parser;
use ctxsnap_core::RunConfig;
use ctxsnap_util::log::{self, LogConfig, LogLevel};
use ctxsnap_util::SystemClock;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ctxsnap")]
#[command(
    author,
    version,
    about = "Concatenate project source files into a timestamped context snapshot",
    long_about = None
)]
struct Cli {
    /// Project root directory (defaults to the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Number of snapshots to keep after pruning
    #[arg(short, long)]
    keep: Option<usize>,

    /// Snapshot file name prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Report what would be written and deleted without touching disk
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    log::init(LogConfig {
        level,
        include_location: cli.verbose,
    });

    let cwd = std::env::current_dir()?;
    let root = match cli.root {
        Some(path) if path.is_absolute() => path,
        Some(path) => ctxsnap_util::path::normalize(&cwd.join(path)),
        None => cwd,
    };

    let mut config = RunConfig::load(root)?;
    if let Some(keep) = cli.keep {
        config.keep_latest = keep;
    }
    if let Some(prefix) = cli.prefix {
        config.output_prefix = prefix;
    }
    config.dry_run = cli.dry_run;

    runner::run(&config, &SystemClock)?;

    Ok(())
}
