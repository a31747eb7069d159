//! picks-score - how common each person's picks are
//!
//! Prints `Person -> score` for every resolved picks file, most common
//! taste first.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use picks_common::config::{resolve_data_dir, DataLayout, TomlConfig, DATA_DIR_ENV};
use picks_common::logging::init_tracing;
use picks_score::{score_cohort, Cohort};

/// Command-line arguments for picks-score
#[derive(Parser, Debug)]
#[command(name = "picks-score")]
#[command(about = "Score how common each person's book picks are")]
#[command(version)]
struct Args {
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Data folder (caches, raw picks, resolved picks)
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/bookpicks/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(args.verbose, config.logging.level.as_deref());

    let layout = DataLayout::new(resolve_data_dir(args.data_dir.as_deref(), DATA_DIR_ENV, &config));
    let dir = layout.resolved_picks_dir();

    let cohort = Cohort::load(&dir)
        .with_context(|| format!("Failed to read resolved picks from {}", dir.display()))?;
    if cohort.is_empty() {
        info!("No resolved picks in {}", dir.display());
        return Ok(());
    }

    let scores = score_cohort(&cohort).context("Stopping computation")?;
    for (person, score) in scores {
        println!("{} -> {:.3}", person, score);
    }

    Ok(())
}
