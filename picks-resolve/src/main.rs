//! picks-resolve - resolve one person's book picks
//!
//! Reads a line-oriented file of free-text titles, resolves each one
//! against the Goodreads search API (asking on the console when the
//! answer is not obvious) and writes `resolved-picks/<person>.csv`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use picks_common::config::{resolve_data_dir, DataLayout, TomlConfig, DATA_DIR_ENV};
use picks_common::logging::init_tracing;
use picks_common::picks::read_queries;
use picks_resolve::services::{ConsoleDecisionProvider, DecisionProvider};
use picks_resolve::{build_gateway, resolve_person};

/// Command-line arguments for picks-resolve
#[derive(Parser, Debug)]
#[command(name = "picks-resolve")]
#[command(about = "Resolve a person's book picks into title, author and year")]
#[command(version)]
struct Args {
    /// Whose picks these are
    #[arg(short, long)]
    person: String,

    /// File with one book title per line
    #[arg(short = 'f', long)]
    book_file: PathBuf,

    /// Log at info instead of debug
    #[arg(short, long)]
    quiet: bool,

    /// Data folder (caches, raw picks, resolved picks)
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/bookpicks/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Goodreads developer key
    #[arg(long, env = "GOODREADS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(!args.quiet, config.logging.level.as_deref());

    info!(
        "Starting picks-resolve v{} [{}] ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE")
    );

    let layout = DataLayout::new(resolve_data_dir(args.data_dir.as_deref(), DATA_DIR_ENV, &config));
    info!("Data folder: {}", layout.root().display());
    layout
        .ensure_directories()
        .context("Failed to initialize data folder")?;

    let mut console = ConsoleDecisionProvider::stdio();

    let output = layout.resolved_picks_file(&args.person);
    if output.exists() {
        println!("Resolved picks file already exists for {}", args.person);
        if !console.confirm("Continue?")? {
            info!("Leaving {} untouched", output.display());
            return Ok(());
        }
    }

    let queries = read_queries(&args.book_file)
        .with_context(|| format!("Failed to read picks from {}", args.book_file.display()))?;

    let gateway = build_gateway(&config, &layout, args.api_key.as_deref())
        .context("Failed to create search client")?;

    let run = resolve_person(&gateway, &mut console, &layout, &args.person, &queries)
        .await
        .with_context(|| format!("Resolution failed for {}", args.person))?;

    match run.output {
        Some(path) => info!(
            "Saved {} picks for {} to {}",
            run.report.resolved.len(),
            run.person,
            path.display()
        ),
        None => {
            warn!(
                "Aborted; {} resolutions kept in the cache, no picks file written",
                run.report.resolved.len()
            );
            return Ok(());
        }
    }

    if !run.report.skipped.is_empty() {
        info!("Skipped without a match: {}", run.report.skipped.join("; "));
    }

    Ok(())
}
