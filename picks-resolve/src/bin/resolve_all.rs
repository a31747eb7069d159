//! resolve-all - resolve every raw pick file in the data folder
//!
//! Walks `raw-picks/*.txt` in name order. The person's name comes from the
//! file stem ("jane_doe.txt" → "Jane Doe"). Persons that already have a
//! resolved picks file are skipped unless `--overwrite` is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use picks_common::config::{resolve_data_dir, DataLayout, TomlConfig, DATA_DIR_ENV};
use picks_common::logging::init_tracing;
use picks_common::picks::{files_with_extension, person_for_file, read_queries};
use picks_resolve::services::ConsoleDecisionProvider;
use picks_resolve::{build_gateway, resolve_person};

/// Command-line arguments for resolve-all
#[derive(Parser, Debug)]
#[command(name = "resolve-all")]
#[command(about = "Resolve the book picks of everyone in raw-picks/")]
#[command(version)]
struct Args {
    /// Re-resolve persons whose resolved picks already exist
    #[arg(long)]
    overwrite: bool,

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
        "Starting resolve-all v{} [{}] ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_PROFILE")
    );

    let layout = DataLayout::new(resolve_data_dir(args.data_dir.as_deref(), DATA_DIR_ENV, &config));
    layout
        .ensure_directories()
        .context("Failed to initialize data folder")?;

    let pick_files = files_with_extension(&layout.raw_picks_dir(), "txt")
        .context("Failed to list raw pick files")?;
    if pick_files.is_empty() {
        warn!("No raw pick files in {}", layout.raw_picks_dir().display());
        return Ok(());
    }
    info!("Found {} raw pick files", pick_files.len());

    let gateway = build_gateway(&config, &layout, args.api_key.as_deref())
        .context("Failed to create search client")?;
    let mut console = ConsoleDecisionProvider::stdio();

    let mut done = 0usize;
    for file in &pick_files {
        let person = person_for_file(file)?;

        if !args.overwrite && layout.resolved_picks_file(&person).exists() {
            info!("{} already resolved, skipping", person);
            continue;
        }

        let queries = read_queries(file)
            .with_context(|| format!("Failed to read picks from {}", file.display()))?;

        let run = resolve_person(&gateway, &mut console, &layout, &person, &queries)
            .await
            .with_context(|| format!("Resolution failed for {}", person))?;

        if run.aborted() {
            warn!("Aborted while resolving {}; stopping", person);
            break;
        }
        done += 1;
    }

    info!("Resolved picks for {} persons", done);
    Ok(())
}
