//! Per-person resolution run
//!
//! Loads the person's resolution cache, resolves every query, flushes the
//! cache at shutdown, and writes the resolved picks CSV unless the operator
//! aborted.

use crate::error::ResolveResult;
use crate::services::{BatchReport, DecisionProvider, ResolutionCache, Resolver, SearchApi, SearchGateway};
use picks_common::config::DataLayout;
use picks_common::picks::write_resolved_picks;
use picks_common::ResolvedPick;
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of one person's run
#[derive(Debug)]
pub struct PersonRun {
    pub person: String,
    pub report: BatchReport,
    /// CSV written, `None` when the batch was aborted
    pub output: Option<PathBuf>,
}

impl PersonRun {
    /// The operator stopped the run; an outcome, not an error
    pub fn aborted(&self) -> bool {
        self.report.aborted
    }
}

/// Resolve `queries` for `person` and save the result
///
/// On abort (or any error) the CSV is left untouched; resolutions made so
/// far stay in the resolution cache and replay instantly next run.
pub async fn resolve_person<A, D>(
    gateway: &SearchGateway<A>,
    decisions: &mut D,
    layout: &DataLayout,
    person: &str,
    queries: &[String],
) -> ResolveResult<PersonRun>
where
    A: SearchApi,
    D: DecisionProvider + ?Sized,
{
    info!(person = %person, queries = queries.len(), "Resolving picks");

    let mut cache = ResolutionCache::load(layout.resolution_cache_file(person))?;

    let result = Resolver::new(gateway, &mut cache, decisions)
        .resolve_batch(queries)
        .await;

    // Shutdown flush, also on the error path
    cache.flush()?;
    let report = result?;

    info!(
        person = %person,
        resolved = report.resolved.len(),
        skipped = report.skipped.len(),
        cache_hits = report.cache_hits,
        "Resolution finished"
    );

    if report.aborted {
        warn!(person = %person, "Batch aborted, resolved picks not saved");
        return Ok(PersonRun {
            person: person.to_string(),
            report,
            output: None,
        });
    }

    let picks: Vec<ResolvedPick> = report.resolved.iter().map(|r| r.book.to_pick()).collect();
    let output = layout.resolved_picks_file(person);
    write_resolved_picks(&output, &picks)?;

    Ok(PersonRun {
        person: person.to_string(),
        report,
        output: Some(output),
    })
}
