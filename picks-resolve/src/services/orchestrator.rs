//! Resolution Orchestrator
//!
//! Drives one query through cache check → fetch → extract → classify →
//! (operator) → cache write.
//!
//! ```text
//! Start → CacheCheck ─hit─────────────────────────────→ Resolved
//!             └─miss→ Fetching → Classifying ─auto────→ Resolved
//!                                    └─→ Prompting ───→ Resolved | Skipped | Aborted
//! ```
//!
//! Queries run strictly one after another. Every resolved entry is flushed
//! before the next query starts, so a later fatal error never loses it.

use super::candidate_extractor::CandidateExtractor;
use super::confidence_resolver::{Classification, ConfidenceResolver};
use super::decision_provider::{ask_human, DecisionProvider, NoMatchAction};
use super::goodreads_client::SearchApi;
use super::resolution_cache::ResolutionCache;
use super::search_gateway::SearchGateway;
use crate::error::ResolveResult;
use crate::models::{ResolutionMethod, ResolvedRecord};
use tracing::{debug, info, warn};

/// Terminal state for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved(ResolvedRecord),
    /// No match; operator chose to continue
    Skipped,
    /// No match; operator chose to stop the batch
    Aborted,
}

/// Result of resolving a list of queries
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Resolved records in resolution order (cache hits included)
    pub resolved: Vec<ResolvedRecord>,
    /// Queries skipped for lack of a match
    pub skipped: Vec<String>,
    /// The operator stopped the batch
    pub aborted: bool,
    /// Queries answered from the resolution cache
    pub cache_hits: usize,
}

/// Resolution Orchestrator
///
/// Borrows its collaborators; the caller owns the cache lifecycle.
pub struct Resolver<'a, A: SearchApi, D: DecisionProvider + ?Sized> {
    gateway: &'a SearchGateway<A>,
    cache: &'a mut ResolutionCache,
    decisions: &'a mut D,
    extractor: CandidateExtractor,
    confidence: ConfidenceResolver,
}

impl<'a, A: SearchApi, D: DecisionProvider + ?Sized> Resolver<'a, A, D> {
    pub fn new(
        gateway: &'a SearchGateway<A>,
        cache: &'a mut ResolutionCache,
        decisions: &'a mut D,
    ) -> Self {
        Self {
            gateway,
            cache,
            decisions,
            extractor: CandidateExtractor::new(),
            confidence: ConfidenceResolver::new(),
        }
    }

    /// Resolve one query
    pub async fn resolve(&mut self, query: &str) -> ResolveResult<Outcome> {
        if self.cache.contains(query) {
            debug!(query = %query, "Resolution cache hit");
            return Ok(Outcome::Resolved(self.cache.get(query)?.clone()));
        }

        info!(query = %query, "Searching for book");
        let raw = self.gateway.fetch_candidates_raw(query).await?;
        let candidates = self.extractor.extract(query, &raw)?;

        let classification = self.confidence.classify(candidates);
        debug!(query = %query, classification = classification.as_str(), "Classified candidates");

        let (book, method) = match classification {
            Classification::NoMatch => {
                warn!(query = %query, "No results for query");
                return match self.decisions.on_no_match(query)? {
                    NoMatchAction::Skip => {
                        info!(query = %query, "Skipping query");
                        Ok(Outcome::Skipped)
                    }
                    NoMatchAction::Abort => {
                        info!(query = %query, "Operator aborted the batch");
                        Ok(Outcome::Aborted)
                    }
                };
            }
            Classification::SingleCandidate(book) => (book, ResolutionMethod::SingleCandidate),
            Classification::ObviousWinner(book) => {
                debug!(query = %query, title = %book.title(), "We have a winner");
                (book, ResolutionMethod::ObviousWinner)
            }
            Classification::Ambiguous(candidates) => {
                debug!(query = %query, count = candidates.len(), "No obviously correct book");
                (ask_human(&mut *self.decisions, query, &candidates)?, ResolutionMethod::Human)
            }
        };

        let record = ResolvedRecord::new(query, book, method);
        info!(
            query = %query,
            title = %record.book.title(),
            author = %record.book.author(),
            method = method.as_str(),
            "Resolved"
        );

        self.cache.put(query, record.external_id.clone(), record.clone());
        self.cache.flush()?;

        Ok(Outcome::Resolved(record))
    }

    /// Resolve queries in order until done or aborted
    ///
    /// Fatal errors propagate immediately; entries resolved before the
    /// error are already flushed.
    pub async fn resolve_batch(&mut self, queries: &[String]) -> ResolveResult<BatchReport> {
        let mut report = BatchReport::default();

        for query in queries {
            let cached = self.cache.contains(query);
            match self.resolve(query).await? {
                Outcome::Resolved(record) => {
                    if cached {
                        report.cache_hits += 1;
                    }
                    report.resolved.push(record);
                }
                Outcome::Skipped => report.skipped.push(query.clone()),
                Outcome::Aborted => {
                    report.aborted = true;
                    break;
                }
            }
        }

        Ok(report)
    }
}
