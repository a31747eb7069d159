//! Candidate Extractor
//!
//! Turns a raw search response into an ordered, filtered candidate list.
//!
//! **Algorithm:**
//! 1. Parse each `<work>` into a [`CandidateRecord`], computing the
//!    case-insensitive title distance to the query
//! 2. Keep candidates with `title_distance < 50` and `rating_count > 100`
//! 3. Drop candidates with fewer than 1/100 of the best rating count
//! 4. Return survivors in response order (no re-sorting)

use crate::error::{ResolveError, ResolveResult};
use crate::models::{title_distance, CandidateRecord};
use crate::services::search_gateway::RawSearchResult;
use serde::Deserialize;
use tracing::debug;

/// Candidates at or beyond this distance are unrelated titles
pub const MAX_TITLE_DISTANCE: usize = 50;

/// Candidates at or below this rating count are too obscure
pub const MIN_RATING_COUNT: u64 = 100;

/// Survivors need at least 1/RATIO of the leader's rating count
pub const RELATIVE_POPULARITY_RATIO: u64 = 100;

// ============================================================================
// Response DTOs (exact shape of `search/index.xml`)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponseDto {
    search: SearchDto,
}

#[derive(Debug, Deserialize)]
struct SearchDto {
    #[serde(default)]
    results: ResultsDto,
}

#[derive(Debug, Default, Deserialize)]
struct ResultsDto {
    #[serde(rename = "work", default)]
    works: Vec<WorkDto>,
}

#[derive(Debug, Deserialize)]
struct WorkDto {
    #[serde(default)]
    ratings_count: TypedValueDto,
    #[serde(default)]
    original_publication_year: TypedValueDto,
    best_book: BestBookDto,
}

/// Element carrying a `type="integer"` / `nil="true"` attribute and optional text
#[derive(Debug, Default, Deserialize)]
struct TypedValueDto {
    #[serde(rename = "$text", default)]
    text: Option<String>,
}

impl TypedValueDto {
    fn trimmed(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct BestBookDto {
    #[serde(default)]
    id: TypedValueDto,
    title: String,
    author: AuthorDto,
}

#[derive(Debug, Deserialize)]
struct AuthorDto {
    name: String,
}

/// One parsed result entry before filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub author: String,
    pub rating_count: u64,
    pub publication_year: Option<i32>,
    pub external_id: Option<String>,
}

impl From<WorkDto> for SearchHit {
    fn from(work: WorkDto) -> Self {
        let rating_count = match work.ratings_count.trimmed() {
            Some(text) => text.replace(',', "").parse().unwrap_or_else(|_| {
                debug!(value = %text, "Unparseable ratings_count, treating as 0");
                0
            }),
            None => 0,
        };
        let publication_year = work
            .original_publication_year
            .trimmed()
            .and_then(|text| text.parse().ok());

        SearchHit {
            title: work.best_book.title.trim().to_string(),
            author: work.best_book.author.name.trim().to_string(),
            rating_count,
            publication_year,
            external_id: work.best_book.id.trimmed().map(str::to_string),
        }
    }
}

/// Parse a search response body into result entries, in response order
///
/// Used by the gateway to refuse caching bodies that are not search responses.
pub fn parse_search_response(body: &str) -> ResolveResult<Vec<SearchHit>> {
    let response: SearchResponseDto = quick_xml::de::from_str(body)
        .map_err(|e| ResolveError::Parse(format!("Not a search response: {}", e)))?;

    Ok(response
        .search
        .results
        .works
        .into_iter()
        .map(SearchHit::from)
        .collect())
}

/// Candidate Extractor
pub struct CandidateExtractor {
    max_title_distance: usize,
    min_rating_count: u64,
    relative_popularity_ratio: u64,
}

impl CandidateExtractor {
    /// Extractor with the fixed relevance policy
    pub fn new() -> Self {
        Self {
            max_title_distance: MAX_TITLE_DISTANCE,
            min_rating_count: MIN_RATING_COUNT,
            relative_popularity_ratio: RELATIVE_POPULARITY_RATIO,
        }
    }

    /// Extract relevant candidates for `query`
    ///
    /// An empty result is a valid "no match" outcome, not an error.
    pub fn extract(&self, query: &str, raw: &RawSearchResult) -> ResolveResult<Vec<CandidateRecord>> {
        let hits = parse_search_response(raw.body())?;
        let total = hits.len();

        let relevant: Vec<CandidateRecord> = hits
            .into_iter()
            .map(|hit| {
                let distance = title_distance(query, &hit.title);
                CandidateRecord::new(
                    hit.title,
                    hit.author,
                    hit.publication_year,
                    hit.rating_count,
                    distance,
                    hit.external_id,
                )
            })
            .filter(|c| self.is_relevant(c))
            .collect();

        debug!(
            query = %query,
            total,
            relevant = relevant.len(),
            "Before filtering step, found relevant results"
        );

        let candidates = self.filter_by_relative_popularity(relevant);
        debug!(query = %query, count = candidates.len(), "Found relevant results");

        Ok(candidates)
    }

    /// First-pass filter: close enough title and enough ratings
    pub fn is_relevant(&self, candidate: &CandidateRecord) -> bool {
        candidate.title_distance() < self.max_title_distance
            && candidate.rating_count() > self.min_rating_count
    }

    /// Second-pass filter: drop the long tail behind the most-rated candidate
    ///
    /// Keeps `rating_count >= max / ratio` (exact, no integer truncation);
    /// order is preserved.
    pub fn filter_by_relative_popularity(&self, candidates: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
        let max_rating_count = candidates.iter().map(|c| c.rating_count()).max().unwrap_or(0);

        candidates
            .into_iter()
            .filter(|c| {
                u128::from(c.rating_count()) * u128::from(self.relative_popularity_ratio)
                    >= u128::from(max_rating_count)
            })
            .collect()
    }
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::new()
    }
}
