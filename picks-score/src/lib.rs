//! picks-score library interface
//!
//! Commonality score over everyone's resolved picks, plus the duplicate
//! check that has to pass before scores mean anything.

pub mod cohort;
pub mod duplicates;
pub mod error;

pub use cohort::{book_id, Cohort};
pub use duplicates::{find_duplicates, DuplicatePair};
pub use error::{ScoreError, ScoreResult};

/// Check for duplicates, then score
///
/// Refuses to score when likely duplicates exist; each one is logged.
pub fn score_cohort(cohort: &Cohort) -> ScoreResult<Vec<(String, f64)>> {
    let duplicates = find_duplicates(&cohort.distinct_books());
    for pair in &duplicates {
        tracing::error!(
            "Books '{}' and '{}' have Levenshtein distance {}",
            pair.first.title,
            pair.second.title,
            pair.title_distance
        );
    }
    if !duplicates.is_empty() {
        return Err(ScoreError::Duplicates(duplicates.len()));
    }

    cohort.scores()
}
