//! Candidate book records

use picks_common::ResolvedPick;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Case-insensitive Levenshtein distance between a query and a title
pub fn title_distance(query: &str, title: &str) -> usize {
    strsim::levenshtein(&query.to_lowercase(), &title.to_lowercase())
}

/// One book match for a query
///
/// `rating_count` and `title_distance` are fixed when the record is built;
/// there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    title: String,
    author: String,
    publication_year: Option<i32>,
    rating_count: u64,
    title_distance: usize,
    /// Search API identifier of the best edition, when the response has one
    external_id: Option<String>,
}

impl CandidateRecord {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: Option<i32>,
        rating_count: u64,
        title_distance: usize,
        external_id: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            publication_year,
            rating_count,
            title_distance,
            external_id,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn publication_year(&self) -> Option<i32> {
        self.publication_year
    }

    pub fn rating_count(&self) -> u64 {
        self.rating_count
    }

    pub fn title_distance(&self) -> usize {
        self.title_distance
    }

    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    /// CSV row for the resolved picks file
    pub fn to_pick(&self) -> ResolvedPick {
        ResolvedPick {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.publication_year,
        }
    }
}

impl fmt::Display for CandidateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.publication_year {
            Some(year) => write!(f, "{} by {}, published in {}", self.title, self.author, year),
            None => write!(f, "{} by {}", self.title, self.author),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_distance_ignores_case() {
        assert_eq!(title_distance("DUNE", "dune"), 0);
        assert_eq!(title_distance("The Hobbit", "The Hobbit, or There and Back Again"), 25);
    }

    #[test]
    fn test_display() {
        let with_year = CandidateRecord::new("Dune", "Frank Herbert", Some(1965), 900_000, 0, None);
        assert_eq!(with_year.to_string(), "Dune by Frank Herbert, published in 1965");

        let without_year = CandidateRecord::new("Beowulf", "Unknown", None, 300, 0, None);
        assert_eq!(without_year.to_string(), "Beowulf by Unknown");
    }
}
