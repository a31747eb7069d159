//! Commonality score
//!
//! score(person) = picks also chosen by someone else / all of the person's picks.
//! Books are compared by [`book_id`], so two persons share a book only when
//! title, author and year all resolved identically.

use crate::error::{ScoreError, ScoreResult};
use picks_common::picks::{files_with_extension, person_for_file, read_resolved_picks};
use picks_common::ResolvedPick;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Identity of a resolved book across persons
pub fn book_id(pick: &ResolvedPick) -> String {
    format!(
        "title={},author={},year={}",
        pick.title,
        pick.author,
        pick.year.map(|y| y.to_string()).unwrap_or_default()
    )
}

/// Everyone's resolved picks
#[derive(Debug, Default)]
pub struct Cohort {
    picks: BTreeMap<String, Vec<ResolvedPick>>,
}

impl Cohort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every `*.csv` in `dir`; the person name comes from the file stem
    pub fn load(dir: &Path) -> ScoreResult<Self> {
        let mut cohort = Self::new();
        for file in files_with_extension(dir, "csv")? {
            let person = person_for_file(&file)?;
            let picks = read_resolved_picks(&file)?;
            debug!(person = %person, count = picks.len(), "Loaded resolved picks");
            cohort.add(person, picks);
        }
        info!(persons = cohort.len(), "Loaded cohort");
        Ok(cohort)
    }

    pub fn add(&mut self, person: impl Into<String>, picks: Vec<ResolvedPick>) {
        self.picks.insert(person.into(), picks);
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Distinct books in first-seen order (persons by name, picks in file order)
    pub fn distinct_books(&self) -> Vec<ResolvedPick> {
        let mut seen = HashSet::new();
        self.picks
            .values()
            .flatten()
            .filter(|pick| seen.insert(book_id(pick)))
            .cloned()
            .collect()
    }

    /// book id → persons who picked it
    fn pickers(&self) -> BTreeMap<String, BTreeSet<&str>> {
        let mut pickers: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
        for (person, picks) in &self.picks {
            for pick in picks {
                pickers.entry(book_id(pick)).or_default().insert(person.as_str());
            }
        }
        pickers
    }

    /// Score for one person
    pub fn score(&self, person: &str) -> ScoreResult<f64> {
        let picks = self
            .picks
            .get(person)
            .filter(|picks| !picks.is_empty())
            .ok_or_else(|| ScoreError::EmptyPicks(person.to_string()))?;
        Ok(self.score_with(person, picks, &self.pickers()))
    }

    fn score_with(
        &self,
        person: &str,
        picks: &[ResolvedPick],
        pickers: &BTreeMap<String, BTreeSet<&str>>,
    ) -> f64 {
        let shared = picks
            .iter()
            .filter(|pick| {
                let id = book_id(pick);
                let shared = pickers.get(&id).map_or(false, |who| who.len() > 1);
                if !shared {
                    debug!(person = %person, book = %id, "Found unique book");
                }
                shared
            })
            .count();
        shared as f64 / picks.len() as f64
    }

    /// Every person's score, highest first, ties by name
    pub fn scores(&self) -> ScoreResult<Vec<(String, f64)>> {
        let pickers = self.pickers();
        let mut scores = Vec::with_capacity(self.picks.len());
        for (person, picks) in &self.picks {
            if picks.is_empty() {
                return Err(ScoreError::EmptyPicks(person.clone()));
            }
            scores.push((person.clone(), self.score_with(person, picks, &pickers)));
        }

        scores.sort_by(|(a_name, a), (b_name, b)| b.total_cmp(a).then_with(|| a_name.cmp(b_name)));
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(title: &str, author: &str, year: Option<i32>) -> ResolvedPick {
        ResolvedPick {
            title: title.to_string(),
            author: author.to_string(),
            year,
        }
    }

    fn cohort() -> Cohort {
        let mut cohort = Cohort::new();
        cohort.add(
            "Ann",
            vec![
                pick("Dune", "Frank Herbert", Some(1965)),
                pick("Beowulf", "Unknown", None),
            ],
        );
        cohort.add(
            "Bob",
            vec![
                pick("Dune", "Frank Herbert", Some(1965)),
                pick("Beowulf", "Unknown", None),
                pick("Ulysses", "James Joyce", Some(1922)),
                pick("Emma", "Jane Austen", Some(1815)),
            ],
        );
        cohort.add("Cat", vec![pick("Middlemarch", "George Eliot", Some(1871))]);
        cohort
    }

    #[test]
    fn test_book_id() {
        assert_eq!(
            book_id(&pick("Dune", "Frank Herbert", Some(1965))),
            "title=Dune,author=Frank Herbert,year=1965"
        );
        assert_eq!(book_id(&pick("Beowulf", "Unknown", None)), "title=Beowulf,author=Unknown,year=");
    }

    #[test]
    fn test_scores_sorted_descending() {
        let scores = cohort().scores().unwrap();
        assert_eq!(
            scores,
            vec![
                ("Ann".to_string(), 1.0),
                ("Bob".to_string(), 0.5),
                ("Cat".to_string(), 0.0),
            ]
        );
    }

    #[test]
    fn test_ties_sorted_by_name() {
        let mut cohort = Cohort::new();
        cohort.add("Zed", vec![pick("Emma", "Jane Austen", Some(1815))]);
        cohort.add("Amy", vec![pick("Ulysses", "James Joyce", Some(1922))]);
        let names: Vec<String> = cohort.scores().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
    }

    #[test]
    fn test_same_person_twice_is_not_shared() {
        let mut cohort = Cohort::new();
        cohort.add(
            "Ann",
            vec![pick("Emma", "Jane Austen", Some(1815)), pick("Emma", "Jane Austen", Some(1815))],
        );
        assert_eq!(cohort.score("Ann").unwrap(), 0.0);
    }

    #[test]
    fn test_year_mismatch_is_different_book() {
        let mut cohort = Cohort::new();
        cohort.add("Ann", vec![pick("Emma", "Jane Austen", Some(1815))]);
        cohort.add("Bob", vec![pick("Emma", "Jane Austen", None)]);
        assert_eq!(cohort.score("Ann").unwrap(), 0.0);
    }

    #[test]
    fn test_empty_picks_is_error() {
        let mut cohort = cohort();
        cohort.add("Dan", vec![]);
        assert!(matches!(cohort.scores(), Err(ScoreError::EmptyPicks(name)) if name == "Dan"));
        assert!(matches!(cohort.score("Nobody"), Err(ScoreError::EmptyPicks(_))));
    }

    #[test]
    fn test_distinct_books_first_seen_order() {
        let titles: Vec<String> = cohort().distinct_books().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["Dune", "Beowulf", "Ulysses", "Emma", "Middlemarch"]);
    }
}
