//! Confidence Resolver
//!
//! Pure decision over an extracted candidate list: accept automatically,
//! report no match, or hand the list to a human.
//!
//! A candidate is an obvious winner iff it has the most ratings, at least
//! 100x the ratings of every other candidate, and a title distance under 10.

use crate::models::CandidateRecord;

/// Required rating lead of the winner over every runner-up
pub const OBVIOUS_WINNER_RATIO: u64 = 100;

/// Winner title distance must be strictly below this
pub const OBVIOUS_WINNER_MAX_DISTANCE: usize = 10;

/// Classification of a candidate list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// No candidates survived extraction
    NoMatch,
    /// Exactly one candidate
    SingleCandidate(CandidateRecord),
    /// Overwhelming popularity lead plus near-exact title
    ObviousWinner(CandidateRecord),
    /// A human has to choose (order preserved)
    Ambiguous(Vec<CandidateRecord>),
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::NoMatch => "NoMatch",
            Classification::SingleCandidate(_) => "SingleCandidate",
            Classification::ObviousWinner(_) => "ObviousWinner",
            Classification::Ambiguous(_) => "Ambiguous",
        }
    }
}

/// Confidence Resolver
pub struct ConfidenceResolver {
    winner_ratio: u64,
    max_winner_distance: usize,
}

impl ConfidenceResolver {
    /// Resolver with the fixed policy (100x lead, distance < 10)
    pub fn new() -> Self {
        Self {
            winner_ratio: OBVIOUS_WINNER_RATIO,
            max_winner_distance: OBVIOUS_WINNER_MAX_DISTANCE,
        }
    }

    /// Classify a candidate list
    ///
    /// Deterministic and total: empty → `NoMatch`, one → `SingleCandidate`,
    /// otherwise `ObviousWinner` or `Ambiguous`.
    pub fn classify(&self, mut candidates: Vec<CandidateRecord>) -> Classification {
        match candidates.len() {
            0 => Classification::NoMatch,
            1 => Classification::SingleCandidate(candidates.remove(0)),
            _ => match self.obvious_winner(&candidates) {
                Some(index) => Classification::ObviousWinner(candidates.swap_remove(index)),
                None => Classification::Ambiguous(candidates),
            },
        }
    }

    /// Index of the obvious winner, if any
    ///
    /// The target is the first candidate holding the maximum rating count,
    /// so a tie for first place is never obvious.
    pub fn obvious_winner(&self, candidates: &[CandidateRecord]) -> Option<usize> {
        let (target_index, target) = candidates
            .iter()
            .enumerate()
            .fold(None::<(usize, &CandidateRecord)>, |best, (i, c)| match best {
                Some((_, b)) if c.rating_count() <= b.rating_count() => best,
                _ => Some((i, c)),
            })?;

        let dominates = candidates.iter().enumerate().all(|(i, c)| {
            i == target_index
                || u128::from(c.rating_count()) * u128::from(self.winner_ratio)
                    <= u128::from(target.rating_count())
        });

        if dominates && target.title_distance() < self.max_winner_distance {
            Some(target_index)
        } else {
            None
        }
    }
}

impl Default for ConfidenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, ratings: u64, distance: usize) -> CandidateRecord {
        CandidateRecord::new(title, "Author", None, ratings, distance, None)
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(ConfidenceResolver::new().classify(vec![]), Classification::NoMatch);
    }

    #[test]
    fn test_single_candidate_regardless_of_distance() {
        let only = candidate("Far Away Title", 150, 45);
        assert_eq!(
            ConfidenceResolver::new().classify(vec![only.clone()]),
            Classification::SingleCandidate(only)
        );
    }

    #[test]
    fn test_rating_lead_and_close_title_is_obvious() {
        let leader = candidate("Leader", 10_000, 2);
        let result = ConfidenceResolver::new().classify(vec![leader.clone(), candidate("Other", 50, 30)]);
        assert_eq!(result, Classification::ObviousWinner(leader));
    }

    #[test]
    fn test_rating_lead_with_far_title_is_ambiguous() {
        let candidates = vec![candidate("Leader", 10_000, 20), candidate("Exact", 200, 1)];
        let result = ConfidenceResolver::new().classify(candidates.clone());
        assert_eq!(result, Classification::Ambiguous(candidates));
    }

    #[test]
    fn test_no_rating_lead_is_ambiguous() {
        let candidates = vec![candidate("A", 51, 3), candidate("B", 5_000, 4)];
        let result = ConfidenceResolver::new().classify(candidates.clone());
        assert_eq!(result, Classification::Ambiguous(candidates));
    }

    #[test]
    fn test_lead_on_hundred_times_boundary_is_obvious() {
        let leader = candidate("B", 5_000, 4);
        let result = ConfidenceResolver::new().classify(vec![candidate("A", 50, 3), leader.clone()]);
        assert_eq!(result, Classification::ObviousWinner(leader));
    }

    #[test]
    fn test_exact_hundred_times_lead_is_enough() {
        let resolver = ConfidenceResolver::new();
        let candidates = vec![candidate("Runner", 100, 0), candidate("Leader", 10_000, 9)];
        assert_eq!(resolver.obvious_winner(&candidates), Some(1));

        let candidates = vec![candidate("Runner", 101, 0), candidate("Leader", 10_000, 9)];
        assert_eq!(resolver.obvious_winner(&candidates), None);
    }

    #[test]
    fn test_distance_ten_is_not_obvious() {
        let candidates = vec![candidate("Leader", 10_000, 10), candidate("Other", 10, 0)];
        assert_eq!(ConfidenceResolver::new().obvious_winner(&candidates), None);
    }

    #[test]
    fn test_tied_leaders_are_ambiguous() {
        let candidates = vec![candidate("A", 10_000, 0), candidate("B", 10_000, 0)];
        assert!(matches!(
            ConfidenceResolver::new().classify(candidates),
            Classification::Ambiguous(_)
        ));
    }

    #[test]
    fn test_winner_may_be_anywhere_in_list() {
        let winner = candidate("Winner", 1_000_000, 0);
        let candidates = vec![candidate("A", 200, 5), winner.clone(), candidate("C", 300, 1)];
        assert_eq!(
            ConfidenceResolver::new().classify(candidates),
            Classification::ObviousWinner(winner)
        );
    }
}
