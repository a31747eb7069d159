//! Duplicate-title check
//!
//! Two resolved books with nearly the same title and author are usually
//! one book that resolved differently for two persons (edition, subtitle,
//! typo). Scores are meaningless until those are reconciled.

use picks_common::ResolvedPick;
use strsim::levenshtein;
use tracing::info;

/// Titles at most this far apart are suspicious...
pub const MAX_TITLE_DISTANCE: usize = 5;

/// ...and so are authors at most this far apart
pub const MAX_AUTHOR_DISTANCE: usize = 5;

/// Two books that are probably the same
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePair {
    pub first: ResolvedPick,
    pub second: ResolvedPick,
    pub title_distance: usize,
}

/// Whether two titles are close enough to be the same book
///
/// The distance must also stay under half the shorter title, so "It" and
/// "If" are different books.
fn titles_close(a: &str, b: &str) -> Option<usize> {
    let distance = levenshtein(a, b);
    let shortest = a.chars().count().min(b.chars().count());
    (distance <= MAX_TITLE_DISTANCE && distance * 2 < shortest).then_some(distance)
}

/// Compare every pair of distinct books
pub fn find_duplicates(books: &[ResolvedPick]) -> Vec<DuplicatePair> {
    let mut duplicates = Vec::new();

    for (i, first) in books.iter().enumerate() {
        for second in &books[i + 1..] {
            let Some(title_distance) = titles_close(&first.title, &second.title) else {
                continue;
            };

            let author_distance = levenshtein(&first.author, &second.author);
            if author_distance <= MAX_AUTHOR_DISTANCE {
                duplicates.push(DuplicatePair {
                    first: first.clone(),
                    second: second.clone(),
                    title_distance,
                });
            } else {
                info!(
                    "Books '{}' and '{}' have Levenshtein distance {}, but different authors '{}' and '{}' (distance {})",
                    first.title, second.title, title_distance, first.author, second.author, author_distance
                );
            }
        }
    }

    duplicates
}
