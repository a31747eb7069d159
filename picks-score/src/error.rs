//! Error types for picks-score

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    /// A person has a resolved picks file with no rows
    #[error("{0} has no resolved picks")]
    EmptyPicks(String),

    /// Likely duplicates: the same book recorded under two titles
    #[error("{0} likely duplicate books among resolved picks")]
    Duplicates(usize),

    #[error("Common error: {0}")]
    Common(#[from] picks_common::Error),
}

pub type ScoreResult<T> = Result<T, ScoreError>;
