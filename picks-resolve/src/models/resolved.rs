//! Resolved records: the answer for one query

use super::CandidateRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a candidate was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// Only one candidate survived filtering
    SingleCandidate,
    /// Popularity lead and title match were decisive
    ObviousWinner,
    /// Operator picked from an ambiguous list
    Human,
}

impl ResolutionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionMethod::SingleCandidate => "single_candidate",
            ResolutionMethod::ObviousWinner => "obvious_winner",
            ResolutionMethod::Human => "human",
        }
    }
}

/// The candidate chosen for a query, plus provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    /// Query exactly as supplied
    pub query: String,
    /// Search API identifier of the chosen book, if known
    pub external_id: Option<String>,
    pub book: CandidateRecord,
    pub method: ResolutionMethod,
    pub resolved_at: DateTime<Utc>,
}

impl ResolvedRecord {
    /// Promote a selected candidate
    pub fn new(query: impl Into<String>, book: CandidateRecord, method: ResolutionMethod) -> Self {
        Self {
            query: query.into(),
            external_id: book.external_id().map(str::to_string),
            book,
            method,
            resolved_at: Utc::now(),
        }
    }
}
