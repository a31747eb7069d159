//! Data models for picks-resolve
//!
//! - `CandidateRecord`: one search result considered as a match
//! - `ResolvedRecord`: the candidate chosen for a query, with provenance

pub mod candidate;
pub mod resolved;

pub use candidate::{title_distance, CandidateRecord};
pub use resolved::{ResolutionMethod, ResolvedRecord};
