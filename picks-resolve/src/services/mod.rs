//! Service modules for title resolution
//!
//! Leaves first: search gateway (client + raw response cache), candidate
//! extractor, confidence resolver, decision provider, resolution cache,
//! and the orchestrator tying them together.

pub mod candidate_extractor;
pub mod confidence_resolver;
pub mod decision_provider;
pub mod goodreads_client;
pub mod orchestrator;
pub mod resolution_cache;
pub mod search_gateway;

pub use candidate_extractor::{parse_search_response, CandidateExtractor, SearchHit};
pub use confidence_resolver::{Classification, ConfidenceResolver};
pub use decision_provider::{ask_human, ConsoleDecisionProvider, DecisionProvider, NoMatchAction};
pub use goodreads_client::{GoodreadsClient, SearchApi};
pub use orchestrator::{BatchReport, Outcome, Resolver};
pub use resolution_cache::{CacheEntry, ResolutionCache};
pub use search_gateway::{normalized_cache_key, RawSearchResult, SearchGateway};
