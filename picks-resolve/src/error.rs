//! Error types for picks-resolve
//!
//! Fatal errors (`Gateway`, `Network`, `Parse`, `PromptClosed`) end the
//! current batch. `Lookup` is recoverable by checking
//! [`ResolutionCache::contains`](crate::services::ResolutionCache::contains)
//! first. Invalid operator input never surfaces here; the prompt re-asks.

use thiserror::Error;

/// Resolution error type
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Query absent from the resolution cache
    #[error("No cached resolution for query '{0}'")]
    Lookup(String),

    /// Search API answered with a non-success status
    #[error("Search API error {status} for query '{query}': {body}")]
    Gateway {
        query: String,
        status: u16,
        body: String,
    },

    /// Transport failure or timeout talking to the search API
    #[error("Network error: {0}")]
    Network(String),

    /// Response body is not a search response, or a cache file has an unknown format
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operator input ended (EOF) or ran out of attempts
    #[error("Prompt closed: {0}")]
    PromptClosed(String),

    /// Invalid argument (e.g. empty query)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resolution cache (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// picks-common error
    #[error("Common error: {0}")]
    Common(#[from] picks_common::Error),
}

/// Result type for resolution operations
pub type ResolveResult<T> = Result<T, ResolveError>;
