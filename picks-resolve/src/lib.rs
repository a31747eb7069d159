//! picks-resolve library interface
//!
//! Resolves free-text book titles into bibliographic records via the
//! Goodreads search API, caching both raw responses and final decisions.

pub mod error;
pub mod models;
pub mod services;
pub mod session;

pub use crate::error::{ResolveError, ResolveResult};
pub use crate::models::{CandidateRecord, ResolutionMethod, ResolvedRecord};
pub use crate::session::{resolve_person, PersonRun};

use picks_common::config::{resolve_api_key, DataLayout, TomlConfig};
use services::{GoodreadsClient, SearchGateway};

/// Build the production gateway: Goodreads client + raw response cache
pub fn build_gateway(
    config: &TomlConfig,
    layout: &DataLayout,
    api_key: Option<&str>,
) -> ResolveResult<SearchGateway<GoodreadsClient>> {
    let api_key = resolve_api_key(api_key, config);
    if api_key.is_none() {
        tracing::warn!("No Goodreads API key configured; only cached searches will work");
    }

    let client = GoodreadsClient::new(&config.goodreads, api_key)?;
    Ok(SearchGateway::new(client, layout.search_cache_dir()))
}
