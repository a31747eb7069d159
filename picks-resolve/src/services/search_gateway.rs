//! Search Gateway: raw search responses, backed by a disk cache
//!
//! The cache holds one file per normalized query (`<key>.xml`) containing
//! the exact response body. Files are never refreshed or expired; delete
//! one to force a new request.

use super::candidate_extractor::parse_search_response;
use super::goodreads_client::SearchApi;
use crate::error::{ResolveError, ResolveResult};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Raw search response body for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSearchResult {
    body: String,
    from_cache: bool,
}

impl RawSearchResult {
    /// Wrap a body fetched from the network
    pub fn new(body: String) -> Self {
        Self {
            body,
            from_cache: false,
        }
    }

    fn cached(body: String) -> Self {
        Self {
            body,
            from_cache: true,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the body was replayed from disk
    pub fn from_cache(&self) -> bool {
        self.from_cache
    }
}

/// Longest cache key in bytes, leaving room for `.xml` under the usual
/// 255-byte file name limit
pub const MAX_CACHE_KEY_BYTES: usize = 200;

/// Hex digits of the SHA-256 suffix on shortened keys
const KEY_HASH_HEX_LEN: usize = 16;

/// Disk cache key for a query: lowercase, spaces → underscores
///
/// Letters and digits of any script are kept as is; other characters that
/// could be unsafe in a file name are percent-escaped (UTF-8 bytes), so
/// distinct keys never collide on disk. Keys longer than
/// [`MAX_CACHE_KEY_BYTES`] are cut at a character boundary and suffixed
/// with a hash of the full key.
pub fn normalized_cache_key(query: &str) -> String {
    let normalized = query.to_lowercase().replace(' ', "_");

    let mut key = String::with_capacity(normalized.len());
    for ch in normalized.chars() {
        if ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.') {
            key.push(ch);
        } else {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                key.push_str(&format!("%{:02X}", byte));
            }
        }
    }

    if key.len() <= MAX_CACHE_KEY_BYTES {
        return key;
    }

    let hash = format!("{:x}", Sha256::digest(key.as_bytes()));
    let mut cut = MAX_CACHE_KEY_BYTES - KEY_HASH_HEX_LEN - 1;
    while !key.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}-{}", &key[..cut], &hash[..KEY_HASH_HEX_LEN])
}

/// Search Gateway
pub struct SearchGateway<A: SearchApi> {
    api: A,
    cache_dir: PathBuf,
}

impl<A: SearchApi> SearchGateway<A> {
    pub fn new(api: A, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Cache file for a query
    pub fn cache_path(&self, query: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.xml", normalized_cache_key(query)))
    }

    /// Fetch the raw search response for `query`
    ///
    /// **Algorithm:**
    /// 1. Cache file exists → return its contents, no network call
    /// 2. Otherwise query the API; a non-success status is a fatal `Gateway` error
    /// 3. Persist the body (only if it parses as a search response) and return it
    pub async fn fetch_candidates_raw(&self, query: &str) -> ResolveResult<RawSearchResult> {
        if query.trim().is_empty() {
            return Err(ResolveError::InvalidInput("Search query is empty".to_string()));
        }

        let path = self.cache_path(query);

        if path.exists() {
            debug!(query = %query, path = %path.display(), "Hit the cache");
            let body = std::fs::read_to_string(&path)?;
            return Ok(RawSearchResult::cached(body));
        }

        debug!(query = %query, "Cache miss, hitting the search API");
        let body = self.api.search(query).await?;

        // Never cache a body that cannot be replayed
        parse_search_response(&body)?;

        std::fs::create_dir_all(&self.cache_dir)?;
        std::fs::write(&path, &body)?;
        debug!(path = %path.display(), "Cached search response");

        Ok(RawSearchResult::new(body))
    }
}
