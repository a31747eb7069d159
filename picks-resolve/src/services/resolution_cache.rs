//! Resolution Cache
//!
//! Durable mapping from query → resolved record for one person.
//!
//! Lifecycle: [`ResolutionCache::load`] at start, mutate in memory with
//! [`put`](ResolutionCache::put), [`flush`](ResolutionCache::flush) after
//! each mutation and again at shutdown. The in-memory map is the source of
//! truth during a run; the file is a snapshot taken at flush points.
//!
//! Keys are the raw query strings as supplied. "Dune" and "dune " are
//! different entries and each needs its own resolution.

use crate::error::{ResolveError, ResolveResult};
use crate::models::ResolvedRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CACHE_FORMAT_VERSION: u32 = 1;

/// One cached resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Search API identifier, kept for audit/debugging
    pub external_id: Option<String>,
    pub record: ResolvedRecord,
}

/// On-disk document
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    entries: BTreeMap<String, CacheEntry>,
}

/// Resolution Cache
#[derive(Debug)]
pub struct ResolutionCache {
    path: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
    dirty: bool,
}

impl ResolutionCache {
    /// Empty cache that will flush to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
            dirty: false,
        }
    }

    /// Load the cache at `path`; an absent file yields an empty cache
    ///
    /// A file that exists but cannot be parsed is an error, never discarded.
    pub fn load(path: impl Into<PathBuf>) -> ResolveResult<Self> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "No resolution cache yet, starting empty");
            return Ok(Self::new(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let file: CacheFile = serde_json::from_str(&content)?;
        if file.version != CACHE_FORMAT_VERSION {
            return Err(ResolveError::Parse(format!(
                "Unsupported resolution cache version {} in {}",
                file.version,
                path.display()
            )));
        }

        info!(path = %path.display(), entries = file.entries.len(), "Loaded resolution cache");

        Ok(Self {
            path,
            entries: file.entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether there are unflushed changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(query)
    }

    /// Cached record for `query`; `Lookup` error when absent
    pub fn get(&self, query: &str) -> ResolveResult<&ResolvedRecord> {
        self.entries
            .get(query)
            .map(|entry| &entry.record)
            .ok_or_else(|| ResolveError::Lookup(query.to_string()))
    }

    /// Full entry for `query`, including the external identifier
    pub fn entry(&self, query: &str) -> Option<&CacheEntry> {
        self.entries.get(query)
    }

    /// Insert or overwrite; marks the cache dirty
    pub fn put(&mut self, query: impl Into<String>, external_id: Option<String>, record: ResolvedRecord) {
        self.entries.insert(query.into(), CacheEntry { external_id, record });
        self.dirty = true;
    }

    /// Write the whole cache if dirty; no-op otherwise
    ///
    /// The file is replaced by rename, so readers see either the previous
    /// snapshot or the new one.
    pub fn flush(&mut self) -> ResolveResult<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = CacheFile {
            version: CACHE_FORMAT_VERSION,
            entries: self.entries.clone(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        let mut temp_name = self.path.as_os_str().to_os_string();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, &self.path)?;

        self.dirty = false;
        debug!(path = %self.path.display(), entries = self.entries.len(), "Flushed resolution cache");
        Ok(())
    }
}
