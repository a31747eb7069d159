//! Pick files: raw query lists in, resolved CSV rows out
//!
//! File naming follows the person slug (lowercase, spaces → underscores),
//! so "Jane Doe" reads `raw-picks/jane_doe.txt` and writes
//! `resolved-picks/jane_doe.csv`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One row of a resolved picks file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPick {
    pub title: String,
    pub author: String,
    /// Original publication year; written as an empty field when unknown
    pub year: Option<i32>,
}

/// File-name form of a person's name
pub fn person_slug(person: &str) -> String {
    person.trim().to_lowercase().replace(' ', "_")
}

/// Display name recovered from a file stem ("jane_doe" → "Jane Doe")
pub fn person_from_slug(slug: &str) -> String {
    slug.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Read queries from a line-oriented file
///
/// Lines are trimmed; blank lines are skipped. Order is preserved.
pub fn read_queries(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| {
        Error::NotFound(format!("Pick file {} could not be opened: {}", path.display(), e))
    })?;
    parse_queries(BufReader::new(file))
}

/// Parse queries from any buffered reader (see [`read_queries`])
pub fn parse_queries<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut queries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        queries.push(line.to_string());
    }
    Ok(queries)
}

/// Write resolved picks as `title,author,year` CSV, overwriting `path`
pub fn write_resolved_picks(path: &Path, picks: &[ResolvedPick]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    if picks.is_empty() {
        writer.write_record(["title", "author", "year"])?;
    }
    for pick in picks {
        writer.serialize(pick)?;
    }
    writer.flush()?;

    info!(path = %path.display(), count = picks.len(), "Saved choices");
    Ok(())
}

/// Read a resolved picks CSV
pub fn read_resolved_picks(path: &Path) -> Result<Vec<ResolvedPick>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut picks = Vec::new();
    for row in reader.deserialize() {
        picks.push(row?);
    }
    debug!(path = %path.display(), count = picks.len(), "Read resolved picks");
    Ok(picks)
}

/// Files in `dir` with the given extension, sorted by name
///
/// A missing directory yields an empty list.
pub fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect();
    files.sort();
    Ok(files)
}

/// Person display name for a pick file path
pub fn person_for_file(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(person_from_slug)
        .ok_or_else(|| Error::InvalidInput(format!("Invalid pick file name: {}", path.display())))
}
