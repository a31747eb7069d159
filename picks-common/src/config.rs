//! Configuration loading and data folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the data folder
pub const DATA_DIR_ENV: &str = "PICKS_DATA_DIR";

/// Goodreads search endpoint used when the config file does not name one
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.goodreads.com/search/index.xml";

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Data folder holding caches, raw picks and resolved picks
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Search API settings
    #[serde(default)]
    pub goodreads: GoodreadsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search API settings
#[derive(Debug, Clone, Deserialize)]
pub struct GoodreadsConfig {
    /// Developer key sent with every search request
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Fixed request timeout (no retries)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum spacing between two network requests
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,
}

impl Default for GoodreadsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            min_request_interval_ms: default_min_request_interval_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info")
    #[serde(default)]
    pub level: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_SEARCH_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_min_request_interval_ms() -> u64 {
    1000
}

impl TomlConfig {
    /// Load configuration from `explicit` or the platform default location
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file silently yields the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        Self::from_file(&path)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }
}

/// Default configuration file path for the platform
///
/// `<config_dir>/bookpicks/config.toml`, e.g. `~/.config/bookpicks/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bookpicks").join("config.toml"))
}

/// Data folder resolution, in priority order:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. TOML config file
/// 4. `./data` relative to the working directory
pub fn resolve_data_dir(cli_arg: Option<&Path>, env_var_name: &str, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.data_dir {
        return path.clone();
    }

    PathBuf::from("data")
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve the search API key: command line/environment first, then TOML
pub fn resolve_api_key(cli_or_env: Option<&str>, config: &TomlConfig) -> Option<String> {
    cli_or_env
        .filter(|k| is_valid_key(k))
        .map(str::to_string)
        .or_else(|| config.goodreads.api_key.clone().filter(|k| is_valid_key(k)))
}

/// Paths inside the data folder
///
/// Directories are created on demand by the `ensure_*` helpers, never by
/// the path accessors.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw search responses, one file per normalized query
    pub fn search_cache_dir(&self) -> PathBuf {
        self.root.join("goodreads-cache")
    }

    /// Query → resolved record mappings, one file per person
    pub fn resolution_cache_dir(&self) -> PathBuf {
        self.root.join("resolution-cache")
    }

    /// Line-oriented pick files awaiting resolution
    pub fn raw_picks_dir(&self) -> PathBuf {
        self.root.join("raw-picks")
    }

    /// Resolved pick CSV files
    pub fn resolved_picks_dir(&self) -> PathBuf {
        self.root.join("resolved-picks")
    }

    pub fn resolution_cache_file(&self, person: &str) -> PathBuf {
        self.resolution_cache_dir()
            .join(format!("{}.json", crate::picks::person_slug(person)))
    }

    pub fn resolved_picks_file(&self, person: &str) -> PathBuf {
        self.resolved_picks_dir()
            .join(format!("{}.csv", crate::picks::person_slug(person)))
    }

    /// Create the data folder and every subfolder if missing
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [
            self.search_cache_dir(),
            self.resolution_cache_dir(),
            self.resolved_picks_dir(),
        ] {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}
