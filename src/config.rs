//! Configuration file parser for `blogfeed.toml`.
//!
//! The config file is optional. A missing file yields `Config::default()`.
//! Unknown keys are accepted but logged as warnings, since they are most
//! likely typos.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::feed::{FeedFormat, FeedMetadata};
use crate::fetch::{DEFAULT_MAX_PAGE_SIZE, DEFAULT_TIMEOUT};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// A value is present but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level configuration.
///
/// All tables use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed-level metadata (`[feed]`).
    pub feed: FeedMetadata,
    /// Page fetching limits (`[fetch]`).
    pub fetch: FetchConfig,
    /// Output file names (`[output]`).
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Largest page body accepted, in bytes.
    pub max_page_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Atom document path.
    pub atom: PathBuf,
    /// RSS document path.
    pub rss: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            atom: PathBuf::from(FeedFormat::Atom.default_file_name()),
            rss: PathBuf::from(FeedFormat::Rss.default_file_name()),
        }
    }
}

const KNOWN_KEYS: [(&str, &[&str]); 3] = [
    (
        "feed",
        &[
            "url",
            "name",
            "email",
            "title",
            "generator",
            "generator_version",
            "logo",
            "icon",
            "description",
            "language",
        ],
    ),
    ("fetch", &["timeout_secs", "max_page_size"]),
    ("output", &["atom", "rss"]),
];

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    ///
    /// The result is not validated; call [`Config::validate`] once any
    /// command-line overrides have been applied.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            warn_unknown_keys(&raw);
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), url = %config.feed.url, "Loaded configuration");
        Ok(config)
    }

    /// Checks the values the pipeline cannot run without.
    ///
    /// The base URL must be an absolute http(s) URL and name/email must be
    /// set. A base URL without a trailing slash is accepted with a warning:
    /// article links are appended to it verbatim.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.feed.url)
            .map_err(|e| ConfigError::Invalid(format!("feed.url {:?}: {e}", self.feed.url)))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ConfigError::Invalid(format!(
                    "feed.url must be http or https, got {scheme}"
                )))
            }
        }
        if !self.feed.url.ends_with('/') {
            tracing::warn!(
                url = %self.feed.url,
                "Base URL has no trailing slash; article links are appended to it as-is"
            );
        }

        if self.feed.name.trim().is_empty() {
            return Err(ConfigError::Invalid("feed.name is required".to_string()));
        }
        if self.feed.email.trim().is_empty() {
            return Err(ConfigError::Invalid("feed.email is required".to_string()));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn warn_unknown_keys(raw: &toml::Table) {
    for (key, value) in raw {
        let Some((_, known)) = KNOWN_KEYS.iter().find(|(table, _)| *table == key.as_str()) else {
            tracing::warn!(key = %key, "Unknown key in config file, ignoring");
            continue;
        };
        if let Some(table) = value.as_table() {
            for nested in table.keys() {
                if !known.contains(&nested.as_str()) {
                    tracing::warn!(key = %format!("{key}.{nested}"), "Unknown key in config file, ignoring");
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
