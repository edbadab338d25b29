//! Pin-Harvest: a resumable board and pin crawler
//!
//! This crate walks a graph of pin pages starting from a board or a single pin,
//! records the primary image reference of every pin it visits, and keeps the
//! crawl frontier in SQLite so an interrupted crawl picks up where it stopped.

pub mod config;
pub mod cookies;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Pin-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Unsupported start URL: {url}")]
    UnsupportedStartReference { url: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Cookie error: {0}")]
    Cookie(#[from] CookieError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// A single failed page request
///
/// Every variant carries the URL that was requested. Fetch errors are
/// recoverable: the coordinator logs them and moves on to the next pin.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Timeout { url } | Self::Transport { url, .. } => url,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Cookie file errors
#[derive(Debug, Error)]
pub enum CookieError {
    #[error("Failed to read cookie file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed cookie line {line_number}: expected 7 tab-separated fields, got {fields}")]
    MalformedLine { line_number: usize, fields: usize },
}

/// Result type alias for Pin-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlReport, LinkClassifier, PinLink};
pub use state::CrawlPhase;
pub use storage::{SqliteStorage, Storage, Table};
pub use crate::url::{classify_start_reference, StartReference};
