use serde::Deserialize;
use std::time::Duration;

/// Default site the crawler resolves relative pin links against
pub const DEFAULT_BASE_URL: &str = "https://de.pinterest.com";

/// Lowest request rate the fetcher will run at
pub const MIN_REQUESTS_PER_SECOND: f64 = 0.1;

/// Main configuration structure for Pin-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum requests per second (floored at 0.1)
    pub requests_per_second: f64,

    /// Number of pins processed before recommendations stop being followed
    pub max_depth: u32,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Site that relative pin links are resolved against
    pub base_url: String,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 1.0,
            max_depth: 1,
            request_timeout_secs: 15,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("pin-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CrawlerConfig {
    /// Request rate with the lower bound applied
    pub fn effective_rps(&self) -> f64 {
        self.requests_per_second.max(MIN_REQUESTS_PER_SECOND)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Input and output file locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the SQLite database file
    pub database_path: String,

    /// Path to the Netscape-format cookie file
    pub cookies_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "pinterest.db".to_string(),
            cookies_path: "cookies.txt".to_string(),
        }
    }
}
