//! Crawler module for pin page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - Rate-limited HTTP fetching
//! - Board and pin link classification
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator, CrawlReport};
pub use fetcher::{build_http_client, Fetcher};
pub use parser::{LinkClassifier, PinLink};
pub use scheduler::RateLimiter;

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and classify the start URL
/// 2. Load session cookies and open the store
/// 3. Seed the frontier from the start URL
/// 4. Drain pending pins within the depth budget
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `start_url` - A board or pin URL
pub async fn crawl(config: &Config, start_url: &str) -> Result<CrawlReport, HarvestError> {
    run_crawl(config, start_url).await
}
