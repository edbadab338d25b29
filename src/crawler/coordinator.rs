//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the pieces together:
//! - Seeding the frontier from a board or a single pin
//! - Draining the frontier one pin at a time within the depth budget
//! - Recording asset references and enqueueing recommendations
//!
//! Progress lives entirely in the store. A pin is marked scanned only after
//! its links have been committed, so an interrupted run resumes at the first
//! pin that was not finished.

use crate::config::{validate, Config, CrawlerConfig};
use crate::cookies::load_cookie_jar;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{LinkClassifier, PinLink};
use crate::state::CrawlPhase;
use crate::storage::{open_storage, Storage, StorageResult};
use crate::url::{classify_start_reference, StartReference};
use crate::{ConfigError, HarvestError};
use reqwest::cookie::Jar;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Counters for a single crawl run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pins fetched and classified successfully
    pub pins_processed: u64,

    /// Pins whose fetch failed; they are marked scanned all the same
    pub pins_failed: u64,

    /// New image rows written
    pub assets_recorded: u64,

    /// New pin rows written, from seeding and from recommendations
    pub pins_enqueued: u64,
}

/// Main crawler coordinator structure
///
/// Owns the store for the duration of a run. One fetch is in flight at a time.
pub struct Coordinator<S: Storage> {
    storage: S,
    fetcher: Fetcher,
    classifier: LinkClassifier,
    max_depth: u32,
    phase: CrawlPhase,
    report: CrawlReport,
}

impl<S: Storage> Coordinator<S> {
    pub fn new(storage: S, fetcher: Fetcher, classifier: LinkClassifier, max_depth: u32) -> Self {
        Self {
            storage,
            fetcher,
            classifier,
            max_depth,
            phase: CrawlPhase::default(),
            report: CrawlReport::default(),
        }
    }

    /// Creates a coordinator from crawler settings
    ///
    /// # Arguments
    ///
    /// * `config` - Crawler settings (rate, depth, timeout, base URL)
    /// * `storage` - An opened store
    /// * `cookies` - Session cookies sent with every request, if any
    ///
    /// # Errors
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be built.
    pub fn from_config(
        config: &CrawlerConfig,
        storage: S,
        cookies: Option<Arc<Jar>>,
    ) -> Result<Self, HarvestError> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("base-url {}: {}", config.base_url, e))
        })?;
        let fetcher = Fetcher::from_config(config, cookies)?;

        Ok(Self::new(
            storage,
            fetcher,
            LinkClassifier::new(base),
            config.max_depth,
        ))
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Classifies a raw start URL and runs the crawl from it
    ///
    /// An unsupported URL ends the run before anything is fetched or written.
    pub async fn crawl(&mut self, start_url: &str) -> Result<CrawlReport, HarvestError> {
        match classify_start_reference(start_url) {
            Ok(start) => self.run(&start).await,
            Err(e) => {
                self.enter(CrawlPhase::Done);
                Err(e)
            }
        }
    }

    /// Runs the crawl loop
    ///
    /// This method:
    /// 1. Seeds the frontier from the start reference
    /// 2. Drains pending pins until the depth budget is used up or none are left
    ///
    /// # Errors
    ///
    /// Fetch failures are logged and skipped. Storage failures abort the run.
    pub async fn run(&mut self, start: &StartReference) -> Result<CrawlReport, HarvestError> {
        self.phase = CrawlPhase::Seeding;
        self.report = CrawlReport::default();

        tracing::info!("Starting crawl from {}", start.url());
        let start_time = Instant::now();

        let result = self.seed_and_drain(start).await;
        self.enter(CrawlPhase::Done);
        result?;

        tracing::info!(
            "Crawl completed: {} pins processed, {} failed, {} assets recorded, {} pins enqueued in {:?}",
            self.report.pins_processed,
            self.report.pins_failed,
            self.report.assets_recorded,
            self.report.pins_enqueued,
            start_time.elapsed()
        );

        Ok(self.report)
    }

    async fn seed_and_drain(&mut self, start: &StartReference) -> Result<(), HarvestError> {
        self.seed(start).await?;
        self.enter(CrawlPhase::Draining);
        self.drain().await
    }

    async fn seed(&mut self, start: &StartReference) -> StorageResult<()> {
        match start {
            StartReference::Pin(pin_url) => {
                tracing::info!("Seeding frontier with pin {}", pin_url);
                self.enqueue(pin_url.as_str())?;
            }
            StartReference::Board(board_url) => {
                tracing::info!("Seeding frontier from board {}", board_url);
                match self.fetcher.fetch(board_url.as_str()).await {
                    Ok(markup) => {
                        let pins = self.classifier.board_links(&markup);
                        if pins.is_empty() {
                            tracing::warn!("No pins found on board {}", board_url);
                        }
                        for pin_url in &pins {
                            self.enqueue(pin_url)?;
                        }
                        tracing::info!("Found {} pins on board", pins.len());
                    }
                    Err(e) => {
                        tracing::warn!("Failed to fetch board: {}", e);
                    }
                }
            }
        }
        Ok(())
    }

    /// Processes pending pins
    ///
    /// `level` counts successfully processed pins. Recommendations are only
    /// enqueued while `level < max_depth`, and the loop stops once
    /// `level > max_depth`. Failed pins do not count against the budget.
    async fn drain(&mut self) -> Result<(), HarvestError> {
        let max_depth = u64::from(self.max_depth);
        let mut level: u64 = 0;
        let start_time = Instant::now();

        while level <= max_depth {
            let Some(pin_url) = self.storage.next_unscanned()? else {
                tracing::info!("Frontier is empty, crawl complete");
                break;
            };

            tracing::debug!("Processing pin {} at level {}", pin_url, level);

            match self.fetcher.fetch(&pin_url).await {
                Ok(markup) => {
                    self.process_pin(&pin_url, &markup, level < max_depth)?;
                    self.storage.mark_scanned(&pin_url)?;
                    self.report.pins_processed += 1;
                    level += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping pin: {}", e);
                    self.storage.mark_scanned(&pin_url)?;
                    self.report.pins_failed += 1;
                }
            }

            let attempted = self.report.pins_processed + self.report.pins_failed;
            if attempted % 10 == 0 {
                let rate = attempted as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pins processed, {} failed, {} assets recorded, {:.2} pins/sec",
                    self.report.pins_processed,
                    self.report.pins_failed,
                    self.report.assets_recorded,
                    rate
                );
            }
        }

        if level > max_depth {
            tracing::info!("Depth budget of {} used up", self.max_depth);
        }

        Ok(())
    }

    /// Records the links found on one pin page
    fn process_pin(&mut self, pin_url: &str, markup: &str, follow: bool) -> StorageResult<()> {
        for link in self.classifier.pin_links(markup) {
            match link {
                PinLink::Asset(asset_url) => {
                    if self.storage.record_asset(&asset_url, pin_url)? {
                        self.report.assets_recorded += 1;
                        tracing::debug!("Recorded asset {}", asset_url);
                    }
                }
                PinLink::Recommendation(rec_url) if follow => {
                    self.enqueue(&rec_url)?;
                }
                PinLink::Recommendation(rec_url) => {
                    tracing::trace!("Not following {}: depth budget reached", rec_url);
                }
            }
        }
        Ok(())
    }

    fn enqueue(&mut self, pin_url: &str) -> StorageResult<()> {
        if self.storage.enqueue(pin_url)? {
            self.report.pins_enqueued += 1;
            tracing::debug!("Enqueued {}", pin_url);
        }
        Ok(())
    }

    fn enter(&mut self, next: CrawlPhase) {
        if self.phase.can_transition_to(next) {
            tracing::debug!("Crawl phase {} -> {}", self.phase, next);
            self.phase = next;
        }
    }
}

/// Runs a complete crawl from configuration
///
/// The configuration and the start URL are checked before the cookie file
/// is read or the database is opened.
///
/// # Example
///
/// ```no_run
/// use pin_harvest::config::Config;
/// use pin_harvest::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let report = run_crawl(&config, "https://de.pinterest.com/pin/123/").await?;
/// println!("{} assets", report.assets_recorded);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, start_url: &str) -> Result<CrawlReport, HarvestError> {
    validate(config)?;
    let start = classify_start_reference(start_url)?;

    let jar = load_cookie_jar(Path::new(&config.output.cookies_path))?;
    let storage = open_storage(Path::new(&config.output.database_path))?;

    let mut coordinator = Coordinator::from_config(&config.crawler, storage, Some(Arc::new(jar)))?;
    coordinator.run(&start).await
}
