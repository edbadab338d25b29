//! State module for tracking crawl progress
//!
//! Per-pin progress lives in the database (`pin.scanned`). This module holds
//! the in-process phase of a single crawl run.

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
