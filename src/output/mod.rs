//! Output module for crawl reports and statistics
//!
//! This module handles:
//! - Printing the summary of a finished run
//! - Loading and printing statistics from an existing database

pub mod stats;

pub use stats::{load_statistics, print_statistics, CrawlStatistics};

use crate::crawler::CrawlReport;

/// Prints the summary of a finished run to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Complete ===\n");
    println!("  Pins processed: {}", report.pins_processed);
    println!("  Pins failed: {}", report.pins_failed);
    println!("  Assets recorded: {}", report.assets_recorded);
    println!("  Pins enqueued: {}", report.pins_enqueued);
}
