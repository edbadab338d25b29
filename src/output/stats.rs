//! Statistics generation from the crawl database
//!
//! This module provides functionality for extracting and displaying
//! crawl statistics from the storage layer.

use crate::storage::{ImageRecord, Storage, StorageResult};

/// How many of the newest images `--stats` lists
const RECENT_IMAGE_COUNT: usize = 5;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Total number of pins discovered
    pub total_pins: u64,

    /// Pins that have been processed (successfully or not)
    pub scanned_pins: u64,

    /// Pins waiting for a later run
    pub pending_pins: u64,

    /// Total number of image references recorded
    pub total_images: u64,

    /// Most recently recorded images, newest first
    pub recent_images: Vec<ImageRecord>,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
pub fn load_statistics(storage: &dyn Storage) -> StorageResult<CrawlStatistics> {
    let total_pins = storage.count_pins()?;
    let scanned_pins = storage.count_pins_by_scanned(true)?;
    let pending_pins = storage.count_pins_by_scanned(false)?;
    let total_images = storage.count_images()?;

    let recent_images = storage.recent_images(RECENT_IMAGE_COUNT)?;

    Ok(CrawlStatistics {
        total_pins,
        scanned_pins,
        pending_pins,
        total_images,
        recent_images,
    })
}

impl CrawlStatistics {
    /// Share of discovered pins that have been scanned, in percent
    pub fn scanned_percentage(&self) -> f64 {
        if self.total_pins > 0 {
            (self.scanned_pins as f64 / self.total_pins as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Pins:");
    println!("  Total discovered: {}", stats.total_pins);
    println!(
        "  Scanned: {} ({:.1}%)",
        stats.scanned_pins,
        stats.scanned_percentage()
    );
    println!("  Pending: {}", stats.pending_pins);
    println!();

    println!("Images:");
    println!("  Total recorded: {}", stats.total_images);

    if !stats.recent_images.is_empty() {
        println!();
        println!("Most Recent Images ({}):", stats.recent_images.len());
        for image in &stats.recent_images {
            match &image.source_url {
                Some(source) => println!("  - {} (from {}, {})", image.url, source, image.added_at),
                None => println!("  - {} ({})", image.url, image.added_at),
            }
        }
    }
}
