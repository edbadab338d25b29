//! Storage traits and error types
//!
//! This module defines the trait interface the crawl coordinator uses to
//! persist its frontier and the asset references it finds.

use crate::storage::{ImageRecord, PinRecord, Table};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid timestamp {value:?} in {table} row {url}")]
    InvalidTimestamp {
        table: &'static str,
        url: String,
        value: String,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Every mutating operation is committed before it returns, so a crash never
/// leaves a half-applied change behind. Duplicate inserts are no-ops.
pub trait Storage {
    // ===== Frontier =====

    /// Adds a pin to the frontier if it has never been seen
    ///
    /// A pin that already exists keeps its current scanned state.
    ///
    /// # Returns
    ///
    /// `true` if a new row was created
    fn enqueue(&mut self, pin_url: &str) -> StorageResult<bool>;

    /// Marks a pin as processed
    ///
    /// Does nothing if the pin does not exist.
    fn mark_scanned(&mut self, pin_url: &str) -> StorageResult<()>;

    /// Returns the oldest pin that has not been scanned yet
    ///
    /// The pin stays pending until `mark_scanned` is called for it, so a
    /// crash in between means it is processed again on the next run.
    fn next_unscanned(&self) -> StorageResult<Option<String>>;

    // ===== Assets =====

    /// Records an asset reference and the pin it was found on
    ///
    /// # Returns
    ///
    /// `true` if a new row was created
    fn record_asset(&mut self, asset_url: &str, source_pin_url: &str) -> StorageResult<bool>;

    // ===== Lookups =====

    /// Checks whether a URL is present in the given table
    fn seen(&self, table: Table, url: &str) -> StorageResult<bool>;

    /// Gets a pin by URL
    fn get_pin(&self, url: &str) -> StorageResult<Option<PinRecord>>;

    /// Gets an image by URL
    fn get_image(&self, url: &str) -> StorageResult<Option<ImageRecord>>;

    /// Lists all images in insertion order
    fn list_images(&self) -> StorageResult<Vec<ImageRecord>>;

    /// Lists at most `limit` images, newest first
    fn recent_images(&self, limit: usize) -> StorageResult<Vec<ImageRecord>>;

    // ===== Statistics =====

    /// Gets total pin count
    fn count_pins(&self) -> StorageResult<u64>;

    /// Counts pins with the given scanned flag
    fn count_pins_by_scanned(&self, scanned: bool) -> StorageResult<u64>;

    /// Gets total image count
    fn count_images(&self) -> StorageResult<u64>;
}
