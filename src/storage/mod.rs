//! Storage module for persisting crawl progress
//!
//! This module handles all database operations for the crawler:
//! - SQLite database initialization and schema management
//! - The durable pin frontier (queued / scanned)
//! - Discovered asset references

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use chrono::NaiveDateTime;
use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}

/// The tables an existence check can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Pin,
    Image,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pin => "pin",
            Self::Image => "image",
        }
    }
}

/// Represents a pin in the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRecord {
    pub url: String,
    pub scanned: bool,
}

/// Represents an image reference in the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub url: String,
    /// Pin page the image was found on
    pub source_url: Option<String>,
    /// Set by the database when the row is created (UTC)
    pub added_at: NaiveDateTime,
}
