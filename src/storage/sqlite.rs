//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.
//! Each call is a single autocommit statement.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{ImageRecord, PinRecord, Table};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// Opens (or creates) the database file and makes sure both tables exist.
    /// `synchronous = FULL` makes every commit durable before the call that
    /// issued it returns.
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = FULL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn count(&self, sql: &str, params: impl rusqlite::Params) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(sql, params, |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn pin_from_row(row: &Row<'_>) -> rusqlite::Result<PinRecord> {
    Ok(PinRecord {
        url: row.get(0)?,
        scanned: row.get::<_, Option<i64>>(1)?.unwrap_or(0) != 0,
    })
}

fn image_from_row(row: &Row<'_>) -> rusqlite::Result<(String, Option<String>, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

/// Parses a `CURRENT_TIMESTAMP` value (`YYYY-MM-DD HH:MM:SS`)
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

fn into_image_record(
    (url, source_url, added_at): (String, Option<String>, String),
) -> StorageResult<ImageRecord> {
    let parsed = parse_timestamp(&added_at).ok_or_else(|| StorageError::InvalidTimestamp {
        table: "image",
        url: url.clone(),
        value: added_at.clone(),
    })?;

    Ok(ImageRecord {
        url,
        source_url,
        added_at: parsed,
    })
}

impl Storage for SqliteStorage {
    // ===== Frontier =====

    fn enqueue(&mut self, pin_url: &str) -> StorageResult<bool> {
        let inserted = self
            .conn
            .execute("INSERT OR IGNORE INTO pin (url) VALUES (?1)", params![pin_url])?;
        Ok(inserted > 0)
    }

    fn mark_scanned(&mut self, pin_url: &str) -> StorageResult<()> {
        self.conn
            .execute("UPDATE pin SET scanned = 1 WHERE url = ?1", params![pin_url])?;
        Ok(())
    }

    fn next_unscanned(&self) -> StorageResult<Option<String>> {
        let url = self
            .conn
            .query_row(
                "SELECT url FROM pin WHERE scanned = 0 ORDER BY rowid LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(url)
    }

    // ===== Assets =====

    fn record_asset(&mut self, asset_url: &str, source_pin_url: &str) -> StorageResult<bool> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO image (url, source_url) VALUES (?1, ?2)",
            params![asset_url, source_pin_url],
        )?;
        Ok(inserted > 0)
    }

    // ===== Lookups =====

    fn seen(&self, table: Table, url: &str) -> StorageResult<bool> {
        let sql = format!("SELECT 1 FROM {} WHERE url = ?1 LIMIT 1", table.as_str());
        let found: Option<i64> = self
            .conn
            .query_row(&sql, params![url], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    fn get_pin(&self, url: &str) -> StorageResult<Option<PinRecord>> {
        let pin = self
            .conn
            .query_row(
                "SELECT url, scanned FROM pin WHERE url = ?1",
                params![url],
                pin_from_row,
            )
            .optional()?;
        Ok(pin)
    }

    fn get_image(&self, url: &str) -> StorageResult<Option<ImageRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT url, source_url, added_at FROM image WHERE url = ?1",
                params![url],
                image_from_row,
            )
            .optional()?;

        row.map(into_image_record).transpose()
    }

    fn list_images(&self) -> StorageResult<Vec<ImageRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url, source_url, added_at FROM image ORDER BY rowid")?;

        let rows = stmt
            .query_map([], image_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(into_image_record).collect()
    }

    fn recent_images(&self, limit: usize) -> StorageResult<Vec<ImageRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(
            "SELECT url, source_url, added_at FROM image ORDER BY rowid DESC LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![limit], image_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(into_image_record).collect()
    }

    // ===== Statistics =====

    fn count_pins(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM pin", [])
    }

    fn count_pins_by_scanned(&self, scanned: bool) -> StorageResult<u64> {
        self.count(
            "SELECT COUNT(*) FROM pin WHERE scanned = ?1",
            params![i64::from(scanned)],
        )
    }

    fn count_images(&self) -> StorageResult<u64> {
        self.count("SELECT COUNT(*) FROM image", [])
    }
}
