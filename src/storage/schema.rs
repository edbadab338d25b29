//! Database schema definitions
//!
//! The layout matches crawl databases written by earlier versions of the
//! scraper, so an existing `pinterest.db` can be resumed as-is.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Discovered asset references
CREATE TABLE IF NOT EXISTS image (
    url TEXT PRIMARY KEY,
    source_url TEXT,
    added_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

-- Crawl frontier: 0 = queued, 1 = done
CREATE TABLE IF NOT EXISTS pin (
    url TEXT PRIMARY KEY,
    scanned INTEGER DEFAULT 0
);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
