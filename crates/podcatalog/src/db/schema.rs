//! Shape of the matching store's source tables.
//!
//! Only the columns this crate reads are declared. Real stores carry more.

use rusqlite::Connection;

use super::error::DatabaseError;

const SOURCE_TABLES_SQL: &str = "
CREATE TABLE IF NOT EXISTS creators (
    adlid TEXT PRIMARY KEY,
    podcastindex_id INTEGER,
    itunesid INTEGER,
    title TEXT,
    normalized_tone TEXT,
    normalized_audience TEXT
);

CREATE TABLE IF NOT EXISTS podscan (
    id INTEGER PRIMARY KEY,
    podcastindex_id INTEGER,
    itunesid INTEGER,
    region TEXT,
    email TEXT,
    website TEXT
);

CREATE TABLE IF NOT EXISTS podcastindex_feeds (
    id INTEGER PRIMARY KEY,
    title TEXT,
    url TEXT,
    link TEXT,
    itunesId INTEGER,
    lastUpdate INTEGER
);

CREATE INDEX IF NOT EXISTS idx_creators_podcastindex_id ON creators(podcastindex_id);
CREATE INDEX IF NOT EXISTS idx_podscan_podcastindex_id ON podscan(podcastindex_id);
";

/// Creates the source tables if they do not already exist.
pub fn create_source_tables(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(SOURCE_TABLES_SQL)?;
    Ok(())
}
