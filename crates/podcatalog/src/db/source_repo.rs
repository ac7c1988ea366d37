//! Source repository: loads the creator, scan and feed tables.
//!
//! Rows are returned as stored; joining, dedup and filtering happen in
//! [`crate::export::join`], independent of the storage engine.

use rusqlite::types::ValueRef;
use rusqlite::{params, Row};

use super::{Database, DatabaseError};

/// A row from `creators`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorRow {
    /// Local provenance key, stringified whatever its storage type.
    pub adlid: String,
    pub index_key: Option<i64>,
    pub itunes_id: Option<i64>,
    pub title: Option<String>,
    pub tone: Option<String>,
    pub audience: Option<String>,
}

impl CreatorRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            adlid: opaque_key(row, "adlid")?,
            index_key: row.get("podcastindex_id")?,
            itunes_id: row.get("itunesid")?,
            title: row.get("title")?,
            tone: row.get("normalized_tone")?,
            audience: row.get("normalized_audience")?,
        })
    }
}

/// A row from `podscan`. Several rows may share an index key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRow {
    /// Stable row identifier, used to pick one row per index key.
    pub row_id: i64,
    pub index_key: Option<i64>,
    pub itunes_id: Option<i64>,
    pub region: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl ScanRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            row_id: row.get("id")?,
            index_key: row.get("podcastindex_id")?,
            itunes_id: row.get("itunesid")?,
            region: row.get("region")?,
            email: row.get("email")?,
            website: row.get("website")?,
        })
    }
}

/// A row from `podcastindex_feeds`; `index_key` is the feed id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRow {
    pub index_key: i64,
    pub title: Option<String>,
    pub url: Option<String>,
    pub link: Option<String>,
    pub itunes_id: Option<i64>,
    pub last_update: Option<i64>,
}

impl FeedRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            index_key: row.get("id")?,
            title: row.get("title")?,
            url: row.get("url")?,
            link: row.get("link")?,
            itunes_id: row.get("itunesId")?,
            last_update: row.get("lastUpdate")?,
        })
    }
}

/// Everything the export needs from the store, read in one pass.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub creators: Vec<CreatorRow>,
    pub scans: Vec<ScanRow>,
    pub feeds: Vec<FeedRow>,
}

fn opaque_key(row: &Row<'_>, column: &str) -> Result<String, rusqlite::Error> {
    Ok(match row.get_ref(column)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    })
}

/// Loads all creators.
pub fn load_creators(db: &Database) -> Result<Vec<CreatorRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT adlid, podcastindex_id, itunesid, title, normalized_tone, normalized_audience
             FROM creators",
        )?;
        let rows = stmt
            .query_map([], CreatorRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Loads scan records whose index key belongs to some creator.
pub fn load_scans(db: &Database) -> Result<Vec<ScanRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, podcastindex_id, itunesid, region, email, website
             FROM podscan
             WHERE podcastindex_id IN (SELECT podcastindex_id FROM creators)",
        )?;
        let rows = stmt
            .query_map([], ScanRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Loads feed records whose id belongs to some creator.
pub fn load_feeds(db: &Database) -> Result<Vec<FeedRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            "SELECT id, title, url, link, itunesId, lastUpdate
             FROM podcastindex_feeds
             WHERE id IN (SELECT podcastindex_id FROM creators)",
        )?;
        let rows = stmt
            .query_map([], FeedRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Loads the three source tables.
pub fn load_sources(db: &Database) -> Result<SourceTables, DatabaseError> {
    let sources = SourceTables {
        creators: load_creators(db)?,
        scans: load_scans(db)?,
        feeds: load_feeds(db)?,
    };

    log::debug!(
        "Loaded {} creators, {} scan records, {} feeds",
        sources.creators.len(),
        sources.scans.len(),
        sources.feeds.len()
    );

    Ok(sources)
}

/// Inserts a creator row.
pub fn insert_creator(db: &Database, creator: &CreatorRow) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO creators (adlid, podcastindex_id, itunesid, title, normalized_tone,
             normalized_audience)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                creator.adlid,
                creator.index_key,
                creator.itunes_id,
                creator.title,
                creator.tone,
                creator.audience,
            ],
        )?;
        Ok(())
    })
}

/// Inserts a scan row.
pub fn insert_scan(db: &Database, scan: &ScanRow) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO podscan (id, podcastindex_id, itunesid, region, email, website)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                scan.row_id,
                scan.index_key,
                scan.itunes_id,
                scan.region,
                scan.email,
                scan.website,
            ],
        )?;
        Ok(())
    })
}

/// Inserts a feed row.
pub fn insert_feed(db: &Database, feed: &FeedRow) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO podcastindex_feeds (id, title, url, link, itunesId, lastUpdate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                feed.index_key,
                feed.title,
                feed.url,
                feed.link,
                feed.itunes_id,
                feed.last_update,
            ],
        )?;
        Ok(())
    })
}
