//! In-memory join of the three source tables.
//!
//! Equivalent to: scan records windowed to the lowest `id` per
//! `podcastindex_id`, inner-joined to creators, left-joined to feeds, filtered
//! on a known canonical id, ordered by feed `lastUpdate` descending, then
//! paged with offset/limit.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::ExportConfig;
use crate::db::{ScanRow, SourceTables};
use crate::identity::first_per_key;

use super::JoinedIdentityRow;

/// Optional filters and paging applied to the joined rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFilter {
    /// Keep only rows whose canonical id equals this value.
    pub itunes_id: Option<i64>,
    /// Keep only rows whose scan region equals this value, ignoring case.
    pub region: Option<String>,
    /// `None` means unlimited.
    pub limit: Option<u64>,
    pub offset: u64,
}

impl From<&ExportConfig> for SourceFilter {
    fn from(config: &ExportConfig) -> Self {
        Self {
            itunes_id: config.itunes_id,
            region: config
                .region
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            limit: Some(config.limit).filter(|l| *l > 0),
            offset: config.offset,
        }
    }
}

impl SourceFilter {
    fn matches(&self, row: &JoinedIdentityRow) -> bool {
        if let Some(wanted) = self.itunes_id {
            if row.canonical_id() != Some(wanted) {
                return false;
            }
        }

        if let Some(wanted) = &self.region {
            let region = row.scan.region.as_deref().map(str::trim).unwrap_or_default();
            if !region.eq_ignore_ascii_case(wanted) {
                return false;
            }
        }

        true
    }
}

/// Reduces scan records to one per index key: the one with the smallest row id.
/// Records without an index key can never join and are dropped.
pub fn dedup_scans(scans: Vec<ScanRow>) -> Vec<ScanRow> {
    let keyed: Vec<ScanRow> = scans.into_iter().filter(|s| s.index_key.is_some()).collect();
    first_per_key(keyed, |s| s.index_key, |s| s.row_id)
}

/// Most recently updated feed first; rows without a timestamp last; ties by `adlid`.
fn by_recency(a: &JoinedIdentityRow, b: &JoinedIdentityRow) -> Ordering {
    b.last_update()
        .cmp(&a.last_update())
        .then_with(|| a.creator.adlid.cmp(&b.creator.adlid))
}

/// Joins the source tables into identity rows.
pub fn join_sources(sources: SourceTables, filter: &SourceFilter) -> Vec<JoinedIdentityRow> {
    let scans: HashMap<i64, ScanRow> = dedup_scans(sources.scans)
        .into_iter()
        .filter_map(|s| s.index_key.map(|key| (key, s)))
        .collect();

    let feeds: HashMap<i64, _> = sources
        .feeds
        .into_iter()
        .map(|f| (f.index_key, f))
        .collect();

    let mut rows: Vec<JoinedIdentityRow> = sources
        .creators
        .into_iter()
        .filter_map(|creator| {
            let key = creator.index_key?;
            let scan = scans.get(&key)?.clone();
            let feed = feeds.get(&key).cloned();
            Some(JoinedIdentityRow {
                creator,
                scan,
                feed,
            })
        })
        .filter(|row| row.canonical_id().is_some())
        .filter(|row| filter.matches(row))
        .collect();

    rows.sort_by(by_recency);

    // Offset only pages a limited export; unlimited exports return every row.
    match filter.limit {
        Some(limit) => {
            let offset = usize::try_from(filter.offset).unwrap_or(usize::MAX);
            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            rows.into_iter().skip(offset).take(limit).collect()
        }
        None => rows,
    }
}
