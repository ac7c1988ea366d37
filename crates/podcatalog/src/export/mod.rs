//! Export flow: join the matching store's sources, resolve one canonical
//! identity per podcast, and write catalog rows.

pub mod csv_sink;
pub mod join;
pub mod resolver;

use crate::db::{CreatorRow, FeedRow, ScanRow};
use crate::identity::coalesce_ids;

pub use csv_sink::{CsvSink, EXPORT_HEADER};
pub use join::{dedup_scans, join_sources, SourceFilter};
pub use resolver::{resolve, resolve_row, ExportBatch, Provenance, ResolvedIdentity};

/// A creator joined to its single scan record and optional feed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedIdentityRow {
    pub creator: CreatorRow,
    pub scan: ScanRow,
    pub feed: Option<FeedRow>,
}

impl JoinedIdentityRow {
    pub fn feed_itunes_id(&self) -> Option<i64> {
        self.feed.as_ref().and_then(|f| f.itunes_id)
    }

    pub fn last_update(&self) -> Option<i64> {
        self.feed.as_ref().and_then(|f| f.last_update)
    }

    /// Canonical external identifier: scan, then creator, then feed; zero is absent.
    pub fn canonical_id(&self) -> Option<i64> {
        coalesce_ids([
            self.scan.itunes_id,
            self.creator.itunes_id,
            self.feed_itunes_id(),
        ])
    }
}
