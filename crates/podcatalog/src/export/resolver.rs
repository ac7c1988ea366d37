//! Identity resolution: one catalog row per joined identity.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

use crate::identity::first_non_blank;

use super::JoinedIdentityRow;

/// Region used when the scan record has none.
pub const DEFAULT_REGION: &str = "UK";

/// Listing price for every exported podcast.
pub const PRICE_GBP: u32 = 50;

/// Values shared by every row of one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBatch {
    pub owner_id: String,
    /// Wall-clock time of the run; used for both `created_at` and `updated_at`.
    pub run_at: DateTime<Utc>,
}

impl ExportBatch {
    pub fn new(owner_id: impl Into<String>, run_at: DateTime<Utc>) -> Self {
        Self {
            owner_id: owner_id.into(),
            run_at,
        }
    }
}

/// Snapshot of every source field consulted while resolving a row,
/// including values that lost precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provenance {
    pub adlid: String,
    pub podcastindex_id: Option<i64>,
    pub itunesid: i64,
    pub scan_itunesid: Option<i64>,
    pub creator_itunesid: Option<i64>,
    pub feed_itunesid: Option<i64>,
    pub region: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub creator_title: Option<String>,
    pub creator_tone: Option<String>,
    pub feed_title: Option<String>,
    pub feed_url: Option<String>,
    pub feed_link: Option<String>,
}

/// One row of the catalog export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub owner_id: String,
    pub name: String,
    pub itunes_id: i64,
    pub vibe: Option<String>,
    pub region: String,
    pub audience_band: Option<String>,
    pub price_gbp: u32,
    pub sample_url: Option<String>,
    pub available: bool,
    pub can_negotiate: bool,
    pub banner_image_path: Option<String>,
    pub tile_image_path: Option<String>,
    pub external_ref: String,
    pub provenance: Provenance,
    pub is_verified: bool,
    pub is_on_waitlist: bool,
    pub has_surveyed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResolvedIdentity {
    /// The provenance snapshot as a JSON string.
    pub fn external_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.provenance)
    }

    pub fn created_at_rfc3339(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn updated_at_rfc3339(&self) -> String {
        self.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

/// Resolves one joined row.
///
/// Returns `None` when the row has no usable name (creator title and feed
/// title both blank) or, for rows built outside the join, no known id.
pub fn resolve_row(row: &JoinedIdentityRow, batch: &ExportBatch) -> Option<ResolvedIdentity> {
    let creator = &row.creator;
    let scan = &row.scan;
    let feed = row.feed.as_ref();

    let Some(name) = first_non_blank([
        creator.title.as_deref(),
        feed.and_then(|f| f.title.as_deref()),
    ]) else {
        debug!(adlid = %creator.adlid, "dropping row without a name");
        return None;
    };

    let Some(itunes_id) = row.canonical_id() else {
        debug!(adlid = %creator.adlid, "dropping row without an external id");
        return None;
    };

    let region = first_non_blank([scan.region.as_deref()])
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
        .to_uppercase();

    let sample_url = first_non_blank([
        scan.website.as_deref(),
        feed.and_then(|f| f.link.as_deref()),
        feed.and_then(|f| f.url.as_deref()),
    ]);

    let provenance = Provenance {
        adlid: creator.adlid.clone(),
        podcastindex_id: creator.index_key,
        itunesid: itunes_id,
        scan_itunesid: scan.itunes_id,
        creator_itunesid: creator.itunes_id,
        feed_itunesid: row.feed_itunes_id(),
        region: scan.region.clone(),
        email: scan.email.clone(),
        website: scan.website.clone(),
        creator_title: creator.title.clone(),
        creator_tone: creator.tone.clone(),
        feed_title: feed.and_then(|f| f.title.clone()),
        feed_url: feed.and_then(|f| f.url.clone()),
        feed_link: feed.and_then(|f| f.link.clone()),
    };

    Some(ResolvedIdentity {
        owner_id: batch.owner_id.clone(),
        name,
        itunes_id,
        vibe: first_non_blank([creator.tone.as_deref()]),
        region,
        audience_band: None,
        price_gbp: PRICE_GBP,
        sample_url,
        available: true,
        can_negotiate: false,
        banner_image_path: None,
        tile_image_path: None,
        external_ref: creator.adlid.clone(),
        provenance,
        is_verified: false,
        is_on_waitlist: false,
        has_surveyed: false,
        created_at: batch.run_at,
        updated_at: batch.run_at,
    })
}

/// Resolves rows in order, silently dropping the ones [`resolve_row`] rejects.
pub fn resolve(rows: &[JoinedIdentityRow], batch: &ExportBatch) -> Vec<ResolvedIdentity> {
    rows.iter().filter_map(|row| resolve_row(row, batch)).collect()
}
