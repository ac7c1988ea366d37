//! Builder patterns for creating source rows programmatically.
//!
//! Every builder starts from a row that joins and resolves cleanly, so a test
//! only states the fields it is about.

#![allow(dead_code)]

use podcatalog::db::{CreatorRow, FeedRow, ScanRow};

/// Builder for `creators` rows.
pub struct CreatorBuilder {
    row: CreatorRow,
}

impl CreatorBuilder {
    pub fn new(adlid: &str, index_key: i64) -> Self {
        Self {
            row: CreatorRow {
                adlid: adlid.to_string(),
                index_key: Some(index_key),
                itunes_id: None,
                title: Some(format!("Show {}", adlid)),
                tone: None,
                audience: None,
            },
        }
    }

    pub fn itunes_id(mut self, id: i64) -> Self {
        self.row.itunes_id = Some(id);
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.row.title = Some(title.to_string());
        self
    }

    pub fn no_title(mut self) -> Self {
        self.row.title = None;
        self
    }

    pub fn tone(mut self, tone: &str) -> Self {
        self.row.tone = Some(tone.to_string());
        self
    }

    pub fn build(self) -> CreatorRow {
        self.row
    }
}

/// Builder for `podscan` rows.
pub struct ScanBuilder {
    row: ScanRow,
}

impl ScanBuilder {
    pub fn new(row_id: i64, index_key: i64) -> Self {
        Self {
            row: ScanRow {
                row_id,
                index_key: Some(index_key),
                itunes_id: None,
                region: None,
                email: None,
                website: None,
            },
        }
    }

    pub fn itunes_id(mut self, id: i64) -> Self {
        self.row.itunes_id = Some(id);
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.row.region = Some(region.to_string());
        self
    }

    pub fn website(mut self, url: &str) -> Self {
        self.row.website = Some(url.to_string());
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.row.email = Some(email.to_string());
        self
    }

    pub fn build(self) -> ScanRow {
        self.row
    }
}

/// Builder for `podcastindex_feeds` rows.
pub struct FeedBuilder {
    row: FeedRow,
}

impl FeedBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            row: FeedRow {
                index_key: id,
                title: None,
                url: None,
                link: None,
                itunes_id: None,
                last_update: None,
            },
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.row.title = Some(title.to_string());
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.row.url = Some(url.to_string());
        self
    }

    pub fn link(mut self, link: &str) -> Self {
        self.row.link = Some(link.to_string());
        self
    }

    pub fn itunes_id(mut self, id: i64) -> Self {
        self.row.itunes_id = Some(id);
        self
    }

    pub fn last_update(mut self, ts: i64) -> Self {
        self.row.last_update = Some(ts);
        self
    }

    pub fn build(self) -> FeedRow {
        self.row
    }
}
