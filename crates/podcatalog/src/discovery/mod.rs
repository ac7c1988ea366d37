//! Discovery flow: paginated search crawl, deduplicated by external id.

pub mod client;
pub mod crawler;
pub mod error;
pub mod sink;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::known_id;

pub use client::{ItunesSearchClient, SearchClient, SearchQuery, ITUNES_SEARCH_URL};
pub use crawler::{Crawl, CrawlSettings, CrawlStats, Crawler, POLITE_DELAY};
pub use error::CrawlError;
pub use sink::JsonlSink;

/// Payload field carrying the search service's identifier.
pub const EXTERNAL_ID_FIELD: &str = "trackId";

/// One search result. The payload is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveredItem {
    payload: Value,
}

impl DiscoveredItem {
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    /// The item's external identifier, if the payload carries a usable one.
    pub fn external_id(&self) -> Option<i64> {
        known_id(self.payload.get(EXTERNAL_ID_FIELD).and_then(Value::as_i64))
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }
}

impl From<Value> for DiscoveredItem {
    fn from(payload: Value) -> Self {
        Self::new(payload)
    }
}
