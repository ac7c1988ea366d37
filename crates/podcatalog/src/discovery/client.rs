//! Search service client.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, Request};
use serde::Deserialize;
use serde_json::Value;

use super::error::CrawlError;
use super::DiscoveredItem;

pub const ITUNES_SEARCH_URL: &str = "https://itunes.apple.com/search";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Media type requested from the search service.
pub const PODCAST_MEDIA: &str = "podcast";

/// One page request against the search service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub country: String,
    pub media: String,
    pub limit: u32,
    pub offset: u64,
}

impl SearchQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("term", self.term.clone()),
            ("country", self.country.clone()),
            ("media", self.media.clone()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }
}

/// Fetches a single page of search results.
///
/// An empty vector is the normal end-of-results signal.
pub trait SearchClient {
    fn search(&self, query: &SearchQuery) -> Result<Vec<DiscoveredItem>, CrawlError>;
}

impl<T: SearchClient + ?Sized> SearchClient for &T {
    fn search(&self, query: &SearchQuery) -> Result<Vec<DiscoveredItem>, CrawlError> {
        (**self).search(query)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

/// Parses a search response body. A missing or null `results` array is an
/// empty page.
pub fn parse_results(body: &str) -> Result<Vec<DiscoveredItem>, serde_json::Error> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .unwrap_or_default()
        .into_iter()
        .map(DiscoveredItem::new)
        .collect())
}

/// Blocking client for the iTunes Search API.
pub struct ItunesSearchClient {
    http: Client,
    base_url: String,
}

impl ItunesSearchClient {
    pub fn new() -> Result<Self, CrawlError> {
        Self::with_base_url(ITUNES_SEARCH_URL)
    }

    /// Creates a client against a different endpoint (mirrors, local stubs).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, CrawlError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(CrawlError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn build_request(&self, query: &SearchQuery) -> reqwest::Result<Request> {
        self.http.get(&self.base_url).query(&query.params()).build()
    }
}

impl SearchClient for ItunesSearchClient {
    fn search(&self, query: &SearchQuery) -> Result<Vec<DiscoveredItem>, CrawlError> {
        let transport = |source: reqwest::Error| CrawlError::Transport {
            term: query.term.clone(),
            offset: query.offset,
            source,
        };

        let request = self.build_request(query).map_err(transport)?;
        debug!("GET {}", request.url());

        let response = self.http.execute(request).map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                term: query.term.clone(),
                offset: query.offset,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(transport)?;
        parse_results(&body).map_err(|e| CrawlError::Decode {
            term: query.term.clone(),
            offset: query.offset,
            reason: e.to_string(),
        })
    }
}
