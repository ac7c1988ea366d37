//! Crawl error types.

use thiserror::Error;

/// Fatal errors raised while crawling the search service.
#[derive(Error, Debug)]
pub enum CrawlError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection, timeout or body read failure.
    #[error("Search request for '{term}' at offset {offset} failed: {source}")]
    Transport {
        term: String,
        offset: u64,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-2xx status.
    #[error("Search request for '{term}' at offset {offset} returned HTTP {status}")]
    Status { term: String, offset: u64, status: u16 },

    /// The response body was not a valid search payload.
    #[error("Malformed search response for '{term}' at offset {offset}: {reason}")]
    Decode {
        term: String,
        offset: u64,
        reason: String,
    },
}
