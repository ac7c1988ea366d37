//! Paginated, rate-limited search crawl.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::DiscoveryConfig;
use crate::identity::SeenIds;

use super::client::{SearchClient, SearchQuery, PODCAST_MEDIA};
use super::error::CrawlError;
use super::DiscoveredItem;

/// Minimum spacing between consecutive search requests.
pub const POLITE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    pub per_page_limit: u32,
    pub max_pages_per_term: u32,
    pub country: String,
    pub media: String,
}

impl From<&DiscoveryConfig> for CrawlSettings {
    fn from(config: &DiscoveryConfig) -> Self {
        Self {
            per_page_limit: config.limit_per_term,
            max_pages_per_term: config.max_pages,
            country: config.country.trim().to_uppercase(),
            media: PODCAST_MEDIA.to_string(),
        }
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self::from(&DiscoveryConfig::default())
    }
}

/// Counters for one crawl run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages_fetched: u64,
    pub items_seen: u64,
    pub items_emitted: u64,
    pub duplicates_skipped: u64,
}

pub struct Crawler<C> {
    client: C,
    settings: CrawlSettings,
    delay: Duration,
}

impl<C: SearchClient> Crawler<C> {
    pub fn new(client: C, settings: CrawlSettings) -> Self {
        Self {
            client,
            settings,
            delay: POLITE_DELAY,
        }
    }

    /// Sets the minimum spacing between requests, also kept after each
    /// non-empty page. Never drops below [`POLITE_DELAY`].
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay.max(POLITE_DELAY);
        self
    }

    #[cfg(test)]
    fn without_delay(mut self) -> Self {
        self.delay = Duration::ZERO;
        self
    }

    pub fn settings(&self) -> &CrawlSettings {
        &self.settings
    }

    /// Starts a crawl over `terms`, in order.
    ///
    /// Requests are issued lazily as the returned iterator is consumed. Each
    /// call gets its own dedup state.
    pub fn crawl<'a>(&'a self, terms: &'a [String]) -> Crawl<'a, C> {
        Crawl {
            crawler: self,
            terms,
            term_index: 0,
            page: 0,
            buffer: Vec::new().into_iter(),
            seen: SeenIds::new(),
            stats: CrawlStats::default(),
            last_request: None,
            finished: false,
        }
    }
}

/// A running crawl. Yields each item on its first sighting; items without an
/// external id are always yielded. After an error nothing more is yielded.
pub struct Crawl<'a, C> {
    crawler: &'a Crawler<C>,
    terms: &'a [String],
    term_index: usize,
    page: u32,
    buffer: std::vec::IntoIter<DiscoveredItem>,
    seen: SeenIds,
    stats: CrawlStats,
    last_request: Option<Instant>,
    finished: bool,
}

impl<C: SearchClient> Crawl<'_, C> {
    pub fn stats(&self) -> CrawlStats {
        self.stats
    }

    /// Holds off until at least the crawler's delay has passed since the
    /// previous request, whatever that request returned.
    fn wait_for_slot(&mut self) {
        if let Some(at) = self.last_request {
            let remaining = self.crawler.delay.saturating_sub(at.elapsed());
            if !remaining.is_zero() {
                thread::sleep(remaining);
            }
        }
        self.last_request = Some(Instant::now());
    }

    fn advance_term(&mut self) {
        self.term_index += 1;
        self.page = 0;
    }

    /// Loads the next non-empty page into the buffer. Returns `false` once
    /// every term is exhausted.
    fn fetch_next_page(&mut self) -> Result<bool, CrawlError> {
        let crawler = self.crawler;
        let settings = &crawler.settings;
        let terms = self.terms;

        while let Some(term) = terms.get(self.term_index) {
            if self.page >= settings.max_pages_per_term {
                self.advance_term();
                continue;
            }

            let query = SearchQuery {
                term: term.clone(),
                country: settings.country.clone(),
                media: settings.media.clone(),
                limit: settings.per_page_limit,
                offset: u64::from(self.page) * u64::from(settings.per_page_limit),
            };

            self.wait_for_slot();
            let items = crawler.client.search(&query).inspect_err(|e| {
                warn!(term = %query.term, offset = query.offset, "search request failed: {}", e);
            })?;
            self.stats.pages_fetched += 1;

            if items.is_empty() {
                debug!(term = %query.term, page = self.page, "no more results");
                self.advance_term();
                continue;
            }

            debug!(
                term = %query.term,
                page = self.page,
                count = items.len(),
                "fetched search page"
            );
            self.stats.items_seen += items.len() as u64;
            self.page += 1;
            self.buffer = items.into_iter();

            thread::sleep(crawler.delay);
            return Ok(true);
        }

        Ok(false)
    }
}

impl<C: SearchClient> Iterator for Crawl<'_, C> {
    type Item = Result<DiscoveredItem, CrawlError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            for item in self.buffer.by_ref() {
                if let Some(id) = item.external_id() {
                    if !self.seen.first_sighting(id) {
                        self.stats.duplicates_skipped += 1;
                        continue;
                    }
                }
                self.stats.items_emitted += 1;
                return Some(Ok(item));
            }

            match self.fetch_next_page() {
                Ok(true) => {}
                Ok(false) => {
                    self.finished = true;
                    info!(
                        pages = self.stats.pages_fetched,
                        unique = self.stats.items_emitted,
                        duplicates = self.stats.duplicates_skipped,
                        "crawl complete"
                    );
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
