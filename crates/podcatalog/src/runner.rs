//! End-to-end runs for the two flows.
//!
//! Each run is all-or-nothing: configuration is checked before any network
//! or database access, and output is written only after every source read
//! has succeeded.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{info, info_span};

use crate::config::{validate_discovery, validate_export, DiscoveryConfig, ExportConfig};
use crate::db::{source_repo, Database};
use crate::discovery::{CrawlSettings, CrawlStats, Crawler, DiscoveredItem, JsonlSink, SearchClient};
use crate::error::{ConfigError, Result};
use crate::export::{join_sources, resolve, CsvSink, ExportBatch, SourceFilter};
use crate::terms::load_terms;

/// Outcome of a discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub output: PathBuf,
    pub terms: usize,
    pub stats: CrawlStats,
    pub written: usize,
}

/// Outcome of an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub output: PathBuf,
    /// Rows produced by the source join, after filters and paging.
    pub joined_rows: usize,
    pub exported_rows: usize,
    /// Joined rows dropped by the resolver for lacking a name.
    pub dropped_rows: usize,
}

/// Crawls the search service for every configured term and writes the unique
/// results as JSONL.
pub fn run_discovery<C: SearchClient>(config: &DiscoveryConfig, client: C) -> Result<DiscoveryReport> {
    validate_discovery(config)?;
    let output = config
        .output
        .clone()
        .ok_or(ConfigError::MissingOutput("discovery"))?;
    let terms = load_terms(config.terms_file.as_deref(), config.terms.as_deref())?;

    let _span = info_span!("discover", terms = terms.len(), output = %output.display()).entered();
    info!("Crawling {} terms", terms.len());

    let crawler = Crawler::new(client, CrawlSettings::from(config));
    let mut crawl = crawler.crawl(&terms);
    let items = crawl
        .by_ref()
        .collect::<std::result::Result<Vec<DiscoveredItem>, _>>()?;
    let stats = crawl.stats();

    let mut sink = JsonlSink::create(&output)?;
    for item in &items {
        sink.write_item(item)?;
    }
    let written = sink.lines_written();
    sink.finish()?;

    info!(written, duplicates = stats.duplicates_skipped, "discovery written");

    Ok(DiscoveryReport {
        output,
        terms: terms.len(),
        stats,
        written,
    })
}

/// Reads the matching store, resolves one identity per podcast, and writes
/// the catalog CSV. `run_at` stamps every row and the default output name.
pub fn run_export(config: &ExportConfig, run_at: DateTime<Utc>) -> Result<ExportReport> {
    validate_export(config)?;
    let db = Database::open(&config.database)?;
    let output = config.output_path(run_at);

    let _span = info_span!("export", db = %config.database.display(), output = %output.display())
        .entered();

    let sources = source_repo::load_sources(&db)?;
    let filter = SourceFilter::from(config);
    let rows = join_sources(sources, &filter);

    let batch = ExportBatch::new(config.owner_id.trim(), run_at);
    let identities = resolve(&rows, &batch);

    let mut sink = CsvSink::create(&output)?;
    for identity in &identities {
        sink.write_identity(identity)?;
    }
    let exported_rows = sink.rows_written();
    sink.finish()?;

    let report = ExportReport {
        output,
        joined_rows: rows.len(),
        exported_rows,
        dropped_rows: rows.len() - exported_rows,
    };

    info!(
        joined = report.joined_rows,
        exported = report.exported_rows,
        dropped = report.dropped_rows,
        "export written"
    );

    Ok(report)
}
