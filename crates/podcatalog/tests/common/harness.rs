//! Test harness for isolated test execution.
//!
//! `TestHarness` owns a temporary directory with a writable matching store
//! and an output location, and runs exports against them with a fixed clock.
//! `ScriptedClient` answers search queries from canned pages.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tempfile::TempDir;

use podcatalog::db::{source_repo, CreatorRow, FeedRow, ScanRow};
use podcatalog::discovery::SearchQuery;
use podcatalog::{
    run_export, CrawlError, Database, DiscoveredItem, ExportConfig, ExportReport, SearchClient,
};

/// Fixed run timestamp used by every harness export.
pub fn run_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
}

/// A parsed export: header plus records, as strings.
#[derive(Debug)]
pub struct ExportedCsv {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportedCsv {
    fn column(&self, name: &str) -> usize {
        self.header
            .iter()
            .position(|h| h == name)
            .unwrap_or_else(|| panic!("no column '{}'", name))
    }

    /// Values of one column, in row order.
    pub fn values(&self, name: &str) -> Vec<String> {
        let idx = self.column(name);
        self.rows.iter().map(|r| r[idx].clone()).collect()
    }
}

/// Test harness providing an isolated store and output directory.
pub struct TestHarness {
    temp_dir: TempDir,
    /// Path to the matching store within temp_dir.
    pub db_path: PathBuf,
    /// Path the export CSV is written to.
    pub output_path: PathBuf,
    db: Database,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("adelined_matching.db");
        let output_path = temp_dir.path().join("exports").join("catalog.csv");
        let db = Database::create(&db_path).expect("Failed to create store");

        Self {
            temp_dir,
            db_path,
            output_path,
            db,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.temp_dir.path()
    }

    pub fn add_creator(&self, creator: CreatorRow) -> &Self {
        source_repo::insert_creator(&self.db, &creator).expect("insert creator");
        self
    }

    pub fn add_scan(&self, scan: ScanRow) -> &Self {
        source_repo::insert_scan(&self.db, &scan).expect("insert scan");
        self
    }

    pub fn add_feed(&self, feed: FeedRow) -> &Self {
        source_repo::insert_feed(&self.db, &feed).expect("insert feed");
        self
    }

    /// Export config pointing at this harness, exporting everything.
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            database: self.db_path.clone(),
            output: Some(self.output_path.clone()),
            limit: 0,
            ..Default::default()
        }
    }

    pub fn export(&self, config: &ExportConfig) -> podcatalog::Result<(ExportReport, ExportedCsv)> {
        let report = run_export(config, run_at())?;
        let csv = read_csv(&report.output);
        Ok((report, csv))
    }

    pub fn export_all(&self) -> (ExportReport, ExportedCsv) {
        self.export(&self.export_config()).expect("export failed")
    }
}

pub fn read_csv(path: &std::path::Path) -> ExportedCsv {
    let mut reader = csv::Reader::from_path(path).expect("open csv");
    let header = reader
        .headers()
        .expect("csv header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("csv record").iter().map(str::to_string).collect())
        .collect();
    ExportedCsv { header, rows }
}

/// Search client that serves canned pages per term and records every query.
#[derive(Default)]
pub struct ScriptedClient {
    pages: HashMap<String, Vec<Vec<Value>>>,
    failing_term: Option<String>,
    queries: RefCell<Vec<SearchQuery>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the pages returned for `term`, in offset order.
    pub fn with_pages(mut self, term: &str, pages: Vec<Vec<Value>>) -> Self {
        self.pages.insert(term.to_string(), pages);
        self
    }

    /// Every query for `term` fails with a 503.
    pub fn failing_on(mut self, term: &str) -> Self {
        self.failing_term = Some(term.to_string());
        self
    }

    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.borrow().clone()
    }
}

impl SearchClient for ScriptedClient {
    fn search(&self, query: &SearchQuery) -> Result<Vec<DiscoveredItem>, CrawlError> {
        self.queries.borrow_mut().push(query.clone());

        if self.failing_term.as_deref() == Some(query.term.as_str()) {
            return Err(CrawlError::Status {
                term: query.term.clone(),
                offset: query.offset,
                status: 503,
            });
        }

        let page = usize::try_from(query.offset / u64::from(query.limit)).unwrap_or(usize::MAX);
        Ok(self
            .pages
            .get(&query.term)
            .and_then(|pages| pages.get(page))
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(DiscoveredItem::new)
            .collect())
    }
}
