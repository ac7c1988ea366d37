use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest page size the search service accepts.
pub const MAX_PAGE_LIMIT: u32 = 200;

pub const DEFAULT_COUNTRY: &str = "GB";

pub const DEFAULT_DATABASE_PATH: &str = "adelined_matching.db";

/// Catalog user that owns every exported podcast unless overridden.
pub const DEFAULT_OWNER_ID: &str = "11e86110-bdf7-4665-a2de-4a6846144b61";

/// Optional on-disk run configuration. Command-line flags override it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub terms_file: Option<PathBuf>,
    /// Comma-separated inline terms.
    #[serde(default)]
    pub terms: Option<String>,
    #[serde(default = "default_limit_per_term")]
    pub limit_per_term: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_limit_per_term() -> u32 {
    MAX_PAGE_LIMIT
}

fn default_max_pages() -> u32 {
    5
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            terms_file: None,
            terms: None,
            limit_per_term: default_limit_per_term(),
            max_pages: default_max_pages(),
            country: default_country(),
            output: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_database")]
    pub database: PathBuf,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_owner_id")]
    pub owner_id: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub itunes_id: Option<i64>,
    /// Maximum rows to export; `0` exports everything.
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

fn default_owner_id() -> String {
    DEFAULT_OWNER_ID.to_string()
}

fn default_limit() -> u64 {
    1000
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            output: None,
            owner_id: default_owner_id(),
            region: None,
            itunes_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl ExportConfig {
    /// Output path, defaulting to `exports/catalog_podcasts_YYYYMMDD.csv`.
    pub fn output_path(&self, now: DateTime<Utc>) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => default_export_path(Path::new("exports"), now),
        }
    }
}

pub fn default_export_path(dir: &Path, now: DateTime<Utc>) -> PathBuf {
    dir.join(format!("catalog_podcasts_{}.csv", now.format("%Y%m%d")))
}
