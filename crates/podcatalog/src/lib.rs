pub mod config;
pub mod db;
pub mod discovery;
pub mod error;
pub mod export;
pub mod identity;
pub mod runner;
pub mod terms;

pub use config::{load_config, DiscoveryConfig, ExportConfig, RunConfig};
pub use db::{Database, DatabaseError};
pub use discovery::{CrawlError, CrawlSettings, Crawler, DiscoveredItem, ItunesSearchClient, SearchClient};
pub use error::{ConfigError, PodcatalogError, Result, SinkError};
pub use export::{ExportBatch, JoinedIdentityRow, ResolvedIdentity, SourceFilter};
pub use runner::{run_discovery, run_export, DiscoveryReport, ExportReport};
pub use terms::load_terms;
