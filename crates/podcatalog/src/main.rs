//! podcatalog CLI - podcast discovery crawl and catalog export.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use podcatalog::{
    load_config, run_discovery, run_export, DiscoveryConfig, ExportConfig, ItunesSearchClient,
    RunConfig,
};

/// Podcast discovery and identity-resolved catalog export.
#[derive(Parser, Debug)]
#[command(name = "podcatalog")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging unless RUST_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl the iTunes Search API and write unique shows as JSONL
    Discover(DiscoverArgs),
    /// Export matched podcasts from the matching store as catalog CSV
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct DiscoverArgs {
    /// JSON run configuration; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// File with search terms, one per line.
    #[arg(long)]
    terms_file: Option<PathBuf>,

    /// Comma-separated search terms.
    #[arg(long)]
    terms: Option<String>,

    /// Results per term per page (max 200).
    #[arg(long)]
    limit_per_term: Option<u32>,

    /// Max pages per term.
    #[arg(long)]
    max_pages: Option<u32>,

    /// iTunes country code (default: GB).
    #[arg(long)]
    country: Option<String>,

    /// Output JSONL file.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl DiscoverArgs {
    fn apply(self, mut config: DiscoveryConfig) -> DiscoveryConfig {
        if self.terms_file.is_some() {
            config.terms_file = self.terms_file;
        }
        if self.terms.is_some() {
            config.terms = self.terms;
        }
        if let Some(limit) = self.limit_per_term {
            config.limit_per_term = limit;
        }
        if let Some(pages) = self.max_pages {
            config.max_pages = pages;
        }
        if let Some(country) = self.country {
            config.country = country;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
        config
    }
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// JSON run configuration; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the matching SQLite database (default: adelined_matching.db).
    #[arg(long = "db", alias = "adl-db")]
    database: Option<PathBuf>,

    /// Output CSV path (default: exports/catalog_podcasts_YYYYMMDD.csv).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Catalog user id set as owner_id on every exported podcast.
    #[arg(long)]
    owner_id: Option<String>,

    /// Only export podcasts whose scan region matches.
    #[arg(long)]
    region: Option<String>,

    /// Only export a specific iTunes ID.
    #[arg(long)]
    itunesid: Option<i64>,

    /// Max rows to export, 0 for all (default: 1000).
    #[arg(long)]
    limit: Option<u64>,

    /// Offset into the export set (default: 0).
    #[arg(long)]
    offset: Option<u64>,
}

impl ExportArgs {
    fn apply(self, mut config: ExportConfig) -> ExportConfig {
        if let Some(database) = self.database {
            config.database = database;
        }
        if self.out.is_some() {
            config.output = self.out;
        }
        if let Some(owner_id) = self.owner_id {
            config.owner_id = owner_id;
        }
        if self.region.is_some() {
            config.region = self.region;
        }
        if self.itunesid.is_some() {
            config.itunes_id = self.itunesid;
        }
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(offset) = self.offset {
            config.offset = offset;
        }
        config
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        // Route `log` records from the storage layer through tracing.
        let _ = tracing_log::LogTracer::init();
    }
}

fn load_run_config(path: Option<&Path>) -> podcatalog::Result<RunConfig> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(RunConfig::default()),
    }
}

fn run_discover(args: DiscoverArgs) -> podcatalog::Result<()> {
    let base = load_run_config(args.config.as_deref())?.discovery;
    let config = args.apply(base);

    let client = ItunesSearchClient::new()?;
    let report = run_discovery(&config, client)?;

    println!(
        "Wrote {} unique shows to {}",
        report.written,
        report.output.display()
    );
    Ok(())
}

fn run_export_command(args: ExportArgs) -> podcatalog::Result<()> {
    let base = load_run_config(args.config.as_deref())?.export;
    let config = args.apply(base);

    let report = run_export(&config, Utc::now())?;

    println!(
        "Wrote {} ({} rows exported, {} joined, {} dropped)",
        report.output.display(),
        report.exported_rows,
        report.joined_rows,
        report.dropped_rows
    );
    Ok(())
}

/// The single line printed for a fatal error.
fn error_line(e: &podcatalog::PodcatalogError) -> String {
    format!("Error: {}", e)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Discover(args) => run_discover(args),
        Commands::Export(args) => run_export_command(args),
    };

    if let Err(e) = result {
        eprintln!("{}", error_line(&e));
        std::process::exit(1);
    }
}
