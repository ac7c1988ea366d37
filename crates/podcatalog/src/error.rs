use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PodcatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] crate::discovery::CrawlError),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No terms provided")]
    NoTerms,

    #[error("Failed to read terms file '{path}': {source}")]
    ReadTermsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No output path provided for {0}")]
    MissingOutput(&'static str),

    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Invalid per-page limit {value}: must be between 1 and {max}")]
    InvalidPageLimit { value: u32, max: u32 },

    #[error("Invalid max pages per term: must be at least 1")]
    InvalidMaxPages,

    #[error("Invalid country code '{0}': expected two ASCII letters")]
    InvalidCountry(String),

    #[error("Invalid owner id '{value}': {reason}")]
    InvalidOwnerId { value: String, reason: String },
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PodcatalogError>;
