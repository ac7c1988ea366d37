use std::path::Path;

use crate::config::schema::{DiscoveryConfig, ExportConfig, RunConfig, MAX_PAGE_LIMIT};
use crate::error::ConfigError;

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

/// Parses a run configuration. Sections are validated separately, once
/// command-line overrides have been applied.
pub fn load_config_from_str(content: &str) -> Result<RunConfig, ConfigError> {
    let config: RunConfig = serde_json::from_str(content)?;
    Ok(config)
}

pub fn validate_discovery(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.limit_per_term == 0 || config.limit_per_term > MAX_PAGE_LIMIT {
        return Err(ConfigError::InvalidPageLimit {
            value: config.limit_per_term,
            max: MAX_PAGE_LIMIT,
        });
    }

    if config.max_pages == 0 {
        return Err(ConfigError::InvalidMaxPages);
    }

    let country = config.country.trim();
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidCountry(config.country.clone()));
    }

    Ok(())
}

pub fn validate_export(config: &ExportConfig) -> Result<(), ConfigError> {
    uuid::Uuid::parse_str(config.owner_id.trim()).map_err(|e| ConfigError::InvalidOwnerId {
        value: config.owner_id.clone(),
        reason: e.to_string(),
    })?;

    Ok(())
}
