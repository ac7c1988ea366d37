//! Search term loading.

use std::collections::HashSet;
use std::path::Path;

use log::debug;

use crate::error::ConfigError;

/// Loads search terms from an optional file (one per line) and an optional
/// comma-separated list.
///
/// File terms come first. Entries are trimmed, blanks ignored, and duplicates
/// dropped keeping the first occurrence. A terms file that does not exist
/// contributes nothing. An empty result is a [`ConfigError::NoTerms`].
pub fn load_terms(
    terms_file: Option<&Path>,
    inline_terms: Option<&str>,
) -> Result<Vec<String>, ConfigError> {
    let mut raw: Vec<String> = Vec::new();

    if let Some(path) = terms_file.filter(|p| p.exists()) {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadTermsFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        raw.extend(content.lines().map(str::to_string));
    }

    if let Some(list) = inline_terms {
        raw.extend(list.split(',').map(str::to_string));
    }

    let terms = dedup_terms(raw);
    if terms.is_empty() {
        return Err(ConfigError::NoTerms);
    }

    debug!("Loaded {} search terms", terms.len());
    Ok(terms)
}

fn dedup_terms(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
