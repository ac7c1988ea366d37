//! CSV output shaped for the catalog's `podcasts` table.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::SinkError;

use super::ResolvedIdentity;

pub const EXPORT_HEADER: [&str; 19] = [
    "owner_id",
    "name",
    "itunesid",
    "vibe",
    "region",
    "audience_band",
    "price_gbp",
    "sample_url",
    "available",
    "can_negotiate",
    "banner_image_path",
    "tile_image_path",
    "external_ref",
    "external_json",
    "is_verified",
    "is_on_waitlist",
    "has_surveyed",
    "created_at",
    "updated_at",
];

fn optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn to_record(identity: &ResolvedIdentity) -> Result<[String; 19], SinkError> {
    Ok([
        identity.owner_id.clone(),
        identity.name.clone(),
        identity.itunes_id.to_string(),
        optional(&identity.vibe),
        identity.region.clone(),
        optional(&identity.audience_band),
        identity.price_gbp.to_string(),
        optional(&identity.sample_url),
        identity.available.to_string(),
        identity.can_negotiate.to_string(),
        optional(&identity.banner_image_path),
        optional(&identity.tile_image_path),
        identity.external_ref.clone(),
        identity.external_json()?,
        identity.is_verified.to_string(),
        identity.is_on_waitlist.to_string(),
        identity.has_surveyed.to_string(),
        identity.created_at_rfc3339(),
        identity.updated_at_rfc3339(),
    ])
}

/// Writes the header on creation, then one record per resolved identity.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl CsvSink<File> {
    /// Creates (or truncates) the file at `path`, creating parent directories.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SinkError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file = File::create(path).map_err(|e| SinkError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_writer(file)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W) -> Result<Self, SinkError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(EXPORT_HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write_identity(&mut self, identity: &ResolvedIdentity) -> Result<(), SinkError> {
        self.writer.write_record(to_record(identity)?)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Csv(csv::Error::from(e.into_error())))
    }
}
