//! Newline-delimited JSON output for discovered items.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::SinkError;

use super::DiscoveredItem;

/// Writes one raw payload per line. Lines are separated by `\n`; the file
/// does not end with a trailing newline.
pub struct JsonlSink<W: Write> {
    writer: W,
    path: PathBuf,
    lines: usize,
}

impl JsonlSink<BufWriter<File>> {
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

        Ok(Self::new(BufWriter::new(file), path.to_path_buf()))
    }
}

impl<W: Write> JsonlSink<W> {
    pub fn new(writer: W, path: PathBuf) -> Self {
        Self {
            writer,
            path,
            lines: 0,
        }
    }

    pub fn write_item(&mut self, item: &DiscoveredItem) -> Result<(), SinkError> {
        let line = serde_json::to_string(item.payload())?;
        if self.lines > 0 {
            self.writer.write_all(b"\n").map_err(|e| self.io_error(e))?;
        }
        self.writer
            .write_all(line.as_bytes())
            .map_err(|e| self.io_error(e))?;
        self.lines += 1;
        Ok(())
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Flushes buffered output and returns the underlying writer.
    pub fn finish(mut self) -> Result<W, SinkError> {
        self.writer.flush().map_err(|e| self.io_error(e))?;
        Ok(self.writer)
    }

    fn io_error(&self, source: std::io::Error) -> SinkError {
        SinkError::WriteFile {
            path: self.path.clone(),
            source,
        }
    }
}
