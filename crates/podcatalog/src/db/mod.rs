//! Read access to the matching store.
//!
//! The store is populated by an external matching pipeline. This crate only
//! reads it, except when building fixtures through [`Database::create`].

use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

pub mod error;
pub mod schema;
pub mod source_repo;

pub use error::DatabaseError;
pub use source_repo::{CreatorRow, FeedRow, ScanRow, SourceTables};

const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Handle wrapping a single rusqlite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens an existing store read-only.
    ///
    /// A missing file is reported as [`DatabaseError::NotFound`] without
    /// touching the filesystem.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if !path.is_file() {
            return Err(DatabaseError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        log::info!("Database opened read-only at {}", path.display());

        Ok(Self { conn })
    }

    /// Creates (or opens) a writable store and ensures the source tables exist.
    pub fn create(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        schema::create_source_tables(&conn)?;

        Ok(Self { conn })
    }

    /// Opens an in-memory store with the source tables, for testing.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        schema::create_source_tables(&conn)?;

        Ok(Self { conn })
    }

    /// Provides access to the underlying connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Connection) -> Result<T, DatabaseError>,
    {
        f(&self.conn)
    }
}
