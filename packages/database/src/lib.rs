#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Keyed storage for park records.
//!
//! One record is stored per park code, behind the [`ParkStore`] trait so
//! backends are swappable: a `parks` table keyed by code, a key-value
//! table holding JSON blobs, or an in-memory map. The SQL-backed variants
//! use `switchy_database` over `sqlite-rusqlite`, following the same
//! patterns as the rest of the registry.
//!
//! The store is constructed explicitly at startup via [`open_store`] (or
//! [`open_from_env`]) and handed to the server state; dropping the handle
//! on shutdown closes the connection.

pub mod kv;
pub mod mem;
pub mod store;
pub mod table;

use std::path::Path;

use strum_macros::{AsRefStr, Display, EnumString};
use switchy_database::Database;
use switchy_database_connection::init_sqlite_rusqlite;
use thiserror::Error;

pub use store::ParkStore;

/// Default path for the park registry database.
pub const DEFAULT_DB_PATH: &str = "data/parks.db";

/// Environment variable selecting the storage backend.
pub const BACKEND_ENV: &str = "PARK_STORE_BACKEND";

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "PARK_DB_PATH";

/// Errors that can occur during park storage operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Database connection setup error.
    #[error("Database init error: {0}")]
    Init(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Available [`ParkStore`] backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    /// One `parks` row per code.
    Table,
    /// One JSON blob per `park:{CODE}` key.
    Kv,
    /// Ephemeral in-memory map.
    Memory,
}

/// Opens a [`ParkStore`] with the given backend.
///
/// `path` locates the `SQLite` file for the SQL-backed variants and is
/// ignored by the memory backend. Schema creation is idempotent.
///
/// # Errors
///
/// Returns [`DbError`] if the database cannot be opened or schema creation
/// fails.
pub async fn open_store(backend: StoreBackend, path: &Path) -> Result<Box<dyn ParkStore>, DbError> {
    match backend {
        StoreBackend::Table => {
            let store = table::TableParkStore::open(open_sqlite(path)?).await?;
            Ok(Box::new(store))
        }
        StoreBackend::Kv => {
            let store = kv::KvParkStore::open(open_sqlite(path)?).await?;
            Ok(Box::new(store))
        }
        StoreBackend::Memory => Ok(Box::new(mem::MemoryParkStore::new())),
    }
}

/// Opens a [`ParkStore`] configured from the environment.
///
/// Reads the backend from `PARK_STORE_BACKEND` (default `table`) and the
/// database path from `PARK_DB_PATH` (default `data/parks.db`).
///
/// # Errors
///
/// Returns [`DbError`] if the backend name is unknown or the store cannot
/// be opened.
pub async fn open_from_env() -> Result<Box<dyn ParkStore>, DbError> {
    let raw = std::env::var(BACKEND_ENV).unwrap_or_else(|_| StoreBackend::Table.to_string());
    let backend: StoreBackend = raw
        .to_lowercase()
        .parse()
        .map_err(|_| DbError::Conversion {
            message: format!("Unknown store backend: {raw}"),
        })?;

    let path = std::env::var(DB_PATH_ENV).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

    log::info!("Opening {backend} park store (path: {path})");
    open_store(backend, Path::new(&path)).await
}

/// Opens (or creates) the `SQLite` database at `path`, creating parent
/// directories as needed.
fn open_sqlite(path: &Path) -> Result<Box<dyn Database>, DbError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    init_sqlite_rusqlite(Some(path)).map_err(|e| DbError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_names() {
        for (raw, expected) in [
            ("table", StoreBackend::Table),
            ("kv", StoreBackend::Kv),
            ("memory", StoreBackend::Memory),
        ] {
            assert_eq!(raw.parse::<StoreBackend>().unwrap(), expected);
        }
    }

    #[test]
    fn displays_backend_names_lower_case() {
        assert_eq!(StoreBackend::Table.to_string(), "table");
        assert_eq!(StoreBackend::Kv.as_ref(), "kv");
    }

    #[test]
    fn rejects_unknown_backend_names() {
        assert!("redis".parse::<StoreBackend>().is_err());
    }
}
