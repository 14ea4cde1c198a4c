//! Storage layer for flag-cache.
//!
//! Two backends implement the [`Persistence`] contract: [`SqliteStore`]
//! keeps entries in one `SQLite` table, [`FileStore`] keeps one file per
//! entry. Pick one with [`BackendKind`] and hand the result of
//! [`open_backend`] to the SDK.

pub mod file;
pub mod path;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use file::FileStore;
pub use path::{CacheConfig, DEFAULT_CACHE_NAME};
pub use sqlite::SqliteStore;
pub use traits::{Persistence, Store};

use crate::error::Result;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Available storage backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Single `SQLite` database file.
    #[default]
    Sqlite,
    /// One plain file per entry.
    File,
}

impl BackendKind {
    /// Returns the location this backend stores its data at.
    #[must_use]
    pub fn location(self, config: &CacheConfig) -> PathBuf {
        match self {
            Self::Sqlite => config.db_path(),
            Self::File => config.file_dir(),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => f.write_str("sqlite"),
            Self::File => f.write_str("file"),
        }
    }
}

/// Constructs the selected backend at its resolved location.
///
/// Never fails: a backend that cannot initialize is returned in its inert
/// state and the problem is logged.
#[must_use]
pub fn open_backend(kind: BackendKind, config: &CacheConfig) -> Arc<dyn Persistence> {
    let location = kind.location(config);
    match kind {
        BackendKind::Sqlite => Arc::new(SqliteStore::open_or_degraded(location)),
        BackendKind::File => Arc::new(FileStore::new(location)),
    }
}

/// Constructs the selected backend, surfacing initialization errors.
///
/// Used by tooling that wants to report failures instead of running with an
/// inert cache.
///
/// # Errors
///
/// Returns an error if the database or directory cannot be set up.
pub fn open_store(kind: BackendKind, config: &CacheConfig) -> Result<Box<dyn Store>> {
    let location = kind.location(config);
    let store: Box<dyn Store> = match kind {
        BackendKind::Sqlite => Box::new(SqliteStore::open(location)?),
        BackendKind::File => Box::new(FileStore::open(location)?),
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(temp_dir: &TempDir) -> CacheConfig {
        CacheConfig::new(temp_dir.path()).with_cache_dir(Some(temp_dir.path().join("cache")))
    }

    #[test]
    fn test_location_per_backend() {
        let config = CacheConfig::new("/tmp");
        assert_eq!(
            BackendKind::Sqlite.location(&config),
            PathBuf::from("/tmp/example-launchdarkly-cache.db")
        );
        assert_eq!(
            BackendKind::File.location(&config),
            PathBuf::from("/tmp/example-launchdarkly-cache")
        );
    }

    #[test]
    fn test_open_backend_sqlite() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);

        let backend = open_backend(BackendKind::Sqlite, &config);
        backend.set("flags", "k", "v");
        assert_eq!(backend.read("flags", "k"), Some("v".to_string()));
        assert!(config.db_path().is_file());
    }

    #[test]
    fn test_open_backend_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);

        let backend = open_backend(BackendKind::File, &config);
        backend.set("flags", "k", "v");
        assert_eq!(backend.read("flags", "k"), Some("v".to_string()));
        assert!(config.file_dir().join("flags-k.data").is_file());
    }

    #[test]
    fn test_open_store_reports_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let config = CacheConfig::new(temp_dir.path()).with_cache_dir(Some(blocker));

        assert!(open_store(BackendKind::Sqlite, &config).is_err());
        assert!(open_store(BackendKind::File, &config).is_err());
    }

    #[test]
    fn test_backends_share_contract() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);

        for kind in [BackendKind::Sqlite, BackendKind::File] {
            let store = open_store(kind, &config).unwrap();
            store.try_set("a", "k", "x").unwrap();
            store.try_set("b", "k", "y").unwrap();
            assert_eq!(store.try_read("a", "k").unwrap().as_deref(), Some("x"));
            assert_eq!(store.try_read("b", "k").unwrap().as_deref(), Some("y"));
        }
    }

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Sqlite.to_string(), "sqlite");
        assert_eq!(BackendKind::File.to_string(), "file");
        assert_eq!(BackendKind::default(), BackendKind::Sqlite);
    }
}
