//! `SQLite` storage implementation.
//!
//! Keeps every entry in one `storage` table keyed by `(namespace, key)`.
//! Writes are single upsert statements, so a row is never duplicated and
//! never observed half-written.

use crate::error::{IoError, Result, StorageError};
use crate::storage::schema::{DELETE_SQL, SCHEMA_SQL, SELECT_SQL, UPSERT_SQL};
use crate::storage::traits::Store;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// How long a statement waits on a lock held by another connection.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed store.
///
/// A store whose initialization failed is *degraded*: it holds no connection
/// and every operation reports [`StorageError::Unavailable`], which the
/// [`Persistence`](crate::storage::Persistence) contract turns into a no-op.
///
/// # Examples
///
/// ```no_run
/// use flag_cache::storage::{Persistence, SqliteStore};
///
/// let store = SqliteStore::open_or_degraded("/tmp/example-launchdarkly-cache.db");
/// store.set("flags", "my-boolean-flag", "true");
/// assert_eq!(store.read("flags", "my-boolean-flag").as_deref(), Some("true"));
/// ```
pub struct SqliteStore {
    /// `SQLite` connection, `None` when degraded.
    conn: Option<Mutex<Connection>>,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// Missing parent directories are created. The `storage` table is created
    /// if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory, database, or schema cannot be
    /// created. The connection is closed before returning.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
                path: parent.to_string_lossy().to_string(),
                reason: e.to_string(),
            })?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(StorageError::from)?;

        // WAL lets readers proceed while another process writes
        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        conn.execute_batch(SCHEMA_SQL).map_err(StorageError::from)?;

        debug!(path = %path.display(), "opened sqlite store");

        Ok(Self {
            conn: Some(Mutex::new(conn)),
            path: Some(path),
        })
    }

    /// Opens the database, falling back to a degraded store on failure.
    ///
    /// Never fails. The failure is logged and the returned store silently
    /// drops writes and reads as empty.
    pub fn open_or_degraded<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(store) => store,
            Err(error) => {
                warn!(path = %path.display(), %error, "cannot open cache database, persistence disabled");
                Self {
                    conn: None,
                    path: Some(path.to_path_buf()),
                }
            }
        }
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        conn.execute_batch(SCHEMA_SQL).map_err(StorageError::from)?;

        Ok(Self {
            conn: Some(Mutex::new(conn)),
            path: None,
        })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns `true` if initialization failed and the store is inert.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.conn.is_none()
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        let conn = self.conn.as_ref().ok_or(StorageError::Unavailable)?;
        // Every statement is atomic, so a panic elsewhere cannot leave the
        // connection mid-write.
        Ok(conn.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Store for SqliteStore {
    fn try_set(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let conn = self.connection()?;
        conn.prepare_cached(UPSERT_SQL)
            .and_then(|mut stmt| stmt.execute(params![namespace, key, value]))
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn try_remove(&self, namespace: &str, key: &str) -> Result<()> {
        let conn = self.connection()?;
        conn.prepare_cached(DELETE_SQL)
            .and_then(|mut stmt| stmt.execute(params![namespace, key]))
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn try_read(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let conn = self.connection()?;
        let value: Option<Option<String>> = conn
            .prepare_cached(SELECT_SQL)
            .and_then(|mut stmt| {
                stmt.query_row(params![namespace, key], |row| row.get(0))
                    .optional()
            })
            .map_err(StorageError::from)?;

        // A NULL value column still marks an existing entry.
        Ok(value.map(Option::unwrap_or_default))
    }
}
