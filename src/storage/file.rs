//! Plain-file storage implementation.
//!
//! One file per entry, named `<namespace>-<key>.data` under a base
//! directory. Writes go to a staging file in the same directory which is
//! synced and then renamed over the target, so readers only ever see a
//! complete old value or a complete new one.

use crate::error::{IoError, Result};
use crate::storage::traits::Store;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extension of committed entry files.
pub const ENTRY_EXTENSION: &str = "data";

/// Suffix of staging files. These never outlive a successful write.
pub const STAGING_SUFFIX: &str = ".tmp";

/// Mode requested for staging files, masked by the process umask.
#[cfg(unix)]
const ENTRY_MODE: u32 = 0o666;

/// File-backed store.
///
/// Namespace and key are used verbatim in file names, so they must not
/// contain path separators or characters the filesystem rejects. Entry
/// files get the same permissions as any file the process creates (0666
/// less the umask), not the owner-only mode of a default temp file.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `base_dir`, creating the directory and any
    /// missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_dir).map_err(|e| IoError::DirectoryFailed {
            path: base_dir.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
        debug!(path = %base_dir.display(), "opened file store");
        Ok(Self { base_dir })
    }

    /// Like [`FileStore::open`], but never fails.
    ///
    /// If the directory cannot be created the failure is logged and every
    /// later operation fails quietly.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref();
        Self::open(base_dir).unwrap_or_else(|error| {
            warn!(path = %base_dir.display(), %error, "cannot create cache directory");
            Self {
                base_dir: base_dir.to_path_buf(),
            }
        })
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the committed file path for `(namespace, key)`.
    #[must_use]
    pub fn entry_path(&self, namespace: &str, key: &str) -> PathBuf {
        self.base_dir.join(entry_file_name(namespace, key))
    }
}

fn entry_file_name(namespace: &str, key: &str) -> String {
    format!("{namespace}-{key}.{ENTRY_EXTENSION}")
}

fn write_failed(path: &Path, err: &std::io::Error) -> IoError {
    IoError::WriteFailed {
        path: path.to_string_lossy().to_string(),
        reason: err.to_string(),
    }
}

impl Store for FileStore {
    fn try_set(&self, namespace: &str, key: &str, value: &str) -> Result<()> {
        let target = self.entry_path(namespace, key);
        let prefix = format!("{}.", entry_file_name(namespace, key));

        // Unique staging name per writer, dropped (and deleted) on any error.
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(STAGING_SUFFIX);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(ENTRY_MODE));
        }
        let mut staging = builder
            .tempfile_in(&self.base_dir)
            .map_err(|e| write_failed(&target, &e))?;

        staging
            .write_all(value.as_bytes())
            .and_then(|()| staging.flush())
            .and_then(|()| staging.as_file().sync_all())
            .map_err(|e| write_failed(staging.path(), &e))?;

        staging
            .persist(&target)
            .map_err(|e| IoError::RenameFailed {
                path: target.to_string_lossy().to_string(),
                reason: e.error.to_string(),
            })?;

        Ok(())
    }

    fn try_remove(&self, namespace: &str, key: &str) -> Result<()> {
        let path = self.entry_path(namespace, key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(IoError::RemoveFailed {
                path: path.to_string_lossy().to_string(),
                reason: e.to_string(),
            }
            .into()),
        }
    }

    fn try_read(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(namespace, key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(IoError::ReadFailed {
                path: path.to_string_lossy().to_string(),
                reason: e.to_string(),
            }
            .into()),
        }
    }
}
