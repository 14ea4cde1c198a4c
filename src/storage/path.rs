//! Cache location resolution.
//!
//! Turns a [`CacheConfig`] into the concrete paths handed to a backend. No
//! environment variables are read here; the CLI fills the config in.

use std::path::PathBuf;

/// Vendor subdirectory of the temp directory used when a cache home is set.
pub const VENDOR_DIR: &str = "launchdarkly";

/// Default logical name of the cache.
pub const DEFAULT_CACHE_NAME: &str = "example-launchdarkly-cache";

/// Suffix appended to the logical name for the database file.
pub const DB_SUFFIX: &str = ".db";

/// Inputs for cache path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Explicit cache directory. Wins over everything else when set.
    pub cache_dir: Option<PathBuf>,
    /// Whether a cache home is configured. Only its presence matters.
    pub cache_home_set: bool,
    /// System temporary directory.
    pub temp_dir: PathBuf,
    /// Logical cache name.
    pub name: String,
}

impl CacheConfig {
    /// Creates a config with no overrides, rooted at `temp_dir`.
    #[must_use]
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: None,
            cache_home_set: false,
            temp_dir: temp_dir.into(),
            name: DEFAULT_CACHE_NAME.to_string(),
        }
    }

    /// Sets the explicit cache directory.
    #[must_use]
    pub fn with_cache_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.cache_dir = dir;
        self
    }

    /// Records whether a cache home is configured.
    #[must_use]
    pub fn with_cache_home(mut self, set: bool) -> Self {
        self.cache_home_set = set;
        self
    }

    /// Sets the logical cache name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Resolves the cache root directory.
    ///
    /// Order: the explicit cache directory; otherwise, if a cache home is
    /// set, [`VENDOR_DIR`] under the temp directory (not under the cache
    /// home); otherwise the temp directory itself.
    #[must_use]
    pub fn base_dir(&self) -> PathBuf {
        match (&self.cache_dir, self.cache_home_set) {
            (Some(dir), _) => dir.clone(),
            (None, true) => self.temp_dir.join(VENDOR_DIR),
            (None, false) => self.temp_dir.clone(),
        }
    }

    /// Path of the SQLite database file: `<base>/<name>.db`.
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.base_dir().join(format!("{}{DB_SUFFIX}", self.name))
    }

    /// Directory used by the file backend: `<base>/<name>`.
    #[must_use]
    pub fn file_dir(&self) -> PathBuf {
        self.base_dir().join(&self.name)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}
