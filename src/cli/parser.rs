//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros. This is the only
//! place process environment is consulted for cache location.

use crate::error::{Error, Result};
use crate::storage::{BackendKind, CacheConfig, DEFAULT_CACHE_NAME};
use clap::builder::OsStringValueParser;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// flag-cache: inspect and edit a feature-flag SDK persistence cache.
#[derive(Parser, Debug)]
#[command(name = "flag-cache")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Storage backend.
    #[arg(short, long, value_enum, default_value_t = BackendKind::Sqlite, global = true)]
    pub backend: BackendKind,

    /// Cache directory. Overrides every other location rule; empty means unset.
    #[arg(long, env = "LD_CACHE_DIR", value_parser = OsStringValueParser::new(), global = true)]
    pub cache_dir: Option<OsString>,

    /// Cache home. Only whether it is set matters, even when empty.
    #[arg(
        long,
        env = "XDG_CACHE_HOME",
        value_parser = OsStringValueParser::new(),
        hide = true,
        global = true
    )]
    pub cache_home: Option<OsString>,

    /// Logical cache name (database file stem or entry directory).
    #[arg(long, default_value = DEFAULT_CACHE_NAME, global = true)]
    pub name: String,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store a value, replacing any existing one.
    Set {
        /// Entry namespace.
        namespace: String,

        /// Entry key.
        key: String,

        /// Value to store (reads from stdin if not provided).
        value: Option<String>,
    },

    /// Print a stored value.
    Get {
        /// Entry namespace.
        namespace: String,

        /// Entry key.
        key: String,
    },

    /// Delete a stored value.
    #[command(alias = "rm")]
    Remove {
        /// Entry namespace.
        namespace: String,

        /// Entry key.
        key: String,
    },

    /// Show where the selected backend keeps its data.
    Path,
}

impl Cli {
    /// Builds the cache configuration from flags and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache name is empty.
    pub fn cache_config(&self) -> Result<CacheConfig> {
        if self.name.trim().is_empty() {
            return Err(Error::Config {
                message: "cache name must not be empty".to_string(),
            });
        }

        let cache_dir = self
            .cache_dir
            .as_ref()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        Ok(CacheConfig::default()
            .with_cache_dir(cache_dir)
            .with_cache_home(self.cache_home.is_some())
            .with_name(self.name.as_str()))
    }
}
