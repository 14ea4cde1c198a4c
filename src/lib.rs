//! # flag-cache
//!
//! Durable key-value persistence for feature-flag SDK state.
//!
//! An SDK stores its cached flag data under `(namespace, key)` pairs and
//! expects it back after a restart. This crate provides that store behind a
//! single [`Persistence`] trait with two backends:
//!
//! - **`SQLite`**: one table with a composite primary key, written with
//!   single-statement upserts
//! - **Plain files**: one file per entry, replaced atomically by
//!   write-then-rename
//!
//! Failures never reach the SDK. They are logged through `tracing` and the
//! operation behaves as if nothing was stored.
//!
//! ```no_run
//! use flag_cache::{BackendKind, CacheConfig, Persistence, open_backend};
//!
//! let config = CacheConfig::default();
//! let cache = open_backend(BackendKind::Sqlite, &config);
//! cache.set("flags", "my-boolean-flag", "true");
//! assert_eq!(cache.read("flags", "my-boolean-flag").as_deref(), Some("true"));
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export storage types
pub use storage::{
    BackendKind, CacheConfig, DEFAULT_CACHE_NAME, FileStore, Persistence, SqliteStore, Store,
    open_backend, open_store,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
