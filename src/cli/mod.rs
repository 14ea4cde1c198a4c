//! CLI layer for flag-cache.
//!
//! Provides the command-line interface using clap, with commands for
//! reading, writing, and locating cache entries.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
