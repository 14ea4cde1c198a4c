//! CLI command implementations.
//!
//! Commands go through the fallible [`Store`](crate::storage::Store) seam
//! so an operator sees why a write or read failed. The SDK only ever gets
//! the silent [`Persistence`](crate::storage::Persistence) contract.

use crate::cli::output::{OutputFormat, format_path, format_remove, format_set, format_value};
use crate::cli::parser::{Cli, Commands};
use crate::error::{CommandError, Result};
use crate::storage::{BackendKind, CacheConfig, open_store};
use std::io::{self, Read};
use tracing::debug;

/// Executes the CLI command.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, the operation fails, or
/// `get` finds no entry.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = cli.cache_config()?;
    debug!(backend = %cli.backend, location = %cli.backend.location(&config).display(), "resolved cache location");

    match &cli.command {
        Commands::Set {
            namespace,
            key,
            value,
        } => cmd_set(cli.backend, &config, namespace, key, value.as_deref(), format),
        Commands::Get { namespace, key } => cmd_get(cli.backend, &config, namespace, key, format),
        Commands::Remove { namespace, key } => {
            cmd_remove(cli.backend, &config, namespace, key, format)
        }
        Commands::Path => Ok(format_path(
            cli.backend,
            &cli.backend.location(&config),
            format,
        )),
    }
}

/// Rejects identifiers the backends cannot key on.
fn validate_entry(namespace: &str, key: &str) -> Result<()> {
    if namespace.is_empty() || key.is_empty() {
        return Err(CommandError::InvalidArgument(
            "namespace and key must not be empty".to_string(),
        )
        .into());
    }
    Ok(())
}

// ==================== Command Implementations ====================

fn cmd_set(
    backend: BackendKind,
    config: &CacheConfig,
    namespace: &str,
    key: &str,
    value: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    validate_entry(namespace, key)?;

    // Read value from stdin if not provided
    let value = if let Some(v) = value {
        v.to_string()
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to read from stdin: {e}"))
        })?;
        buffer
    };

    let store = open_store(backend, config)?;
    store.try_set(namespace, key, &value)?;

    Ok(format_set(namespace, key, value.len(), format))
}

fn cmd_get(
    backend: BackendKind,
    config: &CacheConfig,
    namespace: &str,
    key: &str,
    format: OutputFormat,
) -> Result<String> {
    validate_entry(namespace, key)?;

    let store = open_store(backend, config)?;
    match store.try_read(namespace, key)? {
        Some(value) => Ok(format_value(namespace, key, &value, format)),
        None => Err(CommandError::NotFound {
            namespace: namespace.to_string(),
            key: key.to_string(),
        }
        .into()),
    }
}

fn cmd_remove(
    backend: BackendKind,
    config: &CacheConfig,
    namespace: &str,
    key: &str,
    format: OutputFormat,
) -> Result<String> {
    validate_entry(namespace, key)?;

    let store = open_store(backend, config)?;
    store.try_remove(namespace, key)?;

    Ok(format_remove(namespace, key, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;
    use test_case::test_case;

    fn setup() -> (TempDir, CacheConfig) {
        let temp_dir = TempDir::new().unwrap();
        let config =
            CacheConfig::new(temp_dir.path()).with_cache_dir(Some(temp_dir.path().join("cache")));
        (temp_dir, config)
    }

    #[test_case(BackendKind::Sqlite ; "sqlite")]
    #[test_case(BackendKind::File ; "file")]
    fn test_set_get_remove(backend: BackendKind) {
        let (_temp_dir, config) = setup();

        let result = cmd_set(
            backend,
            &config,
            "flags",
            "my-boolean-flag",
            Some("true"),
            OutputFormat::Text,
        );
        assert!(result.unwrap().contains("flags/my-boolean-flag"));

        let result = cmd_get(backend, &config, "flags", "my-boolean-flag", OutputFormat::Text);
        assert_eq!(result.unwrap(), "true");

        let result = cmd_remove(backend, &config, "flags", "my-boolean-flag", OutputFormat::Text);
        assert!(result.is_ok());

        let result = cmd_get(backend, &config, "flags", "my-boolean-flag", OutputFormat::Text);
        assert!(matches!(
            result,
            Err(Error::Command(CommandError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let (_temp_dir, config) = setup();
        let result = cmd_remove(BackendKind::File, &config, "flags", "nope", OutputFormat::Text);
        assert!(result.is_ok());
    }

    #[test]
    fn test_empty_key_rejected() {
        let (_temp_dir, config) = setup();
        let result = cmd_get(BackendKind::Sqlite, &config, "flags", "", OutputFormat::Text);
        assert!(matches!(
            result,
            Err(Error::Command(CommandError::InvalidArgument(_)))
        ));
    }

    #[test]
    fn test_unusable_location_reports_error() {
        let (temp_dir, _) = setup();
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let config = CacheConfig::new(temp_dir.path()).with_cache_dir(Some(blocker));

        let result = cmd_set(
            BackendKind::Sqlite,
            &config,
            "flags",
            "k",
            Some("v"),
            OutputFormat::Text,
        );
        assert!(result.is_err());
    }
}
