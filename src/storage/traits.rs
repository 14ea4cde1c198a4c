//! Persistence contract and the fallible store seam.
//!
//! [`Persistence`] is what the SDK sees: three operations that never fail.
//! Backends implement [`Store`] instead, and the blanket impl below turns
//! every store into a persistence by logging and absorbing its errors.

use crate::error::Result;
use tracing::warn;

/// Infallible key-value persistence for SDK cache state.
///
/// Entries are identified by `(namespace, key)`. Failures are reported
/// through `tracing` and otherwise behave as if nothing was stored.
pub trait Persistence: Send + Sync {
    /// Stores `value` under `(namespace, key)`, replacing any existing value.
    fn set(&self, namespace: &str, key: &str, value: &str);

    /// Deletes the entry for `(namespace, key)` if it exists.
    fn remove(&self, namespace: &str, key: &str);

    /// Returns the value stored under `(namespace, key)`.
    ///
    /// `None` means no entry exists; an empty value is `Some("")`.
    fn read(&self, namespace: &str, key: &str) -> Option<String>;
}

/// Fallible storage backend.
///
/// Same operations as [`Persistence`], but errors are returned so tests and
/// tooling can observe them.
pub trait Store: Send + Sync {
    /// Upserts `value` under `(namespace, key)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be completed. The previous value,
    /// if any, is left intact.
    fn try_set(&self, namespace: &str, key: &str, value: &str) -> Result<()>;

    /// Deletes the entry for `(namespace, key)`. Removing a missing entry
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn try_remove(&self, namespace: &str, key: &str) -> Result<()>;

    /// Looks up the value for `(namespace, key)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails for a reason other than the
    /// entry being absent.
    fn try_read(&self, namespace: &str, key: &str) -> Result<Option<String>>;
}

impl<T: Store + ?Sized> Persistence for T {
    fn set(&self, namespace: &str, key: &str, value: &str) {
        if let Err(error) = self.try_set(namespace, key, value) {
            warn!(target: "flag_cache::storage", op = "set", namespace, key, %error, "write dropped");
        }
    }

    fn remove(&self, namespace: &str, key: &str) {
        if let Err(error) = self.try_remove(namespace, key) {
            warn!(target: "flag_cache::storage", op = "remove", namespace, key, %error, "remove dropped");
        }
    }

    fn read(&self, namespace: &str, key: &str) -> Option<String> {
        match self.try_read(namespace, key) {
            Ok(value) => value,
            Err(error) => {
                warn!(target: "flag_cache::storage", op = "read", namespace, key, %error, "read treated as absent");
                None
            }
        }
    }
}
