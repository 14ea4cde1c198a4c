//! Database schema definitions.
//!
//! SQL for the single `storage` relation used by the SQLite backend.

/// SQL schema for initial database setup.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS storage (
    namespace TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT,
    PRIMARY KEY (namespace, key)
);
";

/// Insert-or-update on the composite key, as one statement.
pub const UPSERT_SQL: &str = r"
INSERT INTO storage (namespace, key, value) VALUES (?1, ?2, ?3)
ON CONFLICT(namespace, key) DO UPDATE SET value = excluded.value
";

/// Deletes at most one row.
pub const DELETE_SQL: &str = r"
DELETE FROM storage WHERE namespace = ?1 AND key = ?2
";

/// Looks up one value.
pub const SELECT_SQL: &str = r"
SELECT value FROM storage WHERE namespace = ?1 AND key = ?2
";
