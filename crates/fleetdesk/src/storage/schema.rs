//! `SQLite` schema definitions for the driver store.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the drivers table.
///
/// The full record is kept as JSON in `record`; `driver_name` and `status`
/// are copied out for indexing.
pub const CREATE_DRIVERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS drivers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    driver_name TEXT NOT NULL,
    status TEXT NOT NULL,
    record TEXT NOT NULL,
    record_hash TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create an index on status for filtering and metrics.
pub const CREATE_STATUS_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_drivers_status ON drivers(status)
";

/// SQL statement to create an index on `driver_name` for lookups.
pub const CREATE_NAME_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_drivers_name ON drivers(driver_name)
";

/// SQL statement to create the status change history table.
pub const CREATE_STATUS_CHANGES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS status_changes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    driver_id INTEGER NOT NULL,
    from_status TEXT NOT NULL,
    to_status TEXT NOT NULL,
    reason_title TEXT NOT NULL,
    reason_description TEXT NOT NULL,
    changed_at TEXT NOT NULL
)
";

/// SQL statement to create an index on `driver_id` for history lookups.
pub const CREATE_STATUS_DRIVER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_status_changes_driver ON status_changes(driver_id)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_DRIVERS_TABLE,
    CREATE_STATUS_INDEX,
    CREATE_NAME_INDEX,
    CREATE_STATUS_CHANGES_TABLE,
    CREATE_STATUS_DRIVER_INDEX,
    CREATE_METADATA_TABLE,
];
