//! Storage layer for driver records.
//!
//! This module provides `SQLite`-based persistent storage for drivers and
//! their status history. [`DriverStore`] also implements
//! [`DataProvider`], so screens can read from it directly.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::driver::{Driver, DriverStatus, StatusUpdate};
use crate::error::{Error, Result};
use crate::metrics::MetricsSnapshot;
use crate::provider::DataProvider;

/// One recorded status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    /// Row id.
    pub id: i64,
    /// Driver the change applies to.
    pub driver_id: i64,
    /// Status before the change.
    pub from_status: String,
    /// Status after the change.
    pub to_status: String,
    /// Short reason.
    pub reason_title: String,
    /// Detailed reason.
    pub reason_description: String,
    /// When the change was recorded.
    pub changed_at: DateTime<Utc>,
}

/// Persistent driver store.
#[derive(Debug)]
pub struct DriverStore {
    path: PathBuf,
    conn: Connection,
}

impl DriverStore {
    /// Open or create a store at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new driver and return its id.
    ///
    /// Any `driver_id` on the record is ignored. A blank status becomes
    /// "New Joining".
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn insert(&self, driver: &Driver) -> Result<i64> {
        let mut driver = driver.clone();
        driver.driver_id = None;
        if driver.status.trim().is_empty() {
            driver.status = DriverStatus::NewJoining.label().to_string();
        }

        let (record, hash) = encode(&driver)?;
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            r"
            INSERT INTO drivers (driver_name, status, record, record_hash, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            ",
            params![driver.driver_name, driver.status, record, hash, now],
        )?;

        let id = self.conn.last_insert_rowid();
        info!("Added driver {} ({})", id, driver.display_name());
        Ok(id)
    }

    /// Insert several drivers in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case.
    pub fn insert_many(&self, drivers: &[Driver]) -> Result<Vec<i64>> {
        let tx = self.conn.unchecked_transaction()?;
        let ids = drivers
            .iter()
            .map(|d| self.insert(d))
            .collect::<Result<Vec<_>>>()?;
        tx.commit()?;
        Ok(ids)
    }

    /// Replace a stored driver with `driver`.
    ///
    /// Returns `false` if the stored record was already identical.
    ///
    /// # Errors
    ///
    /// Returns an error if `driver` has no id, no driver has that id, or the
    /// database operation fails.
    pub fn update(&self, driver: &Driver) -> Result<bool> {
        let id = driver
            .driver_id
            .ok_or_else(|| Error::invalid_argument("cannot update a driver without an id"))?;

        let mut driver = driver.clone();
        driver.driver_id = None;
        let (record, hash) = encode(&driver)?;

        let current: Option<String> = self
            .conn
            .query_row(
                "SELECT record_hash FROM drivers WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        match current {
            None => return Err(Error::DriverNotFound { id }),
            Some(existing) if existing == hash => {
                debug!("Driver {} unchanged, skipping update", id);
                return Ok(false);
            }
            Some(_) => {}
        }

        self.conn.execute(
            r"
            UPDATE drivers
            SET driver_name = ?1, status = ?2, record = ?3, record_hash = ?4, updated_at = ?5
            WHERE id = ?6
            ",
            params![
                driver.driver_name,
                driver.status,
                record,
                hash,
                Utc::now().to_rfc3339(),
                id
            ],
        )?;
        info!("Updated driver {}", id);
        Ok(true)
    }

    /// Get a driver by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, id: i64) -> Result<Option<Driver>> {
        let result = self
            .conn
            .query_row(
                "SELECT id, status, record FROM drivers WHERE id = ?1",
                [id],
                Self::row_to_driver,
            )
            .optional()?;
        Ok(result)
    }

    /// All drivers in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list(&self) -> Result<Vec<Driver>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, status, record FROM drivers ORDER BY id ASC")?;
        let drivers = stmt
            .query_map([], Self::row_to_driver)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(drivers)
    }

    /// Count stored drivers.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM drivers", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a driver and its status history.
    ///
    /// Returns `true` if a driver was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM status_changes WHERE driver_id = ?1", [id])?;
        let affected = tx.execute("DELETE FROM drivers WHERE id = ?1", [id])?;
        tx.commit()?;

        if affected > 0 {
            info!("Deleted driver {}", id);
        }
        Ok(affected > 0)
    }

    /// Change a driver's status and record the reason.
    ///
    /// # Errors
    ///
    /// Fails for unknown statuses, blank reasons, a missing driver, or a
    /// database failure.
    pub fn update_status(&self, id: i64, update: &StatusUpdate) -> Result<StatusChange> {
        let status: DriverStatus = update.status.parse()?;
        if update.reason_title.trim().is_empty() || update.reason_description.trim().is_empty() {
            return Err(Error::invalid_argument(
                "a status change needs a reason title and description",
            ));
        }

        let mut driver = self.get(id)?.ok_or(Error::DriverNotFound { id })?;
        let from_status = std::mem::replace(&mut driver.status, status.label().to_string());
        driver.driver_id = None;
        let (record, hash) = encode(&driver)?;
        let now = Utc::now();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            r"
            UPDATE drivers SET status = ?1, record = ?2, record_hash = ?3, updated_at = ?4
            WHERE id = ?5
            ",
            params![driver.status, record, hash, now.to_rfc3339(), id],
        )?;
        tx.execute(
            r"
            INSERT INTO status_changes
                (driver_id, from_status, to_status, reason_title, reason_description, changed_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                id,
                from_status,
                driver.status,
                update.reason_title.trim(),
                update.reason_description.trim(),
                now.to_rfc3339()
            ],
        )?;
        let change_id = tx.last_insert_rowid();
        tx.commit()?;

        info!("Driver {} status {} -> {}", id, from_status, status);
        Ok(StatusChange {
            id: change_id,
            driver_id: id,
            from_status,
            to_status: driver.status,
            reason_title: update.reason_title.trim().to_string(),
            reason_description: update.reason_description.trim().to_string(),
            changed_at: now,
        })
    }

    /// Status changes of a driver, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn status_history(&self, id: i64) -> Result<Vec<StatusChange>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, driver_id, from_status, to_status, reason_title, reason_description, changed_at
            FROM status_changes WHERE driver_id = ?1 ORDER BY id ASC
            ",
        )?;
        let history = stmt
            .query_map([id], Self::row_to_status_change)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(history)
    }

    /// Most recent status change of a driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn latest_status_change(&self, id: i64) -> Result<Option<StatusChange>> {
        let change = self
            .conn
            .query_row(
                r"
                SELECT id, driver_id, from_status, to_status, reason_title, reason_description, changed_at
                FROM status_changes WHERE driver_id = ?1 ORDER BY id DESC LIMIT 1
                ",
                [id],
                Self::row_to_status_change,
            )
            .optional()?;
        Ok(change)
    }

    /// Counters derived from current statuses and the change history.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn metrics(&self) -> Result<MetricsSnapshot> {
        let mut snapshot = MetricsSnapshot::default();

        let mut stmt = self
            .conn
            .prepare("SELECT status, COUNT(*) FROM drivers GROUP BY status")?;
        let counts = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for (status, count) in counts {
            let count = u64::try_from(count).unwrap_or(0);
            snapshot.total_drivers += count;
            match status.parse::<DriverStatus>() {
                Ok(DriverStatus::NewJoining) => snapshot.new_joinings += count,
                Ok(DriverStatus::Warning) => snapshot.on_warning += count,
                Ok(DriverStatus::OnLeave) => snapshot.on_leave += count,
                Ok(DriverStatus::Terminated) => snapshot.on_termination += count,
                Ok(DriverStatus::Suspended) => snapshot.on_suspension += count,
                Ok(DriverStatus::Active | DriverStatus::Inactive) => {}
                Err(_) => warn!("Ignoring unknown status '{}' in metrics", status),
            }
        }

        let mut stmt = self
            .conn
            .prepare("SELECT to_status, COUNT(*) FROM status_changes GROUP BY to_status")?;
        let changes = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        snapshot.total_incidents = changes
            .into_iter()
            .filter(|(status, _)| status.parse::<DriverStatus>().is_ok_and(DriverStatus::is_incident))
            .map(|(_, count)| u64::try_from(count).unwrap_or(0))
            .sum();

        Ok(snapshot)
    }

    fn row_to_driver(row: &rusqlite::Row) -> rusqlite::Result<Driver> {
        let id: i64 = row.get(0)?;
        let status: String = row.get(1)?;
        let record: String = row.get(2)?;

        let mut driver: Driver = serde_json::from_str(&record)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
        driver.driver_id = Some(id);
        driver.status = status;
        Ok(driver)
    }

    fn row_to_status_change(row: &rusqlite::Row) -> rusqlite::Result<StatusChange> {
        let changed_at_str: String = row.get(6)?;
        let changed_at = DateTime::parse_from_rfc3339(&changed_at_str)
            .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

        Ok(StatusChange {
            id: row.get(0)?,
            driver_id: row.get(1)?,
            from_status: row.get(2)?,
            to_status: row.get(3)?,
            reason_title: row.get(4)?,
            reason_description: row.get(5)?,
            changed_at,
        })
    }
}

/// Serialize a record and hash the serialized form.
fn encode(driver: &Driver) -> Result<(String, String)> {
    let record = serde_json::to_string(driver)?;
    let hash = blake3::hash(record.as_bytes()).to_hex().to_string();
    Ok((record, hash))
}

impl DataProvider for DriverStore {
    fn drivers(&self) -> Result<Vec<Driver>> {
        self.list()
    }

    fn metrics(&self) -> Result<MetricsSnapshot> {
        DriverStore::metrics(self)
    }

    fn driver(&self, id: i64) -> Result<Driver> {
        self.get(id)?.ok_or(Error::DriverNotFound { id })
    }
}
