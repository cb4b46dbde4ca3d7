//! The car record store.
//!
//! Every operation opens its own session, runs exactly one parameterized
//! statement, and drops the session before returning, on error paths too.
//! There is no pooling and no multi-statement transaction.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use thiserror::Error;

use crate::config::{ConfigError, StoreConfig};
use crate::schema::{self, SchemaError};
use crate::types::{Car, CarId, NewCar};

/// How long a session waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_CAR: &str = "SELECT id, make, model, year, rate_per_day, available FROM cars";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid database configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Cannot create database directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Cannot open database at {}: {source}", .path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Durable CRUD access to the `cars` table.
///
/// Holds only the resolved database path, so clones are cheap and can be
/// moved into worker threads.
#[derive(Debug, Clone)]
pub struct CarStore {
    path: PathBuf,
}

impl CarStore {
    /// Validate `config`, create the database and schema if needed, and
    /// return a store for it.
    ///
    /// This is the startup connectivity probe: failures here mean the
    /// inventory cannot be used at all.
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let path = config.database_path()?;
        if config.has_credentials() {
            log::warn!("Ignoring database user/password: SQLite does not use credentials");
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = schema::open_database(&path)?;
        drop(conn);

        log::info!("Using inventory database {}", path.display());
        Ok(Self { path })
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh session. The file must already exist.
    fn session(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StoreError::Connect {
            path: self.path.clone(),
            source,
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// All cars, ordered by id ascending.
    pub fn list(&self) -> Result<Vec<Car>, StoreError> {
        let conn = self.session()?;
        let mut stmt = conn.prepare(&format!("{SELECT_CAR} ORDER BY id"))?;
        let cars = stmt
            .query_map([], row_to_car)?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("Listed {} cars", cars.len());
        Ok(cars)
    }

    /// Look up a single car by id.
    pub fn find(&self, id: CarId) -> Result<Option<Car>, StoreError> {
        let conn = self.session()?;
        let car = conn
            .query_row(&format!("{SELECT_CAR} WHERE id = ?1"), params![id], row_to_car)
            .optional()?;
        Ok(car)
    }

    /// Insert a car and return it with the id the database generated.
    pub fn create(&self, car: &NewCar) -> Result<Car, StoreError> {
        let conn = self.session()?;
        conn.execute(
            "INSERT INTO cars (make, model, year, rate_per_day, available)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![car.make, car.model, car.year, car.rate_per_day, car.available],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("Created car {} ({} {})", id, car.make, car.model);
        Ok(car.clone().with_id(id))
    }

    /// Replace every non-id field of the row matching `car.id`.
    ///
    /// Returns `Ok(false)` if no row has that id.
    pub fn update(&self, car: &Car) -> Result<bool, StoreError> {
        let conn = self.session()?;
        let changed = conn.execute(
            "UPDATE cars SET make = ?1, model = ?2, year = ?3, rate_per_day = ?4, available = ?5
             WHERE id = ?6",
            params![
                car.make,
                car.model,
                car.year,
                car.rate_per_day,
                car.available,
                car.id,
            ],
        )?;
        log::debug!("Updated car {}: {} row(s)", car.id, changed);
        Ok(changed > 0)
    }

    /// Remove the row matching `id`. Returns `Ok(false)` if there was none.
    pub fn delete(&self, id: CarId) -> Result<bool, StoreError> {
        let conn = self.session()?;
        let changed = conn.execute("DELETE FROM cars WHERE id = ?1", params![id])?;
        log::debug!("Deleted car {}: {} row(s)", id, changed);
        Ok(changed > 0)
    }

    /// Rent (`false`) or return (`true`) a car. Touches only `available`.
    ///
    /// Returns `Ok(false)` if no row has that id.
    pub fn set_availability(&self, id: CarId, available: bool) -> Result<bool, StoreError> {
        let conn = self.session()?;
        let changed = conn.execute(
            "UPDATE cars SET available = ?1 WHERE id = ?2",
            params![available, id],
        )?;
        log::debug!("Set car {} available={}: {} row(s)", id, available, changed);
        Ok(changed > 0)
    }
}

fn row_to_car(row: &Row<'_>) -> rusqlite::Result<Car> {
    Ok(Car {
        id: row.get(0)?,
        make: row.get(1)?,
        model: row.get(2)?,
        year: row.get(3)?,
        rate_per_day: row.get(4)?,
        available: row.get(5)?,
    })
}
