//! SQLite persistence layer for the car-rental inventory.
//!
//! Provides the car data model, store configuration, schema creation,
//! and the `CarStore` record store backed by SQLite (via rusqlite with
//! bundled feature).

pub mod config;
pub mod schema;
pub mod store;
pub mod types;

pub use config::{ConfigError, StoreConfig};
pub use schema::{open_database, SchemaError};
pub use store::{CarStore, StoreError};
pub use types::{Car, CarId, NewCar};
