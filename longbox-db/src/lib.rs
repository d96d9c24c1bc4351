//! SQLite access to the comic library database.
//!
//! The schema is owned by the external library application; this crate
//! only reads candidate rows and applies single-row title updates. Schema
//! creation exists solely so tests can fabricate a database.

pub mod error;
pub mod operations;
pub mod records;
pub mod schema;

pub use error::DbError;
pub use operations::update_series_title;
pub use records::{SeriesRecord, list_oneshot_series, list_series};
pub use schema::{create_schema, open_database, open_memory};

pub use rusqlite::Connection;
