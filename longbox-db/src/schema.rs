//! Opening the library database, and schema creation for tests.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::DbError;

/// Open an existing library database read-write.
///
/// The schema belongs to the external library application, so the file is
/// never created here: a missing path is an error, not an empty database.
pub fn open_database(path: &Path) -> Result<Connection, DbError> {
    if !path.is_file() {
        return Err(DbError::Missing(path.to_path_buf()));
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Open an in-memory database with the library schema. Useful for testing.
pub fn open_memory() -> Result<Connection, DbError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Create the subset of the library application's tables this tool touches.
///
/// Test/fixture use only — production databases already carry the schema.
/// Idempotent, safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- A series groups the books of one title; one-shots are single-book series
CREATE TABLE IF NOT EXISTS series (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    oneshot BOOLEAN NOT NULL DEFAULT 0
);

-- The title column is what the library application matches reading lists against
CREATE TABLE IF NOT EXISTS series_metadata (
    series_id TEXT NOT NULL PRIMARY KEY REFERENCES series(id),
    title TEXT,
    title_lock BOOLEAN NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS book (
    id TEXT PRIMARY KEY,
    series_id TEXT NOT NULL REFERENCES series(id),
    url TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_book_series ON book(series_id);

CREATE TABLE IF NOT EXISTS book_metadata (
    book_id TEXT NOT NULL PRIMARY KEY REFERENCES book(id),
    number TEXT,
    release_date TEXT
);
"#;
