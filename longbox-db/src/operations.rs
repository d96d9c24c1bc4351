//! Write operations, all scoped to a single row by primary key.

use rusqlite::{Connection, params};

use crate::error::DbError;

/// Update the matched title of one series.
///
/// The update is keyed by series id, never by name, so two series that
/// happen to share a name cannot be changed together.
pub fn update_series_title(
    conn: &Connection,
    series_id: &str,
    title: &str,
) -> Result<(), DbError> {
    let changed = conn.execute(
        "UPDATE series_metadata SET title = ?2 WHERE series_id = ?1",
        params![series_id, title],
    )?;
    if changed == 0 {
        return Err(DbError::NotFound {
            entity: "series_metadata".to_string(),
            id: series_id.to_string(),
        });
    }
    Ok(())
}
