//! Candidate row queries for the correction run.

use rusqlite::{Connection, Row, params};

use crate::error::DbError;

/// One library entry, joined across the series/metadata/book tables.
///
/// `title` is the field the external matcher reads; `url` and `number`
/// come from the first book of the series (one-shots have exactly one).
#[derive(Debug, Clone)]
pub struct SeriesRecord {
    pub id: String,
    pub name: String,
    pub title: Option<String>,
    pub title_lock: bool,
    pub oneshot: bool,
    pub number: Option<String>,
    pub url: Option<String>,
}

const SELECT_RECORD: &str = "SELECT s.id, s.name, m.title, m.title_lock, s.oneshot,
        bm.number, b.url
 FROM series s
 LEFT JOIN series_metadata m ON m.series_id = s.id
 LEFT JOIN book b ON b.id =
     (SELECT id FROM book WHERE series_id = s.id ORDER BY id LIMIT 1)
 LEFT JOIN book_metadata bm ON bm.book_id = b.id";

/// List every series in the database, ordered by name.
pub fn list_series(conn: &Connection) -> Result<Vec<SeriesRecord>, DbError> {
    let mut stmt = conn.prepare(&format!("{SELECT_RECORD} ORDER BY s.name"))?;
    let rows = stmt.query_map([], row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List only the one-shot series, ordered by name.
pub fn list_oneshot_series(conn: &Connection) -> Result<Vec<SeriesRecord>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_RECORD} WHERE s.oneshot = ?1 ORDER BY s.name"
    ))?;
    let rows = stmt.query_map(params![true], row_to_record)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<SeriesRecord> {
    Ok(SeriesRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        title: row.get(2)?,
        title_lock: row.get::<_, Option<bool>>(3)?.unwrap_or(false),
        oneshot: row.get(4)?,
        number: row.get(5)?,
        url: row.get(6)?,
    })
}
