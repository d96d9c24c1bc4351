use std::path::PathBuf;

/// Errors that can occur while talking to the library database.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Row not found: {entity} with id '{id}'")]
    NotFound { entity: String, id: String },
}
