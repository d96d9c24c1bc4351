use longbox_db::DbError;

/// Errors that abort a correction run.
///
/// Per-record conditions — an unreadable payload, a failed archive
/// write — are deliberately not here: they are accumulated in the run
/// summary and reported at the end.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Backup write failed: {0}")]
    BackupWriteFailed(String),

    #[error("Database update failed for series '{id}': {source}")]
    ApplyFailed {
        id: String,
        #[source]
        source: DbError,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Db(#[from] DbError),
}

impl RunError {
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The run phase this error aborted, for operator-facing reporting.
    pub fn phase(&self) -> &'static str {
        match self {
            Self::SourceUnavailable(_) | Self::Db(_) => "loading",
            Self::BackupWriteFailed(_) => "backup",
            Self::ApplyFailed { .. } => "applying",
            Self::Config(_) => "configuration",
        }
    }
}
