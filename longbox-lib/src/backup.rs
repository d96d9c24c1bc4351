//! Pre-mutation safety copy of the database file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RunError;

/// Scoped acquisition of the database file.
///
/// Acquired before any other component touches the database; if the copy
/// cannot be written the run aborts before anything mutates. With no
/// backup directory configured the guard is a no-op — the operator has
/// implicitly accepted the risk. Release is a no-op: the copy stays.
#[derive(Debug)]
pub struct BackupGuard {
    /// Where the safety copy landed, if one was requested.
    pub path: Option<PathBuf>,
}

impl BackupGuard {
    pub fn acquire(source: &Path, backup_dir: Option<&Path>) -> Result<Self, RunError> {
        let Some(dir) = backup_dir else {
            return Ok(Self { path: None });
        };
        let stamp = chrono::Local::now().format("%Y-%m-%d(%H_%M_%S)");
        let target = dir.join(format!("{stamp}.sqlite"));
        fs::copy(source, &target)
            .map_err(|e| RunError::BackupWriteFailed(format!("{}: {e}", target.display())))?;
        log::info!("Database backed up to {}", target.display());
        Ok(Self { path: Some(target) })
    }
}
