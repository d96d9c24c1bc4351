use std::path::PathBuf;

use longbox_lib::{PathMapping, RunOptions, correct_database};

use super::{fail, make_gate, print_summary};
use crate::cli_types::ApplyArgs;

/// Run the `database` command.
pub(crate) fn run_database(
    db_path: PathBuf,
    backup: Option<PathBuf>,
    oneshots: bool,
    remap: Option<String>,
    apply: &ApplyArgs,
) {
    // malformed remap strings abort before any I/O
    let mapping = match remap.as_deref().map(PathMapping::parse).transpose() {
        Ok(mapping) => mapping,
        Err(e) => fail(&e),
    };

    let options = RunOptions {
        dry_run: apply.dry_run,
        backup_dir: backup,
        mapping,
        fix_archives: oneshots,
    };
    let mut gate = make_gate(apply.yes);

    log::info!("Correcting library database: {}", db_path.display());
    match correct_database(&db_path, &options, gate.as_mut()) {
        Ok(summary) => print_summary(&summary, apply.dry_run),
        Err(e) => fail(&e),
    }
}
