use std::path::PathBuf;

use longbox_lib::{RunOptions, correct_archives};

use super::{fail, make_gate, print_summary};
use crate::cli_types::ApplyArgs;

/// Run the `archives` command.
pub(crate) fn run_archives(dir: PathBuf, apply: &ApplyArgs) {
    let options = RunOptions {
        dry_run: apply.dry_run,
        ..Default::default()
    };
    let mut gate = make_gate(apply.yes);

    log::info!("Correcting one-shot archives under {}", dir.display());
    match correct_archives(&dir, &options, gate.as_mut()) {
        Ok(summary) => print_summary(&summary, apply.dry_run),
        Err(e) => fail(&e),
    }
}
