pub(crate) mod archives;
pub(crate) mod database;
pub(crate) mod remote;

use longbox_lib::{AcceptAll, ConfirmationGate, RunError, RunSummary};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::gate::PromptGate;

/// Pick the confirmation gate from the accept-all flag.
pub(crate) fn make_gate(yes: bool) -> Box<dyn ConfirmationGate> {
    if yes {
        Box::new(AcceptAll)
    } else {
        Box::new(PromptGate)
    }
}

/// Print the run counts. Every completed run reports these, whether or
/// not anything was applied.
pub(crate) fn print_summary(summary: &RunSummary, dry_run: bool) {
    log::info!("");
    if dry_run {
        log::info!(
            "{}",
            "Dry run: no changes made.".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Proposed:    {:>6}", summary.proposed);
    log::info!("  Confirmed:   {:>6}", summary.confirmed);
    log::info!("  Applied:     {:>6}", summary.applied);
    log::info!("  Rejected:    {:>6}", summary.rejected);
    log::info!("  Unreadable:  {:>6}", summary.skipped_unreadable);
    if summary.skipped_locked > 0 {
        log::info!("  Locked:      {:>6}", summary.skipped_locked);
    }
    for error in &summary.errors {
        log::warn!(
            "  {} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            error,
        );
    }
}

/// Report which phase aborted and why, then exit non-zero.
pub(crate) fn fail(err: &RunError) -> ! {
    log::error!("{} failed: {err}", err.phase());
    std::process::exit(1);
}
