//! Interactive confirmation backed by stdin.

use std::io::Write;

use longbox_lib::{ConfirmationGate, CorrectionProposal};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Gate that asks the operator about every proposal with a synchronous
/// [y/N] prompt. Anything but an explicit yes declines.
pub(crate) struct PromptGate;

impl ConfirmationGate for PromptGate {
    fn approve(&mut self, proposal: &CorrectionProposal) -> bool {
        print!(
            "  {} {} [y/N] ",
            "Apply?".if_supports_color(Stdout, |t| t.bold()),
            proposal,
        );
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        input.trim().eq_ignore_ascii_case("y")
    }
}
