//! Operator approval of individual corrections.

use crate::propose::CorrectionProposal;

/// Capability for approving or rejecting a single proposal.
///
/// The driver consults the gate once per proposal, strictly in order; a
/// rejection drops that proposal only, never the run. Implementations may
/// block on operator input.
pub trait ConfirmationGate {
    fn approve(&mut self, proposal: &CorrectionProposal) -> bool;
}

/// The accept-all gate: approves everything without asking.
pub struct AcceptAll;

impl ConfirmationGate for AcceptAll {
    fn approve(&mut self, _proposal: &CorrectionProposal) -> bool {
        true
    }
}
