//! Metadata reconciliation engine for comic libraries.
//!
//! Reading lists name a series one way, cataloging sources another, and
//! the library database a third. This crate decides which stored fields
//! must be rewritten so the library application's matcher treats them as
//! the same record, and applies those rewrites safely: dry-run, backup
//! before mutation, operator confirmation, path remapping for
//! containerized hosts.
//!
//! The engine itself ([`normalize`], [`propose`]) is pure — it only ever
//! returns proposals. All I/O lives in [`driver`], which walks
//! `Loading → Proposing → Confirming → Applying → Reporting` per run.

pub mod backup;
pub mod confirm;
pub mod driver;
pub mod error;
pub mod normalize;
pub mod propose;
pub mod remap;

pub use backup::BackupGuard;
pub use confirm::{AcceptAll, ConfirmationGate};
pub use driver::{RunOptions, RunSummary, correct_archives, correct_database};
pub use error::RunError;
pub use normalize::{canonical_number, canonical_series};
pub use propose::{ComicField, CorrectionProposal, Target};
pub use remap::{PathMapping, decode_book_url};
