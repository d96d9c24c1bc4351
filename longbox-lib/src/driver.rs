//! The mutation driver.
//!
//! One run walks `Loading → Proposing → Confirming → Applying →
//! Reporting`, strictly single-threaded: the confirmation gate may block
//! on operator input between proposals, and interleaving would make
//! dry-run output impossible to audit. Candidates come either from the
//! library database or from a directory scan of one-shot archives.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use longbox_archive::{ArchiveError, ComicInfoSheet, FieldEdit};
use longbox_db::{Connection, SeriesRecord};

use crate::backup::BackupGuard;
use crate::confirm::ConfirmationGate;
use crate::error::RunError;
use crate::normalize::canonical_series;
use crate::propose::{CorrectionProposal, Target, propose_series_title, propose_sheet};
use crate::remap::{PathMapping, decode_book_url};

/// Configuration for one correction run, parsed once at startup and
/// passed by reference — the driver is the only stateful component.
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Propose and confirm, but never write.
    pub dry_run: bool,
    /// Copy the database here before mutating. `None` skips the backup.
    pub backup_dir: Option<PathBuf>,
    /// Prefix substitution for database-recorded paths.
    pub mapping: Option<PathMapping>,
    /// Also rewrite the embedded metadata of one-shot archives.
    pub fix_archives: bool,
}

/// Counts reported at the end of every run, applied or not.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub proposed: usize,
    pub confirmed: usize,
    pub applied: usize,
    pub rejected: usize,
    pub skipped_unreadable: usize,
    pub skipped_locked: usize,
    /// Per-archive apply failures: reported, never fatal.
    pub errors: Vec<String>,
}

/// Aggregated proposals, deduplicated by target.
///
/// The same physical file can surface twice (symlinked library folders);
/// the last-seen proposal wins, and insertion order is kept so
/// confirmation prompts are deterministic.
#[derive(Default)]
struct ProposalSet {
    order: Vec<String>,
    by_key: HashMap<String, CorrectionProposal>,
}

impl ProposalSet {
    fn insert(&mut self, proposal: CorrectionProposal) {
        let key = proposal.target.key();
        if !self.by_key.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.by_key.insert(key, proposal);
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn into_proposals(mut self) -> Vec<CorrectionProposal> {
        self.order
            .iter()
            .filter_map(|key| self.by_key.remove(key))
            .collect()
    }
}

/// Correct the library database, and optionally the one-shot archives it
/// points at.
pub fn correct_database(
    db_path: &Path,
    options: &RunOptions,
    gate: &mut dyn ConfirmationGate,
) -> Result<RunSummary, RunError> {
    // Loading
    if !db_path.is_file() {
        return Err(RunError::source_unavailable(format!(
            "database file {} does not exist",
            db_path.display()
        )));
    }
    let _backup = BackupGuard::acquire(db_path, options.backup_dir.as_deref())?;
    let conn = longbox_db::open_database(db_path)?;
    let records = longbox_db::list_series(&conn)?;
    log::debug!("Loaded {} series records", records.len());

    let mut summary = RunSummary::default();
    let mut proposals = ProposalSet::default();

    // Proposing
    for record in &records {
        if record.title_lock {
            log::debug!("{} is locked by the operator, skipping", record.name);
            summary.skipped_locked += 1;
            continue;
        }
        if let Some(proposal) = propose_series_title(record) {
            proposals.insert(proposal);
        }
        if options.fix_archives && record.oneshot {
            propose_archive_for_record(record, options, &mut proposals, &mut summary);
        }
    }
    summary.proposed = proposals.len();

    // Confirming + Applying
    confirm_and_apply(proposals, Some(&conn), options, gate, &mut summary)?;
    Ok(summary)
}

/// Correct one-shot archives directly from a directory scan, without
/// database context.
pub fn correct_archives(
    dir: &Path,
    options: &RunOptions,
    gate: &mut dyn ConfirmationGate,
) -> Result<RunSummary, RunError> {
    // Loading
    if !dir.is_dir() {
        return Err(RunError::source_unavailable(format!(
            "archive directory {} does not exist",
            dir.display()
        )));
    }
    let mut files = Vec::new();
    collect_cbz_files(dir, &mut files)
        .map_err(|e| RunError::source_unavailable(format!("{}: {e}", dir.display())))?;
    // collapse symlinks so the same physical file cannot be counted or
    // rewritten twice
    let mut files: Vec<PathBuf> = files
        .into_iter()
        .map(|path| path.canonicalize().unwrap_or(path))
        .collect();
    files.sort();
    files.dedup();
    log::debug!("Found {} archives under {}", files.len(), dir.display());

    let mut summary = RunSummary::default();

    // Read every payload first so one-shot inference can consider sibling
    // issues in the same series grouping.
    let mut sheets: Vec<(PathBuf, ComicInfoSheet)> = Vec::new();
    let mut groups: HashMap<String, GroupCounts> = HashMap::new();
    for path in files {
        match read_sheet(&path) {
            Ok(sheet) => {
                if let Some(series) = sheet.series.as_deref() {
                    let counts = groups.entry(canonical_series(series)).or_default();
                    counts.total += 1;
                    if !is_blank(sheet.number.as_deref()) {
                        counts.numbered += 1;
                    }
                }
                sheets.push((path, sheet));
            }
            Err(e) => {
                log::warn!("{}: {e}, skipping", path.display());
                summary.skipped_unreadable += 1;
            }
        }
    }

    // Proposing
    let mut proposals = ProposalSet::default();
    for (path, sheet) in &sheets {
        log::debug!("{}: tagged by {}", path.display(), sheet.provider());
        let oneshot = infer_oneshot(sheet, &groups);
        for proposal in propose_sheet(path, sheet, oneshot) {
            proposals.insert(proposal);
        }
    }
    summary.proposed = proposals.len();

    // Confirming + Applying (no database targets can exist here)
    confirm_and_apply(proposals, None, options, gate, &mut summary)?;
    Ok(summary)
}

#[derive(Default)]
struct GroupCounts {
    total: usize,
    numbered: usize,
}

/// One-shot inference without database context.
///
/// A blank issue number counts as a one-shot when no sibling in the same
/// series grouping carries a number. The known defect value "1" counts
/// only when the entry is the sole archive of its grouping — a lone
/// first issue of an ongoing series is indistinguishable, and sole
/// membership is the conservative line.
fn infer_oneshot(sheet: &ComicInfoSheet, groups: &HashMap<String, GroupCounts>) -> bool {
    let Some(series) = sheet.series.as_deref() else {
        return false;
    };
    let Some(counts) = groups.get(&canonical_series(series)) else {
        return false;
    };
    let number = sheet.number.as_deref().map(str::trim).unwrap_or("");
    match number {
        "" => counts.numbered == 0,
        "1" => counts.total == 1,
        _ => false,
    }
}

fn is_blank(number: Option<&str>) -> bool {
    number.map(|n| n.trim().is_empty()).unwrap_or(true)
}

/// Propose embedded-metadata corrections for one database one-shot.
fn propose_archive_for_record(
    record: &SeriesRecord,
    options: &RunOptions,
    proposals: &mut ProposalSet,
    summary: &mut RunSummary,
) {
    let Some(url) = record.url.as_deref() else {
        log::warn!("{}: no book on file, skipping archive correction", record.name);
        summary.skipped_unreadable += 1;
        return;
    };
    let path = resolve_book_path(url, options.mapping.as_ref());
    // collapse symlinks so dedup by target holds across duplicate rows
    let path = path.canonicalize().unwrap_or(path);
    match read_sheet(&path) {
        Ok(sheet) => {
            log::debug!("{}: tagged by {}", path.display(), sheet.provider());
            for proposal in propose_sheet(&path, &sheet, true) {
                proposals.insert(proposal);
            }
        }
        Err(e) => {
            log::warn!("{}: {e}, skipping", path.display());
            summary.skipped_unreadable += 1;
        }
    }
}

/// Resolve a database-recorded book URL to a host path, applying the
/// active mapping.
fn resolve_book_path(url: &str, mapping: Option<&PathMapping>) -> PathBuf {
    let decoded = decode_book_url(url);
    match mapping {
        Some(mapping) => PathBuf::from(mapping.apply(&decoded)),
        None => PathBuf::from(decoded),
    }
}

fn read_sheet(path: &Path) -> Result<ComicInfoSheet, ArchiveError> {
    let payload = longbox_archive::read_metadata(path)?;
    longbox_archive::parse(&payload)
}

/// Confirming and Applying phases, shared by both drivers.
///
/// Database targets are applied one row at a time and abort on failure —
/// the store is transactional and not worth continuing past. Archive
/// edits are grouped so each archive is rebuilt exactly once, and a
/// failed rebuild is recorded and skipped.
fn confirm_and_apply(
    proposals: ProposalSet,
    conn: Option<&Connection>,
    options: &RunOptions,
    gate: &mut dyn ConfirmationGate,
    summary: &mut RunSummary,
) -> Result<(), RunError> {
    // Confirming
    let mut approved: Vec<CorrectionProposal> = Vec::new();
    for proposal in proposals.into_proposals() {
        if gate.approve(&proposal) {
            summary.confirmed += 1;
            approved.push(proposal);
        } else {
            log::info!("Rejected: {proposal}");
            summary.rejected += 1;
        }
    }

    if options.dry_run {
        log::info!("Dry run: no changes written");
        return Ok(());
    }

    // Applying
    let mut archive_groups: Vec<(PathBuf, Vec<FieldEdit>)> = Vec::new();
    for proposal in approved {
        match proposal.target.clone() {
            Target::SeriesTitle { series_id } => {
                // archive scans produce no database targets
                let Some(conn) = conn else { continue };
                longbox_db::update_series_title(conn, &series_id, &proposal.corrected).map_err(
                    |e| RunError::ApplyFailed {
                        id: series_id.clone(),
                        source: e,
                    },
                )?;
                log::info!("Applied: {proposal}");
                summary.applied += 1;
            }
            Target::ArchiveField { path, field } => {
                let edit = FieldEdit::new(field.tag(), proposal.corrected.clone());
                match archive_groups.iter_mut().find(|(p, _)| *p == path) {
                    Some((_, edits)) => edits.push(edit),
                    None => archive_groups.push((path, vec![edit])),
                }
            }
        }
    }

    for (path, edits) in archive_groups {
        let count = edits.len();
        match apply_archive_edits(&path, &edits) {
            Ok(()) => {
                log::info!("Updated {}", path.display());
                summary.applied += count;
            }
            Err(e) => {
                log::warn!("{}: {e}", path.display());
                summary.errors.push(format!("{}: {e}", path.display()));
            }
        }
    }

    Ok(())
}

fn apply_archive_edits(path: &Path, edits: &[FieldEdit]) -> Result<(), ArchiveError> {
    let payload = longbox_archive::read_metadata(path)?;
    let rewritten = longbox_archive::rewrite(&payload, edits)?;
    longbox_archive::replace_metadata(path, &rewritten)
}

/// Collect `.cbz` files under a directory, recursively.
fn collect_cbz_files(dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_cbz_files(&path, files)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("cbz"))
            .unwrap_or(false)
        {
            files.push(path);
        }
    }
    Ok(())
}
