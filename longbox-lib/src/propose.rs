//! Correction proposals: what the engine wants rewritten, and where.
//!
//! The builders here are pure functions of their input records — they
//! never touch the database or an archive, and they only emit a proposal
//! when the stored value differs from its canonical form, so re-running
//! on already-corrected data proposes nothing.

use std::fmt;
use std::path::{Path, PathBuf};

use longbox_archive::ComicInfoSheet;
use longbox_db::SeriesRecord;

use crate::normalize::{canonical_number, canonical_series};

/// A field of the embedded metadata payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComicField {
    Series,
    Title,
    Number,
}

impl ComicField {
    /// The element name inside the metadata payload.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Series => "Series",
            Self::Title => "Title",
            Self::Number => "Number",
        }
    }
}

/// The mutable location a proposal points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The matched title column of one database series row.
    SeriesTitle { series_id: String },
    /// One field of the metadata payload embedded in an archive.
    ArchiveField { path: PathBuf, field: ComicField },
}

impl Target {
    /// Deduplication key — one live proposal per mutable location, so the
    /// same physical file surfacing twice (symlinked library folders)
    /// cannot be rewritten twice.
    pub fn key(&self) -> String {
        match self {
            Self::SeriesTitle { series_id } => format!("db:{series_id}"),
            Self::ArchiveField { path, field } => {
                format!("cbz:{}:{}", path.display(), field.tag())
            }
        }
    }
}

/// An ordered (original, corrected) pair tied to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionProposal {
    pub target: Target,
    /// What the operator sees in prompts: series name or archive filename.
    pub subject: String,
    pub original: String,
    pub corrected: String,
}

impl fmt::Display for CorrectionProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Target::SeriesTitle { .. } => write!(
                f,
                "[{}] title \"{}\" -> \"{}\"",
                self.subject, self.original, self.corrected
            ),
            Target::ArchiveField { field, .. } => write!(
                f,
                "[{}] {} \"{}\" -> \"{}\"",
                self.subject,
                field.tag(),
                self.original,
                self.corrected
            ),
        }
    }
}

/// Propose a correction for the matched title of one database series.
///
/// Falls back to the series name when no title is stored yet.
pub fn propose_series_title(record: &SeriesRecord) -> Option<CorrectionProposal> {
    let current = record.title.clone().unwrap_or_default();
    let source = if current.is_empty() {
        record.name.as_str()
    } else {
        current.as_str()
    };
    let corrected = canonical_series(source);
    if corrected == current {
        return None;
    }
    Some(CorrectionProposal {
        target: Target::SeriesTitle {
            series_id: record.id.clone(),
        },
        subject: record.name.clone(),
        original: current,
        corrected,
    })
}

/// Propose corrections for the embedded metadata payload of one archive.
///
/// The series name is canonicalized, the title is kept aligned with it
/// (the matcher reads the title on one-shots), and the issue number is
/// normalized — forced to the absent sentinel when the entry is a
/// one-shot.
pub fn propose_sheet(
    path: &Path,
    sheet: &ComicInfoSheet,
    oneshot: bool,
) -> Vec<CorrectionProposal> {
    let subject = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut proposals = Vec::new();
    let mut push = |field: ComicField, original: &str, corrected: &str| {
        if original != corrected {
            proposals.push(CorrectionProposal {
                target: Target::ArchiveField {
                    path: path.to_path_buf(),
                    field,
                },
                subject: subject.clone(),
                original: original.to_string(),
                corrected: corrected.to_string(),
            });
        }
    };

    if let Some(series) = sheet.series.as_deref() {
        let canonical = canonical_series(series);
        push(ComicField::Series, series, &canonical);
        push(ComicField::Title, sheet.title.as_deref().unwrap_or(""), &canonical);
    }

    let current_number = sheet.number.as_deref().unwrap_or("");
    let corrected_number =
        canonical_number(sheet.number.as_deref(), oneshot).unwrap_or_default();
    push(ComicField::Number, current_number, &corrected_number);

    proposals
}
