//! The propose/confirm/apply cycle against a running library server.

use longbox_db::SeriesRecord;
use longbox_lib::driver::RunSummary;
use longbox_lib::propose::{Target, propose_series_title};
use longbox_lib::ConfirmationGate;

use crate::client::Client;
use crate::error::RemoteError;
use crate::types::RemoteSeries;

/// Configuration for one server-side correction run.
#[derive(Debug, Default)]
pub struct RemoteOptions {
    /// Propose and confirm, but never send an update.
    pub dry_run: bool,
}

/// Correct series titles through the server API.
///
/// A failed listing is fatal; a failed update of one series is reported
/// and the run continues — the server applies each update independently.
pub fn correct_remote(
    client: &Client,
    options: &RemoteOptions,
    gate: &mut dyn ConfirmationGate,
) -> Result<RunSummary, RemoteError> {
    let series = client.list_series()?;
    log::debug!("Fetched {} series from {}", series.len(), client.base_url());

    let mut summary = RunSummary::default();
    let mut proposals = Vec::new();
    for series in &series {
        let record = to_record(series);
        if record.title_lock {
            log::debug!("{} is locked by the operator, skipping", record.name);
            summary.skipped_locked += 1;
            continue;
        }
        if let Some(proposal) = propose_series_title(&record) {
            proposals.push(proposal);
        }
    }
    summary.proposed = proposals.len();

    for proposal in proposals {
        if !gate.approve(&proposal) {
            log::info!("Rejected: {proposal}");
            summary.rejected += 1;
            continue;
        }
        summary.confirmed += 1;
        if options.dry_run {
            continue;
        }
        let Target::SeriesTitle { ref series_id } = proposal.target else {
            continue;
        };
        match client.update_series_title(series_id, &proposal.corrected) {
            Ok(()) => {
                log::info!("Applied: {proposal}");
                summary.applied += 1;
            }
            Err(e) => {
                log::warn!("{}: {e}", proposal.subject);
                summary.errors.push(format!("{}: {e}", proposal.subject));
            }
        }
    }

    if options.dry_run {
        log::info!("Dry run: no changes sent");
    }
    Ok(summary)
}

/// View a server series as a database record so the engine's proposal
/// builder applies unchanged.
fn to_record(series: &RemoteSeries) -> SeriesRecord {
    SeriesRecord {
        id: series.id.clone(),
        name: series.name.clone(),
        title: series.metadata.title.clone(),
        title_lock: series.metadata.title_lock,
        oneshot: series.oneshot,
        number: None,
        url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RemoteSeriesMetadata;

    #[test]
    fn server_series_maps_to_engine_record() {
        let series = RemoteSeries {
            id: "abc".to_string(),
            name: "Civil War:".to_string(),
            oneshot: true,
            metadata: RemoteSeriesMetadata {
                title: Some("Civil War:".to_string()),
                title_lock: false,
            },
        };
        let record = to_record(&series);
        assert_eq!(record.id, "abc");
        assert!(record.oneshot);

        let proposal = propose_series_title(&record).unwrap();
        assert_eq!(proposal.corrected, "Civil War");
    }
}
