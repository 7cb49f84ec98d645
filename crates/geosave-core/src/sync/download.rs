//! Sequential record downloads that advance the checkpoint.

use crate::api::RecordSource;
use crate::checkpoint::CheckpointStore;
use crate::models::{GameId, SyncCandidate};
use crate::storage::RecordStore;
use crate::util::crop_to_minutes;
use crate::{Error, Result};

use super::pacing::{delay, DelayRange};
use super::report::{DownloadFailure, Notifier, Severity};

/// Per-item outcomes of a download pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub saved: usize,
    pub skipped: usize,
    pub failures: Vec<DownloadFailure>,
    /// Last id the checkpoint was advanced to during this pass.
    pub last_saved: Option<GameId>,
}

/// Order candidates oldest first.
///
/// The sort is stable, so equal timestamps keep discovery order. Timestamps
/// that cannot be parsed sort before everything else.
pub fn sort_oldest_first(candidates: &mut [SyncCandidate]) {
    candidates.sort_by_key(SyncCandidate::sort_key);
}

/// Download, persist and checkpoint each candidate in the given order.
///
/// Fetch and persist failures are reported and skipped without touching the
/// checkpoint. A checkpoint write failure aborts the pass.
pub async fn download_candidates<R, S, C, N>(
    source: &R,
    records: &S,
    checkpoints: &C,
    candidates: &[SyncCandidate],
    download_delay: DelayRange,
    notifier: &N,
) -> Result<DownloadReport>
where
    R: RecordSource,
    S: RecordStore,
    C: CheckpointStore,
    N: Notifier,
{
    let mut report = DownloadReport::default();
    let total = candidates.len();

    for (index, candidate) in candidates.iter().enumerate() {
        let position = index + 1;
        let short_id = candidate.id.short();

        if let Some(family) = candidate.mode.endpoint_family() {
            let fetched = match source.fetch_record(&candidate.id, family).await {
                Ok(bytes) => records
                    .write_record(&candidate.id, &bytes)
                    .await
                    .map_err(|error| error.to_string()),
                Err(error) => Err(error.to_string()),
            };

            match fetched {
                Ok(()) => {
                    checkpoints.write(&candidate.id).await.map_err(|error| {
                        Error::Checkpoint(format!(
                            "saved {} but could not advance checkpoint: {error}",
                            candidate.id
                        ))
                    })?;
                    report.saved += 1;
                    report.last_saved = Some(candidate.id.clone());
                    notifier.notify(
                        &format!(
                            "({position}/{total}) Saved {short_id} ({}|{})",
                            candidate.mode,
                            crop_to_minutes(&candidate.timestamp)
                        ),
                        Severity::Info,
                    );
                }
                Err(reason) => {
                    tracing::warn!("Failed to download {}: {reason}", candidate.id);
                    notifier.notify(
                        &format!("({position}/{total}) Failed to download {}", candidate.id),
                        Severity::Error,
                    );
                    report.failures.push(DownloadFailure {
                        id: candidate.id.clone(),
                        reason,
                    });
                }
            }
        } else {
            report.skipped += 1;
            notifier.notify(
                &format!(
                    "({position}/{total}) Unsupported mode \"{}\" for game {short_id}",
                    candidate.mode
                ),
                Severity::Alert,
            );
        }

        if position < total {
            delay(download_delay).await;
        }
    }

    Ok(report)
}
