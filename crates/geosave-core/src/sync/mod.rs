//! Incremental sync engine.
//!
//! A run reads the checkpoint, walks the feed back to it, downloads the new
//! games oldest first and advances the checkpoint after every saved record.
//! Everything is sequential; politeness delays separate remote requests.

mod download;
mod pacing;
mod paginate;
mod report;
#[cfg(test)]
pub(crate) mod testing;

use crate::api::{FeedSource, RecordSource};
use crate::checkpoint::{Checkpoint, CheckpointStore};
use crate::config::SyncConfig;
use crate::storage::RecordStore;
use crate::Result;

pub use download::{download_candidates, sort_oldest_first, DownloadReport};
pub use pacing::{delay, DelayRange};
pub use paginate::{collect_candidates, PaginateOptions};
pub use report::{DownloadFailure, Notifier, Severity, SyncSummary};

/// Composes the feed walk and the downloads into one run.
pub struct SyncEngine<'a, R, C, S, N> {
    remote: &'a R,
    checkpoints: &'a C,
    records: &'a S,
    notifier: &'a N,
    config: SyncConfig,
}

impl<'a, R, C, S, N> SyncEngine<'a, R, C, S, N>
where
    R: FeedSource + RecordSource,
    C: CheckpointStore,
    S: RecordStore,
    N: Notifier,
{
    pub const fn new(
        remote: &'a R,
        checkpoints: &'a C,
        records: &'a S,
        notifier: &'a N,
        config: SyncConfig,
    ) -> Self {
        Self {
            remote,
            checkpoints,
            records,
            notifier,
            config,
        }
    }

    /// Run one sync and report its outcome.
    ///
    /// Errors are logged and reported as a failed run before being returned;
    /// files and the checkpoint written before the error stay valid.
    pub async fn run(&self) -> Result<SyncSummary> {
        self.notifier.notify("Starting sync...", Severity::Info);

        match self.sync().await {
            Ok(summary) => {
                tracing::info!(
                    "Sync finished: {} saved, {} skipped, {} failed",
                    summary.saved,
                    summary.skipped,
                    summary.failed()
                );
                self.notifier.notify("Done.", Severity::Ok);
                Ok(summary)
            }
            Err(error) => {
                tracing::error!("Sync failed: {error}");
                self.notifier.notify("Sync failed to run", Severity::Error);
                Err(error)
            }
        }
    }

    async fn sync(&self) -> Result<SyncSummary> {
        let checkpoint = self.load_checkpoint().await?;
        self.notifier.notify(
            &format!("Latest downloaded: {checkpoint}"),
            Severity::Info,
        );

        let options = PaginateOptions {
            page_delay: self.config.page_delay,
            max_pages: self.config.max_pages,
        };
        let mut candidates =
            collect_candidates(self.remote, &checkpoint, options, self.notifier).await;
        self.notifier.notify(
            &format!("{} game(s) to download", candidates.len()),
            Severity::Info,
        );

        sort_oldest_first(&mut candidates);
        let report = download_candidates(
            self.remote,
            self.records,
            self.checkpoints,
            &candidates,
            self.config.download_delay,
            self.notifier,
        )
        .await?;

        let checkpoint = report.last_saved.map_or(checkpoint, Checkpoint::Saved);
        Ok(SyncSummary {
            discovered: candidates.len(),
            saved: report.saved,
            skipped: report.skipped,
            failures: report.failures,
            checkpoint,
        })
    }

    async fn load_checkpoint(&self) -> Result<Checkpoint> {
        if let Some(checkpoint) = self.checkpoints.read().await? {
            return Ok(checkpoint);
        }

        tracing::info!("No checkpoint marker found; starting from the beginning");
        self.checkpoints.initialize().await?;
        Ok(Checkpoint::Start)
    }
}
