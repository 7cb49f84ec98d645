//! User-facing progress reporting and run summaries.

use crate::checkpoint::Checkpoint;
use crate::models::GameId;

/// Notification level, mirroring how the message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    /// Successful completion.
    Ok,
    /// Recognized case the engine deliberately does not handle.
    Alert,
    Error,
}

/// Fire-and-forget sink for progress messages.
///
/// Implementations must not fail; the engine never depends on delivery.
pub trait Notifier {
    fn notify(&self, message: &str, severity: Severity);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity);
    }
}

/// A candidate whose record could not be downloaded or saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFailure {
    pub id: GameId,
    pub reason: String,
}

/// Outcome of a completed sync run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncSummary {
    /// Candidates found in the feed.
    pub discovered: usize,
    pub saved: usize,
    /// Candidates with an unsupported mode.
    pub skipped: usize,
    pub failures: Vec<DownloadFailure>,
    /// Checkpoint after the run.
    pub checkpoint: Checkpoint,
}

impl SyncSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
