//! Single-run guard for a destination directory.

use std::fs::{File, OpenOptions, TryLockError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Lock file inside the destination, locked while a sync runs.
pub const LOCK_FILE_NAME: &str = ".geosave.lock";

/// Held for the duration of a sync.
///
/// The exclusive OS lock on the file is what guards the destination; it is
/// released when the guard drops or the process exits, so a killed run never
/// blocks the next one. The file itself stays behind with the last holder's pid.
#[derive(Debug)]
pub struct RunGuard {
    path: PathBuf,
    _file: File,
}

impl RunGuard {
    /// Claim `directory` for this process.
    ///
    /// Fails with [`Error::SyncInProgress`] when another run holds the lock.
    pub fn acquire(directory: &Path) -> Result<Self> {
        let path = directory.join(LOCK_FILE_NAME);
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        file.try_lock().map_err(|error| match error {
            TryLockError::WouldBlock => Error::SyncInProgress(directory.to_path_buf()),
            TryLockError::Error(error) => Error::Io(error),
        })?;

        file.set_len(0)?;
        if let Err(error) = writeln!(file, "{}", std::process::id()) {
            tracing::warn!("Failed to write pid to {}: {}", path.display(), error);
        }

        Ok(Self { path, _file: file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
